use crate::animator::{self, BalanceAnimator};
use crate::domain::{
    Action, BalanceChange, Error, Ledger,
    traits::{ActionStream, DeadLetterQueue, View},
};
use crate::ticker::Ticker;

use futures::StreamExt;
use tracing::debug;

/// Top-level controller. Owns the ledger and the animator and is the only
/// place where the two meet: every committed ledger change restarts the
/// animator exactly once.
#[derive(Debug)]
pub struct Engine<I, V, D, T>
where
    I: ActionStream,
    V: View,
    D: DeadLetterQueue,
    T: Ticker,
{
    ledger: Ledger,
    animator: BalanceAnimator,
    actions: I,
    view: V,
    dlq: D,
    ticker: T,
}

impl<I, V, D, T> Engine<I, V, D, T>
where
    I: ActionStream,
    V: View,
    D: DeadLetterQueue,
    T: Ticker,
{
    pub fn new(
        ledger: Ledger,
        animator: BalanceAnimator,
        actions: I,
        view: V,
        dlq: D,
        ticker: T,
    ) -> Self {
        Self {
            ledger,
            animator,
            actions,
            view,
            dlq,
            ticker,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn animator(&self) -> &BalanceAnimator {
        &self.animator
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Runs until the action stream ends or the user quits, then settles the
    /// display and prints the summary.
    pub async fn process(&mut self) -> Result<(), Error> {
        let mut actions = self.actions.stream();

        loop {
            tokio::select! {
                biased;

                now = self.ticker.next_frame(), if self.animator.is_animating() => {
                    let frame = self.animator.on_frame(now);
                    self.view.frame(frame)?;
                }

                next = actions.next() => match next {
                    Some(Ok(Action::Quit)) | None => break,
                    Some(Ok(action)) => self.handle(action)?,
                    Some(Err(e)) => self.dlq.report(&e),
                },
            }
        }

        self.settle().await?;
        self.view.summary(&self.ledger)
    }

    fn handle(&mut self, action: Action) -> Result<(), Error> {
        match action {
            Action::Show => self.view.board(&self.ledger),
            Action::Help => self.view.help(),
            action => match self.apply(action) {
                Some(change) => self.view.committed(change),
                None => Ok(()),
            },
        }
    }

    /// Applies a ledger action. Display-only actions are ignored here.
    pub fn apply(&mut self, action: Action) -> Option<BalanceChange> {
        debug!(%action, "apply");

        let change = match action {
            Action::Buy(id) => self.ledger.buy(id),
            Action::Sell(id) => self.ledger.sell(id),
            Action::SetQuantity { id, ref raw } => self.ledger.set_quantity_input(id, raw),
            Action::Show | Action::Help | Action::Quit => None,
        }?;

        self.animator.start(change.from, change.to);
        Some(change)
    }

    /// Drives any running animation to its final value.
    pub async fn settle(&mut self) -> Result<(), Error> {
        let view = &mut self.view;
        let mut result = Ok(());
        animator::drive(&mut self.animator, &mut self.ticker, |frame| {
            if result.is_ok() {
                result = view.frame(frame);
            }
        })
        .await;
        result
    }
}
