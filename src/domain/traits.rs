use futures::Stream;

use crate::animator::Frame;
use crate::domain::{Action, BalanceChange, Error, Ledger};

pub trait ActionStream {
    type Actions: Stream<Item = Result<Action, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::Actions;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

/// Everything the user sees. Renderers only read the ledger.
pub trait View {
    /// Called once per committed ledger change, before any of its frames.
    fn committed(&mut self, change: BalanceChange) -> Result<(), Error>;
    fn frame(&mut self, frame: Frame) -> Result<(), Error>;
    fn board(&mut self, ledger: &Ledger) -> Result<(), Error>;
    fn help(&mut self) -> Result<(), Error>;
    fn summary(&mut self, ledger: &Ledger) -> Result<(), Error>;
}
