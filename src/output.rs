use std::io::{self, IsTerminal, Stdout, Write};

use crate::animator::Frame;
use crate::domain::{BalanceChange, Error, Ledger, View};

/// Plain-text renderer.
///
/// In live mode (a terminal) every animation frame redraws the balance line
/// in place. Otherwise each committed balance is written once, one per line,
/// and frames are not rendered at all, so piped output never depends on
/// frame timing.
#[derive(Debug)]
pub struct TextView<W: Write> {
    out: W,
    live: bool,
}

impl TextView<Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let live = out.is_terminal();
        Self { out, live }
    }
}

impl<W: Write> TextView<W> {
    pub fn new(out: W, live: bool) -> Self {
        Self { out, live }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for TextView<W> {
    fn committed(&mut self, change: BalanceChange) -> Result<(), Error> {
        if !self.live {
            writeln!(self.out, "Balance: {}", change.to)?;
        }
        Ok(())
    }

    fn frame(&mut self, frame: Frame) -> Result<(), Error> {
        if !self.live {
            return Ok(());
        }
        write!(self.out, "\r\x1b[2KBalance: {}", frame.displayed)?;
        if frame.finished {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn board(&mut self, ledger: &Ledger) -> Result<(), Error> {
        writeln!(self.out, "Balance: {}", ledger.balance())?;
        writeln!(
            self.out,
            "{:>4}  {:<16}{:>12}{:>10}  {:<4} {:<4}",
            "id", "product", "price", "qty", "buy", "sell"
        )?;
        for product in ledger.catalog().iter() {
            writeln!(
                self.out,
                "{:>4}  {:<16}{:>12}{:>10}  {:<4} {:<4}",
                product.id,
                product.name,
                product.price.to_string(),
                ledger.quantity(product.id),
                if ledger.can_buy(product.id) { "yes" } else { "no" },
                if ledger.can_sell(product.id) { "yes" } else { "no" },
            )?;
        }
        Ok(())
    }

    fn help(&mut self) -> Result<(), Error> {
        writeln!(
            self.out,
            r#"Commands:
  buy <id>          Buy one unit
  sell <id>         Sell one unit
  set <id> <qty>    Set the owned quantity directly
  show              Show the catalog and balance
  help              Show this help
  quit              Exit"#
        )?;
        Ok(())
    }

    fn summary(&mut self, ledger: &Ledger) -> Result<(), Error> {
        writeln!(self.out, "Purchased items:")?;
        if ledger.total_spent().0 == 0 {
            writeln!(self.out, "  No purchases yet.")?;
        } else {
            for (product, qty) in ledger.purchases() {
                writeln!(self.out, "  {} x{} - {}", product.name, qty, product.price)?;
            }
        }
        writeln!(self.out, "Total spent: {}", ledger.total_spent())?;
        self.out.flush()?;
        Ok(())
    }
}
