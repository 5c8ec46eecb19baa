use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::animator::DEFAULT_DURATION;
use crate::domain::{Catalog, Error, Money};
use crate::ingestion::CsvCatalogReader;
use crate::ticker::IntervalTicker;

const DEFAULT_BALANCE: i64 = 100_000_000_000;

#[derive(Debug, Clone, Parser)]
#[command(name = "spend_engine")]
#[command(about = "Spend a fixed fortune on a fixed catalog, one command per line")]
#[command(version)]
pub struct Config {
    /// Starting balance in whole currency units
    #[arg(long, env = "SPEND_BALANCE", default_value_t = DEFAULT_BALANCE, allow_negative_numbers = true)]
    pub balance: i64,

    /// Catalog CSV with an `id,name,price` header (built-in catalog if omitted)
    #[arg(long, env = "SPEND_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Balance animation length in milliseconds; 0 or less settles instantly
    #[arg(long, env = "SPEND_ANIMATION_MS", default_value_t = DEFAULT_DURATION.as_millis() as i64, allow_negative_numbers = true)]
    pub animation_ms: i64,

    /// Frame period in milliseconds
    #[arg(long, env = "SPEND_FRAME_MS", default_value_t = IntervalTicker::DEFAULT_PERIOD.as_millis() as u64)]
    pub frame_ms: u64,
}

impl Config {
    /// Opening balance as given; `Ledger::new` refuses negative values.
    pub fn initial_balance(&self) -> Money {
        Money(self.balance)
    }

    pub fn animation_duration(&self) -> Duration {
        u64::try_from(self.animation_ms)
            .map(Duration::from_millis)
            .unwrap_or(Duration::ZERO)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn load_catalog(&self) -> Result<Catalog, Error> {
        match &self.catalog {
            Some(path) => CsvCatalogReader::new(File::open(path)?).read(),
            None => Ok(Catalog::default()),
        }
    }
}
