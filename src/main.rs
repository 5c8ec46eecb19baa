use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use spend_engine::animator::BalanceAnimator;
use spend_engine::config::Config;
use spend_engine::dlq::StdErrDLQ;
use spend_engine::domain::Ledger;
use spend_engine::engine::Engine;
use spend_engine::ingestion::CommandReader;
use spend_engine::output::TextView;
use spend_engine::ticker::IntervalTicker;

#[tokio::main(flavor = "current_thread")] // UI-style event loop, one thread
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    // Set up the components
    let catalog = config.load_catalog()?;
    let initial = config.initial_balance();
    tracing::info!(
        products = catalog.len(),
        balance = initial.as_units(),
        animation_ms = config.animation_duration().as_millis() as u64,
        "starting"
    );

    let ledger = Ledger::new(catalog, initial)?;
    let animator = BalanceAnimator::new(initial, config.animation_duration());
    let commands = CommandReader::new(BufReader::new(tokio::io::stdin()));
    let ticker = IntervalTicker::new(config.frame_period());

    let mut engine = Engine::new(
        ledger,
        animator,
        commands,
        TextView::stdout(),
        StdErrDLQ::default(),
        ticker,
    );

    engine.process().await?;

    Ok(())
}
