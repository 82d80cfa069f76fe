use std::io;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use employee_tracker::config::Config;
use employee_tracker::gateway::Store;
use employee_tracker::textinterface::TextInterface;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "employee_tracker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("employee tracker aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    let store = Store::open(&config).context("connecting to the store")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    TextInterface::init(&store, stdin.lock(), stdout.lock()).run()?;

    store.close().context("releasing the store")?;
    Ok(())
}
