//! # ucinjector
//!
//! Command-line entry point: parse arguments, load configuration, run one
//! injection pass and print its summary.

use anyhow::{anyhow, Result};
use common::config::ConfigValidation;
use common::journal::init_logging;
use tracing::{info, warn};

use ucinjector::cli::{InjectorArgs, RunConfigResolver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = InjectorArgs::parse_args();

    let config = args.load_config()?;
    config.validate()?;

    init_logging(&config.logging).map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    let run = RunConfigResolver::resolve(&args, &config)?;
    info!(
        "Injecting names from {} into {}",
        run.names.path().display(),
        run.usercache.display()
    );

    let summary = ucinjector::run(&run, &config).await?;
    println!("{summary}");

    Ok(())
}
