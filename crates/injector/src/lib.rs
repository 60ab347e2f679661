//! # ucinjector
//!
//! Pre-registers offline usernames in a Minecraft server's `usercache.json`
//! so they can authenticate without being present in the account registry.
//!
//! A run loads the record set and the name list, hands both to the
//! [`Reconciler`], and writes the merged record set back in one piece.

pub mod cli;
pub mod config;
pub mod identity;
pub mod model;
pub mod reconcile;
pub mod store;

pub use config::InjectorConfig;
pub use reconcile::{ReconcileOptions, ReconcileSummary, Reconciler};

use anyhow::{Context, Result};
use tracing::info;

use cli::{NamesLocation, RunConfig};
use identity::HttpIdentityValidator;
use store::{NameSource, NamesFile, RecordStore, UsercacheFile};

/// Loads, reconciles and persists through the given collaborators
pub async fn inject(
    store: &dyn RecordStore,
    source: &dyn NameSource,
    reconciler: &mut Reconciler,
    options: &ReconcileOptions,
) -> Result<ReconcileSummary> {
    let mut records = store.load().context("Failed to load the record set")?;
    let names = source
        .load_names()
        .context("Failed to read the name list")?;

    let summary = reconciler
        .reconcile(&mut records, &names, options)
        .await
        .context("Failed to reconcile the name list")?;

    store
        .persist(&records)
        .context("Failed to write the record set back")?;

    Ok(summary)
}

/// Runs one injection pass over the files named in `run`
///
/// All file checks happen before any reconciliation work, so configuration
/// problems never leave a partially processed run behind.
pub async fn run(run: &RunConfig, config: &InjectorConfig) -> Result<ReconcileSummary> {
    let usercache = UsercacheFile::open(&run.usercache)?;
    let names = match &run.names {
        NamesLocation::Explicit(path) => NamesFile::open(path)?,
        NamesLocation::Default(path) => NamesFile::open_or_create(path)?,
    };

    let options = ReconcileOptions::from(config);
    let mut reconciler = Reconciler::new();
    if options.validate_remotely {
        info!("Remote validation enabled");
        reconciler =
            reconciler.with_validator(Box::new(HttpIdentityValidator::new(&config.validation)?));
    }

    inject(&usercache, &names, &mut reconciler, &options).await
}
