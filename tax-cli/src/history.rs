//! The history database as the command-line tools see it.

use std::sync::Arc;

use anyhow::{Context, Result};
use tax_core::TaxCalculator;
use tax_db_sqlite::SqliteRepository;
use tracing::{debug, warn};

/// Opens `database` (a path, a sqlx URL or `:memory:`) with its schema
/// migrated.
pub async fn open_repository(database: &str) -> Result<SqliteRepository> {
    debug!(database, "Opening repository");
    SqliteRepository::open(database)
        .await
        .with_context(|| format!("Failed to open history database: {}", database))
}

/// A calculator that records into `database` unless `no_save` is set.
///
/// A database that cannot be opened only costs the history entry; the
/// calculator still runs.
pub async fn calculator_for(
    database: &str,
    no_save: bool,
) -> TaxCalculator {
    if no_save {
        return TaxCalculator::new();
    }

    match open_repository(database).await {
        Ok(repository) => TaxCalculator::with_repository(Arc::new(repository)),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "History unavailable; result will not be saved");
            TaxCalculator::new()
        }
    }
}
