use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tax_core::{
    CalculationRepository, CalculationSummary, FilingStatus, FullTaxCalculationResult,
    RepositoryError, StoredCalculation, TaxReturnInput,
};
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal};

const SUMMARY_COLUMNS: &str = "id, created_at, filing_status, total_income, agi, taxable_income,
    federal_tax, total_credits, total_tax, effective_rate, marginal_rate, refund_or_owed";

/// Turns a connection string into a sqlx URL.
///
/// * `":memory:"` maps to `None`, meaning a private in-memory database.
/// * Anything already starting with `sqlite:` is passed through.
/// * A bare path becomes `sqlite:<path>?mode=rwc` so the file is created
///   when missing.
fn database_url(connection_string: &str) -> Option<String> {
    let trimmed = connection_string.trim();
    if trimmed == ":memory:" || trimmed == "sqlite::memory:" {
        None
    } else if trimmed.starts_with("sqlite:") {
        Some(trimmed.to_string())
    } else {
        Some(format!("sqlite:{}?mode=rwc", trimmed))
    }
}

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens the history database named by `connection_string` and brings
    /// its schema up to date.
    ///
    /// Accepted values:
    /// * A bare file path, e.g. `"history.db"`. Created if missing.
    /// * A sqlx URL, e.g. `"sqlite:history.db?mode=ro"`.
    /// * `":memory:"`, an ephemeral database that lives as long as the
    ///   repository.
    pub async fn open(connection_string: &str) -> Result<Self> {
        let repo = match database_url(connection_string) {
            Some(url) => {
                debug!(url = %url, "Opening SQLite database");
                Self::new(&url).await?
            }
            None => Self::in_memory().await?,
        };
        repo.run_migrations().await?;
        Ok(repo)
    }

    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    /// A private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens its own database, so the
    /// pool is held to one connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn row_to_summary(row: &SqliteRow) -> Result<CalculationSummary, RepositoryError> {
    let status: String = row.try_get("filing_status").map_err(db_error)?;
    let filing_status = FilingStatus::parse(&status).ok_or_else(|| {
        RepositoryError::Serialization(format!("Unknown filing status '{}'", status))
    })?;

    Ok(CalculationSummary {
        id: row.try_get("id").map_err(db_error)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        filing_status,
        total_income: get_decimal(row, "total_income")?,
        agi: get_decimal(row, "agi")?,
        taxable_income: get_decimal(row, "taxable_income")?,
        federal_tax: get_decimal(row, "federal_tax")?,
        total_credits: get_decimal(row, "total_credits")?,
        total_tax: get_decimal(row, "total_tax")?,
        effective_rate: get_decimal(row, "effective_rate")?,
        marginal_rate: get_decimal(row, "marginal_rate")?,
        refund_or_owed: get_decimal(row, "refund_or_owed")?,
    })
}

#[async_trait]
impl CalculationRepository for SqliteRepository {
    async fn save_calculation(
        &self,
        input: &TaxReturnInput,
        result: &FullTaxCalculationResult,
    ) -> Result<i64, RepositoryError> {
        let summary = &result.summary;
        let input_json = serde_json::to_string(input)?;
        let result_json = result.to_json()?;

        let inserted = sqlx::query(
            "INSERT INTO tax_calculations (
                created_at, filing_status, total_income, agi, taxable_income,
                federal_tax, total_credits, total_tax, effective_rate, marginal_rate,
                refund_or_owed, input_json, result_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(Utc::now())
        .bind(summary.filing_status.as_str())
        .bind(decimal_to_text(summary.total_income))
        .bind(decimal_to_text(summary.agi))
        .bind(decimal_to_text(summary.taxable_income))
        .bind(decimal_to_text(summary.total_income_tax_before_credits))
        .bind(decimal_to_text(summary.total_credits))
        .bind(decimal_to_text(summary.total_tax))
        .bind(decimal_to_text(summary.effective_rate))
        .bind(decimal_to_text(summary.marginal_rate))
        .bind(decimal_to_text(summary.refund_or_owed))
        .bind(input_json)
        .bind(result_json)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let id = inserted.last_insert_rowid();
        debug!(id, "Inserted tax calculation");
        Ok(id)
    }

    async fn list_calculations(&self) -> Result<Vec<CalculationSummary>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tax_calculations ORDER BY id DESC",
            SUMMARY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_summary).collect()
    }

    async fn get_calculation(
        &self,
        id: i64,
    ) -> Result<StoredCalculation, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {}, input_json, result_json FROM tax_calculations WHERE id = ?",
            SUMMARY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(RepositoryError::NotFound)?;

        let input_json: String = row.try_get("input_json").map_err(db_error)?;
        let result_json: String = row.try_get("result_json").map_err(db_error)?;

        Ok(StoredCalculation {
            summary: row_to_summary(&row)?,
            input: serde_json::from_str(&input_json)?,
            result: serde_json::from_str(&result_json)?,
        })
    }

    async fn delete_calculation(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tax_calculations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
