//! Shared database row types and error mapping for the SQL adapters.

use sqlx::FromRow;

use payments_types::{Amount, Currency, Payment, PaymentId, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from SQLite. Timestamps are stored as RFC 3339 text.
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqlitePaymentRow {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Payment row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgPaymentRow {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<Currency, RepoError> {
    s.parse()
        .map_err(|_| RepoError::Database(format!("Unknown currency: {}", s)))
}

pub fn parse_amount(value: f64) -> Result<Amount, RepoError> {
    Amount::new(value).map_err(|e| RepoError::Database(format!("Stored amount {}: {}", value, e)))
}

#[cfg(feature = "sqlite")]
fn parse_timestamp(s: Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>, RepoError> {
    s.map(|s| chrono::DateTime::parse_from_rfc3339(&s))
        .transpose()
        .map_err(|e| RepoError::Database(e.to_string()))
        .map(|dt| dt.map(|dt| dt.with_timezone(&chrono::Utc)))
}

/// Maps a failed insert to a repository error.
///
/// A unique-key violation means another writer created the same id first.
pub fn map_insert_error(id: &PaymentId, err: sqlx::Error) -> RepoError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepoError::Conflict(format!("Payment {} already exists", id))
        }
        _ => RepoError::Database(err.to_string()),
    }
}

/// Rejects table names that are not plain SQL identifiers.
///
/// The table name is interpolated into statements, so only
/// `[A-Za-z_][A-Za-z0-9_]*` is allowed.
pub fn check_table_name(table: &str) -> anyhow::Result<()> {
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        anyhow::bail!("Invalid table name: {:?}", table);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
impl SqlitePaymentRow {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        Ok(Payment::from_parts(
            PaymentId::from(self.id),
            parse_amount(self.amount)?,
            parse_currency(&self.currency)?,
            parse_timestamp(self.created_at)?,
            parse_timestamp(self.updated_at)?,
        ))
    }
}

#[cfg(feature = "postgres")]
impl PgPaymentRow {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        Ok(Payment::from_parts(
            PaymentId::from(self.id),
            parse_amount(self.amount)?,
            parse_currency(&self.currency)?,
            self.created_at,
            self.updated_at,
        ))
    }
}
