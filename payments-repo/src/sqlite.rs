//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use payments_types::{
    Currency, Payment, PaymentId, PaymentRepository, RepoError, sort_newest_first,
};

use crate::types::{SqlitePaymentRow, check_table_name, map_insert_error};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
    table: String,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str, table: &str) -> anyhow::Result<Self> {
        check_table_name(table)?;

        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self {
            pool,
            table: table.to_string(),
        };
        repo.create_schema().await?;

        tracing::debug!(table = %repo.table, "sqlite payment store ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the payments table if it does not exist.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_payments.sql").replace("{table}", &self.table);
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn create(&self, mut payment: Payment) -> Result<Payment, RepoError> {
        payment.stamp_if_missing(Utc::now());

        let sql = format!(
            "INSERT INTO {} (id, amount, currency, created_at, updated_at) VALUES (?, ?, ?, ?, ?) ON CONFLICT (id) DO NOTHING",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(payment.id.as_str())
            .bind(payment.amount.value())
            .bind(payment.currency.code())
            .bind(payment.created_at.map(|dt| dt.to_rfc3339()))
            .bind(payment.updated_at.map(|dt| dt.to_rfc3339()))
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(&payment.id, e))?;

        if result.rows_affected() == 0 {
            tracing::warn!(payment_id = %payment.id, "payment id already exists");
            return Err(RepoError::Conflict(format!(
                "Payment {} already exists",
                payment.id
            )));
        }

        Ok(payment)
    }

    async fn get(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError> {
        let sql = format!(
            "SELECT id, amount, currency, created_at, updated_at FROM {} WHERE id = ?",
            self.table
        );

        let row: Option<SqlitePaymentRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqlitePaymentRow::into_domain).transpose()
    }

    async fn list(&self, currency: Option<Currency>) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<SqlitePaymentRow> = match currency {
            Some(currency) => {
                let sql = format!(
                    "SELECT id, amount, currency, created_at, updated_at FROM {} WHERE currency = ?",
                    self.table
                );
                sqlx::query_as(&sql)
                    .bind(currency.code())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT id, amount, currency, created_at, updated_at FROM {}",
                    self.table
                );
                sqlx::query_as(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut payments = rows
            .into_iter()
            .map(SqlitePaymentRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut payments);
        Ok(payments)
    }
}
