//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use payments_types::{
    Currency, Payment, PaymentId, PaymentRepository, RepoError, sort_newest_first,
};

use crate::types::{PgPaymentRow, check_table_name, map_insert_error};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository. Uniqueness of `id` is enforced by the primary key.
pub struct PostgresRepo {
    pool: PgPool,
    table: String,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Connects and runs migrations.
    pub async fn new(database_url: &str, table: &str) -> anyhow::Result<Self> {
        check_table_name(table)?;

        let pool = PgPool::connect(database_url).await?;

        let ddl = include_str!("../migrations/0001_create_payments_pg.sql").replace("{table}", table);
        execute_migration(&pool, &ddl, "0001").await?;

        tracing::debug!(table = %table, "postgres payment store ready");
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PaymentRepository for PostgresRepo {
    async fn create(&self, mut payment: Payment) -> Result<Payment, RepoError> {
        payment.stamp_if_missing(Utc::now());

        let sql = format!(
            "INSERT INTO {} (id, amount, currency, created_at, updated_at) VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(payment.id.as_str())
            .bind(payment.amount.value())
            .bind(payment.currency.code())
            .bind(payment.created_at)
            .bind(payment.updated_at)
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
            "SELECT id, amount, currency, created_at, updated_at FROM {} WHERE id = $1",
            self.table
        );

        let row: Option<PgPaymentRow> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgPaymentRow::into_domain).transpose()
    }

    async fn list(&self, currency: Option<Currency>) -> Result<Vec<Payment>, RepoError> {
        // A NULL filter matches every row.
        let sql = format!(
            "SELECT id, amount, currency, created_at, updated_at FROM {} WHERE ($1::TEXT IS NULL OR currency = $1)",
            self.table
        );

        let rows: Vec<PgPaymentRow> = sqlx::query_as(&sql)
            .bind(currency.map(|c| c.code()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        let mut payments = rows
            .into_iter()
            .map(PgPaymentRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        sort_newest_first(&mut payments);
        Ok(payments)
    }
}
