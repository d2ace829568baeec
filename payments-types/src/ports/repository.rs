//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (InMemory, SQLite, Postgres) implement this trait.

use crate::domain::{Currency, Payment, PaymentId};
use crate::error::RepoError;

/// Persistence contract for payment records.
///
/// `create` MUST be a conditional write: the existence check and the insert
/// happen atomically, so of several concurrent creates with the same id
/// exactly one succeeds and the rest get `RepoError::Conflict`.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Persists a payment unless one with the same id already exists.
    ///
    /// Missing `created_at`/`updated_at` are set to the write time.
    async fn create(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Gets a payment by id. A missing record is `Ok(None)`.
    async fn get(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Lists payments, newest-created first, optionally restricted to one currency.
    async fn list(&self, currency: Option<Currency>) -> Result<Vec<Payment>, RepoError>;
}
