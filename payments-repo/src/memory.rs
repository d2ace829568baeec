//! In-memory repository adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use payments_types::{
    Currency, Payment, PaymentId, PaymentRepository, RepoError, sort_newest_first,
};

/// A thread-safe in-memory payment store.
///
/// The existence check and the insert in `create` happen under the same
/// shard lock, which gives the conditional-write guarantee. Clones share
/// the same underlying map.
#[derive(Default, Clone)]
pub struct InMemoryRepo {
    payments: Arc<DashMap<PaymentId, Payment>>,
}

impl InMemoryRepo {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payments.
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryRepo {
    async fn create(&self, mut payment: Payment) -> Result<Payment, RepoError> {
        match self.payments.entry(payment.id.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(payment_id = %payment.id, "payment id already exists");
                Err(RepoError::Conflict(format!(
                    "Payment {} already exists",
                    payment.id
                )))
            }
            Entry::Vacant(slot) => {
                payment.stamp_if_missing(Utc::now());
                slot.insert(payment.clone());
                Ok(payment)
            }
        }
    }

    async fn get(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, currency: Option<Currency>) -> Result<Vec<Payment>, RepoError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|entry| currency.is_none_or(|c| entry.value().currency == c))
            .map(|entry| entry.value().clone())
            .collect();

        sort_newest_first(&mut payments);
        Ok(payments)
    }
}
