//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::{Amount, Currency};

/// Opaque identifier for a Payment.
///
/// Generated ids are UUID v4 strings, but lookups accept any text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "8f14e45f-ceea-467a-9575-0b6f4b2c1e0d")]
pub struct PaymentId(String);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PaymentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PaymentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A recorded payment.
///
/// Payments are immutable once created. `updated_at` mirrors `created_at`
/// since no operation modifies a stored payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier, assigned by the service
    pub id: PaymentId,
    /// Positive, finite amount
    pub amount: Amount,
    pub currency: Currency,
    /// When the payment was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub created_at: Option<DateTime<Utc>>,
    /// Equal to `created_at`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Creates a payment stamped with the given creation time.
    pub fn new(id: PaymentId, amount: Amount, currency: Currency, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            amount,
            currency,
            created_at: Some(created_at),
            updated_at: Some(created_at),
        }
    }

    /// Reconstructs a payment from stored fields.
    pub fn from_parts(
        id: PaymentId,
        amount: Amount,
        currency: Currency,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            amount,
            currency,
            created_at,
            updated_at,
        }
    }

    /// Fills in missing timestamps. Existing values are left untouched.
    pub fn stamp_if_missing(&mut self, now: DateTime<Utc>) {
        let created_at = *self.created_at.get_or_insert(now);
        self.updated_at.get_or_insert(created_at);
    }
}

/// Orders payments newest-created first.
///
/// Payments without `created_at` have no defined position relative to the
/// others, so they stay in the slot they arrived in while the stamped ones
/// are sorted around them.
pub fn sort_newest_first(payments: &mut [Payment]) {
    let slots: Vec<usize> = payments
        .iter()
        .enumerate()
        .filter(|(_, p)| p.created_at.is_some())
        .map(|(i, _)| i)
        .collect();

    let mut stamped: Vec<Payment> = slots.iter().map(|&i| payments[i].clone()).collect();
    stamped.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    for (slot, payment) in slots.into_iter().zip(stamped) {
        payments[slot] = payment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn payment(id: &str, created_at: Option<DateTime<Utc>>) -> Payment {
        Payment::from_parts(
            id.into(),
            Amount::new(10.0).unwrap(),
            Currency::USD,
            created_at,
            created_at,
        )
    }

    #[test]
    fn test_new_payment_sets_both_timestamps() {
        let now = Utc::now();
        let p = Payment::new(PaymentId::new(), Amount::new(5.0).unwrap(), Currency::AUD, now);
        assert_eq!(p.created_at, Some(now));
        assert_eq!(p.updated_at, Some(now));
    }

    #[test]
    fn test_stamp_if_missing_keeps_existing() {
        let mut p = payment("a", Some(at(0)));
        p.stamp_if_missing(at(100));
        assert_eq!(p.created_at, Some(at(0)));

        let mut q = payment("b", None);
        q.stamp_if_missing(at(100));
        assert_eq!(q.created_at, Some(at(100)));
        assert_eq!(q.updated_at, Some(at(100)));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut list = vec![payment("t1", Some(at(1))), payment("t3", Some(at(3))), payment("t2", Some(at(2)))];
        sort_newest_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_sort_leaves_unstamped_in_place() {
        let mut list = vec![
            payment("old", Some(at(0))),
            payment("none", None),
            payment("new", Some(at(0) + Duration::hours(1))),
        ];
        sort_newest_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "none", "old"]);
    }

    #[test]
    fn test_payment_json_shape() {
        let p = payment("abc", Some(at(0)));
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["amount"], 10.0);
        assert_eq!(json["currency"], "USD");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());

        let bare = serde_json::to_value(payment("x", None)).unwrap();
        assert!(bare.get("createdAt").is_none());
    }
}
