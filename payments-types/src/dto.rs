//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Amount, Currency, Payment, PaymentId};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new payment.
///
/// Inbound bodies go through the validator rather than straight into this
/// type; it is what a valid body turns into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePaymentRequest {
    /// Positive, finite amount
    pub amount: Amount,
    pub currency: Currency,
}

/// Response after creating a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentResponse {
    /// Id of the created payment
    pub result: PaymentId,
    pub payment: Payment,
}

/// Filters applied to a listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

/// A listing of payments, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentList {
    pub data: Vec<Payment>,
    /// Number of entries in `data`
    pub count: usize,
    pub filters: ListFilters,
}

impl PaymentList {
    pub fn new(data: Vec<Payment>, filters: ListFilters) -> Self {
        Self {
            count: data.len(),
            data,
            filters,
        }
    }
}

/// Query string for listing payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListPaymentsQuery {
    /// Exact currency code to filter by
    #[schema(example = "USD")]
    pub currency: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Payment not found")]
    pub error: String,
    /// Rule violations, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}
