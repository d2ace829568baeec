//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{Amount, Currency, Payment, PaymentId};
use payments_types::dto::{
    CreatePaymentRequest, CreatePaymentResponse, ErrorResponse, ListFilters, PaymentList,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a payment
///
/// Only `amount` and `currency` are accepted; the id and timestamps are
/// assigned by the service.
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = CreatePaymentResponse),
        (status = 409, description = "A payment with the generated id already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse,
            example = json!({"error": "Validation failed", "details": ["Amount is required"]})),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_payment() {}

/// Get a payment by id
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Payment id")
    ),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 400, description = "Payment ID is required", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_payment() {}

/// List payments, newest first
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    params(
        ("currency" = Option<String>, Query, description = "Only return payments in this currency", example = "USD")
    ),
    responses(
        (status = 200, description = "Payments", body = PaymentList),
        (status = 400, description = "Invalid currency format", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_payments() {}

/// OpenAPI documentation for the Payments API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments Record Service API",
        version = "1.0.0",
        description = "Create, fetch and list immutable payment records.\n\nAccepted currencies: USD, AUD, EUR, GBP, SGD.",
        license(name = "MIT"),
    ),
    paths(health, create_payment, get_payment, list_payments),
    components(
        schemas(
            CreatePaymentRequest,
            CreatePaymentResponse,
            PaymentList,
            ListFilters,
            ErrorResponse,
            Payment,
            PaymentId,
            Amount,
            Currency,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment records"),
    )
)]
pub struct ApiDoc;
