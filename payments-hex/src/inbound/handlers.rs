//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use payments_types::{
    AppError, CreatePaymentResponse, ErrorResponse, ListPaymentsQuery, PaymentRepository,
    RawValue, messages,
};

use crate::PaymentService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository> {
    pub service: PaymentService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side causes are logged, never sent.
        let body = if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "request failed");
            ErrorResponse {
                error: messages::INTERNAL_SERVER_ERROR.into(),
                details: None,
            }
        } else {
            ErrorResponse {
                error: self.0.message(),
                details: self.0.details().map(<[String]>::to_vec),
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a panic caught inside the router.
pub fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: messages::INTERNAL_SERVER_ERROR.into(),
            details: None,
        }),
    )
        .into_response()
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Create a payment.
///
/// The body is taken as raw bytes so that malformed JSON is reported by the
/// validator like any other invalid input.
#[tracing::instrument(skip_all)]
pub async fn create_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input = RawValue::from_json_slice(&body);
    let payment = state.service.create_payment(input.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePaymentResponse {
            result: payment.id.clone(),
            payment,
        }),
    ))
}

/// Get payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.get_payment(&id).await?;
    Ok(Json(payment))
}

/// Lookup with an empty id segment (`/api/payments/`).
pub async fn get_payment_without_id<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.get_payment("").await?;
    Ok(Json(payment))
}

/// List payments, optionally filtered by currency.
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let list = state
        .service
        .list_payments(query.currency.as_deref())
        .await?;
    Ok(Json(list))
}
