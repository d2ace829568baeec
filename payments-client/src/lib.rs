//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use payments_types::{
    Amount, CreatePaymentRequest, CreatePaymentResponse, Currency, DomainError, Payment,
    PaymentList,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        /// Rule violations reported with a 422
        details: Vec<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Invalid(#[from] DomainError),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Records a new payment.
    ///
    /// Amounts that could never pass validation are rejected before sending.
    pub async fn create_payment(
        &self,
        amount: f64,
        currency: Currency,
    ) -> Result<CreatePaymentResponse, ClientError> {
        let req = CreatePaymentRequest {
            amount: Amount::new(amount)?,
            currency,
        };
        let resp = self
            .http
            .post(format!("{}/api/payments", self.base_url))
            .json(&req)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: &str) -> Result<Payment, ClientError> {
        let resp = self.http.get(self.payment_url(id)?).send().await?;
        handle_response(resp).await
    }

    /// URL of a single payment, with `id` encoded as one path segment.
    fn payment_url(&self, id: &str) -> Result<reqwest::Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = reqwest::Url::parse(&format!("{}/api/payments", self.base_url))
            .map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(id);
        Ok(url)
    }

    /// Lists payments, newest first, optionally in one currency.
    pub async fn list_payments(
        &self,
        currency: Option<Currency>,
    ) -> Result<PaymentList, ClientError> {
        let mut req = self.http.get(format!("{}/api/payments", self.base_url));
        if let Some(currency) = currency {
            req = req.query(&[("currency", currency.code())]);
        }
        let resp = req.send().await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(api_error(status.as_u16(), body))
    }
}

/// Builds an `Api` error from a failed response body.
///
/// Falls back to the raw body when it is not a JSON error document.
fn api_error(status: u16, body: String) -> ClientError {
    let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("error")?.as_str().map(String::from))
        .unwrap_or(body);
    let details = parsed
        .as_ref()
        .and_then(|v| v.get("details")?.as_array().cloned())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|d| d.as_str().map(String::from))
        .collect();

    ClientError::Api {
        status,
        message,
        details,
    }
}
