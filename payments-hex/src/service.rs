//! Payment Application Service
//!
//! Orchestrates validation and persistence through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use chrono::Utc;

use payments_types::{
    AppError, CreatePaymentRequest, Currency, ListFilters, Payment, PaymentId, PaymentList,
    PaymentRepository, RawValue, messages, validate_payment_input,
};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
    id_source: fn() -> PaymentId,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self::with_id_source(repo, PaymentId::new)
    }

    /// Creates a service that draws new payment ids from `id_source`.
    pub fn with_id_source(repo: R, id_source: fn() -> PaymentId) -> Self {
        Self { repo, id_source }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validates a raw payload and records it as a new payment.
    ///
    /// `input` is `None` when the request carried no parseable body.
    #[tracing::instrument(skip_all)]
    pub async fn create_payment(&self, input: Option<&RawValue>) -> Result<Payment, AppError> {
        let req = validate_payment_input(input)
            .into_request()
            .map_err(|violations| {
                tracing::debug!(?violations, "payment input rejected");
                AppError::validation(&violations)
            })?;

        self.record_payment(req).await
    }

    /// Records an already validated payment request.
    ///
    /// The id and both timestamps are assigned here, never by the caller.
    #[tracing::instrument(skip(self), fields(amount = %req.amount, currency = %req.currency))]
    pub async fn record_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        let payment = Payment::new((self.id_source)(), req.amount, req.currency, Utc::now());

        let created = self.repo.create(payment).await?;
        tracing::info!(payment_id = %created.id, "payment created");
        Ok(created)
    }

    /// Gets a payment by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_payment(&self, id: &str) -> Result<Payment, AppError> {
        if id.trim().is_empty() {
            return Err(AppError::BadRequest(messages::PAYMENT_ID_REQUIRED.into()));
        }

        self.repo
            .get(&PaymentId::from(id))
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(messages::PAYMENT_NOT_FOUND.into()))
    }

    /// Lists payments, newest first, optionally filtered by currency code.
    ///
    /// An empty filter is treated as no filter.
    #[tracing::instrument(skip(self))]
    pub async fn list_payments(&self, currency: Option<&str>) -> Result<PaymentList, AppError> {
        let currency = match currency.filter(|c| !c.is_empty()) {
            Some(code) => Some(
                code.parse::<Currency>()
                    .map_err(|_| AppError::BadRequest(messages::INVALID_CURRENCY_FORMAT.into()))?,
            ),
            None => None,
        };

        let payments = self.repo.list(currency).await?;
        Ok(PaymentList::new(payments, ListFilters { currency }))
    }
}
