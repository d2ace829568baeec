//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use payments_types::{
        Amount, AppError, CreatePaymentRequest, Currency, Payment, PaymentId, PaymentRepository,
        RawValue, RepoError, sort_newest_first,
    };

    use crate::PaymentService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        payments: Mutex<HashMap<PaymentId, Payment>>,
        last_filter: Mutex<Option<Option<Currency>>>,
        fail_with: Option<String>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                payments: Mutex::new(HashMap::new()),
                last_filter: Mutex::new(None),
                fail_with: None,
            }
        }

        /// A repository whose every call fails with a store error.
        pub fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::new()
            }
        }

        fn check(&self) -> Result<(), RepoError> {
            match &self.fail_with {
                Some(msg) => Err(RepoError::Database(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PaymentRepository for MockRepo {
        async fn create(&self, mut payment: Payment) -> Result<Payment, RepoError> {
            self.check()?;
            let mut payments = self.payments.lock().unwrap();
            if payments.contains_key(&payment.id) {
                return Err(RepoError::Conflict(format!(
                    "Payment {} already exists",
                    payment.id
                )));
            }
            payment.stamp_if_missing(Utc::now());
            payments.insert(payment.id.clone(), payment.clone());
            Ok(payment)
        }

        async fn get(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError> {
            self.check()?;
            Ok(self.payments.lock().unwrap().get(id).cloned())
        }

        async fn list(&self, currency: Option<Currency>) -> Result<Vec<Payment>, RepoError> {
            self.check()?;
            *self.last_filter.lock().unwrap() = Some(currency);
            let mut list: Vec<Payment> = self
                .payments
                .lock()
                .unwrap()
                .values()
                .filter(|p| currency.is_none_or(|c| p.currency == c))
                .cloned()
                .collect();
            sort_newest_first(&mut list);
            Ok(list)
        }
    }

    fn body(amount: impl Into<RawValue>, currency: impl Into<RawValue>) -> RawValue {
        RawValue::object([("amount", amount.into()), ("currency", currency.into())])
    }

    fn fixed_id() -> PaymentId {
        PaymentId::from("fixed-id")
    }

    #[tokio::test]
    async fn test_create_payment_success() {
        let service = PaymentService::new(MockRepo::new());

        let payment = service
            .create_payment(Some(&body(1000.0, "USD")))
            .await
            .unwrap();

        assert_eq!(payment.amount.value(), 1000.0);
        assert_eq!(payment.currency, Currency::USD);
        assert!(!payment.id.as_str().is_empty());
        assert!(payment.created_at.is_some());
        assert_eq!(payment.updated_at, payment.created_at);
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let service = PaymentService::new(MockRepo::new());

        let a = service.create_payment(Some(&body(1.0, "AUD"))).await.unwrap();
        let b = service.create_payment(Some(&body(1.0, "AUD"))).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let service = PaymentService::new(MockRepo::new());

        let created = service
            .create_payment(Some(&body(42.5, "EUR")))
            .await
            .unwrap();
        let fetched = service.get_payment(created.id.as_str()).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount, created.amount);
        assert_eq!(fetched.currency, created.currency);
    }

    #[tokio::test]
    async fn test_create_invalid_input_is_validation_error() {
        let service = PaymentService::new(MockRepo::new());

        let result = service.create_payment(Some(&body(-5.0, "XXX"))).await;

        match result {
            Err(AppError::Validation { details }) => assert_eq!(
                details,
                vec![
                    "Amount must be greater than 0",
                    "Currency must be one of: USD, AUD, EUR, GBP, SGD"
                ]
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(service.repo().payments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_absent_body_is_validation_error() {
        let service = PaymentService::new(MockRepo::new());

        let err = service.create_payment(None).await.unwrap_err();

        assert_eq!(err.status_code(), 422);
        assert_eq!(err.details().unwrap(), ["Invalid input format"]);
    }

    #[tokio::test]
    async fn test_forced_duplicate_id_conflicts() {
        let service = PaymentService::with_id_source(MockRepo::new(), fixed_id);

        let first = service.create_payment(Some(&body(10.0, "USD"))).await;
        let second = service.create_payment(Some(&body(20.0, "USD"))).await;

        assert_eq!(first.unwrap().id, fixed_id());
        assert!(matches!(second, Err(AppError::Conflict(_))));

        let stored = service.get_payment("fixed-id").await.unwrap();
        assert_eq!(stored.amount.value(), 10.0);
    }

    #[tokio::test]
    async fn test_record_payment_uses_validated_request() {
        let service = PaymentService::new(MockRepo::new());

        let payment = service
            .record_payment(CreatePaymentRequest {
                amount: Amount::new(3.5).unwrap(),
                currency: Currency::SGD,
            })
            .await
            .unwrap();

        assert_eq!(payment.currency, Currency::SGD);
    }

    #[tokio::test]
    async fn test_get_payment_not_found() {
        let service = PaymentService::new(MockRepo::new());

        let result = service.get_payment("nonexistent-id").await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Payment not found"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_payment_blank_id_is_bad_request() {
        let service = PaymentService::new(MockRepo::new());

        for id in ["", "   "] {
            match service.get_payment(id).await {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Payment ID is required"),
                other => panic!("expected bad request, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_list_payments_without_filter() {
        let service = PaymentService::new(MockRepo::new());
        service.create_payment(Some(&body(1.0, "USD"))).await.unwrap();
        service.create_payment(Some(&body(2.0, "GBP"))).await.unwrap();

        let list = service.list_payments(None).await.unwrap();

        assert_eq!(list.count, 2);
        assert_eq!(list.data.len(), 2);
        assert!(list.filters.currency.is_none());
        assert_eq!(*service.repo().last_filter.lock().unwrap(), Some(None));
    }

    #[tokio::test]
    async fn test_list_payments_with_filter() {
        let service = PaymentService::new(MockRepo::new());
        service.create_payment(Some(&body(1.0, "USD"))).await.unwrap();
        service.create_payment(Some(&body(2.0, "AUD"))).await.unwrap();
        service.create_payment(Some(&body(3.0, "USD"))).await.unwrap();

        let list = service.list_payments(Some("USD")).await.unwrap();

        assert_eq!(list.count, 2);
        assert!(list.data.iter().all(|p| p.currency == Currency::USD));
        assert_eq!(list.filters.currency, Some(Currency::USD));
    }

    #[tokio::test]
    async fn test_list_payments_empty_filter_means_all() {
        let service = PaymentService::new(MockRepo::new());
        service.create_payment(Some(&body(1.0, "USD"))).await.unwrap();

        let list = service.list_payments(Some("")).await.unwrap();

        assert_eq!(list.count, 1);
        assert!(list.filters.currency.is_none());
    }

    #[tokio::test]
    async fn test_list_payments_invalid_filter_is_bad_request() {
        let service = PaymentService::new(MockRepo::new());

        for filter in ["XXX", "usd", "US"] {
            match service.list_payments(Some(filter)).await {
                Err(AppError::BadRequest(msg)) => {
                    assert!(msg.starts_with("Invalid currency format"))
                }
                other => panic!("expected bad request, got {:?}", other),
            }
        }
        assert!(service.repo().last_filter.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_payments_newest_first() {
        let service = PaymentService::new(MockRepo::new());
        let t1 = Utc::now() - Duration::minutes(10);
        let amount = Amount::new(1.0).unwrap();
        service
            .repo()
            .create(Payment::new("older".into(), amount, Currency::USD, t1))
            .await
            .unwrap();
        service
            .repo()
            .create(Payment::new(
                "newer".into(),
                amount,
                Currency::USD,
                t1 + Duration::minutes(5),
            ))
            .await
            .unwrap();

        let list = service.list_payments(None).await.unwrap();
        let ids: Vec<&str> = list.data.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_store_failures_become_internal_errors() {
        let service = PaymentService::new(MockRepo::failing("connection reset"));

        let create = service
            .create_payment(Some(&body(1.0, "USD")))
            .await
            .unwrap_err();
        let get = service.get_payment("any").await.unwrap_err();
        let list = service.list_payments(None).await.unwrap_err();

        for err in [create, get, list] {
            assert_eq!(err.status_code(), 500);
            assert_eq!(err.message(), "connection reset");
        }
    }
}
