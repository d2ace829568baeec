//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use payments_types::{Amount, Currency, Payment, PaymentId, PaymentRepository, RepoError};

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:", "PaymentsTable")
            .await
            .unwrap()
    }

    fn payment(id: &str, amount: f64, currency: Currency) -> Payment {
        Payment::new(id.into(), Amount::new(amount).unwrap(), currency, Utc::now())
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = setup_repo().await;

        let created = repo
            .create(payment("p-1", 1000.0, Currency::USD))
            .await
            .unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.amount.value(), 1000.0);
        assert_eq!(fetched.currency, Currency::USD);
        assert_eq!(fetched.created_at, created.created_at);
        assert_eq!(fetched.updated_at, created.created_at);
    }

    #[tokio::test]
    async fn test_fractional_amount_is_kept() {
        let repo = setup_repo().await;

        repo.create(payment("p-frac", 12.345, Currency::SGD))
            .await
            .unwrap();

        let fetched = repo.get(&"p-frac".into()).await.unwrap().unwrap();
        assert_eq!(fetched.amount.value(), 12.345);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let repo = setup_repo().await;

        let result = repo.get(&PaymentId::from("nonexistent-id")).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = setup_repo().await;

        repo.create(payment("same", 10.0, Currency::USD))
            .await
            .unwrap();
        let result = repo.create(payment("same", 20.0, Currency::EUR)).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));

        let stored = repo.get(&"same".into()).await.unwrap().unwrap();
        assert_eq!(stored.amount.value(), 10.0);
        assert_eq!(stored.currency, Currency::USD);
    }

    #[tokio::test]
    async fn test_create_stamps_missing_timestamps() {
        let repo = setup_repo().await;
        let bare = Payment::from_parts(
            "bare".into(),
            Amount::new(1.0).unwrap(),
            Currency::AUD,
            None,
            None,
        );

        let created = repo.create(bare).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap().unwrap();

        assert!(fetched.created_at.is_some());
        assert_eq!(fetched.updated_at, fetched.created_at);
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first_with_filter() {
        let repo = setup_repo().await;
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let amount = Amount::new(5.0).unwrap();

        repo.create(Payment::new("first".into(), amount, Currency::USD, t1))
            .await
            .unwrap();
        repo.create(Payment::new(
            "second".into(),
            amount,
            Currency::GBP,
            t1 + Duration::seconds(30),
        ))
        .await
        .unwrap();
        repo.create(Payment::new(
            "third".into(),
            amount,
            Currency::USD,
            t1 + Duration::seconds(60),
        ))
        .await
        .unwrap();

        let all = repo.list(None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "second", "first"]);

        let usd = repo.list(Some(Currency::USD)).await.unwrap();
        let ids: Vec<&str> = usd.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["third", "first"]);
    }

    #[tokio::test]
    async fn test_rejects_bad_table_name() {
        let result = SqliteRepo::new("sqlite::memory:", "payments;--").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("nested/payments.db").display()
        );

        {
            let repo = SqliteRepo::new(&url, "payments").await.unwrap();
            repo.create(payment("kept", 7.5, Currency::EUR))
                .await
                .unwrap();
            repo.pool().close().await;
        }

        let reopened = SqliteRepo::new(&url, "payments").await.unwrap();
        let fetched = reopened.get(&"kept".into()).await.unwrap().unwrap();
        assert_eq!(fetched.amount.value(), 7.5);
    }
}
