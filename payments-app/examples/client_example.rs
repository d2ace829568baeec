//! Client example recording and querying payments against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example

use payments_client::{ClientError, PaymentsClient};
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use payments_types::Currency;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind first so the port is ours before the client connects
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on {addr}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url, "PaymentsTable").await?;
    let router = HttpServer::new(PaymentService::new(repo)).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("server error: {e}");
        }
    });

    let client = PaymentsClient::new(format!("http://{addr}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Record a few payments
    let usd = client.create_payment(1000.0, Currency::USD).await?;
    println!("✅ Created payment {} ({} USD)", usd.result, usd.payment.amount);

    let eur = client.create_payment(42.5, Currency::EUR).await?;
    println!("✅ Created payment {} ({} EUR)", eur.result, eur.payment.amount);

    client.create_payment(7.25, Currency::USD).await?;

    // Fetch one back
    let fetched = client.get_payment(usd.result.as_str()).await?;
    println!("✅ Fetched payment {} created at {:?}", fetched.id, fetched.created_at);

    // Unknown ids are a 404
    match client.get_payment("nonexistent-id").await {
        Err(ClientError::Api { status, message, .. }) => {
            println!("✅ Lookup of unknown id: {status} {message}")
        }
        other => anyhow::bail!("expected 404, got {other:?}"),
    }

    // List everything, then only USD
    let all = client.list_payments(None).await?;
    println!("\n📋 All payments ({}):", all.count);
    for p in &all.data {
        println!("   - {} {} {}", p.id, p.amount, p.currency);
    }

    let only_usd = client.list_payments(Some(Currency::USD)).await?;
    println!("\n📋 USD payments ({}):", only_usd.count);
    for p in &only_usd.data {
        println!("   - {} {}", p.id, p.amount);
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
