//! Payment flow against the real API (use a test shop).
//!
//! Reads `KASSA_SHOP_ID`, `KASSA_SECRET_KEY` and optionally `KASSA_API_URL`
//! from the environment or a `.env` file.
//!
//! Run with: cargo run -p kassa-client --example payment_flow

use std::time::Duration;

use kassa_client::{Context, IdempotencyKey, Kassa, KassaConfig, KassaError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kassa_client=debug".into()),
        )
        .init();

    let config = KassaConfig::from_env()?;
    tracing::info!("Using API at {}", config.api_url());
    let kassa = Kassa::from_config(config)?;

    let ctx = Context::background().with_timeout(Duration::from_secs(30));

    // ─────────────────────────────────────────────────────────────────────────
    // Create a two-stage payment and send the payer to confirm it
    // ─────────────────────────────────────────────────────────────────────────

    let payment = kassa
        .new_payment("100.00", "RUB")
        .capture(false)
        .description("Demo order")
        .redirect("https://example.com/return")
        .metadata("source", "payment_flow example")
        .create(&ctx, IdempotencyKey::generate())
        .await?;

    println!("✅ Created payment {} ({:?})", payment.id, payment.status);
    if let Some(url) = payment.confirmation_url() {
        println!("   Confirm at: {url}");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Look it up again; an unpaid payment cannot be captured yet
    // ─────────────────────────────────────────────────────────────────────────

    let found = kassa.find_payment(&ctx, &payment.id).await?;
    println!("✅ Found payment {} ({:?})", found.id, found.status);

    match kassa
        .capture_payment(&ctx, IdempotencyKey::generate(), &payment.id, "100.00", "RUB")
        .await
    {
        Ok(p) => println!("✅ Captured payment {} ({:?})", p.id, p.status),
        Err(e @ (KassaError::Api { .. } | KassaError::Rejected { .. })) => {
            println!("⚠️  Capture refused by the API: {e}");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
