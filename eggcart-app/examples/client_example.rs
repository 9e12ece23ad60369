//! End-to-end walkthrough of the checkout API using the client SDK.
//!
//! Expects a running server (`EGGCART_API_URL`, default
//! `http://localhost:3000`). The OTP verify step needs the code from the
//! mailbox, so this example only drives the send half of that flow.
//!
//! Run with: `cargo run --example client_example`

use eggcart_client::EggcartClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_url =
        std::env::var("EGGCART_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let client = EggcartClient::new(&api_url);

    println!("→ Checking health at {}", api_url);
    let healthy = client.health().await?;
    println!("  healthy: {}", healthy);

    println!("→ Requesting an OTP for demo@example.com");
    let resp = client.send_otp("demo@example.com").await?;
    match resp.error {
        None => println!("  code sent, check the mailbox"),
        Some(reason) => println!("  send failed: {}", reason),
    }

    println!("→ Creating a pending order for ₹500");
    let order = client.create_order(500.0, Some("demo-receipt"), vec![]).await?;
    println!("  order {} [{} / {}]", order.id, order.payment_status, order.order_status);

    println!("→ Creating a gateway payment order");
    match client.create_payment_order(500.0, None, Some("demo-receipt")).await {
        Ok(gw) => println!("  gateway order {} for {} {}", gw.order_id, gw.amount, gw.currency),
        Err(e) => println!("  gateway call failed (credentials configured?): {}", e),
    }

    Ok(())
}
