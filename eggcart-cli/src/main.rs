//! Eggcart CLI
//!
//! Command-line interface for the eggcart checkout API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use eggcart_client::EggcartClient;
use eggcart_types::{OrderId, OrderItem, VerifyPaymentRequest};

#[derive(Parser)]
#[command(name = "eggcart")]
#[command(author, version, about = "Eggcart checkout API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the checkout API
    #[arg(
        long,
        env = "EGGCART_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OTP operations
    Otp {
        #[command(subcommand)]
        action: OtpCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Local order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum OtpCommands {
    /// Request a verification code for an email
    Send {
        /// Destination mailbox
        email: String,
    },
    /// Redeem a verification code
    Verify {
        email: String,
        /// The 6-digit code from the email
        otp: String,
        /// Password for the new account (min 6 chars)
        #[arg(long)]
        password: Option<String>,
        /// Display name for the new account
        #[arg(long)]
        full_name: Option<String>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create a gateway payment order
    Create {
        /// Amount in major currency units (rupees)
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        receipt: Option<String>,
    },
    /// Verify a completed checkout callback
    Verify {
        #[arg(long)]
        razorpay_order_id: String,
        #[arg(long)]
        razorpay_payment_id: String,
        #[arg(long)]
        razorpay_signature: String,
        /// Local order ID (UUID)
        #[arg(long)]
        order: String,
        #[arg(long)]
        community: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        customer_name: String,
        /// Order items as a JSON array, e.g. '[{"name":"Dozen Eggs","quantity":2,"price":12000}]'
        #[arg(long, default_value = "[]")]
        items: String,
        #[arg(long)]
        total_amount: f64,
        #[arg(long)]
        subscription_end_date: Option<String>,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Create a pending local order
    Create {
        /// Total in major currency units (rupees)
        #[arg(long)]
        total: f64,
        #[arg(long)]
        receipt: Option<String>,
        /// Order items as a JSON array
        #[arg(long, default_value = "[]")]
        items: String,
    },
    /// Get order details
    Get {
        /// Order ID (UUID)
        id: String,
    },
}

fn parse_order_id(s: &str) -> Result<OrderId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid order ID: {}", s))
}

fn parse_items(s: &str) -> Result<Vec<OrderItem>> {
    serde_json::from_str(s).map_err(|e| anyhow::anyhow!("Invalid items JSON: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = EggcartClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Otp { action } => match action {
            OtpCommands::Send { email } => {
                let resp = client.send_otp(&email).await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
            OtpCommands::Verify {
                email,
                otp,
                password,
                full_name,
            } => {
                let resp = client.verify_otp(&email, &otp, password, full_name).await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                amount,
                currency,
                receipt,
            } => {
                let resp = client
                    .create_payment_order(amount, currency, receipt.as_deref())
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
            PaymentCommands::Verify {
                razorpay_order_id,
                razorpay_payment_id,
                razorpay_signature,
                order,
                community,
                address,
                phone,
                customer_name,
                items,
                total_amount,
                subscription_end_date,
            } => {
                // Validate the ID locally before hitting the API
                let order_id = parse_order_id(&order)?;
                let req = VerifyPaymentRequest {
                    razorpay_order_id,
                    razorpay_payment_id,
                    razorpay_signature,
                    order_id: order_id.to_string(),
                    community,
                    address,
                    phone,
                    customer_name,
                    items: parse_items(&items)?,
                    total_amount,
                    subscription_end_date,
                };
                let resp = client.verify_payment(&req).await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
        },

        Commands::Order { action } => match action {
            OrderCommands::Create {
                total,
                receipt,
                items,
            } => {
                let order = client
                    .create_order(total, receipt.as_deref(), parse_items(&items)?)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
            OrderCommands::Get { id } => {
                let order_id = parse_order_id(&id)?;
                let order = client.get_order(order_id).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
            }
        },
    }

    Ok(())
}
