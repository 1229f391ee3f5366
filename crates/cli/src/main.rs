//! Retrovolt CLI - command-line storefront.
//!
//! Each invocation restores the stores from the data directory, runs one
//! command, and exits; cart and session state round-trip through storage
//! between runs.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! retrovolt catalog
//!
//! # Sign in and check the session
//! retrovolt auth login -e buyer@example.com -p hunter2
//! retrovolt auth whoami
//!
//! # Build up a cart
//! retrovolt cart add --product 665f1c2e9b1d --qty 2
//! retrovolt cart show
//!
//! # Place the order (clears the cart on success)
//! retrovolt checkout
//!
//! # Review past orders
//! retrovolt orders
//! ```
//!
//! # Environment Variables
//!
//! - `RETROVOLT_API_BASE` - Shop API base URL (default: `http://localhost:5000`)
//! - `RETROVOLT_DATA_DIR` - Directory for persisted state (default: `.retrovolt`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use retrovolt_client::ApiClient;
use retrovolt_store::{StoreConfig, StoreContext};

mod commands;

/// Shop API base URL used when `RETROVOLT_API_BASE` is unset.
const DEFAULT_API_BASE: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(name = "retrovolt")]
#[command(author, version, about = "Retrovolt command-line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the login session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List the product catalog
    Catalog,
    /// Submit the cart as an order
    Checkout,
    /// Show the signed-in account's order history
    Orders,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the current identity
    Whoami,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID from the catalog
        #[arg(short, long)]
        product: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Change the quantity of a cart line
    SetQty {
        /// Product ID of the line
        #[arg(short, long)]
        product: String,

        /// New number of units (minimum 1)
        #[arg(short, long)]
        qty: u32,
    },
    /// Remove a cart line
    Remove {
        /// Product ID of the line
        #[arg(short, long)]
        product: String,
    },
    /// Show the cart with subtotal, discount, and total
    Show,
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let mut ctx = StoreContext::open(&config)?;
    let api = ApiClient::new(
        std::env::var("RETROVOLT_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned()),
    );

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut ctx, &api, &email, &password).await?;
            }
            AuthAction::Register { email, password } => {
                commands::auth::register(&mut ctx, &api, &email, &password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&mut ctx),
            AuthAction::Whoami => commands::auth::whoami(&ctx),
        },
        Commands::Cart { action } => match action {
            CartAction::Add { product, qty } => {
                commands::cart::add(&mut ctx, &api, &product, qty).await?;
            }
            CartAction::SetQty { product, qty } => commands::cart::set_qty(&mut ctx, &product, qty),
            CartAction::Remove { product } => commands::cart::remove(&mut ctx, &product),
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Catalog => commands::catalog::list(&api).await?,
        Commands::Checkout => commands::checkout::submit(&mut ctx, &api).await?,
        Commands::Orders => commands::orders::list(&ctx, &api).await?,
    }
    Ok(())
}
