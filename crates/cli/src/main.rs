//! Kirana CLI - Catalog browsing and scripted demo flows.
//!
//! # Usage
//!
//! ```bash
//! # Browse the demo catalog
//! kirana browse --search wireless --sort price-low
//!
//! # Filter by facets
//! kirana browse --in-stock --rating 4 --price under-500 --price 2500-up
//!
//! # Run the scripted end-to-end demo (sign-in, cart, checkout)
//! kirana demo
//! ```
//!
//! # Commands
//!
//! - `browse` - Run the catalog query pipeline and print the results
//! - `demo` - Drive a full session: OTP sign-in, cart, checkout, logout

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kirana")]
#[command(author, version, about = "Kirana CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the demo catalog with search, filters, and sort
    Browse {
        /// Free-text search over names, descriptions, and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order: popularity, price-low, price-high, rating, newest
        #[arg(long, default_value = "popularity")]
        sort: String,

        /// Only in-stock products
        #[arg(long)]
        in_stock: bool,

        /// Only on-sale products
        #[arg(long)]
        on_sale: bool,

        /// Only new arrivals
        #[arg(long = "new")]
        new_arrivals: bool,

        /// Minimum rating: 3 or 4
        #[arg(long)]
        rating: Option<u8>,

        /// Price bracket id (repeatable): under-500, 500-999, 1000-2499, 2500-up
        #[arg(long = "price")]
        price: Vec<String>,
    },
    /// Run a scripted end-to-end demo session
    Demo,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kirana=info,kirana_shop=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse {
            search,
            category,
            sort,
            in_stock,
            on_sale,
            new_arrivals,
            rating,
            price,
        } => {
            let options = commands::browse::BrowseOptions {
                search,
                category,
                sort,
                in_stock,
                on_sale,
                new_arrivals,
                rating,
                price,
            };
            commands::browse::run(&options)?;
        }
        Commands::Demo => commands::demo::run().await?,
    }
    Ok(())
}
