//! Fjordhem CLI - Catalog seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the backend with the default catalog
//! fjordhem seed
//!
//! # List, inspect, and edit products
//! fjordhem products list
//! fjordhem products get 1
//! fjordhem products create -n "Fjell Lamp" -p 39.99 -i /images/fjell.png
//! fjordhem products update 1 --price 44.99
//! fjordhem products delete 1
//! ```
//!
//! # Commands
//!
//! - `seed` - Populate the backend with the default furniture catalog
//! - `products` - Product CRUD against the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fjordhem")]
#[command(author, version, about = "Fjordhem CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the backend with the default catalog
    Seed,
    /// Manage catalog products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
    /// Show a single product
    Get {
        /// Product id
        id: String,
    },
    /// Create a product
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g., 49.99)
        #[arg(short, long)]
        price: String,

        /// Image reference
        #[arg(short, long)]
        image: String,
    },
    /// Update a product
    Update {
        /// Product id
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New unit price
        #[arg(long)]
        price: Option<String>,

        /// New image reference
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run().await?,
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list().await?,
            ProductsAction::Get { id } => commands::products::get(&id).await?,
            ProductsAction::Create { name, price, image } => {
                commands::products::create(&name, &price, &image).await?;
            }
            ProductsAction::Update {
                id,
                name,
                price,
                image,
            } => commands::products::update(&id, name, price, image).await?,
            ProductsAction::Delete { id } => commands::products::delete(&id).await?,
        },
    }
    Ok(())
}
