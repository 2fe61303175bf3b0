//! Apteka CLI - command-line storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! apteka catalog list
//! apteka catalog list --category painkillers
//! apteka catalog show 7
//! apteka catalog featured
//!
//! # Manage the cart
//! apteka cart show
//! apteka cart add 7 --quantity 2
//! apteka cart set 7 5
//! apteka cart remove 7
//! apteka cart clear --yes
//!
//! # Place an order
//! apteka checkout --name "Anna Ivanova" --phone "+7 (999) 123-45-67" \
//!     --email anna@example.com --delivery pickup
//! apteka orders list
//! ```
//!
//! # Environment Variables
//!
//! - `APTEKA_DATA_DIR` - Directory for persisted state
//! - `APTEKA_CATALOG_PATH` - Path to the product catalog JSON file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use apteka_storefront::services::DeliveryMethod;

mod commands;

#[derive(Parser)]
#[command(name = "apteka")]
#[command(author, version, about = "Apteka storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Validate the order form and place an order
    Checkout {
        /// Full name (first and last)
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: String,

        /// Delivery method (`pickup` or `delivery`)
        #[arg(long, default_value = "pickup")]
        delivery: DeliveryMethod,

        /// Pickup pharmacy
        #[arg(long)]
        pharmacy: Option<String>,

        /// Order comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// Inspect past orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally filtered by category
    List {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the full details of one product
    Show {
        /// Product id
        id: i32,
    },
    /// Show the featured selection (the first catalog entries)
    Featured {
        /// How many products to show
        #[arg(long, default_value_t = 4)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: i32,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Answer yes to confirmation prompts (prescription check)
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: i32,
    },
    /// Set the quantity of a product already in the cart (0 removes)
    Set {
        /// Product id
        id: i32,

        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear {
        /// Answer yes to the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List past order submissions
    List,
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = apteka_storefront::config::StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => {
                commands::catalog::list(&config, category.as_deref())?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&config, id)?,
            CatalogAction::Featured { count } => commands::catalog::featured(&config, count)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config)?,
            CartAction::Add { id, quantity, yes } => {
                commands::cart::add(&config, id, quantity, yes)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&config, id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&config, id, quantity)?,
            CartAction::Clear { yes } => commands::cart::clear(&config, yes)?,
        },
        Commands::Checkout {
            name,
            phone,
            email,
            delivery,
            pharmacy,
            comment,
        } => commands::checkout::run(&config, name, phone, email, delivery, pharmacy, comment)?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&config)?,
        },
    }

    Ok(())
}
