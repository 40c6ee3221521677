use clap::{Parser, Subcommand};
use quire_app::{
    config::{BackendConfig, LoggingConfig, StorageConfig},
    context::AppContext,
    observability,
    storefront::Storefront,
};

mod admin;
mod cart;
mod catalog;
mod orders;
mod review;
mod table;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "quire", about = "Quire stationery storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    backend: BackendConfig,

    #[command(flatten)]
    storage: StorageConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the catalog with filters, sorting and paging
    Products(catalog::ProductsArgs),

    /// Fuzzy search across product names and descriptions
    Search(catalog::SearchArgs),

    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),

    /// Place an order for the current cart
    Checkout(orders::CheckoutArgs),

    Orders(orders::OrdersCommand),
    Review(review::ReviewCommand),
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = AppContext::from_config(&self.backend, &self.storage);
        let mut storefront =
            Storefront::load(context, self.backend.identity(), self.backend.display_name()).await;

        if let Some(toast) = storefront.take_toast() {
            eprintln!("{}", toast.message);
        }

        match self.command {
            Commands::Products(args) => catalog::products(&storefront, args),
            Commands::Search(args) => catalog::search(&storefront, &args),
            Commands::Cart(command) => cart::run(&mut storefront, command).await,
            Commands::Wishlist(command) => wishlist::run(&mut storefront, command).await,
            Commands::Checkout(args) => orders::checkout(&mut storefront, args).await,
            Commands::Orders(command) => orders::run(&mut storefront, command).await,
            Commands::Review(command) => review::run(&mut storefront, command).await,
            Commands::Admin(command) => admin::run(&mut storefront, command).await,
        }
    }
}

/// Print an operation's outcome, turning failures into errors.
fn report(outcome: &quire::outcome::Outcome) -> Result<(), String> {
    if !outcome.is_success() {
        return Err(outcome.message().to_string());
    }

    if !outcome.message().is_empty() {
        println!("{}", outcome.message());
    }

    Ok(())
}
