use clap::{Args, Subcommand};
use quire::products::ProductId;
use quire_app::storefront::Storefront;

use super::{report, table};

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    Show,

    /// Add the product, or remove it when already saved
    Toggle { product_id: String },
}

pub(crate) async fn run(
    storefront: &mut Storefront,
    command: WishlistCommand,
) -> Result<(), String> {
    match command.command {
        WishlistSubcommand::Show => {
            let saved: Vec<_> = storefront
                .products()
                .iter()
                .filter(|product| storefront.wishlist().contains(&product.id))
                .collect();

            if saved.is_empty() {
                println!("your wishlist is empty");
            } else {
                println!("{}", table::products(saved));
            }

            Ok(())
        }
        WishlistSubcommand::Toggle { product_id } => {
            let outcome = storefront
                .toggle_wishlist(&ProductId::from(product_id))
                .await;

            report(&outcome)
        }
    }
}
