use clap::{Args, Subcommand};
use quire::products::ProductId;
use quire_app::storefront::Storefront;

use super::{report, table};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// List cart lines and the total
    Show,

    /// Add units of a product
    Add {
        product_id: String,

        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set a line's quantity; zero or less removes it
    Set {
        product_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    Remove {
        product_id: String,
    },

    Clear,
}

pub(crate) async fn run(storefront: &mut Storefront, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => {
            show(storefront);
            Ok(())
        }
        CartSubcommand::Add {
            product_id,
            quantity,
        } => {
            let outcome = storefront
                .add_to_cart(&ProductId::from(product_id), quantity)
                .await;

            report(&outcome)
        }
        CartSubcommand::Set {
            product_id,
            quantity,
        } => {
            let outcome = storefront
                .update_quantity(&ProductId::from(product_id), quantity)
                .await;

            report(&outcome)
        }
        CartSubcommand::Remove { product_id } => {
            let outcome = storefront
                .remove_from_cart(&ProductId::from(product_id))
                .await;

            report(&outcome)
        }
        CartSubcommand::Clear => {
            storefront.clear_cart().await;
            println!("cart cleared");
            Ok(())
        }
    }
}

fn show(storefront: &Storefront) {
    let lines = storefront.cart_lines();

    if lines.is_empty() {
        println!("your cart is empty");
        return;
    }

    println!("{}", table::cart_lines(&lines, storefront.cart_total()));
}
