use clap::{Args, Subcommand};
use quire::{
    money::format_price,
    orders::{CustomerDetails, OrderId},
};
use quire_app::storefront::Storefront;

use super::{report, table};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    phone: String,
}

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// The signed-in account's orders, newest first
    List,

    /// Request cancellation of an order that is still processing
    Cancel { order_id: String },
}

pub(crate) async fn checkout(storefront: &mut Storefront, args: CheckoutArgs) -> Result<(), String> {
    let order = storefront
        .place_order(CustomerDetails {
            name: args.name,
            address: args.address,
            phone: args.phone,
        })
        .await
        .map_err(|error| {
            storefront
                .take_toast()
                .map_or_else(|| error.to_string(), |toast| toast.message)
        })?;

    println!("order_id: {}", order.id);
    println!("total: {}", format_price(order.total));
    println!("payment: cash on delivery");

    Ok(())
}

pub(crate) async fn run(storefront: &mut Storefront, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List => {
            if !storefront.identity().is_account() {
                return Err("sign in to see your orders (set QUIRE_USER_ID)".to_string());
            }

            if storefront.orders().is_empty() {
                println!("no orders yet");
            } else {
                println!("{}", table::orders(storefront.orders()));
            }

            Ok(())
        }
        OrdersSubcommand::Cancel { order_id } => {
            let outcome = storefront
                .request_cancellation(&OrderId::from(order_id))
                .await;

            report(&outcome)
        }
    }
}
