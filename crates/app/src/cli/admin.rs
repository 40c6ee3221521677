use clap::{Args, Subcommand};
use jiff::Timestamp;
use quire::{
    dashboard::Dashboard,
    money::format_price,
    orders::{OrderId, OrderStatus},
    products::{CategoryId, ProductId, SubCategoryId},
    reviews::ReviewId,
};
use quire_app::storefront::Storefront;
use tabled::{builder::Builder, settings::Style};

use super::{report, table};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Sales figures, best sellers and low stock
    Dashboard,

    /// Every order, newest first
    Orders,

    /// Move an order to Processing, Shipped, Delivered or Cancelled
    OrderStatus { order_id: String, status: OrderStatus },

    DeleteOrder { order_id: String },
    DeleteReview { review_id: String },

    /// Delete a product and drop it from the cart and wishlist
    DeleteProduct { product_id: String },

    /// Delete a sub-category and its products
    DeleteSubCategory { sub_category_id: String },

    /// Delete a category with its sub-categories and products
    DeleteCategory { category_id: String },

    /// Pin the deals page's best deal; omit the id to unpin
    BestDeal { product_id: Option<String> },
}

pub(crate) async fn run(storefront: &mut Storefront, command: AdminCommand) -> Result<(), String> {
    let outcome = match command.command {
        AdminSubcommand::Dashboard => return dashboard(storefront).await,
        AdminSubcommand::Orders => {
            let orders = storefront
                .all_orders()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            println!("{}", table::orders(&orders));
            return Ok(());
        }
        AdminSubcommand::OrderStatus { order_id, status } => {
            storefront
                .update_order_status(&OrderId::from(order_id), status)
                .await
        }
        AdminSubcommand::DeleteOrder { order_id } => {
            storefront.delete_order(&OrderId::from(order_id)).await
        }
        AdminSubcommand::DeleteReview { review_id } => {
            storefront.delete_review(&ReviewId::from(review_id)).await
        }
        AdminSubcommand::DeleteProduct { product_id } => {
            storefront.delete_product(&ProductId::from(product_id)).await
        }
        AdminSubcommand::DeleteSubCategory { sub_category_id } => {
            storefront
                .delete_sub_category(&SubCategoryId::from(sub_category_id))
                .await
        }
        AdminSubcommand::DeleteCategory { category_id } => {
            storefront
                .delete_category(&CategoryId::from(category_id))
                .await
        }
        AdminSubcommand::BestDeal { product_id } => {
            let mut content = storefront.content().clone();
            content.deals_page.best_deal_product_id = product_id.map(ProductId::from);

            storefront.update_site_content(content).await
        }
    };

    report(&outcome)
}

async fn dashboard(storefront: &Storefront) -> Result<(), String> {
    let orders = storefront
        .all_orders()
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    let dashboard = Dashboard::build(
        storefront.products(),
        storefront.categories().len(),
        &orders,
        Timestamp::now(),
    );

    let mut summary = Builder::default();

    summary.push_record(["Products".to_string(), dashboard.product_count.to_string()]);
    summary.push_record(["Categories".to_string(), dashboard.category_count.to_string()]);
    summary.push_record(["Delivered orders".to_string(), dashboard.delivered_orders.to_string()]);
    summary.push_record(["Revenue".to_string(), format_price(dashboard.revenue)]);

    println!("{}", summary.build().with(Style::modern_rounded()));

    let mut sales = Builder::default();

    sales.push_record(["Day", "Sales"]);

    for day in &dashboard.daily_sales {
        sales.push_record([day.date.to_string(), format_price(day.total)]);
    }

    println!("{}", sales.build().with(Style::modern_rounded()));

    if !dashboard.best_sellers.is_empty() {
        let mut best = Builder::default();

        best.push_record(["Best seller", "Units"]);

        for seller in &dashboard.best_sellers {
            best.push_record([seller.product.name.clone(), seller.quantity.to_string()]);
        }

        println!("{}", best.build().with(Style::modern_rounded()));
    }

    if !dashboard.low_stock.is_empty() {
        println!("low stock:");
        println!("{}", table::products(dashboard.low_stock.iter().copied()));
    }

    Ok(())
}
