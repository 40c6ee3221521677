use clap::{Args, Subcommand};
use quire::{
    products::ProductId,
    reviews::{rating_summary, reviews_for_product},
};
use quire_app::storefront::Storefront;

use super::{report, table};

#[derive(Debug, Args)]
pub(crate) struct ReviewCommand {
    #[command(subcommand)]
    command: ReviewSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewSubcommand {
    /// Reviews of a product, newest first
    List { product_id: String },

    /// Post a review as the signed-in user
    Add {
        product_id: String,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long)]
        text: String,
    },
}

pub(crate) async fn run(storefront: &mut Storefront, command: ReviewCommand) -> Result<(), String> {
    match command.command {
        ReviewSubcommand::List { product_id } => {
            let product_id = ProductId::from(product_id);
            let reviews = reviews_for_product(storefront.reviews(), &product_id);

            if reviews.is_empty() {
                println!("no reviews for {product_id}");
                return Ok(());
            }

            let summary = rating_summary(reviews.iter().copied());

            println!("{}", table::reviews(reviews));
            println!("average {:.1} from {} reviews", summary.average, summary.count);

            Ok(())
        }
        ReviewSubcommand::Add {
            product_id,
            rating,
            text,
        } => {
            let outcome = storefront
                .add_review(&ProductId::from(product_id), rating, &text)
                .await;

            report(&outcome)
        }
    }
}
