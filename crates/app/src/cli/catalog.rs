use clap::Args;
use quire::{
    catalog::{PriceRange, ProductListing, SortKey},
    products::{CategoryId, SubCategoryId},
};
use quire_app::storefront::Storefront;

use super::table;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Main category id
    #[arg(long)]
    category: Option<String>,

    /// Sub-category id; repeat to select several
    #[arg(long = "sub-category")]
    sub_categories: Vec<String>,

    /// Lowest price, in minor units
    #[arg(long, default_value_t = 0)]
    min_price: u64,

    /// Highest price, in minor units
    #[arg(long)]
    max_price: Option<u64>,

    /// Minimum star rating
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: Option<u8>,

    /// Material token; repeat to select several
    #[arg(long = "material")]
    materials: Vec<String>,

    /// default, price-asc, price-desc, rating or newest
    #[arg(long, default_value = "default")]
    sort: SortKey,

    /// One-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl ProductsArgs {
    fn listing(&self) -> ProductListing {
        let mut listing = ProductListing::new();

        listing.select_category(self.category.as_deref().map(CategoryId::from));
        listing.set_sub_categories(
            self.sub_categories
                .iter()
                .map(|id| SubCategoryId::from(id.as_str()))
                .collect(),
        );
        listing.set_price_range(PriceRange {
            min: self.min_price,
            max: self.max_price,
        });

        if let Some(rating) = self.rating {
            listing.toggle_min_rating(rating);
        }

        for material in &self.materials {
            listing.toggle_material(material);
        }

        listing.set_sort(self.sort);
        listing.set_page(self.page);

        listing
    }
}

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    query: String,

    /// Show quick suggestions instead of full results
    #[arg(long)]
    suggest: bool,
}

pub(crate) fn products(storefront: &Storefront, args: ProductsArgs) -> Result<(), String> {
    let listing = args.listing();
    let view = listing.view(storefront.index());

    if view.total == 0 {
        println!("no products match these filters");
        return Ok(());
    }

    println!("{}", table::products(view.products.iter().copied()));
    println!(
        "page {} of {} ({} products)",
        view.page, view.page_count, view.total
    );

    Ok(())
}

pub(crate) fn search(storefront: &Storefront, args: &SearchArgs) -> Result<(), String> {
    let hits = if args.suggest {
        storefront.index().suggestions(&args.query)
    } else {
        storefront.index().search(&args.query)
    };

    if hits.is_empty() {
        println!("no results for \"{}\"", args.query.trim());
        return Ok(());
    }

    println!("{}", table::products(hits.iter().map(|hit| hit.product)));

    Ok(())
}
