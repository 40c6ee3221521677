//! Catalog
//!
//! Free-text search over the product collection and the structural
//! filter/sort/paginate engine behind the product listing.

mod fuzzy;
pub mod index;
pub mod listing;

pub use fuzzy::Ranges;
pub use index::{CatalogIndex, FieldMatch, SearchField, SearchHit, is_search_query};
pub use listing::{Filter, FilterConfig, ListingPage, PAGE_SIZE, PriceRange, ProductListing, SortKey};
