//! Product Listing
//!
//! Structural filters, sort keys and pagination over the catalog. A listing
//! is either browsing (filters apply) or searching (the index's ranked hits
//! replace the filtered set). The sort key applies in both modes.

use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::index::{CatalogIndex, is_search_query},
    products::{CategoryId, Product, SubCategoryId},
};

/// Products shown per page.
pub const PAGE_SIZE: usize = 12;

/// Inclusive price bounds in minor units. A missing upper bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest accepted price
    pub min: u64,

    /// Highest accepted price
    pub max: Option<u64>,
}

impl PriceRange {
    /// Bounded range.
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Whether `price` lies within the range.
    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }

    fn is_unbounded(&self) -> bool {
        self.min == 0 && self.max.is_none()
    }
}

/// One active filter dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter<'a> {
    /// Restrict to a main category.
    Category(&'a CategoryId),

    /// Restrict to any of these sub-categories.
    SubCategories(&'a [SubCategoryId]),

    /// Inclusive price bounds.
    Price(PriceRange),

    /// Inclusive floor on the rounded average rating.
    MinRating(u8),

    /// Product declares at least one of these material tokens.
    Materials(&'a [String]),
}

impl Filter<'_> {
    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Category(category) => product.main_category_id() == *category,
            Self::SubCategories(ids) => ids.contains(&product.sub_category.id),
            Self::Price(range) => range.contains(product.price),
            Self::MinRating(floor) => product.rounded_rating() >= *floor,
            Self::Materials(materials) => product
                .material_tokens()
                .any(|token| materials.iter().any(|material| material == token)),
        }
    }
}

/// Filter configuration. Dimensions combine with AND; the default
/// configuration restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Main category
    pub category: Option<CategoryId>,

    /// Sub-categories, empty for no restriction
    pub sub_categories: Vec<SubCategoryId>,

    /// Price bounds
    pub price: PriceRange,

    /// Rating floor, zero for no floor
    pub min_rating: u8,

    /// Material tokens, empty for no restriction
    pub materials: Vec<String>,
}

impl FilterConfig {
    /// The dimensions that currently restrict the listing.
    pub fn active(&self) -> SmallVec<[Filter<'_>; 5]> {
        let mut filters = SmallVec::new();

        if let Some(category) = &self.category {
            filters.push(Filter::Category(category));
        }

        if !self.sub_categories.is_empty() {
            filters.push(Filter::SubCategories(&self.sub_categories));
        }

        if !self.price.is_unbounded() {
            filters.push(Filter::Price(self.price));
        }

        if self.min_rating > 0 {
            filters.push(Filter::MinRating(self.min_rating));
        }

        if !self.materials.is_empty() {
            filters.push(Filter::Materials(&self.materials));
        }

        filters
    }

    /// Whether `product` passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.active().iter().all(|filter| filter.matches(product))
    }

    /// Products passing every active filter, in input order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let filters = self.active();

        products
            .iter()
            .filter(|product| filters.iter().all(|filter| filter.matches(product)))
            .collect()
    }
}

/// Sort order for the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Catalog order, or relevance while searching
    #[default]
    Default,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Best rated first
    RatingDesc,

    /// New arrivals first
    Newest,
}

impl SortKey {
    /// All sort keys, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::RatingDesc,
        Self::Newest,
    ];

    /// Stable identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::RatingDesc => "rating",
            Self::Newest => "newest",
        }
    }

    /// Sort `products` in place. Every order is stable, so equal keys keep
    /// their incoming order.
    pub fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by_key(|product| product.price),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::RatingDesc => {
                products.sort_by(|a, b| b.ratings.average.total_cmp(&a.ratings.average));
            }
            Self::Newest => products.sort_by_key(|product| !product.is_new),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised sort key identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key `{0}`")]
pub struct UnknownSortKey(String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// One page of the listing.
#[derive(Debug, Clone)]
pub struct ListingPage<'a> {
    /// Products on this page
    pub products: Vec<&'a Product>,

    /// Products across all pages
    pub total: usize,

    /// One-based page number
    pub page: usize,

    /// Number of pages
    pub page_count: usize,
}

/// Number of pages needed for `total` products.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Slice out one-based `page`. Pages past the end are empty.
pub fn paginate<'a>(products: &[&'a Product], page: usize) -> Vec<&'a Product> {
    products
        .iter()
        .skip(page.saturating_sub(1).saturating_mul(PAGE_SIZE))
        .take(PAGE_SIZE)
        .copied()
        .collect()
}

/// Listing state for the product browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    filters: FilterConfig,
    sort: SortKey,
    page: usize,
    query: Option<String>,
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            filters: FilterConfig::default(),
            sort: SortKey::Default,
            page: 1,
            query: None,
        }
    }
}

impl ProductListing {
    /// Unfiltered listing on page one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing opened on a category.
    pub fn for_category(category: CategoryId) -> Self {
        let mut listing = Self::new();
        listing.select_category(Some(category));
        listing
    }

    /// Current filters.
    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// Current sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// Current one-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Active search query, if searching.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Whether the listing shows search results.
    pub fn is_searching(&self) -> bool {
        self.query.is_some()
    }

    /// Enter search mode. Queries too short to search leave search mode.
    pub fn search(&mut self, query: &str) {
        self.query = is_search_query(query).then(|| query.trim().to_string());
        self.page = 1;
    }

    /// Leave search mode.
    pub fn clear_search(&mut self) {
        self.query = None;
        self.page = 1;
    }

    /// Select a main category. Resets sub-categories and leaves search mode.
    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.filters.category = category;
        self.filters.sub_categories.clear();
        self.clear_search();
    }

    /// Toggle a sub-category in the selection.
    pub fn toggle_sub_category(&mut self, id: SubCategoryId) {
        toggle(&mut self.filters.sub_categories, id);
        self.page = 1;
    }

    /// Replace the sub-category selection.
    pub fn set_sub_categories(&mut self, ids: Vec<SubCategoryId>) {
        self.filters.sub_categories = ids;
        self.page = 1;
    }

    /// Set the price bounds.
    pub fn set_price_range(&mut self, range: PriceRange) {
        self.filters.price = range;
        self.page = 1;
    }

    /// Set the rating floor. Choosing the current floor again removes it.
    pub fn toggle_min_rating(&mut self, rating: u8) {
        self.filters.min_rating = if self.filters.min_rating == rating {
            0
        } else {
            rating
        };
        self.page = 1;
    }

    /// Toggle a material token in the selection.
    pub fn toggle_material(&mut self, material: &str) {
        toggle(&mut self.filters.materials, material.to_string());
        self.page = 1;
    }

    /// Change the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Jump to one-based `page`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Reset every filter, the sort key and the page, and leave search mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every product the listing shows, sorted, across all pages.
    pub fn results<'a>(&self, index: &'a CatalogIndex) -> Vec<&'a Product> {
        let mut products = match &self.query {
            Some(query) => index.search(query).into_iter().map(|hit| hit.product).collect(),
            None => self.filters.apply(index.products()),
        };

        self.sort.sort(&mut products);

        products
    }

    /// The current page of results.
    pub fn view<'a>(&self, index: &'a CatalogIndex) -> ListingPage<'a> {
        let results = self.results(index);

        ListingPage {
            products: paginate(&results, self.page),
            total: results.len(),
            page: self.page,
            page_count: page_count(results.len()),
        }
    }
}

fn toggle<T: PartialEq>(selection: &mut Vec<T>, value: T) {
    if let Some(position) = selection.iter().position(|existing| *existing == value) {
        selection.remove(position);
    } else {
        selection.push(value);
    }
}
