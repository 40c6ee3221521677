//! Catalog Index

use smallvec::SmallVec;

use crate::{
    catalog::fuzzy::{self, FoldedText, Ranges},
    products::Product,
};

/// Queries shorter than this many characters do not trigger a search.
pub const MIN_QUERY_CHARS: usize = 2;

/// Number of suggestions offered while typing.
pub const SUGGESTION_LIMIT: usize = 5;

/// Fields searched by default.
pub const DEFAULT_SEARCH_FIELDS: [SearchField; 3] = [
    SearchField::Name,
    SearchField::SubCategory,
    SearchField::Description,
];

/// A searchable product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Product name
    Name,

    /// Sub-category name
    SubCategory,

    /// Long description
    Description,

    /// Material list
    Material,
}

impl SearchField {
    /// The field's text on `product`.
    pub fn text(self, product: &Product) -> &str {
        match self {
            Self::Name => &product.name,
            Self::SubCategory => &product.sub_category.name,
            Self::Description => &product.description,
            Self::Material => product.material.as_deref().unwrap_or_default(),
        }
    }
}

/// Matched spans within one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Field that matched
    pub field: SearchField,

    /// Byte ranges into the field's text
    pub ranges: Ranges,
}

/// A ranked search result.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    /// Matching product
    pub product: &'a Product,

    /// Best edit distance across fields, zero for exact substring matches
    pub distance: usize,

    /// Per-field highlight spans
    pub matches: SmallVec<[FieldMatch; 2]>,
}

#[derive(Debug, Clone)]
struct IndexedField {
    field: SearchField,
    text: FoldedText,
}

/// Fuzzy search index over a product collection.
///
/// Derived state: rebuild it whenever the collection changes.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    products: Vec<Product>,
    entries: Vec<SmallVec<[IndexedField; 4]>>,
}

impl CatalogIndex {
    /// Index `products` on the default fields.
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_fields(products, &DEFAULT_SEARCH_FIELDS)
    }

    /// Index `products` on the given fields.
    pub fn with_fields(products: Vec<Product>, fields: &[SearchField]) -> Self {
        let entries = products
            .iter()
            .map(|product| {
                fields
                    .iter()
                    .map(|&field| IndexedField {
                        field,
                        text: FoldedText::new(field.text(product)),
                    })
                    .collect()
            })
            .collect();

        Self { products, entries }
    }

    /// The indexed products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Release the indexed products.
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// Ranked matches for `query`, best first. Equal distances keep catalog
    /// order. Queries shorter than [`MIN_QUERY_CHARS`] return nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        if !is_search_query(query) {
            return Vec::new();
        }

        let pattern: Vec<char> = query.trim().chars().map(fuzzy::fold).collect();
        let max_distance = fuzzy::max_distance(pattern.len());

        let mut hits: Vec<SearchHit<'_>> = self
            .products
            .iter()
            .zip(&self.entries)
            .filter_map(|(product, fields)| {
                let mut distance = usize::MAX;
                let mut matches = SmallVec::new();

                for indexed in fields {
                    if let Some(found) = fuzzy::find(&pattern, &indexed.text, max_distance) {
                        distance = distance.min(found.distance);
                        matches.push(FieldMatch {
                            field: indexed.field,
                            ranges: found.ranges,
                        });
                    }
                }

                (!matches.is_empty()).then_some(SearchHit {
                    product,
                    distance,
                    matches,
                })
            })
            .collect();

        hits.sort_by_key(|hit| hit.distance);

        hits
    }

    /// The first few ranked matches, for type-ahead suggestions.
    pub fn suggestions(&self, query: &str) -> Vec<SearchHit<'_>> {
        let mut hits = self.search(query);
        hits.truncate(SUGGESTION_LIMIT);
        hits
    }
}

/// Whether `query` is long enough to switch the listing into search mode.
pub fn is_search_query(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}
