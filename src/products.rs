//! Products

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// Sub-category Id
pub type SubCategoryId = TypedId<SubCategory>;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Maximum number of related products shown beside a product.
pub const RELATED_PRODUCTS_LIMIT: usize = 8;

/// Lowest upper bound offered by the price filter, in minor units.
const PRICE_CEILING_FLOOR: u64 = 100_000;

/// Price filter bounds are rounded up to this step, in minor units.
const PRICE_CEILING_STEP: u64 = 10_000;

/// Main category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Display name
    #[serde(rename = "nameAr")]
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Cover image URL
    #[serde(default)]
    pub image: String,
}

/// Sub-category, always linked to a main category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    /// Sub-category id
    pub id: SubCategoryId,

    /// Display name
    #[serde(rename = "nameAr")]
    pub name: String,

    /// URL slug
    pub slug: String,

    /// Parent category
    pub main_category_id: CategoryId,
}

/// Product image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub url: String,

    /// Alternative text
    pub alt: String,
}

/// Rating summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    /// Mean star rating
    pub average: f64,

    /// Number of ratings
    pub count: u32,
}

/// Product
///
/// Read-only from the storefront's point of view; only the admin back
/// office changes products, through the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    #[serde(rename = "nameAr")]
    pub name: String,

    /// URL slug
    #[serde(default)]
    pub slug: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Current price in minor units
    pub price: u64,

    /// Pre-discount price in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    /// Sub-category (and through it, the main category)
    pub sub_category: SubCategory,

    /// Gallery
    #[serde(default)]
    pub images: Vec<Image>,

    /// Rating summary
    #[serde(default)]
    pub ratings: Ratings,

    /// Flagged as a new arrival
    #[serde(default)]
    pub is_new: bool,

    /// Flagged as a bestseller
    #[serde(default)]
    pub is_bestseller: bool,

    /// Available colours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,

    /// Units in stock
    pub stock: u32,

    /// Weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Free-form dimensions, e.g. `20cm x 15cm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    /// Comma separated material list, e.g. `paper, cardboard`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Product {
    /// The main category this product belongs to.
    pub fn main_category_id(&self) -> &CategoryId {
        &self.sub_category.main_category_id
    }

    /// Material tokens, trimmed, in declaration order.
    pub fn material_tokens(&self) -> impl Iterator<Item = &str> {
        self.material
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Whether the product is discounted.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Fraction of the original price taken off, in `[0, 1]`.
    pub fn discount_fraction(&self) -> Option<f64> {
        let original = self.original_price?;

        if original == 0 {
            return None;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "prices are far below 2^52 minor units"
        )]
        let fraction = original.saturating_sub(self.price) as f64 / original as f64;

        Some(fraction)
    }

    /// Average rating rounded to whole stars.
    pub fn rounded_rating(&self) -> u8 {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to the 0..=5 star range first"
        )]
        let stars = self.ratings.average.clamp(0.0, 5.0).round() as u8;

        stars
    }

    /// Whether at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Every material token declared across `products`, sorted and deduplicated.
pub fn available_materials(products: &[Product]) -> Vec<String> {
    let mut materials: Vec<String> = products
        .iter()
        .flat_map(Product::material_tokens)
        .map(str::to_string)
        .collect();

    materials.sort();
    materials.dedup();

    materials
}

/// Upper bound for the price filter: the highest price (at least 1000.00),
/// rounded up to the next 100.00.
pub fn price_ceiling(products: &[Product]) -> u64 {
    let highest = products
        .iter()
        .map(|product| product.price)
        .max()
        .unwrap_or_default()
        .max(PRICE_CEILING_FLOOR);

    highest.div_ceil(PRICE_CEILING_STEP) * PRICE_CEILING_STEP
}

/// Other products from the same main category, in catalog order.
pub fn related_products<'a>(product: &Product, products: &'a [Product]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|other| {
            other.main_category_id() == product.main_category_id() && other.id != product.id
        })
        .take(RELATED_PRODUCTS_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::fixtures::{ProductBuilder, catalog};

    use super::*;

    #[test]
    fn material_tokens_are_trimmed_and_skip_blanks() {
        let product = ProductBuilder::new("p1", "Sketchbook")
            .material(" paper ,cardboard,, ")
            .build();

        let tokens: Vec<&str> = product.material_tokens().collect();

        assert_eq!(tokens, ["paper", "cardboard"]);
    }

    #[test]
    fn material_tokens_empty_without_material() {
        let product = ProductBuilder::new("p1", "Eraser").build();

        assert_eq!(product.material_tokens().count(), 0);
    }

    #[test]
    fn available_materials_sorted_unique() {
        let products = [
            ProductBuilder::new("p1", "A").material("wood, graphite").build(),
            ProductBuilder::new("p2", "B").material("plastic,wood").build(),
            ProductBuilder::new("p3", "C").build(),
        ];

        assert_eq!(
            available_materials(&products),
            ["graphite", "plastic", "wood"]
        );
    }

    #[test]
    fn discount_fraction_for_sale_items() {
        let product = ProductBuilder::new("p1", "Pen")
            .price(75_00)
            .original_price(100_00)
            .build();

        assert!(product.is_on_sale());
        assert_eq!(product.discount_fraction(), Some(0.25));
    }

    #[test]
    fn discount_fraction_none_without_original_price() {
        let product = ProductBuilder::new("p1", "Pen").build();

        assert!(!product.is_on_sale());
        assert_eq!(product.discount_fraction(), None);
    }

    #[test]
    fn rounded_rating_rounds_half_up() {
        let product = ProductBuilder::new("p1", "Pen").rating(3.5, 4).build();

        assert_eq!(product.rounded_rating(), 4);
    }

    #[test]
    fn price_ceiling_has_floor() {
        let products = [ProductBuilder::new("p1", "Pen").price(5_00).build()];

        assert_eq!(price_ceiling(&products), 1000_00);
        assert_eq!(price_ceiling(&[]), 1000_00);
    }

    #[test]
    fn price_ceiling_rounds_up_to_hundreds() {
        let products = [ProductBuilder::new("p1", "Desk").price(1234_50).build()];

        assert_eq!(price_ceiling(&products), 1300_00);
    }

    #[test]
    fn related_products_share_main_category() {
        let products = catalog();
        let notebook = products
            .iter()
            .find(|product| product.id.as_str() == "p1")
            .map(Clone::clone);

        let Some(notebook) = notebook else {
            panic!("fixture catalog should contain p1");
        };

        let related = related_products(&notebook, &products);

        assert!(!related.is_empty(), "notebook has siblings in its category");
        assert!(related.iter().all(|p| p.main_category_id() == notebook.main_category_id()));
        assert!(related.iter().all(|p| p.id != notebook.id));
    }

    #[test]
    fn product_round_trips_backend_field_names() -> TestResult {
        let json = serde_json::json!({
            "id": "p9",
            "nameAr": "Ruler",
            "price": 1200,
            "stock": 3,
            "isNew": true,
            "subCategory": {
                "id": "s1",
                "nameAr": "Geometry",
                "slug": "geometry",
                "mainCategoryId": "c1"
            }
        });

        let product: Product = serde_json::from_value(json)?;

        assert_eq!(product.name, "Ruler");
        assert!(product.is_new);
        assert_eq!(product.main_category_id().as_str(), "c1");

        Ok(())
    }
}
