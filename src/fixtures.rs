//! Fixtures
//!
//! A small stationery catalog and a product builder shared by tests and
//! offline demos.

use crate::products::{Category, Product, Ratings, SubCategory};

/// Builder for [`Product`] values with sensible defaults.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// Start a product in the default `s1`/`c1` sub-category, priced at 10.00
    /// with 10 units in stock.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            product: Product {
                id: id.into(),
                name: name.to_string(),
                slug: name.to_lowercase().replace(' ', "-"),
                description: String::new(),
                price: 10_00,
                original_price: None,
                sub_category: sub_category("s1", "Notebooks", "c1"),
                images: Vec::new(),
                ratings: Ratings::default(),
                is_new: false,
                is_bestseller: false,
                colors: None,
                stock: 10,
                weight: None,
                dimensions: None,
                material: None,
            },
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.product.description = description.to_string();
        self
    }

    /// Set the price in minor units.
    #[must_use]
    pub fn price(mut self, price: u64) -> Self {
        self.product.price = price;
        self
    }

    /// Set the pre-discount price in minor units.
    #[must_use]
    pub fn original_price(mut self, original_price: u64) -> Self {
        self.product.original_price = Some(original_price);
        self
    }

    /// Set the stock count.
    #[must_use]
    pub fn stock(mut self, stock: u32) -> Self {
        self.product.stock = stock;
        self
    }

    /// Set the rating summary.
    #[must_use]
    pub fn rating(mut self, average: f64, count: u32) -> Self {
        self.product.ratings = Ratings { average, count };
        self
    }

    /// Set the material list.
    #[must_use]
    pub fn material(mut self, material: &str) -> Self {
        self.product.material = Some(material.to_string());
        self
    }

    /// Place the product in a sub-category.
    #[must_use]
    pub fn sub_category(mut self, id: &str, name: &str, main_category_id: &str) -> Self {
        self.product.sub_category = sub_category(id, name, main_category_id);
        self
    }

    /// Flag as a new arrival.
    #[must_use]
    pub fn new_arrival(mut self) -> Self {
        self.product.is_new = true;
        self
    }

    /// Flag as a bestseller.
    #[must_use]
    pub fn bestseller(mut self) -> Self {
        self.product.is_bestseller = true;
        self
    }

    /// Finish building.
    pub fn build(self) -> Product {
        self.product
    }
}

/// Build a sub-category.
pub fn sub_category(id: &str, name: &str, main_category_id: &str) -> SubCategory {
    SubCategory {
        id: id.into(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        main_category_id: main_category_id.into(),
    }
}

/// The fixture categories.
pub fn categories() -> Vec<Category> {
    [
        ("c1", "Paper", "paper"),
        ("c2", "Writing", "writing"),
        ("c3", "Art Supplies", "art-supplies"),
    ]
    .into_iter()
    .map(|(id, name, slug)| Category {
        id: id.into(),
        name: name.to_string(),
        slug: slug.to_string(),
        image: format!("https://picsum.photos/seed/{slug}/400/400"),
    })
    .collect()
}

/// The fixture sub-categories.
pub fn sub_categories() -> Vec<SubCategory> {
    vec![
        sub_category("s1", "Notebooks", "c1"),
        sub_category("s2", "Sketchbooks", "c1"),
        sub_category("s3", "Pens", "c2"),
        sub_category("s4", "Pencils", "c2"),
        sub_category("s5", "Paints", "c3"),
    ]
}

/// The fixture catalog, in catalog order.
pub fn catalog() -> Vec<Product> {
    vec![
        ProductBuilder::new("p1", "Spiral Notebook")
            .description("A5 ruled notebook with 100 sheets")
            .price(45_00)
            .stock(20)
            .rating(4.6, 31)
            .material("paper, metal")
            .bestseller()
            .build(),
        ProductBuilder::new("p2", "Dotted Journal")
            .description("Hardcover dotted journal for bullet planning")
            .price(120_00)
            .original_price(150_00)
            .stock(5)
            .rating(4.2, 12)
            .material("paper")
            .new_arrival()
            .build(),
        ProductBuilder::new("p3", "Sketch Pad")
            .description("Heavy paper for charcoal and pencil drawing")
            .sub_category("s2", "Sketchbooks", "c1")
            .price(80_00)
            .stock(0)
            .rating(3.4, 7)
            .material("paper, cardboard")
            .build(),
        ProductBuilder::new("p4", "Gel Pen Set")
            .description("Twelve smooth gel pens in bright colours")
            .sub_category("s3", "Pens", "c2")
            .price(60_00)
            .original_price(90_00)
            .stock(40)
            .rating(4.8, 54)
            .material("plastic")
            .bestseller()
            .build(),
        ProductBuilder::new("p5", "Fountain Pen")
            .description("Steel nib fountain pen with converter")
            .sub_category("s3", "Pens", "c2")
            .price(350_00)
            .stock(3)
            .rating(4.9, 9)
            .material("metal, plastic")
            .new_arrival()
            .build(),
        ProductBuilder::new("p6", "Graphite Pencils")
            .description("Set of drawing pencils from 6H to 8B")
            .sub_category("s4", "Pencils", "c2")
            .price(35_00)
            .stock(60)
            .rating(4.1, 22)
            .material("wood, graphite")
            .build(),
        ProductBuilder::new("p7", "Watercolour Palette")
            .description("Twenty four pan watercolour set with brush")
            .sub_category("s5", "Paints", "c3")
            .price(210_00)
            .original_price(240_00)
            .stock(8)
            .rating(2.6, 5)
            .material("plastic")
            .new_arrival()
            .build(),
    ]
}
