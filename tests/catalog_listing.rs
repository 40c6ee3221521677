//! Integration tests for search and structural filtering of the catalog

use quire::{
    catalog::{CatalogIndex, FilterConfig, PriceRange, ProductListing, SortKey},
    fixtures::catalog,
    products::{Product, available_materials, price_ceiling},
};

fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|product| product.id.as_str()).collect()
}

#[test]
fn every_combination_of_filters_is_sound_and_complete() {
    let products = catalog();
    let materials = available_materials(&products);

    let categories = [None, Some("c1"), Some("c2"), Some("c3")];
    let prices = [
        PriceRange::default(),
        PriceRange::new(40_00, 130_00),
        PriceRange {
            min: 200_00,
            max: None,
        },
    ];

    for category in categories {
        for price in prices {
            for min_rating in 0..=5 {
                for material in materials.iter().map(Some).chain([None]) {
                    let config = FilterConfig {
                        category: category.map(Into::into),
                        price,
                        min_rating,
                        materials: material.cloned().into_iter().collect(),
                        ..FilterConfig::default()
                    };

                    let filtered = config.apply(&products);

                    for product in &products {
                        let expected = category.is_none_or(|c| product.main_category_id().as_str() == c)
                            && price.contains(product.price)
                            && product.rounded_rating() >= min_rating
                            && material.is_none_or(|m| product.material_tokens().any(|t| t == m));

                        assert_eq!(
                            filtered.iter().any(|p| p.id == product.id),
                            expected,
                            "{} with {config:?}",
                            product.id
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn search_results_replace_filtered_set() {
    let index = CatalogIndex::new(catalog());
    let mut listing = ProductListing::for_category("c3".into());

    listing.set_price_range(PriceRange::new(0, 1_00));
    assert!(listing.results(&index).is_empty());

    listing.search("notebook");

    let ranked: Vec<&str> = index
        .search("notebook")
        .iter()
        .map(|hit| hit.product.id.as_str())
        .collect();

    assert!(!ranked.is_empty());
    assert_eq!(ids(&listing.results(&index)), ranked);

    listing.clear();
    assert_eq!(listing.results(&index).len(), index.products().len());
}

#[test]
fn browsing_sorted_by_price_pages_through_catalog() {
    let index = CatalogIndex::new(catalog());
    let mut listing = ProductListing::new();

    listing.set_sort(SortKey::PriceAsc);
    let page = listing.view(&index);

    assert_eq!(page.page_count, 1);
    assert_eq!(ids(&page.products), ["p6", "p1", "p4", "p3", "p2", "p7", "p5"]);
    assert_eq!(price_ceiling(index.products()), 1000_00);
}
