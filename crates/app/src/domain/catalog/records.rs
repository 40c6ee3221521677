//! Product rows.
//!
//! Product rows reference their sub-category by id; the storefront works
//! with the joined form.

use quire::products::{Product, SubCategory};
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::store::{Row, StoreError, decode, encode};

const SUB_CATEGORY_ID: &str = "subCategoryId";
const SUB_CATEGORY: &str = "subCategory";

/// Sub-categories by id.
pub(crate) type SubCategoryLookup<'a> = FxHashMap<&'a str, &'a SubCategory>;

pub(crate) fn lookup(sub_categories: &[SubCategory]) -> SubCategoryLookup<'_> {
    sub_categories
        .iter()
        .map(|sub_category| (sub_category.id.as_str(), sub_category))
        .collect()
}

/// The stored form of `product`: the nested sub-category replaced by its id.
pub(crate) fn product_row(product: &Product) -> Result<Row, StoreError> {
    let mut row = encode(product)?;

    if let Value::Object(fields) = &mut row {
        fields.remove(SUB_CATEGORY);
        fields.insert(
            SUB_CATEGORY_ID.to_string(),
            Value::String(product.sub_category.id.to_string()),
        );
    }

    Ok(row)
}

/// Join a stored product with its sub-category. `None` when the row names
/// a sub-category that does not exist.
pub(crate) fn join(
    mut row: Row,
    sub_categories: &SubCategoryLookup<'_>,
) -> Result<Option<Product>, StoreError> {
    if row.get(SUB_CATEGORY).is_some_and(Value::is_object) {
        return decode(row).map(Some);
    }

    let Some(sub_category) = row
        .get(SUB_CATEGORY_ID)
        .and_then(Value::as_str)
        .and_then(|id| sub_categories.get(id))
    else {
        return Ok(None);
    };

    attach(&mut row, sub_category)?;

    decode(row).map(Some)
}

/// Join a stored product with a known sub-category.
pub(crate) fn join_with(mut row: Row, sub_category: &SubCategory) -> Result<Product, StoreError> {
    attach(&mut row, sub_category)?;

    decode(row)
}

fn attach(row: &mut Row, sub_category: &SubCategory) -> Result<(), StoreError> {
    let sub_category = encode(sub_category)?;

    if let Value::Object(fields) = row {
        fields.remove(SUB_CATEGORY_ID);
        fields.insert(SUB_CATEGORY.to_string(), sub_category);
    }

    Ok(())
}
