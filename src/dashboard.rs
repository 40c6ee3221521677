//! Dashboard
//!
//! Back-office statistics. Only delivered orders count towards revenue and
//! sales figures.

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use rustc_hash::FxHashMap;

use crate::{
    orders::{Order, OrderStatus},
    products::{Product, ProductId},
};

/// Products listed as best sellers.
pub const BEST_SELLER_LIMIT: usize = 5;

/// Products with fewer units than this (but at least one) are low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Days covered by the sales chart.
pub const SALES_CHART_DAYS: usize = 7;

/// Units of a product sold across delivered orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSeller<'a> {
    /// Product sold
    pub product: &'a Product,

    /// Units delivered
    pub quantity: u64,
}

/// Delivered sales on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySales {
    /// Calendar day
    pub date: Date,

    /// Sum of order totals in minor units
    pub total: u64,
}

/// Dashboard figures.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    /// Products in the catalog
    pub product_count: usize,

    /// Main categories
    pub category_count: usize,

    /// Delivered orders
    pub delivered_orders: usize,

    /// Revenue from delivered orders, in minor units
    pub revenue: u64,

    /// Top sellers by delivered units
    pub best_sellers: Vec<BestSeller<'a>>,

    /// Products running low, fewest units first
    pub low_stock: Vec<&'a Product>,

    /// Sales per day, oldest first, ending today
    pub daily_sales: Vec<DailySales>,
}

impl<'a> Dashboard<'a> {
    /// Compute every figure as of `now`.
    pub fn build(
        products: &'a [Product],
        category_count: usize,
        orders: &[Order],
        now: Timestamp,
    ) -> Self {
        Self {
            product_count: products.len(),
            category_count,
            delivered_orders: delivered(orders).count(),
            revenue: revenue(orders),
            best_sellers: best_sellers(products, orders),
            low_stock: low_stock(products),
            daily_sales: daily_sales(orders, utc_date(now), SALES_CHART_DAYS),
        }
    }
}

fn delivered(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders
        .iter()
        .filter(|order| order.status == OrderStatus::Delivered)
}

fn utc_date(timestamp: Timestamp) -> Date {
    timestamp.to_zoned(TimeZone::UTC).date()
}

/// Sum of delivered order totals.
pub fn revenue(orders: &[Order]) -> u64 {
    delivered(orders).map(|order| order.total).sum()
}

/// The best-selling products by delivered units. Ties keep the order in
/// which products were first sold; products missing from the catalog are
/// dropped after ranking.
pub fn best_sellers<'a>(products: &'a [Product], orders: &[Order]) -> Vec<BestSeller<'a>> {
    let mut tally: Vec<(&ProductId, u64)> = Vec::new();
    let mut slots: FxHashMap<&ProductId, usize> = FxHashMap::default();

    for item in delivered(orders).flat_map(|order| &order.items) {
        let quantity = u64::from(item.quantity);

        match slots.get(&item.product_id).and_then(|&slot| tally.get_mut(slot)) {
            Some((_, total)) => *total += quantity,
            None => {
                slots.insert(&item.product_id, tally.len());
                tally.push((&item.product_id, quantity));
            }
        }
    }

    tally.sort_by(|a, b| b.1.cmp(&a.1));

    tally
        .into_iter()
        .take(BEST_SELLER_LIMIT)
        .filter_map(|(id, quantity)| {
            products
                .iter()
                .find(|product| product.id == *id)
                .map(|product| BestSeller { product, quantity })
        })
        .collect()
}

/// In-stock products below [`LOW_STOCK_THRESHOLD`], fewest units first.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    let mut low: Vec<&Product> = products
        .iter()
        .filter(|product| product.in_stock() && product.stock < LOW_STOCK_THRESHOLD)
        .collect();

    low.sort_by_key(|product| product.stock);

    low
}

/// Delivered totals for each of the `days` UTC days ending on `today`,
/// oldest first. Days without sales report zero.
pub fn daily_sales(orders: &[Order], today: Date, days: usize) -> Vec<DailySales> {
    let mut series: Vec<DailySales> = today
        .series(1.day().negate())
        .take(days)
        .map(|date| DailySales { date, total: 0 })
        .collect();

    series.reverse();

    for order in delivered(orders) {
        let date = utc_date(order.date);

        if let Some(day) = series.iter_mut().find(|day| day.date == date) {
            day.total += order.total;
        }
    }

    series
}
