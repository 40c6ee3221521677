//! Row filters.
//!
//! Equality conditions combined with AND, an optional ordering column and an
//! optional row limit. Enough to express every query the storefront makes.

use std::cmp::Ordering;

use serde_json::Value;
use smallvec::SmallVec;

use crate::store::Row;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first
    Ascending,

    /// Largest first
    Descending,
}

/// Ordering applied to selected rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to order by
    pub column: &'static str,

    /// Direction
    pub direction: Direction,
}

/// Row selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: SmallVec<[(&'static str, Value); 2]>,
    order: Option<OrderBy>,
    limit: Option<usize>,
}

impl Filter {
    /// Match every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match rows whose `column` equals `value`.
    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::all().and_eq(column, value)
    }

    /// Add an equality condition.
    #[must_use]
    pub fn and_eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.conditions.push((column, value.into()));
        self
    }

    /// Order results by `column`.
    #[must_use]
    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order = Some(OrderBy { column, direction });
        self
    }

    /// Return at most `limit` rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Equality conditions.
    pub fn conditions(&self) -> &[(&'static str, Value)] {
        &self.conditions
    }

    /// Requested ordering.
    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    /// Requested row limit.
    pub fn max_rows(&self) -> Option<usize> {
        self.limit
    }

    /// Whether `row` satisfies every condition.
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(column, value)| row.get(*column) == Some(value))
    }

    /// Apply ordering and limit to already matched rows.
    pub fn arrange(&self, rows: &mut Vec<Row>) {
        if let Some(order) = &self.order {
            rows.sort_by(|a, b| {
                let ordering = compare(a.get(order.column), b.get(order.column));

                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&b.as_f64().unwrap_or_default()),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), _) => Ordering::Greater,
    }
}
