//! Precomputed chart datasets.
//!
//! The analytics endpoints are authenticated pass-through reads: the
//! datasets are computed out of band and seeded at startup, and no request
//! ever mutates them.

use serde_json::{Value, json};

use super::{ChartTables, MemoryStore};

/// Repository for the chart datasets.
pub struct ChartRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> ChartRepository<'a> {
    /// Create a new chart repository.
    #[must_use]
    pub(crate) const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// The area chart dataset (monthly revenue/expenses).
    #[must_use]
    pub fn area(&self) -> Value {
        self.store.charts.area.clone()
    }

    /// The bar chart dataset (items per category).
    #[must_use]
    pub fn bar(&self) -> Value {
        self.store.charts.bar.clone()
    }

    /// The pie chart dataset (traffic share).
    #[must_use]
    pub fn pie(&self) -> Value {
        self.store.charts.pie.clone()
    }
}

/// Build the seeded datasets.
pub(crate) fn seed() -> ChartTables {
    ChartTables {
        area: json!([
            { "month": "Jan", "revenue": 4200, "expenses": 2400 },
            { "month": "Feb", "revenue": 3800, "expenses": 2210 },
            { "month": "Mar", "revenue": 5100, "expenses": 2290 },
            { "month": "Apr", "revenue": 4780, "expenses": 2000 },
            { "month": "May", "revenue": 5890, "expenses": 2181 },
            { "month": "Jun", "revenue": 6390, "expenses": 2500 },
        ]),
        bar: json!([
            { "category": "Electronics", "count": 32 },
            { "category": "Books", "count": 24 },
            { "category": "Clothing", "count": 18 },
            { "category": "Home", "count": 11 },
            { "category": "Other", "count": 7 },
        ]),
        pie: json!([
            { "source": "Direct", "value": 44 },
            { "source": "Search", "value": 31 },
            { "source": "Referral", "value": 17 },
            { "source": "Social", "value": 8 },
        ]),
    }
}
