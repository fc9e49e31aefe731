use std::collections::HashMap;
use std::path::PathBuf;

pub type ProductId = i64;

/// Product id to unit price, built once per run and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    prices: HashMap<ProductId, i64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same id replace earlier ones.
    pub fn insert(&mut self, id: ProductId, price: i64) -> Option<i64> {
        self.prices.insert(id, price)
    }

    pub fn price_of(&self, id: ProductId) -> Option<i64> {
        self.prices.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(ProductId, i64)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (ProductId, i64)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (id, price) in iter {
            catalog.insert(id, price);
        }
        catalog
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalespersonIdentity {
    pub full_name: String,
    pub national_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueTotal {
    pub salesperson: String,
    pub total: i64,
}

/// What happened while reading one salesperson's sales file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesStats {
    pub accepted_lines: usize,
    pub blank_lines: usize,
    pub malformed_lines: usize,
    pub unknown_products: usize,
    pub file_missing: bool,
    pub overflowed: bool,
}

/// Totals in roster order, together with the per-salesperson diagnostics.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    pub totals: Vec<RevenueTotal>,
    pub stats: Vec<(String, SalesStats)>,
}

/// Read-only inputs for the aggregation step.
#[derive(Debug, Clone)]
pub struct SourceData {
    pub catalog: Catalog,
    pub roster: Vec<SalespersonIdentity>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub catalog_size: usize,
    pub salespeople: usize,
    pub missing_sales_files: usize,
    pub malformed_lines: usize,
    pub unknown_products: usize,
}
