use crate::domain::model::{Catalog, SaleLine, SalesStats};

/// Running revenue for one salesperson.
///
/// Lines whose product is not in the catalog are priced at 0 and counted.
/// Arithmetic overflow saturates and is reported instead of wrapping.
#[derive(Debug)]
pub struct RevenueAggregator<'a> {
    catalog: &'a Catalog,
    total: i64,
    unknown_products: usize,
    overflowed: bool,
}

impl<'a> RevenueAggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            total: 0,
            unknown_products: 0,
            overflowed: false,
        }
    }

    pub fn add(&mut self, line: SaleLine) {
        let unit_price = match self.catalog.price_of(line.product_id) {
            Some(price) => price,
            None => {
                self.unknown_products += 1;
                tracing::debug!("Product {} is not in the catalog", line.product_id);
                0
            }
        };

        let amount = match line.quantity.checked_mul(unit_price) {
            Some(amount) => amount,
            None => {
                self.overflowed = true;
                line.quantity.saturating_mul(unit_price)
            }
        };
        self.total = match self.total.checked_add(amount) {
            Some(total) => total,
            None => {
                self.overflowed = true;
                self.total.saturating_add(amount)
            }
        };
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Folds the aggregator's counters into `stats`.
    pub fn record_into(&self, stats: &mut SalesStats) {
        stats.unknown_products += self.unknown_products;
        stats.overflowed |= self.overflowed;
    }
}

/// Total revenue for a sequence of sale lines against `catalog`.
pub fn total<I>(lines: I, catalog: &Catalog) -> i64
where
    I: IntoIterator<Item = SaleLine>,
{
    let mut aggregator = RevenueAggregator::new(catalog);
    for line in lines {
        aggregator.add(line);
    }
    aggregator.total()
}
