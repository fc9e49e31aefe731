use crate::core::catalog::load_catalog;
use crate::core::report;
use crate::core::roster::load_roster;
use crate::core::sales::SalesFileReader;
use crate::core::{aggregator::RevenueAggregator, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    AggregationResult, Catalog, RevenueTotal, SalesStats, SalespersonIdentity, SourceData,
};
use crate::utils::error::{ReportError, Result};
use std::path::{Path, PathBuf};

/// Catalog + roster in, ranked revenue report out.
pub struct RevenuePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RevenuePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Revenue for one salesperson. Never fails: a missing sales file or
    /// unusable lines only lower the total.
    pub fn salesperson_total(
        &self,
        identity: &SalespersonIdentity,
        catalog: &Catalog,
    ) -> (i64, SalesStats) {
        let reader = SalesFileReader::new(&self.storage, &self.config);
        let mut lines = reader.open(identity);
        let mut aggregator = RevenueAggregator::new(catalog);
        for line in lines.by_ref() {
            aggregator.add(line);
        }

        let line_stats = lines.line_stats();
        let mut stats = SalesStats {
            accepted_lines: line_stats.accepted,
            blank_lines: line_stats.blank,
            malformed_lines: line_stats.malformed,
            file_missing: lines.is_missing(),
            ..SalesStats::default()
        };
        aggregator.record_into(&mut stats);

        if stats.overflowed {
            tracing::warn!(
                "Revenue for '{}' exceeded the integer range and was capped",
                identity.full_name
            );
        }
        if stats.unknown_products > 0 {
            tracing::debug!(
                "'{}' sold {} line(s) of products missing from the catalog",
                identity.full_name,
                stats.unknown_products
            );
        }

        (aggregator.total(), stats)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for RevenuePipeline<S, C> {
    fn extract(&self) -> Result<SourceData> {
        let catalog_path = Path::new(self.config.catalog_file());
        let (catalog, _) = load_catalog(&self.storage, catalog_path)?;
        if catalog.is_empty() {
            return Err(ReportError::EmptyCatalog {
                path: self.storage.locate(catalog_path),
            });
        }

        let (roster, _) = load_roster(&self.storage, Path::new(self.config.roster_file()))?;
        Ok(SourceData { catalog, roster })
    }

    fn transform(&self, data: SourceData) -> Result<AggregationResult> {
        let mut result = AggregationResult::default();

        for identity in &data.roster {
            let (total, stats) = self.salesperson_total(identity, &data.catalog);
            tracing::debug!(
                "'{}': total {} from {} line(s), {} skipped",
                identity.full_name,
                total,
                stats.accepted_lines,
                stats.malformed_lines
            );
            result.totals.push(RevenueTotal {
                salesperson: identity.full_name.clone(),
                total,
            });
            result.stats.push((identity.full_name.clone(), stats));
        }

        Ok(result)
    }

    fn load(&self, result: AggregationResult) -> Result<PathBuf> {
        let ranked = report::rank(result.totals);
        let output = report::render(&ranked, self.config.report_header());

        let report_path = Path::new(self.config.report_file());
        let located = self.storage.locate(report_path);
        tracing::debug!(
            "Writing report with {} salespeople ({} bytes) to '{}'",
            ranked.len(),
            output.len(),
            located.display()
        );
        self.storage
            .write_file(report_path, output.as_bytes())
            .map_err(|source| ReportError::ReportWriteError {
                path: located.clone(),
                source,
            })?;

        Ok(located)
    }
}
