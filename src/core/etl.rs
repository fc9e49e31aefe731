use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load in order. Nothing is written unless
    /// every total has been computed.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("Starting sales report run");

        // Extract
        tracing::info!("Loading catalog and roster...");
        let source = self.pipeline.extract()?;
        let catalog_size = source.catalog.len();
        let salespeople = source.roster.len();
        tracing::info!(
            "Loaded {} products and {} salespeople",
            catalog_size,
            salespeople
        );
        self.monitor.log_stats("Extract");

        // Transform
        tracing::info!("Computing revenue totals...");
        let result = self.pipeline.transform(source)?;
        let missing_sales_files = result.stats.iter().filter(|(_, s)| s.file_missing).count();
        let malformed_lines: usize = result.stats.iter().map(|(_, s)| s.malformed_lines).sum();
        let unknown_products: usize = result.stats.iter().map(|(_, s)| s.unknown_products).sum();
        tracing::info!(
            "Computed {} totals ({} missing sales files, {} skipped lines, {} unknown product lines)",
            result.totals.len(),
            missing_sales_files,
            malformed_lines,
            unknown_products
        );
        self.monitor.log_stats("Transform");

        // Load
        tracing::info!("Writing report...");
        let report_path = self.pipeline.load(result)?;
        tracing::info!("Report saved to: {}", report_path.display());
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            report_path,
            catalog_size,
            salespeople,
            missing_sales_files,
            malformed_lines,
            unknown_products,
        })
    }
}
