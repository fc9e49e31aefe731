use crate::core::parser::{LineStats, RecordStream};
use crate::domain::model::{SaleLine, SalespersonIdentity};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::validation::is_plain_file_name;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Finds and streams one salesperson's sales file.
pub struct SalesFileReader<'a, S: Storage, C: ConfigProvider> {
    storage: &'a S,
    config: &'a C,
}

impl<'a, S: Storage, C: ConfigProvider> SalesFileReader<'a, S, C> {
    pub fn new(storage: &'a S, config: &'a C) -> Self {
        Self { storage, config }
    }

    /// `<sales_dir>/<full name><suffix>`, or `None` when the name would
    /// escape the sales directory.
    pub fn sales_path(&self, identity: &SalespersonIdentity) -> Option<PathBuf> {
        let file_name = format!("{}{}", identity.full_name, self.config.sales_suffix());
        if !is_plain_file_name(&file_name) {
            return None;
        }
        Some(Path::new(self.config.sales_dir()).join(file_name))
    }

    /// Never fails: a file that cannot be found or opened yields no lines.
    pub fn open(&self, identity: &SalespersonIdentity) -> SaleLines {
        let Some(path) = self.sales_path(identity) else {
            tracing::warn!(
                "Salesperson '{}' has a name that cannot be used as a file name, counting no sales",
                identity.full_name
            );
            return SaleLines::missing();
        };

        let located = self.storage.locate(&path);
        match self.storage.open_read(&path) {
            Ok(reader) => {
                tracing::debug!(
                    "Reading sales for '{}' from '{}'",
                    identity.full_name,
                    located.display()
                );
                SaleLines {
                    stream: Some(RecordStream::new(reader, located.display().to_string())),
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Sales file for '{}' not readable at '{}': {}, counting no sales",
                    identity.full_name,
                    located.display(),
                    e
                );
                SaleLines::missing()
            }
        }
    }
}

/// Lazy sequence of sale lines. Empty when the sales file is missing.
pub struct SaleLines {
    stream: Option<RecordStream<Box<dyn Read>, SaleLine>>,
}

impl SaleLines {
    fn missing() -> Self {
        Self { stream: None }
    }

    pub fn is_missing(&self) -> bool {
        self.stream.is_none()
    }

    pub fn line_stats(&self) -> LineStats {
        self.stream
            .as_ref()
            .map(|stream| stream.stats())
            .unwrap_or_default()
    }
}

impl Iterator for SaleLines {
    type Item = SaleLine;

    fn next(&mut self) -> Option<SaleLine> {
        self.stream.as_mut()?.next()
    }
}
