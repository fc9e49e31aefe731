use crate::domain::model::{AggregationResult, SourceData};
use crate::utils::error::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// Opens `path` for lazy, line-by-line reading. The handle is released
    /// when the returned reader is dropped.
    fn open_read(&self, path: &Path) -> std::io::Result<Box<dyn Read>>;

    /// Replaces the whole file at `path` with `data`.
    fn write_file(&self, path: &Path, data: &[u8]) -> std::io::Result<()>;

    /// Resolves `path` the way this storage does, for logs and errors.
    fn locate(&self, path: &Path) -> PathBuf;
}

pub trait ConfigProvider {
    fn catalog_file(&self) -> &str;
    fn roster_file(&self) -> &str;
    fn sales_dir(&self) -> &str;
    fn sales_suffix(&self) -> &str;
    fn report_file(&self) -> &str;
    fn report_header(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<SourceData>;
    fn transform(&self, data: SourceData) -> Result<AggregationResult>;
    fn load(&self, result: AggregationResult) -> Result<PathBuf>;
}
