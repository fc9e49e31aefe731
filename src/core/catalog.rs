use crate::core::parser::{into_io_error, LineStats, RecordStream};
use crate::domain::model::{Catalog, Product};
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result, SourceRole};
use std::io::Read;
use std::path::Path;

/// Builds the id → price lookup from any `id;name;price` source.
/// Duplicate ids keep the last price seen.
pub fn catalog_from_reader<R: Read>(reader: R, source: &str) -> Result<(Catalog, LineStats)> {
    let mut stream: RecordStream<R, Product> = RecordStream::new(reader, source);
    let mut catalog = Catalog::new();

    for product in stream.by_ref() {
        if let Some(previous) = catalog.insert(product.id, product.price) {
            tracing::debug!(
                "Product {} ({}) listed again, price {} replaces {}",
                product.id,
                product.name,
                product.price,
                previous
            );
        }
    }

    if let Some(e) = stream.take_failure() {
        return Err(e.into());
    }
    Ok((catalog, stream.stats()))
}

/// Loads the catalog from storage. A missing or unreadable file is returned
/// as [`ReportError::MissingSource`]; an empty result is left to the caller.
pub fn load_catalog<S: Storage>(storage: &S, path: &Path) -> Result<(Catalog, LineStats)> {
    let located = storage.locate(path);
    let reader = storage
        .open_read(path)
        .map_err(|source| ReportError::MissingSource {
            role: SourceRole::Catalog,
            path: located.clone(),
            source,
        })?;

    let (catalog, stats) =
        catalog_from_reader(reader, &located.display().to_string()).map_err(|e| match e {
            ReportError::CsvError(e) if e.is_io_error() => ReportError::MissingSource {
                role: SourceRole::Catalog,
                path: located.clone(),
                source: into_io_error(e),
            },
            other => other,
        })?;

    tracing::info!(
        "Loaded {} products from '{}' ({} lines skipped)",
        catalog.len(),
        located.display(),
        stats.malformed + stats.blank
    );
    Ok((catalog, stats))
}
