use crate::core::parser::{into_io_error, LineStats, RecordStream};
use crate::domain::model::SalespersonIdentity;
use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result, SourceRole};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Reads `name;nationalId` lines in file order. A repeated name keeps its
/// first position and identity.
pub fn roster_from_reader<R: Read>(
    reader: R,
    source: &str,
) -> Result<(Vec<SalespersonIdentity>, LineStats)> {
    let mut stream: RecordStream<R, SalespersonIdentity> = RecordStream::new(reader, source);
    let mut seen = HashSet::new();
    let mut roster = Vec::new();

    for identity in stream.by_ref() {
        if seen.insert(identity.full_name.clone()) {
            roster.push(identity);
        } else {
            tracing::warn!(
                "Salesperson '{}' listed more than once in '{}', keeping the first entry",
                identity.full_name,
                source
            );
        }
    }

    if let Some(e) = stream.take_failure() {
        return Err(e.into());
    }
    Ok((roster, stream.stats()))
}

pub fn load_roster<S: Storage>(
    storage: &S,
    path: &Path,
) -> Result<(Vec<SalespersonIdentity>, LineStats)> {
    let located = storage.locate(path);
    let missing = |source: std::io::Error| ReportError::MissingSource {
        role: SourceRole::Roster,
        path: located.clone(),
        source,
    };

    let reader = storage.open_read(path).map_err(&missing)?;
    let (roster, stats) =
        roster_from_reader(reader, &located.display().to_string()).map_err(|e| match e {
            ReportError::CsvError(e) if e.is_io_error() => missing(into_io_error(e)),
            other => other,
        })?;

    if roster.is_empty() {
        tracing::warn!("Roster '{}' lists no salespeople", located.display());
    } else {
        tracing::info!(
            "Loaded {} salespeople from '{}'",
            roster.len(),
            located.display()
        );
    }
    Ok((roster, stats))
}
