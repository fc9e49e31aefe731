//! Line-level parsing for the `;`-delimited input files.
//!
//! A line either becomes a typed record, is skipped as blank, or is rejected
//! with a reason. Rejection is never an error: callers count it and move on.

use crate::domain::model::{Product, SaleLine, SalespersonIdentity};
use csv::StringRecord;
use std::fmt;
use std::io::Read;

pub const DELIMITER: u8 = b';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    FieldCount { expected: usize, found: usize },
    NotNumeric { index: usize, value: String },
    Undecodable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            RejectReason::NotNumeric { index, value } => {
                write!(f, "field {} is not an integer: {:?}", index, value)
            }
            RejectReason::Undecodable => f.write_str("line is not valid UTF-8"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome<T> {
    Record(T),
    Blank,
    Rejected(RejectReason),
}

/// A record type with a fixed number of `;`-separated fields.
pub trait FromFields: Sized {
    const FIELDS: usize;

    /// Called only once the field count has been checked.
    fn from_fields(record: &StringRecord) -> Result<Self, RejectReason>;
}

pub fn parse_record<T: FromFields>(record: &StringRecord) -> LineOutcome<T> {
    if record.len() <= 1 && record.iter().all(|field| field.trim().is_empty()) {
        return LineOutcome::Blank;
    }
    if record.len() != T::FIELDS {
        return LineOutcome::Rejected(RejectReason::FieldCount {
            expected: T::FIELDS,
            found: record.len(),
        });
    }
    match T::from_fields(record) {
        Ok(value) => LineOutcome::Record(value),
        Err(reason) => LineOutcome::Rejected(reason),
    }
}

pub fn parse_line<T: FromFields>(line: &str) -> LineOutcome<T> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return LineOutcome::Blank;
    }
    let record: StringRecord = line.split(DELIMITER as char).collect();
    parse_record(&record)
}

/// Streams raw records without header handling, quoting or trimming, so each
/// physical line maps to exactly one record.
pub fn delimited_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::None)
        .from_reader(reader)
}

/// Per-source line counts. `blank` covers empty and whitespace-only lines
/// that precede a record; empty lines after the last record are not seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub accepted: usize,
    pub blank: usize,
    pub malformed: usize,
}

/// Lazily parses a delimited source into records of type `T`, skipping
/// blank and rejected lines. An I/O failure ends the stream.
pub struct RecordStream<R: Read, T: FromFields> {
    records: csv::StringRecordsIntoIter<R>,
    source: String,
    stats: LineStats,
    line: u64,
    failed: Option<csv::Error>,
    _record: std::marker::PhantomData<T>,
}

impl<R: Read, T: FromFields> RecordStream<R, T> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            records: delimited_reader(reader).into_records(),
            source: source.into(),
            stats: LineStats::default(),
            line: 1,
            failed: None,
            _record: std::marker::PhantomData,
        }
    }

    pub fn stats(&self) -> LineStats {
        self.stats
    }

    /// The I/O error that cut the stream short, if any.
    pub fn take_failure(&mut self) -> Option<csv::Error> {
        self.failed.take()
    }

    // The csv reader drops empty lines without yielding them; every newline
    // consumed for one record beyond its own terminator was an empty line.
    fn note_consumed_lines(&mut self) {
        let line = self.records.reader().position().line();
        let consumed = line.saturating_sub(self.line);
        self.stats.blank += consumed.saturating_sub(1) as usize;
        self.line = line;
    }
}

/// Recovers the underlying I/O error from a csv error, keeping its kind.
pub fn into_io_error(e: csv::Error) -> std::io::Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{:?}", other)),
    }
}

impl<R: Read, T: FromFields> Iterator for RecordStream<R, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.failed.is_some() {
            return None;
        }
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    tracing::warn!("Stopped reading '{}': {}", self.source, e);
                    self.failed = Some(e);
                    return None;
                }
                Err(e) => {
                    self.note_consumed_lines();
                    self.stats.malformed += 1;
                    tracing::debug!(
                        "Skipping line in '{}': {} ({})",
                        self.source,
                        RejectReason::Undecodable,
                        e
                    );
                    continue;
                }
            };

            self.note_consumed_lines();

            match parse_record::<T>(&record) {
                LineOutcome::Record(value) => {
                    self.stats.accepted += 1;
                    return Some(value);
                }
                LineOutcome::Blank => self.stats.blank += 1,
                LineOutcome::Rejected(reason) => {
                    self.stats.malformed += 1;
                    tracing::debug!(
                        "Skipping line {} in '{}': {}",
                        record.position().map(|p| p.line()).unwrap_or_default(),
                        self.source,
                        reason
                    );
                }
            }
        }
    }
}

pub fn integer_field(record: &StringRecord, index: usize) -> Result<i64, RejectReason> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| RejectReason::NotNumeric {
        index,
        value: raw.to_string(),
    })
}

fn text_field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

impl FromFields for Product {
    const FIELDS: usize = 3;

    fn from_fields(record: &StringRecord) -> Result<Self, RejectReason> {
        Ok(Product {
            id: integer_field(record, 0)?,
            name: text_field(record, 1),
            price: integer_field(record, 2)?,
        })
    }
}

impl FromFields for SalespersonIdentity {
    const FIELDS: usize = 2;

    fn from_fields(record: &StringRecord) -> Result<Self, RejectReason> {
        let national_id = integer_field(record, 1)?;
        Ok(SalespersonIdentity {
            full_name: text_field(record, 0),
            national_id,
        })
    }
}

impl FromFields for SaleLine {
    const FIELDS: usize = 3;

    fn from_fields(record: &StringRecord) -> Result<Self, RejectReason> {
        Ok(SaleLine {
            product_id: integer_field(record, 0)?,
            quantity: integer_field(record, 2)?,
        })
    }
}
