use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read {role} file '{}': {source}", path.display())]
    MissingSource {
        role: SourceRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog file '{}' contains no valid product lines", path.display())]
    EmptyCatalog { path: PathBuf },

    #[error("Cannot write report '{}': {source}", path.display())]
    ReportWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 來源檔案的角色，用於錯誤訊息與日誌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRole {
    Catalog,
    Roster,
}

impl std::fmt::Display for SourceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceRole::Catalog => "catalog",
            SourceRole::Roster => "roster",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::CsvError(_)
            | ReportError::MissingSource { .. }
            | ReportError::EmptyCatalog { .. } => ErrorCategory::Input,
            ReportError::ReportWriteError { .. } => ErrorCategory::Output,
            ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::CsvError(_) => ErrorSeverity::Medium,
            ReportError::MissingSource { .. }
            | ReportError::EmptyCatalog { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ReportError::ReportWriteError { .. } | ReportError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::MissingSource { role, path, .. } => format!(
                "Check that the {} file exists at '{}' and is readable",
                role,
                path.display()
            ),
            ReportError::EmptyCatalog { .. } => {
                "Catalog lines must look like 'id;name;price' with integer id and price".to_string()
            }
            ReportError::ReportWriteError { path, .. } => format!(
                "Check write permissions for '{}' and available disk space",
                path.display()
            ),
            ReportError::ConfigValidationError { field, .. }
            | ReportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting and run again", field)
            }
            ReportError::CsvError(_) => "Check the delimiter and encoding of the input files".to_string(),
            ReportError::IoError(_) => "Check the data directory and file permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::MissingSource { role, path, .. } => {
                format!("The {} file '{}' could not be read", role, path.display())
            }
            ReportError::EmptyCatalog { path } => {
                format!("No products could be loaded from '{}'", path.display())
            }
            ReportError::ReportWriteError { path, .. } => {
                format!("The report could not be written to '{}'", path.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
