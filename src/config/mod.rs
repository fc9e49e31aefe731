pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_CATALOG_FILE: &str = "productos.txt";
pub const DEFAULT_ROSTER_FILE: &str = "vendedores.txt";
pub const DEFAULT_SALES_DIR: &str = "ventas";
pub const DEFAULT_SALES_SUFFIX: &str = "_ventas.txt";
pub const DEFAULT_REPORT_FILE: &str = "reporte_ventas.txt";

/// Checks shared by every [`ConfigProvider`].
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_path("catalog_file", config.catalog_file())?;
    validation::validate_path("roster_file", config.roster_file())?;
    validation::validate_path("sales_dir", config.sales_dir())?;
    validation::validate_file_fragment("sales_suffix", config.sales_suffix())?;
    validation::validate_path("report_file", config.report_file())?;
    validation::validate_non_empty_string("report_header", config.report_header())?;
    validation::validate_single_line("report_header", config.report_header())?;
    Ok(())
}

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-report")]
#[command(about = "Ranks salespeople by revenue from catalog, roster and sales files")]
pub struct CliConfig {
    /// Directory the input and report paths are relative to
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    #[arg(long, default_value = DEFAULT_CATALOG_FILE)]
    pub catalog_file: String,

    #[arg(long, default_value = DEFAULT_ROSTER_FILE)]
    pub roster_file: String,

    #[arg(long, default_value = DEFAULT_SALES_DIR)]
    pub sales_dir: String,

    /// Appended to each salesperson's full name to find their sales file
    #[arg(long, default_value = DEFAULT_SALES_SUFFIX)]
    pub sales_suffix: String,

    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: String,

    #[arg(long, default_value = crate::core::report::DEFAULT_HEADER)]
    pub report_header: String,

    /// Load settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_file(&self) -> &str {
        &self.catalog_file
    }

    fn roster_file(&self) -> &str {
        &self.roster_file
    }

    fn sales_dir(&self) -> &str {
        &self.sales_dir
    }

    fn sales_suffix(&self) -> &str {
        &self.sales_suffix
    }

    fn report_file(&self) -> &str {
        &self.report_file
    }

    fn report_header(&self) -> &str {
        &self.report_header
    }
}

#[cfg(feature = "cli")]
impl validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validate_provider(self)
    }
}
