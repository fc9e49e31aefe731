use crate::config::{
    validate_provider, DEFAULT_CATALOG_FILE, DEFAULT_REPORT_FILE, DEFAULT_ROSTER_FILE,
    DEFAULT_SALES_DIR, DEFAULT_SALES_SUFFIX,
};
use crate::core::report::DEFAULT_HEADER;
use crate::core::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub sources: SourcesConfig,
    pub report: ReportConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub data_dir: String,
    pub catalog: String,
    pub roster: String,
    pub sales_dir: String,
    pub sales_suffix: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            catalog: DEFAULT_CATALOG_FILE.to_string(),
            roster: DEFAULT_ROSTER_FILE.to_string(),
            sales_dir: DEFAULT_SALES_DIR.to_string(),
            sales_suffix: DEFAULT_SALES_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub path: String,
    pub header: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_REPORT_FILE.to_string(),
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALES_DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得資料目錄
    pub fn data_dir(&self) -> &str {
        &self.sources.data_dir
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring.json_logs
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_file(&self) -> &str {
        &self.sources.catalog
    }

    fn roster_file(&self) -> &str {
        &self.sources.roster
    }

    fn sales_dir(&self) -> &str {
        &self.sources.sales_dir
    }

    fn sales_suffix(&self) -> &str {
        &self.sources.sales_suffix
    }

    fn report_file(&self) -> &str {
        &self.report.path
    }

    fn report_header(&self) -> &str {
        &self.report.header
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("sources.data_dir", &self.sources.data_dir)?;
        validate_provider(self)
    }
}
