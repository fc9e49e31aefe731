use anyhow::Context;
use clap::Parser;
use sales_report::core::ConfigProvider;
use sales_report::utils::error::ErrorSeverity;
use sales_report::utils::{logger, validation::Validate};
use sales_report::{CliConfig, EtlEngine, LocalStorage, RevenuePipeline, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (如有指定)
    let toml_config = match cli.config.as_deref().map(load_toml_config).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let json_logs = cli.json_logs || toml_config.as_ref().is_some_and(TomlConfig::json_logs);
    if json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting sales-report");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let exit_code = match toml_config {
        Some(config) => {
            tracing::info!("📁 Using configuration from: {}", cli.config.as_deref().unwrap_or_default());
            let data_dir = config.data_dir().to_string();
            let monitor = cli.monitor || config.monitoring_enabled();
            run(config, &data_dir, monitor)
        }
        None => {
            let data_dir = cli.data_dir.clone();
            let monitor = cli.monitor;
            run(cli, &data_dir, monitor)
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn load_toml_config(path: &str) -> anyhow::Result<TomlConfig> {
    TomlConfig::from_file(path).with_context(|| format!("Failed to load config file '{}'", path))
}

fn run<C: ConfigProvider + Validate>(config: C, data_dir: &str, monitor_enabled: bool) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return 1;
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(data_dir);
    let pipeline = RevenuePipeline::new(storage, config);
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(summary) => {
            tracing::info!(
                "✅ Ranked {} salespeople against {} products",
                summary.salespeople,
                summary.catalog_size
            );
            if summary.missing_sales_files > 0 {
                tracing::warn!(
                    "{} salespeople had no readable sales file and were reported with 0",
                    summary.missing_sales_files
                );
            }
            println!("✅ Report created: {}", summary.report_path.display());
            0
        }
        Err(e) => {
            tracing::error!(
                "❌ Report run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            }
        }
    }
}
