use clap::Parser;
use vet_records::config::toml_config::LogFormat;
use vet_records::core::ConfigProvider;
use vet_records::utils::{logger, validation::Validate};
use vet_records::{Archive, CliConfig, LocalStorage, Shell};

fn main() {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let log_result = match config.logging.format {
        LogFormat::Text => logger::init_file_logger(config.log_file(), config.logging.verbose),
        LogFormat::Json => logger::init_json_file_logger(config.log_file(), config.logging.verbose),
    };
    if let Err(e) = log_result {
        logger::init_cli_logger(config.logging.verbose);
        tracing::warn!("Log file {} unavailable, logging to stderr: {}", config.log_file(), e);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.data_dir().to_string());
    let archive = Archive::from_config(storage, &config);

    let stdin = std::io::stdin();
    let mut shell = Shell::new(archive, stdin.lock(), std::io::stdout());

    // The session already saved its data; a fault still ends the process normally.
    if let Err(e) = shell.run() {
        tracing::error!(
            "Session ended on a fault: {} (Severity: {:?})",
            e,
            e.severity()
        );
        eprintln!("💡 {}", e.recovery_suggestion());
    }
}
