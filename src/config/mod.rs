pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::ClinicConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "vet-records")]
#[command(about = "Owners, pets and consultations for a small veterinary clinic")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the pets CSV and the consultations JSON
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub pets_file: Option<String>,

    #[arg(long)]
    pub consultations_file: Option<String>,

    #[arg(long)]
    pub log_file: Option<String>,

    /// Write the log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file when given, then applies the command-line overrides.
    pub fn resolve(&self) -> Result<ClinicConfig> {
        let mut config = match &self.config {
            Some(path) => ClinicConfig::from_file(path)?,
            None => ClinicConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if let Some(pets_file) = &self.pets_file {
            config.storage.pets_file = pets_file.clone();
        }
        if let Some(consultations_file) = &self.consultations_file {
            config.storage.consultations_file = consultations_file.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = log_file.clone();
        }
        if self.log_json {
            config.logging.format = toml_config::LogFormat::Json;
        }
        if self.verbose {
            config.logging.verbose = true;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_arguments() {
        let cli = CliConfig::parse_from(["vet-records"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.pets_file(), "pets_and_owners.csv");
        assert_eq!(config.consultations_file(), "consultations.json");
        assert_eq!(config.log_file(), "veterinary_clinic.log");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./from-file\"\npets_file = \"file.csv\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "vet-records",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--pets-file",
            "flag.csv",
            "--verbose",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.data_dir(), "./from-file");
        assert_eq!(config.pets_file(), "flag.csv");
        assert!(config.logging.verbose);
    }
}
