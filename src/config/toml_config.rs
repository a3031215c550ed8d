use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClinicError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PETS_FILE: &str = "pets_and_owners.csv";
pub const DEFAULT_CONSULTATIONS_FILE: &str = "consultations.json";
pub const DEFAULT_LOG_FILE: &str = "veterinary_clinic.log";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub pets_file: String,
    pub consultations_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            pets_file: DEFAULT_PETS_FILE.to_string(),
            consultations_file: DEFAULT_CONSULTATIONS_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Relative paths resolve against the working directory, not `data_dir`.
    pub file: String,
    pub format: LogFormat,
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_LOG_FILE.to_string(),
            format: LogFormat::Text,
            verbose: false,
        }
    }
}

impl ClinicConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CLINIC_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClinicError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_path("storage.pets_file", &self.storage.pets_file)?;
        validation::validate_path(
            "storage.consultations_file",
            &self.storage.consultations_file,
        )?;
        validation::validate_path("logging.file", &self.logging.file)?;

        validation::validate_file_extensions(
            "storage.pets_file",
            std::slice::from_ref(&self.storage.pets_file),
            &["csv"],
        )?;
        validation::validate_file_extensions(
            "storage.consultations_file",
            std::slice::from_ref(&self.storage.consultations_file),
            &["json"],
        )?;

        Ok(())
    }
}

impl ConfigProvider for ClinicConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn pets_file(&self) -> &str {
        &self.storage.pets_file
    }

    fn consultations_file(&self) -> &str {
        &self.storage.consultations_file
    }

    fn log_file(&self) -> &str {
        &self.logging.file
    }
}

impl Validate for ClinicConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/clinic"
pets_file = "mascotas.csv"
consultations_file = "consultas.json"

[logging]
file = "/var/log/clinic.log"
format = "json"
verbose = true
"#;

        let config = ClinicConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), "/var/lib/clinic");
        assert_eq!(config.pets_file(), "mascotas.csv");
        assert_eq!(config.consultations_file(), "consultas.json");
        assert_eq!(config.log_file(), "/var/log/clinic.log");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ClinicConfig::from_toml_str("[storage]\ndata_dir = \"./data\"\n").unwrap();
        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.pets_file(), DEFAULT_PETS_FILE);
        assert_eq!(config.log_file(), DEFAULT_LOG_FILE);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VET_RECORDS_TEST_DATA_DIR", "/srv/clinic");

        let toml_content = r#"
[storage]
data_dir = "${VET_RECORDS_TEST_DATA_DIR}"
"#;

        let config = ClinicConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/srv/clinic");

        std::env::remove_var("VET_RECORDS_TEST_DATA_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[storage]
data_dir = "${VET_RECORDS_SURELY_UNSET_VAR}"
"#;
        let config = ClinicConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "${VET_RECORDS_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation_rejects_wrong_extension() {
        let toml_content = r#"
[storage]
pets_file = "pets.txt"
"#;

        let config = ClinicConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ClinicError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            ClinicConfig::from_toml_str("[storage\n"),
            Err(ClinicError::TomlError(_))
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nfile = \"file-test.log\"\n")
            .unwrap();

        let config = ClinicConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_file(), "file-test.log");
    }
}
