use crate::core::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/xnngjrkq";
pub const DEFAULT_STORE_PATH: &str = "./.studio-booking/storage.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub relay: RelayConfig,
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo {
                name: "Studio di Psicoterapia".to_string(),
                footer: None,
            },
            relay: RelayConfig {
                endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
                timeout_seconds: None,
            },
            storage: StorageConfig {
                path: DEFAULT_STORE_PATH.to_string(),
            },
            logging: None,
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RELAY_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("site.name", &self.site.name)?;
        if self.relay.endpoint.trim().is_empty() {
            return Err(BookingError::MissingConfigError {
                field: "relay.endpoint".to_string(),
            });
        }
        validate_url("relay.endpoint", &self.relay.endpoint)?;
        if let Some(timeout) = self.relay.timeout_seconds {
            validate_range("relay.timeout_seconds", timeout, 1, 300)?;
        }
        if self.storage.path.trim().is_empty() {
            return Err(BookingError::MissingConfigError {
                field: "storage.path".to_string(),
            });
        }
        validate_path("storage.path", &self.storage.path)?;

        Ok(())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }
}

impl ConfigProvider for SiteConfig {
    fn relay_endpoint(&self) -> &str {
        &self.relay.endpoint
    }

    fn relay_timeout_seconds(&self) -> u64 {
        self.relay.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn store_path(&self) -> &str {
        &self.storage.path
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[site]
name = "Studio Di Pasquale"
footer = "© 2024 Studio Di Pasquale"

[relay]
endpoint = "https://formspree.io/f/test"
timeout_seconds = 10

[storage]
path = "./storage.json"
"#;

    #[test]
    fn test_parse_basic_config() {
        let config = SiteConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.site.name, "Studio Di Pasquale");
        assert_eq!(config.relay_endpoint(), "https://formspree.io/f/test");
        assert_eq!(config.relay_timeout_seconds(), 10);
        assert_eq!(config.store_path(), "./storage.json");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STUDIO_TEST_RELAY", "https://relay.test/f/abc");

        let content = BASIC.replace("https://formspree.io/f/test", "${STUDIO_TEST_RELAY}");
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.relay.endpoint, "https://relay.test/f/abc");

        std::env::remove_var("STUDIO_TEST_RELAY");
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let content = BASIC.replace("https://formspree.io/f/test", "not-a-url");
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_section_selects_format() {
        let content = format!("{}\n[logging]\nformat = \"json\"\n", BASIC);
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let content = format!("{}\n[logging]\nformat = \"xml\"\n", BASIC);
        assert!(matches!(
            SiteConfig::from_toml_str(&content),
            Err(BookingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_blank_endpoint_is_missing() {
        let content = BASIC.replace("https://formspree.io/f/test", "");
        let config = SiteConfig::from_toml_str(&content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BookingError::MissingConfigError { ref field }) if field == "relay.endpoint"
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.relay_timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.path, "./storage.json");
    }
}
