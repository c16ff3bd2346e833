use crate::utils::repository_filter::RepositoryFilter;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const DEFAULT_OPENED_COLOR: &str = "#F86864";
pub const DEFAULT_ASSIGNED_COLOR: &str = "#F8A864";
pub const DEFAULT_COMMENTED_COLOR: &str = "#3D9296";
pub const DEFAULT_MERGED_COLOR: &str = "#4EC356";

/// Attachment colors, one per action category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub opened: String,
    pub assigned: String,
    pub commented: String,
    pub merged: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            opened: DEFAULT_OPENED_COLOR.to_string(),
            assigned: DEFAULT_ASSIGNED_COLOR.to_string(),
            commented: DEFAULT_COMMENTED_COLOR.to_string(),
            merged: DEFAULT_MERGED_COLOR.to_string(),
        }
    }
}

/// Shape of the message handed to the chat webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `{"attachments": [...]}` JSON body.
    #[default]
    Attachment,
    /// Form-encoded `payload=<markdown text>`.
    Legacy,
}

impl OutputMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "attachment" | "structured" => Some(OutputMode::Attachment),
            "legacy" | "text" => Some(OutputMode::Legacy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_delay: Duration::from_millis(2000),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub webhook_url: String,
    pub show_avatars: bool,
    pub palette: Palette,
    pub output_mode: OutputMode,
    pub repository_filter: RepositoryFilter,
    pub delivery: DeliveryConfig,
    pub port: u16,
}

#[derive(Debug)]
pub struct ConfigError {
    pub missing_vars: Vec<String>,
    pub invalid_vars: Vec<(String, String)>,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.missing_vars.is_empty() {
            writeln!(f, "Missing required environment variables:")?;
            for var in &self.missing_vars {
                writeln!(f, "  - {}", var)?;
            }
        }
        if !self.invalid_vars.is_empty() {
            writeln!(f, "Invalid environment variables:")?;
            for (var, err) in &self.invalid_vars {
                writeln!(f, "  - {}: {}", var, err)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Collects lookups against one variable source so every problem is
/// reported together.
struct Reader<'a> {
    vars: &'a HashMap<String, String>,
    missing: Vec<String>,
    invalid: Vec<(String, String)>,
}

impl<'a> Reader<'a> {
    fn get(&self, name: &str) -> Option<&'a str> {
        self.vars
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    fn required(&mut self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(v) => Some(v.to_string()),
            None => {
                self.missing.push(name.to_string());
                None
            }
        }
    }

    fn or_default(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or(default).to_string()
    }

    fn parsed<T>(&mut self, name: &str, default: T) -> T
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            None => default,
            Some(v) => match v.trim().parse::<T>() {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.invalid.push((name.to_string(), e.to_string()));
                    default
                }
            },
        }
    }

    fn invalid(&mut self, name: &str, reason: impl Into<String>) {
        self.invalid.push((name.to_string(), reason.into()));
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut reader = Reader {
            vars,
            missing: Vec::new(),
            invalid: Vec::new(),
        };

        let webhook_url = reader.required("MATTERMOST_WEBHOOK");
        if let Some(url) = &webhook_url {
            if let Err(e) = url::Url::parse(url) {
                reader.invalid("MATTERMOST_WEBHOOK", e.to_string());
            }
        }

        let show_avatars = match reader.get("SHOW_AVATARS") {
            None => true,
            Some(v) => parse_flag(v).unwrap_or_else(|| {
                reader.invalid("SHOW_AVATARS", format!("expected a boolean, got '{}'", v));
                true
            }),
        };

        let palette = Palette {
            opened: reader.or_default("OCTOPROXY_OPENED_COLOR", DEFAULT_OPENED_COLOR),
            assigned: reader.or_default("OCTOPROXY_ASSIGNED_COLOR", DEFAULT_ASSIGNED_COLOR),
            commented: reader.or_default("OCTOPROXY_COMMENTED_COLOR", DEFAULT_COMMENTED_COLOR),
            merged: reader.or_default("OCTOPROXY_MERGED_COLOR", DEFAULT_MERGED_COLOR),
        };

        let output_mode = match reader.get("OUTPUT_MODE") {
            None => OutputMode::default(),
            Some(v) => OutputMode::parse(v).unwrap_or_else(|| {
                reader.invalid(
                    "OUTPUT_MODE",
                    format!("expected 'attachment' or 'legacy', got '{}'", v),
                );
                OutputMode::default()
            }),
        };

        let repository_filter = RepositoryFilter::new(
            reader.get("REPOSITORY_INCLUDE"),
            reader.get("REPOSITORY_EXCLUDE"),
        )
        .unwrap_or_else(|e| {
            reader.invalid("REPOSITORY_INCLUDE/REPOSITORY_EXCLUDE", e.to_string());
            RepositoryFilter::default()
        });

        let defaults = DeliveryConfig::default();
        let delivery = DeliveryConfig {
            max_retries: reader.parsed("DELIVERY_MAX_RETRIES", defaults.max_retries),
            retry_delay: Duration::from_millis(
                reader.parsed("DELIVERY_RETRY_DELAY_MS", defaults.retry_delay.as_millis() as u64),
            ),
            timeout: Duration::from_secs(
                reader.parsed("DELIVERY_TIMEOUT_SECS", defaults.timeout.as_secs()),
            ),
        };

        let port = reader.parsed("PORT", 5050u16);

        match webhook_url {
            Some(webhook_url) if reader.missing.is_empty() && reader.invalid.is_empty() => {
                Ok(Self {
                    webhook_url,
                    show_avatars,
                    palette,
                    output_mode,
                    repository_filter,
                    delivery,
                    port,
                })
            }
            _ => Err(ConfigError {
                missing_vars: reader.missing,
                invalid_vars: reader.invalid,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_vars(&vars(&[("MATTERMOST_WEBHOOK", "https://chat.example.com/hooks/x")]))
                .unwrap();

        assert_eq!(config.webhook_url, "https://chat.example.com/hooks/x");
        assert!(config.show_avatars);
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.palette.merged, "#4EC356");
        assert_eq!(config.output_mode, OutputMode::Attachment);
        assert_eq!(config.delivery.max_retries, 1);
        assert_eq!(config.port, 5050);
        assert!(config.repository_filter.should_process("any/repo"));
    }

    #[test]
    fn test_missing_webhook() {
        let err = AppConfig::from_vars(&vars(&[])).unwrap_err();
        assert_eq!(err.missing_vars, vec!["MATTERMOST_WEBHOOK".to_string()]);
        assert!(err.to_string().contains("MATTERMOST_WEBHOOK"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_vars(&vars(&[
            ("MATTERMOST_WEBHOOK", "https://chat.example.com/hooks/x"),
            ("SHOW_AVATARS", "false"),
            ("OCTOPROXY_OPENED_COLOR", "#000000"),
            ("OUTPUT_MODE", "legacy"),
            ("REPOSITORY_INCLUDE", "octo/*"),
            ("DELIVERY_MAX_RETRIES", "0"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert!(!config.show_avatars);
        assert_eq!(config.palette.opened, "#000000");
        assert_eq!(config.palette.assigned, DEFAULT_ASSIGNED_COLOR);
        assert_eq!(config.output_mode, OutputMode::Legacy);
        assert!(!config.repository_filter.should_process("other/repo"));
        assert_eq!(config.delivery.max_retries, 0);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values_are_all_reported() {
        let err = AppConfig::from_vars(&vars(&[
            ("MATTERMOST_WEBHOOK", "not a url"),
            ("SHOW_AVATARS", "maybe"),
            ("OUTPUT_MODE", "carrier-pigeon"),
            ("PORT", "http"),
        ]))
        .unwrap_err();

        let names: Vec<&str> = err.invalid_vars.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["MATTERMOST_WEBHOOK", "SHOW_AVATARS", "OUTPUT_MODE", "PORT"]
        );
        assert!(err.missing_vars.is_empty());
    }
}
