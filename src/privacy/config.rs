//! Configuration for nikki-privacy
//!
//! Supports loading from `.nikki-privacy.toml` (working directory) or
//! `<config dir>/nikki-privacy/config.toml` (global). Categories, gazetteers
//! and placeholders are fixed and cannot be configured.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::PREVIEW_LEN;

/// File name of the local configuration
pub const LOCAL_CONFIG_FILE: &str = ".nikki-privacy.toml";

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Whether to color terminal output
    pub color: bool,

    /// Characters of matched text shown in previews
    pub preview_len: usize,

    /// Whether `mask` shows the audit trail without `--audit`
    pub audit: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            preview_len: PREVIEW_LEN,
            audit: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset (e.g. "warn", "nikki_privacy=debug")
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Full nikki-privacy configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NikkiConfig {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub log: LogConfig,

    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Fallbacks applied while loading, reported once logging is up
    #[serde(skip)]
    pub notices: Vec<String>,
}

impl NikkiConfig {
    /// Load configuration from a directory, falling back to global config
    pub fn load(dir: &Path) -> Result<Self> {
        let local_config = Self::local_config_path(dir);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(global_config) = Self::global_config_path() {
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config.normalized())
    }

    /// Get global config path (<config dir>/nikki-privacy/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nikki-privacy").join("config.toml"))
    }

    /// Get local config path for a directory
    pub fn local_config_path(dir: &Path) -> PathBuf {
        dir.join(LOCAL_CONFIG_FILE)
    }

    /// Emit the load notices through `tracing`
    ///
    /// Loading happens before the subscriber exists, so fallbacks are kept
    /// on the config and logged here.
    pub fn log_notices(&self) {
        match &self.source {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no config file found, using defaults"),
        }
        for notice in &self.notices {
            tracing::warn!("{}", notice);
        }
    }

    fn normalized(mut self) -> Self {
        if self.output.preview_len == 0 {
            self.notices.push(format!(
                "output.preview_len must be positive, using {}",
                PREVIEW_LEN
            ));
            self.output.preview_len = PREVIEW_LEN;
        }
        if self.log.level.trim().is_empty() {
            self.notices
                .push("log.level is empty, using \"warn\"".to_string());
            self.log.level = LogConfig::default().level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NikkiConfig::default();
        assert!(config.output.color);
        assert!(!config.output.audit);
        assert_eq!(config.output.preview_len, 10);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[output]
color = false
preview_len = 4
audit = true

[log]
level = "nikki_privacy=debug"
"#;

        let config: NikkiConfig = toml::from_str(toml).unwrap();

        assert!(!config.output.color);
        assert!(config.output.audit);
        assert_eq!(config.output.preview_len, 4);
        assert_eq!(config.log.level, "nikki_privacy=debug");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: NikkiConfig = toml::from_str("[output]\naudit = true\n").unwrap();
        assert!(config.output.audit);
        assert!(config.output.color);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(LOCAL_CONFIG_FILE);

        std::fs::write(
            &config_path,
            r#"
[output]
audit = true
preview_len = 0
"#,
        )
        .unwrap();

        let config = NikkiConfig::load(dir.path()).unwrap();
        assert!(config.output.audit);
        // zero is replaced with the default
        assert_eq!(config.output.preview_len, PREVIEW_LEN);
        assert_eq!(config.source.as_deref(), Some(config_path.as_path()));
        assert_eq!(config.notices.len(), 1);
    }

    #[test]
    fn test_fallback_notices_are_logged() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(
            &config_path,
            "[output]\npreview_len = 0\n[log]\nlevel = \" \"\n",
        )
        .unwrap();
        let config = NikkiConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.log.level, "warn");

        let captured = Captured(Arc::new(Mutex::new(Vec::new())));
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.log_notices());

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"));
        assert!(logged.contains("output.preview_len must be positive, using 10"));
        assert!(logged.contains("log.level is empty"));
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&config_path, "[output\ncolor = ").unwrap();

        let err = NikkiConfig::load_from_file(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = NikkiConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
