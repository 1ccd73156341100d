use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
///
/// Everything is optional: without an API key the tutor chat answers with a
/// fixed explanation, and without a catalog path the built-in catalog is used.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key. `None` disables live tutor replies.
    pub api_key: Option<String>,
    /// JSON file replacing the built-in tutorial catalog.
    pub catalog_path: Option<PathBuf>,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("catalog_path", &self.catalog_path)
            .field("tcp_listen_addr", &self.tcp_listen_addr)
            .finish()
    }
}

impl Config {
    /// Optional:
    /// - `GEMINI_API_KEY` (falls back to `API_KEY`)
    /// - `TUTOR_CATALOG_PATH`: JSON array of tutorial records
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_blank = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY"));

        let catalog_path = non_blank("TUTOR_CATALOG_PATH").map(PathBuf::from);
        if let Some(path) = &catalog_path {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "TUTOR_CATALOG_PATH does not point to a file: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            api_key,
            catalog_path,
            tcp_listen_addr: non_blank("MCP_TCP_LISTEN_ADDR"),
        })
    }

    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.catalog_path.is_none());
        assert!(config.tcp_listen_addr.is_none());
        assert_eq!(config.load_catalog().unwrap().len(), 8);
    }

    #[test]
    fn api_key_prefers_gemini_variable_and_ignores_blanks() {
        let config = config_from(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g"));

        let config = config_from(&[("GEMINI_API_KEY", "  "), ("API_KEY", "a")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("a"));

        let config = config_from(&[("API_KEY", "")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn missing_catalog_file_is_a_config_error() {
        let err = config_from(&[("TUTOR_CATALOG_PATH", "/no/such/catalog.json")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = config_from(&[("GEMINI_API_KEY", "secret-key")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
