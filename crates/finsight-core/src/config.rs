//! Runtime settings resolved from the TOML config file and the environment.
//!
//! Precedence: environment over file over built-in defaults. The binary
//! applies command-line flags on top of the result.

use std::time::Duration;

use crate::config_file::ConfigFile;
use crate::generation::{CohereClient, DEFAULT_BASE_URL, GenerationParams};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;

/// Which origins may make cross-origin requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin. Combined with credentials, the request origin is echoed back.
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Parse a list of origins, where a lone `*` means any.
    pub fn from_list<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list: Vec<String> = origins
            .into_iter()
            .map(|o| o.as_ref().trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if list.is_empty() || list.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(list)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub origins: AllowedOrigins,
    pub allow_credentials: bool,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            origins: AllowedOrigins::Any,
            allow_credentials: true,
        }
    }
}

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors: CorsSettings,
    pub api_key: Option<String>,
    pub base_url: String,
    pub generation: GenerationParams,
    /// Timeout for generation requests. `None` leaves the HTTP client default.
    pub request_timeout: Option<Duration>,
    /// Upload body limit in bytes. `None` disables the limit.
    pub max_upload_bytes: Option<usize>,
    /// Reject uploads whose bytes lack the `%PDF-` signature.
    pub sniff_magic: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: CorsSettings::default(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationParams::default(),
            request_timeout: None,
            max_upload_bytes: None,
            sniff_magic: false,
        }
    }
}

impl Config {
    /// Resolve settings from the process environment.
    pub fn from_env(file: ConfigFile) -> Self {
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Resolve settings using `env` as the environment lookup.
    pub fn resolve<F>(file: ConfigFile, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();
        let server = file.server.unwrap_or_default();
        let generation = file.generation.unwrap_or_default();
        let upload = file.upload.unwrap_or_default();

        let port = match var("FINSIGHT_PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "ignoring invalid FINSIGHT_PORT");
                    None
                }
            },
            None => None,
        };

        let origins = match var("FINSIGHT_CORS_ORIGINS") {
            Some(raw) => AllowedOrigins::from_list(raw.split(',')),
            None => server
                .cors_origins
                .map(AllowedOrigins::from_list)
                .unwrap_or(defaults.cors.origins),
        };

        Config {
            host: var("FINSIGHT_HOST")
                .or(server.host)
                .unwrap_or(defaults.host),
            port: port.or(server.port).unwrap_or(defaults.port),
            cors: CorsSettings {
                origins,
                allow_credentials: server
                    .cors_allow_credentials
                    .unwrap_or(defaults.cors.allow_credentials),
            },
            api_key: var("COHERE_API_KEY").or(generation.api_key),
            base_url: var("COHERE_BASE_URL")
                .or(generation.base_url)
                .unwrap_or(defaults.base_url),
            generation: GenerationParams {
                model: var("COHERE_MODEL")
                    .or(generation.model)
                    .unwrap_or(defaults.generation.model),
                max_tokens: generation
                    .max_tokens
                    .unwrap_or(defaults.generation.max_tokens),
                temperature: generation
                    .temperature
                    .unwrap_or(defaults.generation.temperature),
            },
            request_timeout: generation.timeout_secs.map(Duration::from_secs),
            max_upload_bytes: upload
                .max_upload_mb
                .map(|mb| mb as usize * 1024 * 1024),
            sniff_magic: upload.sniff_magic.unwrap_or(defaults.sniff_magic),
        }
    }

    /// Build the Cohere client described by this config.
    pub fn cohere_client(&self) -> CohereClient {
        CohereClient::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.request_timeout)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config_file::{GenerationConfig, ServerConfig, UploadConfig};

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = Config::resolve(ConfigFile::default(), env_from(&[]));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5001);
        assert_eq!(config.cors.origins, AllowedOrigins::Any);
        assert!(config.cors.allow_credentials);
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.cohere.ai");
        assert_eq!(config.generation, GenerationParams::default());
        assert!(config.request_timeout.is_none());
        assert!(config.max_upload_bytes.is_none());
        assert!(!config.sniff_magic);
    }

    #[test]
    fn env_overrides_file() {
        let file = ConfigFile {
            server: Some(ServerConfig {
                port: Some(7000),
                ..Default::default()
            }),
            generation: Some(GenerationConfig {
                api_key: Some("from-file".into()),
                model: Some("command-light".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = Config::resolve(
            file,
            env_from(&[("FINSIGHT_PORT", "8081"), ("COHERE_API_KEY", "from-env")]),
        );
        assert_eq!(config.port, 8081);
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.generation.model, "command-light");
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = Config::resolve(ConfigFile::default(), env_from(&[("FINSIGHT_PORT", "nope")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let file = ConfigFile {
            generation: Some(GenerationConfig {
                api_key: Some("from-file".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = Config::resolve(file, env_from(&[("COHERE_API_KEY", "  ")]));
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn cors_origin_list_from_env() {
        let config = Config::resolve(
            ConfigFile::default(),
            env_from(&[(
                "FINSIGHT_CORS_ORIGINS",
                "https://app.example.com, http://localhost:5173",
            )]),
        );
        assert_eq!(
            config.cors.origins,
            AllowedOrigins::List(vec![
                "https://app.example.com".into(),
                "http://localhost:5173".into()
            ])
        );
    }

    #[test]
    fn wildcard_anywhere_means_any() {
        assert_eq!(
            AllowedOrigins::from_list(["https://a.example", "*"]),
            AllowedOrigins::Any
        );
        assert_eq!(AllowedOrigins::from_list(Vec::<String>::new()), AllowedOrigins::Any);
    }

    #[test]
    fn upload_limits_from_file() {
        let file = ConfigFile {
            upload: Some(UploadConfig {
                max_upload_mb: Some(20),
                sniff_magic: Some(true),
            }),
            generation: Some(GenerationConfig {
                timeout_secs: Some(30),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = Config::resolve(file, env_from(&[]));
        assert_eq!(config.max_upload_bytes, Some(20 * 1024 * 1024));
        assert!(config.sniff_magic);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }
}
