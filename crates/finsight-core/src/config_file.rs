use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub generation: Option<GenerationConfig>,
    pub upload: Option<UploadConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Allowed CORS origins. `["*"]` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    pub cors_allow_credentials: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_upload_mb: Option<u32>,
    pub sniff_magic: Option<bool>,
}

/// Platform config directory path: `<config_dir>/finsight/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("finsight").join("config.toml"))
}

/// Load config by cascading CWD `.finsight.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".finsight.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let base_generation = base.generation.unwrap_or_default();
    let base_upload = base.upload.unwrap_or_default();
    let server = overlay.server.unwrap_or_default();
    let generation = overlay.generation.unwrap_or_default();
    let upload = overlay.upload.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            host: server.host.or(base_server.host),
            port: server.port.or(base_server.port),
            cors_origins: server.cors_origins.or(base_server.cors_origins),
            cors_allow_credentials: server
                .cors_allow_credentials
                .or(base_server.cors_allow_credentials),
        }),
        generation: Some(GenerationConfig {
            api_key: generation.api_key.or(base_generation.api_key),
            base_url: generation.base_url.or(base_generation.base_url),
            model: generation.model.or(base_generation.model),
            max_tokens: generation.max_tokens.or(base_generation.max_tokens),
            temperature: generation.temperature.or(base_generation.temperature),
            timeout_secs: generation.timeout_secs.or(base_generation.timeout_secs),
        }),
        upload: Some(UploadConfig {
            max_upload_mb: upload.max_upload_mb.or(base_upload.max_upload_mb),
            sniff_magic: upload.sniff_magic.or(base_upload.sniff_magic),
        }),
    }
}
