use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub extraction: Option<ExtractionConfig>,
    pub server: Option<ServerConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Backend names in the order they should be tried.
    pub backends: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub max_upload_mb: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color: Option<bool>,
}

impl ConfigFile {
    pub fn backends(&self) -> Option<&[String]> {
        self.extraction.as_ref()?.backends.as_deref()
    }

    pub fn bind(&self) -> Option<&str> {
        self.server.as_ref()?.bind.as_deref()
    }

    pub fn max_upload_mb(&self) -> Option<u32> {
        self.server.as_ref()?.max_upload_mb
    }

    pub fn color(&self) -> Option<bool> {
        self.output.as_ref()?.color
    }
}

/// Platform config directory path: `<config_dir>/embedc/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("embedc").join("config.toml"))
}

/// Load config by cascading CWD `.embedc.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".embedc.toml"));

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
    ConfigFile {
        extraction: Some(ExtractionConfig {
            backends: overlay
                .backends()
                .or_else(|| base.backends())
                .map(<[String]>::to_vec),
        }),
        server: Some(ServerConfig {
            bind: overlay
                .bind()
                .or_else(|| base.bind())
                .map(str::to_string),
            max_upload_mb: overlay.max_upload_mb().or_else(|| base.max_upload_mb()),
        }),
        output: Some(OutputConfig {
            color: overlay.color().or_else(|| base.color()),
        }),
    }
}
