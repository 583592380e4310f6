use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/session.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_platform")]
    pub platform: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
            platform: default_platform(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                ClientConfig::default()
            }
        } else {
            ClientConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CONTENT_API_URL") {
            if !url.trim().is_empty() {
                self.backend.base_url = url;
            }
        }
        if let Ok(timeout) = env::var("CONTENT_API_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.backend.timeout_ms = value;
            }
        }
        if let Ok(platform) = env::var("CURATOR_PLATFORM") {
            if !platform.trim().is_empty() {
                self.platform = platform;
            }
        }
        if let Ok(path) = env::var("CURATOR_SESSION_PATH") {
            if !path.trim().is_empty() {
                self.session.path = PathBuf::from(path);
            }
        }
    }
}

fn default_platform() -> String {
    "instagram".to_string()
}

fn default_config_path() -> Option<PathBuf> {
    env::var("CURATOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/curator.toml")))
}
