use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const RESULTS_KEY: &str = "analysisResults";
// Written by an older client; never written here, only cleared.
pub const LEGACY_INPUT_KEY: &str = "inputData";

// Session-scoped persistence of the raw analysis payload plus the submitted
// inputs. One file per session, keyed like the browser session storage it
// replaces.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn load(&self) -> Result<Option<Value>, String> {
        let scope = self.read_scope().await?;
        Ok(scope.get(RESULTS_KEY).cloned())
    }

    pub async fn save(
        &self,
        raw: &Value,
        original_text: &str,
        original_image: &str,
    ) -> Result<(), String> {
        let mut entry = match raw {
            Value::Object(map) => map.clone(),
            _ => return Err("analysis payload is not a JSON object".to_string()),
        };
        entry.insert(
            "originalText".to_string(),
            Value::String(original_text.to_string()),
        );
        entry.insert(
            "originalImage".to_string(),
            Value::String(original_image.to_string()),
        );

        let mut scope = self.read_scope().await?;
        scope.insert(RESULTS_KEY.to_string(), Value::Object(entry));
        self.persist(&scope).await
    }

    pub async fn clear(&self) -> Result<(), String> {
        let mut scope = self.read_scope().await?;
        scope.remove(RESULTS_KEY);
        scope.remove(LEGACY_INPUT_KEY);
        debug!(path = %self.path.display(), "cleared analysis session");
        self.persist(&scope).await
    }

    async fn read_scope(&self) -> Result<Map<String, Value>, String> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| format!("failed to read session: {}", err))?;
        if data.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&data)
            .map_err(|err| format!("failed to parse session: {}", err))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err("session file is not a JSON object".to_string()),
        }
    }

    async fn persist(&self, scope: &Map<String, Value>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(scope)
            .map_err(|err| format!("failed to serialize session: {}", err))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|err| format!("failed to write session: {}", err))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|err| format!("failed to finalize session: {}", err))?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| format!("failed to create session dir: {}", err))
}
