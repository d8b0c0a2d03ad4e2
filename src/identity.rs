use crate::error::{WidgetError, WidgetResult};
use chrono::Utc;
use log::{info, debug};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

/// Storage key the user id is persisted under.
pub const USER_ID_KEY: &str = "ai_user_id";

const USER_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Key/value client storage that outlives a single session.
pub trait UserIdStore: Send + Sync {
    fn get(&self, key: &str) -> WidgetResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> WidgetResult<()>;
}

/// Flat JSON object on disk. Keys other than the ones written are preserved.
pub struct FileUserIdStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUserIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> WidgetResult<Map<String, JsonValue>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(_) =>
                Err(
                    WidgetError::Storage(
                        format!("{} does not hold a JSON object", self.path.display())
                    )
                ),
            Err(e) =>
                Err(WidgetError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))),
        }
    }
}

impl UserIdStore for FileUserIdStore {
    fn get(&self, key: &str) -> WidgetResult<Option<String>> {
        let _guard = self.lock.lock().map_err(|_| WidgetError::Storage("store lock poisoned".into()))?;
        let map = self.read_map()?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        let _guard = self.lock.lock().map_err(|_| WidgetError::Storage("store lock poisoned".into()))?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), JsonValue::String(value.to_string()));
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json
            ::to_string_pretty(&JsonValue::Object(map))
            .map_err(|e| WidgetError::Storage(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Session-only storage, forgotten when dropped.
#[derive(Default)]
pub struct MemoryUserIdStore {
    values: Mutex<HashMap<String, String>>,
}

impl UserIdStore for MemoryUserIdStore {
    fn get(&self, key: &str) -> WidgetResult<Option<String>> {
        let values = self.values.lock().map_err(|_| WidgetError::Storage("store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> WidgetResult<()> {
        let mut values = self.values.lock().map_err(|_| WidgetError::Storage("store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the persisted user id, creating and storing one on first use.
pub fn get_or_create_user_id(store: &dyn UserIdStore) -> WidgetResult<String> {
    if let Some(existing) = store.get(USER_ID_KEY)?.filter(|id| !id.is_empty()) {
        debug!("Reusing stored user id {}", existing);
        return Ok(existing);
    }
    let user_id = generate_user_id();
    store.set(USER_ID_KEY, &user_id)?;
    info!("Created user id {}", user_id);
    Ok(user_id)
}

/// `user_` followed by nine random base36 characters.
pub fn generate_user_id() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(USER_ID_SUFFIX_LEN);
    for _ in 0..USER_ID_SUFFIX_LEN {
        suffix.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    format!("user_{}", suffix)
}

/// `conv_` followed by the current unix time in milliseconds.
pub fn generate_conversation_id() -> String {
    format!("conv_{}", Utc::now().timestamp_millis())
}
