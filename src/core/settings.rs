use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use crate::core::error::SettingsError;

/// Simple string key–value persistence.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

/// Flat JSON object on disk, written through on every `set`.
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self, SettingsError> {
        let values = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Settings file {} is unreadable ({}), starting empty", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("Opened settings store at {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn default_path() -> PathBuf {
        crate::core::HelperConfig::config_dir().join("settings.json")
    }

    fn flush(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|source| SettingsError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

const KEY_MINIMIZED: &str = "panel.minimized";
const KEY_RIGHT: &str = "panel.right";
const KEY_TOP: &str = "panel.top";

/// Floating panel placement, anchored to the top-right corner of the player area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub minimized: bool,
    /// Distance from the right edge of the player area, in points.
    pub right: f32,
    /// Distance from the top edge of the player area, in points.
    pub top: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            minimized: false,
            right: 20.0,
            top: 20.0,
        }
    }
}

impl PanelLayout {
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let minimized = store.get(KEY_MINIMIZED).map(|v| v == "true").unwrap_or(defaults.minimized);

        // Offsets only count when both were saved together.
        let (right, top) = match (
            store.get(KEY_RIGHT).and_then(|v| v.parse::<f32>().ok()),
            store.get(KEY_TOP).and_then(|v| v.parse::<f32>().ok()),
        ) {
            (Some(right), Some(top)) => (right, top),
            _ => (defaults.right, defaults.top),
        };

        Self { minimized, right, top }
    }

    pub fn toggle_minimized(&mut self, store: &mut dyn SettingsStore) {
        self.minimized = !self.minimized;
        if let Err(e) = store.set(KEY_MINIMIZED, self.minimized.to_string()) {
            log::warn!("Failed to persist minimized flag: {}", e);
        }
    }

    /// Moves the panel by a pointer delta. Minimized panels stay put.
    pub fn drag_by(&mut self, dx: f32, dy: f32) -> bool {
        if self.minimized {
            return false;
        }
        self.right -= dx;
        self.top += dy;
        true
    }

    pub fn finish_drag(&self, store: &mut dyn SettingsStore) {
        if let Err(e) = store.set(KEY_RIGHT, self.right.to_string()) {
            log::warn!("Failed to persist panel offset: {}", e);
            return;
        }
        if let Err(e) = store.set(KEY_TOP, self.top.to_string()) {
            log::warn!("Failed to persist panel offset: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("guitar-helper-test-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn test_layout_defaults_when_store_empty() {
        let store = MemoryStore::default();
        assert_eq!(PanelLayout::load(&store), PanelLayout::default());
    }

    #[test]
    fn test_minimize_is_persisted() {
        let mut store = MemoryStore::default();
        let mut layout = PanelLayout::load(&store);

        layout.toggle_minimized(&mut store);
        assert!(layout.minimized);
        assert_eq!(store.get("panel.minimized").as_deref(), Some("true"));
        assert!(PanelLayout::load(&store).minimized);

        layout.toggle_minimized(&mut store);
        assert!(!PanelLayout::load(&store).minimized);
    }

    #[test]
    fn test_drag_moves_right_anchored_offset() {
        let mut store = MemoryStore::default();
        let mut layout = PanelLayout::default();

        // Dragging right and down shrinks the right offset and grows the top offset.
        assert!(layout.drag_by(15.0, 10.0));
        assert_eq!(layout.right, 5.0);
        assert_eq!(layout.top, 30.0);

        // Nothing is stored until the drag is released.
        assert!(store.get("panel.right").is_none());
        layout.finish_drag(&mut store);

        let restored = PanelLayout::load(&store);
        assert_eq!(restored.right, 5.0);
        assert_eq!(restored.top, 30.0);
    }

    #[test]
    fn test_minimized_panel_does_not_drag() {
        let mut layout = PanelLayout {
            minimized: true,
            ..PanelLayout::default()
        };
        assert!(!layout.drag_by(50.0, 50.0));
        assert_eq!(layout.right, 20.0);
        assert_eq!(layout.top, 20.0);
    }

    #[test]
    fn test_half_saved_offset_falls_back_to_default() {
        let mut store = MemoryStore::default();
        store.set("panel.right", "100".to_string()).unwrap();
        let layout = PanelLayout::load(&store);
        assert_eq!(layout.right, 20.0);
        assert_eq!(layout.top, 20.0);
    }

    #[test]
    fn test_json_file_store_writes_through() {
        let path = temp_settings_path("write-through");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).expect("Failed to open store");
        store.set("panel.minimized", "true".to_string()).expect("Failed to set value");

        let reopened = JsonFileStore::open(&path).expect("Failed to reopen store");
        assert_eq!(reopened.get("panel.minimized").as_deref(), Some("true"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_file_store_recovers_from_garbage() {
        let path = temp_settings_path("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::open(&path).expect("Garbage should not be fatal");
        assert!(store.get("panel.minimized").is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
