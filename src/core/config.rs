use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use global_hotkey::hotkey::Code;
use std::collections::HashMap;
use crate::core::Intent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String, // W3C code name: "BracketLeft", "KeyL", "NumpadAdd", etc.
}

impl KeyBinding {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }

    pub fn to_code(&self) -> anyhow::Result<Code> {
        let code = match self.key.trim() {
            // Brackets and punctuation
            "BracketLeft" => Code::BracketLeft,
            "BracketRight" => Code::BracketRight,
            "Minus" => Code::Minus,
            "Equal" => Code::Equal,
            "Comma" => Code::Comma,
            "Period" => Code::Period,
            "Semicolon" => Code::Semicolon,
            "Quote" => Code::Quote,
            "Slash" => Code::Slash,
            "Backslash" => Code::Backslash,
            "Space" => Code::Space,
            // Numpad operators
            "NumpadAdd" => Code::NumpadAdd,
            "NumpadSubtract" => Code::NumpadSubtract,
            // Letters
            "KeyA" => Code::KeyA,
            "KeyB" => Code::KeyB,
            "KeyC" => Code::KeyC,
            "KeyD" => Code::KeyD,
            "KeyE" => Code::KeyE,
            "KeyF" => Code::KeyF,
            "KeyG" => Code::KeyG,
            "KeyH" => Code::KeyH,
            "KeyI" => Code::KeyI,
            "KeyJ" => Code::KeyJ,
            "KeyK" => Code::KeyK,
            "KeyL" => Code::KeyL,
            "KeyM" => Code::KeyM,
            "KeyN" => Code::KeyN,
            "KeyO" => Code::KeyO,
            "KeyP" => Code::KeyP,
            "KeyQ" => Code::KeyQ,
            "KeyR" => Code::KeyR,
            "KeyS" => Code::KeyS,
            "KeyT" => Code::KeyT,
            "KeyU" => Code::KeyU,
            "KeyV" => Code::KeyV,
            "KeyW" => Code::KeyW,
            "KeyX" => Code::KeyX,
            "KeyY" => Code::KeyY,
            "KeyZ" => Code::KeyZ,
            // Regular digits
            "Digit0" => Code::Digit0,
            "Digit1" => Code::Digit1,
            "Digit2" => Code::Digit2,
            "Digit3" => Code::Digit3,
            "Digit4" => Code::Digit4,
            "Digit5" => Code::Digit5,
            "Digit6" => Code::Digit6,
            "Digit7" => Code::Digit7,
            "Digit8" => Code::Digit8,
            "Digit9" => Code::Digit9,
            // Function keys
            "F1" => Code::F1,
            "F2" => Code::F2,
            "F3" => Code::F3,
            "F4" => Code::F4,
            "F5" => Code::F5,
            "F6" => Code::F6,
            "F7" => Code::F7,
            "F8" => Code::F8,
            "F9" => Code::F9,
            "F10" => Code::F10,
            "F11" => Code::F11,
            "F12" => Code::F12,
            _ => return Err(anyhow::anyhow!("Unknown key code: {}", self.key)),
        };
        Ok(code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub enabled: bool,
    pub seconds: u32,
    pub sound_enabled: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            seconds: 3,
            sound_enabled: true,
        }
    }
}

impl CountdownConfig {
    /// Countdown length in whole seconds, never below one.
    pub fn effective_seconds(&self) -> u32 {
        self.seconds.max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CueConfig {
    pub tick_hz: f32,
    pub final_hz: f32,
    pub duration_ms: u32,
    pub volume: f32,
    pub output_device_name: Option<String>,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            tick_hz: 440.0,  // A4
            final_hz: 880.0, // A5
            duration_ms: 100,
            volume: 0.1,
            output_device_name: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    pub countdown: CountdownConfig,
    pub cues: CueConfig,
    pub discovery_interval_ms: u64,
    pub keys: HashMap<String, Vec<KeyBinding>>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        let mut keys = HashMap::new();

        keys.insert(Intent::SetLoopStart.config_name().to_string(), vec![KeyBinding::new("BracketLeft")]);
        keys.insert(Intent::SetLoopEnd.config_name().to_string(), vec![KeyBinding::new("BracketRight")]);
        keys.insert(Intent::ToggleLoop.config_name().to_string(), vec![KeyBinding::new("KeyL")]);
        keys.insert(Intent::ToggleCountdown.config_name().to_string(), vec![KeyBinding::new("KeyC")]);
        keys.insert(
            Intent::SpeedDown.config_name().to_string(),
            vec![KeyBinding::new("Minus"), KeyBinding::new("NumpadSubtract")],
        );
        keys.insert(
            Intent::SpeedUp.config_name().to_string(),
            vec![KeyBinding::new("Equal"), KeyBinding::new("NumpadAdd")],
        );

        Self {
            countdown: CountdownConfig::default(),
            cues: CueConfig::default(),
            discovery_interval_ms: 1000,
            keys,
        }
    }
}

impl HelperConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file at {}: {}", config_path.display(), e))?;

            match serde_json::from_str::<Self>(&content) {
                Ok(config) => {
                    log::info!("Loaded existing config from {}", config_path.display());
                    Ok(config)
                }
                Err(e) => {
                    log::warn!("Config file exists but has issues ({}), creating new one with defaults", e);
                    let new_config = Self::default();
                    new_config.save_to(config_path)
                        .map_err(|save_err| anyhow::anyhow!("Failed to save new config: {}", save_err))?;
                    log::info!("Created new config file at {}", config_path.display());
                    Ok(new_config)
                }
            }
        } else {
            log::info!("No config file found, creating default config");
            let config = Self::default();
            config.save_to(config_path)
                .map_err(|e| anyhow::anyhow!("Failed to save default config: {}", e))?;
            log::info!("Created new config file at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("guitar-helper")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn discovery_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.discovery_interval_ms.max(1))
    }

    /// Resolves the `keys` table, skipping entries that name an unknown intent or key.
    pub fn key_bindings(&self) -> Vec<(Code, Intent)> {
        let mut bindings = Vec::new();

        for (name, keys) in &self.keys {
            let Some(intent) = Intent::from_config_name(name) else {
                log::warn!("Ignoring key bindings for unknown action '{}'", name);
                continue;
            };
            for binding in keys {
                match binding.to_code() {
                    Ok(code) => bindings.push((code, intent)),
                    Err(e) => log::warn!("Ignoring key binding for '{}': {}", name, e),
                }
            }
        }

        bindings.sort_by_key(|(_, intent)| *intent);
        bindings
    }
}
