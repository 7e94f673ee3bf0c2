use global_hotkey::hotkey::Code;
use std::collections::HashMap;
use crate::core::{HelperConfig, Intent};

/// What currently holds keyboard focus in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Nothing,
    /// Anything that consumes typed text: text fields, text areas, embedded
    /// frames, editable regions.
    TextEntry,
    /// A focused control that does not take text, e.g. a button.
    Widget,
}

impl FocusTarget {
    /// Whether keystrokes belong to the focused control rather than to shortcuts.
    pub fn captures_keys(self) -> bool {
        self == FocusTarget::TextEntry
    }
}

/// Key code to intent table.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<Code, Intent>,
}

impl Keymap {
    pub fn from_config(config: &HelperConfig) -> Self {
        Self::from_bindings(config.key_bindings())
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (Code, Intent)>) -> Self {
        let mut map = HashMap::new();
        for (code, intent) in bindings {
            if let Some(previous) = map.insert(code, intent) {
                log::warn!("Key {:?} bound to both {:?} and {:?}, keeping {:?}", code, previous, intent, intent);
            }
        }
        log::debug!("Keymap has {} bindings", map.len());
        Self { bindings: map }
    }

    pub fn lookup(&self, code: Code, focus: FocusTarget) -> Option<Intent> {
        if focus.captures_keys() {
            return None;
        }
        self.bindings.get(&code).copied()
    }

    /// Keys bound to `intent`, for hints in the panel.
    pub fn keys_for(&self, intent: Intent) -> Vec<Code> {
        let mut keys: Vec<Code> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == intent)
            .map(|(code, _)| *code)
            .collect();
        keys.sort_by_key(|code| format!("{:?}", code));
        keys
    }
}
