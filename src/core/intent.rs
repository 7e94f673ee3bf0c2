use serde::{Deserialize, Serialize};

/// User intents forwarded by the control panel and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SetLoopStart,
    SetLoopEnd,
    ToggleLoop,
    ToggleCountdown,
    ToggleSound,
    SpeedUp,
    SpeedDown,
    RequestCountdown,
}

impl Intent {
    pub const ALL: [Intent; 8] = [
        Intent::SetLoopStart,
        Intent::SetLoopEnd,
        Intent::ToggleLoop,
        Intent::ToggleCountdown,
        Intent::ToggleSound,
        Intent::SpeedUp,
        Intent::SpeedDown,
        Intent::RequestCountdown,
    ];

    /// Config key used in the `keys` table.
    pub fn config_name(self) -> &'static str {
        match self {
            Intent::SetLoopStart => "set_loop_start",
            Intent::SetLoopEnd => "set_loop_end",
            Intent::ToggleLoop => "toggle_loop",
            Intent::ToggleCountdown => "toggle_countdown",
            Intent::ToggleSound => "toggle_sound",
            Intent::SpeedUp => "speed_up",
            Intent::SpeedDown => "speed_down",
            Intent::RequestCountdown => "request_countdown",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.config_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_round_trip() {
        for intent in Intent::ALL {
            assert_eq!(Intent::from_config_name(intent.config_name()), Some(intent));
        }
        assert_eq!(Intent::from_config_name("clip_15s"), None);
    }
}
