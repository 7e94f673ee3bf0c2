#[cfg(test)]
mod tests {

    use std::path::PathBuf;
    use global_hotkey::hotkey::Code;
    use crate::core::{CountdownConfig, HelperConfig, Intent, KeyBinding};

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("guitar-helper-config-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_countdown_config_default() {
        let config = CountdownConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.seconds, 3);
        assert!(config.sound_enabled);
    }

    #[test]
    fn test_zero_second_countdown_is_raised_to_one() {
        let config = CountdownConfig { seconds: 0, ..CountdownConfig::default() };
        assert_eq!(config.effective_seconds(), 1);
    }

    #[test]
    fn test_helper_config_default() {
        let config = HelperConfig::default();
        assert_eq!(config.discovery_interval_ms, 1000);
        assert_eq!(config.cues.tick_hz, 440.0);
        assert_eq!(config.cues.final_hz, 880.0);
        assert!(config.cues.output_device_name.is_none());
    }

    #[test]
    fn test_default_key_table() {
        let bindings = HelperConfig::default().key_bindings();

        assert!(bindings.contains(&(Code::BracketLeft, Intent::SetLoopStart)));
        assert!(bindings.contains(&(Code::BracketRight, Intent::SetLoopEnd)));
        assert!(bindings.contains(&(Code::KeyL, Intent::ToggleLoop)));
        assert!(bindings.contains(&(Code::KeyC, Intent::ToggleCountdown)));
        assert!(bindings.contains(&(Code::Minus, Intent::SpeedDown)));
        assert!(bindings.contains(&(Code::Equal, Intent::SpeedUp)));
        assert!(bindings.contains(&(Code::NumpadAdd, Intent::SpeedUp)));
        assert_eq!(bindings.len(), 8);
    }

    #[test]
    fn test_unknown_bindings_are_skipped() {
        let mut config = HelperConfig::default();
        config.keys.clear();
        config.keys.insert("toggle_loop".to_string(), vec![KeyBinding::new("Hyper7"), KeyBinding::new("KeyP")]);
        config.keys.insert("clip_15s".to_string(), vec![KeyBinding::new("KeyQ")]);

        assert_eq!(config.key_bindings(), vec![(Code::KeyP, Intent::ToggleLoop)]);
    }

    #[test]
    fn test_key_binding_parse_errors() {
        assert!(KeyBinding::new("Numpad1").to_code().is_err());
        assert_eq!(KeyBinding::new(" KeyC ").to_code().unwrap(), Code::KeyC);
    }

    #[test]
    fn test_helper_config_serialization() {
        let mut config = HelperConfig::default();
        config.countdown.enabled = true;
        config.countdown.seconds = 5;
        config.cues.output_device_name = Some("Speakers".to_string());

        let serialized = serde_json::to_string(&config).expect("Failed to serialize config");
        let deserialized: HelperConfig = serde_json::from_str(&serialized).expect("Failed to deserialize config");

        assert!(deserialized.countdown.enabled);
        assert_eq!(deserialized.countdown.seconds, 5);
        assert_eq!(deserialized.cues.output_device_name.as_deref(), Some("Speakers"));
        assert_eq!(deserialized.key_bindings(), config.key_bindings());
    }

    #[test]
    fn test_config_backward_compatibility() {
        // Older files without cue or key sections still load
        let old_config_json = r#"{
            "countdown": { "enabled": true, "seconds": 4 }
        }"#;

        let config: HelperConfig = serde_json::from_str(old_config_json).expect("Failed to parse old config");

        assert!(config.countdown.enabled);
        assert_eq!(config.countdown.seconds, 4);
        assert!(config.countdown.sound_enabled); // Default to true
        assert_eq!(config.cues.duration_ms, 100);
        assert_eq!(config.discovery_interval_ms, 1000);
        assert!(!config.key_bindings().is_empty());
    }

    #[test]
    fn test_load_creates_defaults_then_reads_back() {
        let path = temp_config_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let created = HelperConfig::load_from(&path).expect("Failed to create config");
        assert!(path.exists());
        assert_eq!(created.countdown.seconds, 3);

        let mut edited = created.clone();
        edited.countdown.seconds = 8;
        edited.save_to(&path).expect("Failed to save config");

        let loaded = HelperConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.countdown.seconds, 8);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_broken_config_is_replaced_with_defaults() {
        let path = temp_config_path("broken");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ this is not json").unwrap();

        let config = HelperConfig::load_from(&path).expect("Broken config should not be fatal");
        assert_eq!(config.countdown.seconds, 3);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<HelperConfig>(&rewritten).is_ok());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
