#[cfg(test)]
mod tests {
    use super::super::{code_for_key, pressed_codes, FocusTarget, Keymap};
    use crate::core::{HelperConfig, Intent};
    use eframe::egui;
    use global_hotkey::hotkey::Code;

    fn default_keymap() -> Keymap {
        Keymap::from_config(&HelperConfig::default())
    }

    fn key_event(key: egui::Key, physical_key: Option<egui::Key>, pressed: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key,
            pressed,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_default_shortcuts() {
        let keymap = default_keymap();
        let focus = FocusTarget::Nothing;

        assert_eq!(keymap.lookup(Code::BracketLeft, focus), Some(Intent::SetLoopStart));
        assert_eq!(keymap.lookup(Code::BracketRight, focus), Some(Intent::SetLoopEnd));
        assert_eq!(keymap.lookup(Code::KeyL, focus), Some(Intent::ToggleLoop));
        assert_eq!(keymap.lookup(Code::KeyC, focus), Some(Intent::ToggleCountdown));
        assert_eq!(keymap.lookup(Code::Minus, focus), Some(Intent::SpeedDown));
        assert_eq!(keymap.lookup(Code::NumpadSubtract, focus), Some(Intent::SpeedDown));
        assert_eq!(keymap.lookup(Code::Equal, focus), Some(Intent::SpeedUp));
        assert_eq!(keymap.lookup(Code::NumpadAdd, focus), Some(Intent::SpeedUp));
        assert_eq!(keymap.lookup(Code::KeyQ, focus), None);
    }

    #[test]
    fn test_text_focus_suppresses_shortcuts() {
        let keymap = default_keymap();

        assert_eq!(keymap.lookup(Code::KeyL, FocusTarget::TextEntry), None);
        assert_eq!(keymap.lookup(Code::Minus, FocusTarget::TextEntry), None);
        assert_eq!(keymap.lookup(Code::KeyL, FocusTarget::Widget), Some(Intent::ToggleLoop));
    }

    #[test]
    fn test_keys_for_intent() {
        let keymap = default_keymap();
        assert_eq!(keymap.keys_for(Intent::SpeedUp), vec![Code::Equal, Code::NumpadAdd]);
        assert!(keymap.keys_for(Intent::RequestCountdown).is_empty());
    }

    #[test]
    fn test_duplicate_binding_keeps_last() {
        let keymap = Keymap::from_bindings([
            (Code::KeyL, Intent::ToggleLoop),
            (Code::KeyL, Intent::ToggleSound),
        ]);
        assert_eq!(keymap.lookup(Code::KeyL, FocusTarget::Nothing), Some(Intent::ToggleSound));
    }

    #[test]
    fn test_egui_key_translation() {
        assert_eq!(code_for_key(egui::Key::OpenBracket), Some(Code::BracketLeft));
        assert_eq!(code_for_key(egui::Key::CloseBracket), Some(Code::BracketRight));
        assert_eq!(code_for_key(egui::Key::Equals), Some(Code::Equal));
        assert_eq!(code_for_key(egui::Key::Plus), Some(Code::NumpadAdd));
        assert_eq!(code_for_key(egui::Key::L), Some(Code::KeyL));
        assert_eq!(code_for_key(egui::Key::Escape), None);
    }

    #[test]
    fn test_pressed_codes_prefers_physical_key() {
        let events = vec![
            // Shift+= on a US layout reports a logical Plus.
            key_event(egui::Key::Plus, Some(egui::Key::Equals), true),
            key_event(egui::Key::L, None, true),
            key_event(egui::Key::L, None, false),
            egui::Event::Text("l".to_string()),
        ];
        assert_eq!(pressed_codes(&events), vec![Code::Equal, Code::KeyL]);
    }
}
