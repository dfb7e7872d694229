//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    Next,
    Previous,
    First,
    Last,
    /// Jump to a 1-based position.
    JumpTo(u8),

    /// Open the front card.
    Activate,

    // Toggles
    TogglePause,
    ToggleDetails,
    ToggleHelp,
    ToggleTheme,

    /// Reload content from the source.
    Reload,

    /// Close overlays.
    Cancel,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Previous,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Next,

            // Navigation - arrow keys
            (KeyCode::Left, _) => KeyAction::Previous,
            (KeyCode::Right, _) => KeyAction::Next,
            (KeyCode::BackTab, _) => KeyAction::Previous,
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::Next,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::First,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::Last,
            (KeyCode::Home, _) => KeyAction::First,
            (KeyCode::End, _) => KeyAction::Last,
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                KeyAction::JumpTo(c as u8 - b'0')
            }

            (KeyCode::Enter, _) => KeyAction::Activate,

            // Toggles
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::TogglePause,
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::TogglePause,
            (KeyCode::Char('i'), KeyModifiers::NONE) => KeyAction::ToggleDetails,
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reload,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "h/← S-Tab", description: "Previous certificate" },
                KeyBinding { keys: "l/→ Tab", description: "Next certificate" },
                KeyBinding { keys: "g/Home", description: "First certificate" },
                KeyBinding { keys: "G/End", description: "Last certificate" },
                KeyBinding { keys: "1-9", description: "Jump to position" },
                KeyBinding { keys: "Enter", description: "Open front card" },
            ],
        },
        HelpSection {
            title: "Display",
            bindings: vec![
                KeyBinding { keys: "Space/p", description: "Pause/resume autoplay" },
                KeyBinding { keys: "i", description: "Toggle descriptions" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "r", description: "Reload content" },
            ],
        },
        HelpSection {
            title: "Application",
            bindings: vec![
                KeyBinding { keys: "Esc", description: "Close overlay" },
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('l'))), KeyAction::Next);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Left)), KeyAction::Previous);
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Home)), KeyAction::First);
        assert_eq!(
            KeyAction::from_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            KeyAction::Last
        );
    }

    #[test]
    fn test_digit_jumps() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('1'))), KeyAction::JumpTo(1));
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('9'))), KeyAction::JumpTo(9));
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('0'))), KeyAction::None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(KeyAction::from_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            KeyAction::from_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::ForceQuit
        );
    }

    #[test]
    fn test_help_sections_are_populated() {
        let sections = get_help_sections();
        assert!(sections.iter().all(|s| !s.bindings.is_empty()));
    }
}
