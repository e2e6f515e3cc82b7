//! Platform-neutral input events.
//!
//! Front-ends translate their native events (crossterm, DOM, ...) into these
//! before handing them to the controller.

use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Platform meta key (Cmd on macOS, Super elsewhere).
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    /// Whether a command modifier (Ctrl or Meta) is held.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Shift+Tab.
    pub const fn back_tab() -> Self {
        Self::with_modifiers(Key::Tab, Modifiers::SHIFT)
    }

    /// Ctrl+`c`.
    pub const fn ctrl(c: char) -> Self {
        Self::with_modifiers(Key::Char(c), Modifiers::CTRL)
    }

    /// Ctrl+K or Cmd+K, case-insensitive.
    pub fn is_palette_shortcut(&self) -> bool {
        self.modifiers.command() && matches!(self.key, Key::Char(c) if c.eq_ignore_ascii_case(&'k'))
    }

    /// A printable character typed without a command modifier.
    pub fn text_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.command() && !self.modifiers.alt && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::new(key)
    }
}

/// Pointer interactions, each targeting the topmost node under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed. Delivered to capture listeners before any click.
    Down(NodeId),
    /// Press and release on the same node.
    Click(NodeId),
    /// Pointer moved onto a node.
    Enter(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_shortcut_accepts_ctrl_and_meta_in_any_case() {
        assert!(KeyInput::ctrl('k').is_palette_shortcut());
        assert!(KeyInput::ctrl('K').is_palette_shortcut());
        assert!(KeyInput::with_modifiers(Key::Char('k'), Modifiers::META).is_palette_shortcut());
        assert!(!KeyInput::new(Key::Char('k')).is_palette_shortcut());
        assert!(!KeyInput::ctrl('j').is_palette_shortcut());
    }

    #[test]
    fn text_char_ignores_command_chords() {
        assert_eq!(KeyInput::new(Key::Char('a')).text_char(), Some('a'));
        assert_eq!(KeyInput::with_modifiers(Key::Char('A'), Modifiers::SHIFT).text_char(), Some('A'));
        assert_eq!(KeyInput::ctrl('a').text_char(), None);
        assert_eq!(KeyInput::with_modifiers(Key::Char('b'), Modifiers::ALT).text_char(), None);
        assert_eq!(KeyInput::new(Key::Enter).text_char(), None);
    }
}
