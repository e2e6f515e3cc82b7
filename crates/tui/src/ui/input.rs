//! Translation of crossterm events into navigation input.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use evoque_nav::{Key, KeyInput, Modifiers, NodeId, PointerEvent};

use crate::ui::hit_map::HitMap;

/// Maps a key press onto a [`KeyInput`]. Releases and keys the navigation
/// system has no use for yield `None`.
pub fn key_input_from(event: &KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        meta: event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };
    let key = match event.code {
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        // Terminals report Shift+Tab as its own key code.
        KeyCode::BackTab => {
            return Some(KeyInput::with_modifiers(
                Key::Tab,
                Modifiers {
                    shift: true,
                    ..modifiers
                },
            ));
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };
    Some(KeyInput::with_modifiers(key, modifiers))
}

/// Turns raw mouse events into pointer events against the last frame's
/// [`HitMap`].
///
/// A click is a left press and release on the same node. Hover events are
/// emitted only when the node under the pointer changes.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed: Option<NodeId>,
    hovered: Option<NodeId>,
}

impl PointerTracker {
    pub fn translate(&mut self, event: &MouseEvent, hit_map: &HitMap) -> Vec<PointerEvent> {
        let node = hit_map.node_at(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = Some(node);
                vec![PointerEvent::Down(node)]
            }
            MouseEventKind::Up(MouseButton::Left) => match self.pressed.take() {
                Some(pressed) if pressed == node => vec![PointerEvent::Click(node)],
                _ => Vec::new(),
            },
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                if self.hovered == Some(node) {
                    return Vec::new();
                }
                self.hovered = Some(node);
                vec![PointerEvent::Enter(node)]
            }
            _ => Vec::new(),
        }
    }

    /// Forgets hover state, e.g. after the layout changed under the pointer.
    pub fn reset_hover(&mut self) {
        self.hovered = None;
    }
}
