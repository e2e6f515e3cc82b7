//! Menubar trigger registry and roving focus.

use evoque_types::{Direction, NavData};

use crate::input::{Key, KeyInput};
use crate::node::NodeId;

/// A logical move within the trigger registry, independent of layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RovingMove {
    Next,
    Previous,
    First,
    Last,
}

/// What the menubar wants the controller to do for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenubarAction {
    Focus(NodeId),
    CloseMega,
}

/// Ordered trigger handles in render order: primary links, then mega triggers.
#[derive(Debug, Clone, Default)]
pub struct Menubar {
    triggers: Vec<NodeId>,
    direction: Direction,
}

impl Menubar {
    pub fn new(data: &NavData, direction: Direction) -> Self {
        let triggers = (0..data.primary.len())
            .map(NodeId::PrimaryLink)
            .chain((0..data.mega.len()).map(NodeId::MegaTrigger))
            .collect();
        Self { triggers, direction }
    }

    pub fn triggers(&self) -> &[NodeId] {
        &self.triggers
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.index_of(node).is_some()
    }

    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.triggers.iter().position(|trigger| *trigger == node)
    }

    /// Maps a physical arrow key to a logical move for the current direction.
    pub fn roving_move(&self, key: Key) -> Option<RovingMove> {
        let rtl = self.direction.is_rtl();
        match key {
            Key::ArrowRight if rtl => Some(RovingMove::Previous),
            Key::ArrowRight => Some(RovingMove::Next),
            Key::ArrowLeft if rtl => Some(RovingMove::Next),
            Key::ArrowLeft => Some(RovingMove::Previous),
            Key::Home => Some(RovingMove::First),
            Key::End => Some(RovingMove::Last),
            _ => None,
        }
    }

    /// Resolves the trigger that should receive focus after `movement`.
    ///
    /// `focused` that is not a trigger counts as index -1, so `Next` lands on
    /// the first trigger and `Previous` on the last. Returns `None` when the
    /// registry is empty.
    pub fn target(&self, focused: Option<NodeId>, movement: RovingMove) -> Option<NodeId> {
        let count = self.triggers.len() as isize;
        if count == 0 {
            return None;
        }
        let current = focused.and_then(|node| self.index_of(node)).map(|index| index as isize);
        let index = match (movement, current) {
            (RovingMove::Next, Some(current)) => (current + 1).rem_euclid(count),
            (RovingMove::Next, None) => 0,
            (RovingMove::Previous, Some(current)) => (current - 1).rem_euclid(count),
            (RovingMove::Previous, None) => count - 1,
            (RovingMove::First, _) => 0,
            (RovingMove::Last, _) => count - 1,
        };
        self.triggers.get(index as usize).copied()
    }

    /// Handles a key pressed while focus is inside the menubar.
    pub fn handle_key(&self, focused: Option<NodeId>, input: &KeyInput) -> Option<MenubarAction> {
        if input.key == Key::Escape {
            return Some(MenubarAction::CloseMega);
        }
        if input.modifiers.command() {
            return None;
        }
        let movement = self.roving_move(input.key)?;
        self.target(focused, movement).map(MenubarAction::Focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoque_types::{MegaGroup, NavLink};

    fn data(primary: usize, mega: usize) -> NavData {
        NavData {
            brand: "B".into(),
            primary: (0..primary).map(|i| NavLink::new(format!("P{i}"), format!("/p{i}"))).collect(),
            mega: (0..mega).map(|i| MegaGroup::new(format!("M{i}"), vec![])).collect(),
            quick_links: vec![],
        }
    }

    #[test]
    fn registry_lists_primary_links_before_mega_triggers() {
        let menubar = Menubar::new(&data(2, 1), Direction::Ltr);
        assert_eq!(
            menubar.triggers(),
            &[NodeId::PrimaryLink(0), NodeId::PrimaryLink(1), NodeId::MegaTrigger(0)]
        );
    }

    #[test]
    fn roving_focus_is_cyclic_for_every_size() {
        for count in 0..6 {
            let menubar = Menubar::new(&data(count / 2, count - count / 2), Direction::Ltr);
            assert_eq!(menubar.len(), count);
            let mut focused = None;
            for step in 0..count * 2 {
                focused = menubar.target(focused, RovingMove::Next);
                assert_eq!(focused.and_then(|node| menubar.index_of(node)), Some(step % count));
            }
            if count == 0 {
                assert_eq!(menubar.target(None, RovingMove::Previous), None);
            }
        }
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let menubar = Menubar::new(&data(1, 2), Direction::Ltr);
        assert_eq!(menubar.target(Some(NodeId::PrimaryLink(0)), RovingMove::Previous), Some(NodeId::MegaTrigger(1)));
        assert_eq!(menubar.target(None, RovingMove::Previous), Some(NodeId::MegaTrigger(1)));
        assert_eq!(menubar.target(Some(NodeId::Cart), RovingMove::Next), Some(NodeId::PrimaryLink(0)));
    }

    #[test]
    fn rtl_swaps_arrow_mapping() {
        let ltr = Menubar::new(&data(0, 3), Direction::Ltr);
        let rtl = Menubar::new(&data(0, 3), Direction::Rtl);
        assert_eq!(ltr.roving_move(Key::ArrowRight), Some(RovingMove::Next));
        assert_eq!(rtl.roving_move(Key::ArrowRight), Some(RovingMove::Previous));
        assert_eq!(rtl.roving_move(Key::ArrowLeft), Some(RovingMove::Next));
        assert_eq!(
            rtl.handle_key(Some(NodeId::MegaTrigger(0)), &KeyInput::new(Key::ArrowLeft)),
            Some(MenubarAction::Focus(NodeId::MegaTrigger(1)))
        );
    }

    #[test]
    fn escape_closes_without_moving_focus() {
        let menubar = Menubar::new(&data(0, 2), Direction::Ltr);
        assert_eq!(
            menubar.handle_key(Some(NodeId::MegaTrigger(1)), &KeyInput::new(Key::Escape)),
            Some(MenubarAction::CloseMega)
        );
        assert_eq!(menubar.handle_key(Some(NodeId::MegaTrigger(1)), &KeyInput::new(Key::ArrowUp)), None);
    }
}
