//! Mega-menu panel state.
//!
//! At most one panel is open. While it is, the panel owns a capture-phase
//! pointer-down listener (outside click dismissal) and a keydown listener
//! (Escape). Both are detached on every path that closes the panel.

use evoque_types::NavData;
use tracing::debug;

use crate::coordinator::{InputCoordinator, ListenerHandle, ListenerKind, ListenerOwner};
use crate::node::{MegaItemRef, NodeId};

/// Animation hint for renderers. Correctness never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelTransition {
    Entering,
    #[default]
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct OpenPanel {
    index: usize,
    pointer_down: ListenerHandle,
    key_down: ListenerHandle,
}

#[derive(Debug, Default)]
pub struct MegaMenuState {
    open: Option<OpenPanel>,
    transition: PanelTransition,
}

impl MegaMenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open.map(|panel| panel.index)
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open_index() == Some(index)
    }

    pub fn transition(&self) -> PanelTransition {
        self.transition
    }

    /// Marks the entering animation as finished.
    pub fn settle(&mut self) {
        self.transition = PanelTransition::Idle;
    }

    /// Opens panel `index`, closing any other panel first. Opening the panel
    /// that is already open is a no-op.
    pub fn open(&mut self, index: usize, coordinator: &mut InputCoordinator) {
        if self.is_open(index) {
            return;
        }
        self.close(coordinator);
        let owner = ListenerOwner::MegaPanel(index);
        let pointer_down = coordinator.attach(owner, ListenerKind::PointerDownCapture);
        let key_down = coordinator.attach(owner, ListenerKind::KeyDown);
        self.open = Some(OpenPanel {
            index,
            pointer_down,
            key_down,
        });
        self.transition = PanelTransition::Entering;
        debug!(index, "mega panel opened");
    }

    /// Click-toggle semantics for a trigger button.
    pub fn toggle(&mut self, index: usize, coordinator: &mut InputCoordinator) {
        if self.is_open(index) {
            self.close(coordinator);
        } else {
            self.open(index, coordinator);
        }
    }

    /// Closes the open panel, if any. Returns whether anything was closed.
    pub fn close(&mut self, coordinator: &mut InputCoordinator) -> bool {
        let Some(panel) = self.open.take() else {
            return false;
        };
        coordinator.detach(panel.pointer_down);
        coordinator.detach(panel.key_down);
        self.transition = PanelTransition::Idle;
        debug!(index = panel.index, "mega panel closed");
        true
    }

    /// Whether a pointer-down on `target` lies outside both the open panel and
    /// its anchor trigger. `false` when nothing is open.
    pub fn is_outside(&self, target: NodeId) -> bool {
        match self.open_index() {
            Some(index) => !target.is_within(NodeId::MegaPanel(index)) && target != NodeId::MegaTrigger(index),
            None => false,
        }
    }

    /// Link nodes of panel `index` in render order.
    pub fn panel_focusables(data: &NavData, index: usize) -> Vec<NodeId> {
        let Some(group) = data.mega.get(index) else {
            return Vec::new();
        };
        group
            .sections
            .iter()
            .enumerate()
            .flat_map(|(section_index, section)| {
                (0..section.items.len())
                    .map(move |item_index| NodeId::MegaLink(MegaItemRef::new(index, section_index, item_index)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_another_panel_leaves_exactly_one_open() {
        let mut coordinator = InputCoordinator::new();
        let mut mega = MegaMenuState::new();
        mega.open(0, &mut coordinator);
        mega.open(2, &mut coordinator);
        assert_eq!(mega.open_index(), Some(2));
        assert_eq!(coordinator.count_for(ListenerOwner::MegaPanel(0)), 0);
        assert_eq!(coordinator.count_for(ListenerOwner::MegaPanel(2)), 2);
    }

    #[test]
    fn toggle_and_close_detach_listeners() {
        let mut coordinator = InputCoordinator::new();
        let mut mega = MegaMenuState::new();
        for _ in 0..5 {
            mega.toggle(1, &mut coordinator);
            assert_eq!(coordinator.listener_count(), 2);
            mega.toggle(1, &mut coordinator);
            assert_eq!(coordinator.listener_count(), 0);
        }
        assert!(!mega.close(&mut coordinator));
    }

    #[test]
    fn outside_means_neither_panel_nor_anchor() {
        let mut coordinator = InputCoordinator::new();
        let mut mega = MegaMenuState::new();
        assert!(!mega.is_outside(NodeId::Page));
        mega.open(1, &mut coordinator);
        assert!(mega.is_outside(NodeId::Page));
        assert!(mega.is_outside(NodeId::MegaTrigger(0)));
        assert!(!mega.is_outside(NodeId::MegaTrigger(1)));
        assert!(!mega.is_outside(NodeId::MegaPanel(1)));
        assert!(!mega.is_outside(NodeId::MegaLink(MegaItemRef::new(1, 0, 0))));
    }

    #[test]
    fn panel_focusables_follow_section_order() {
        let data = NavData::storefront();
        let links = MegaMenuState::panel_focusables(&data, 2);
        assert_eq!(links.len(), 6);
        assert_eq!(links[0], NodeId::MegaLink(MegaItemRef::new(2, 0, 0)));
        assert_eq!(links[2], NodeId::MegaLink(MegaItemRef::new(2, 1, 0)));
        assert!(MegaMenuState::panel_focusables(&data, 9).is_empty());
    }

    #[test]
    fn transition_hint_settles() {
        let mut coordinator = InputCoordinator::new();
        let mut mega = MegaMenuState::new();
        mega.open(0, &mut coordinator);
        assert_eq!(mega.transition(), PanelTransition::Entering);
        mega.settle();
        assert_eq!(mega.transition(), PanelTransition::Idle);
    }
}
