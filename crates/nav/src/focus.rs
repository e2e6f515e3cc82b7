//! Focus tracking and focus trapping.
//!
//! [`FocusState`] stands in for the document's active element. Containers
//! expose their tab stops through [`FocusableSet`], which is queried again on
//! every keypress so conditionally rendered content is always respected.

use crate::node::NodeId;

/// The element currently holding keyboard focus, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FocusState {
    active: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn is_focused(&self, node: NodeId) -> bool {
        self.active == Some(node)
    }

    /// Moves focus to `node`. Non-focusable nodes are ignored.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !node.is_focusable() {
            return false;
        }
        self.active = Some(node);
        true
    }

    /// Restores a previously recorded focus target, including "nothing focused".
    pub fn restore(&mut self, previous: Option<NodeId>) {
        self.active = previous;
    }

    pub fn blur(&mut self) {
        self.active = None;
    }
}

/// A container that can list its focusable descendants in document order.
pub trait FocusableSet {
    fn focusables(&self) -> Vec<NodeId>;

    fn first_focusable(&self) -> Option<NodeId> {
        self.focusables().into_iter().next()
    }
}

/// Tab cycling constrained to one container.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusTrap;

impl FocusTrap {
    /// Resolves where Tab (or Shift+Tab when `backwards`) should move focus.
    ///
    /// Tab on the last element wraps to the first; Shift+Tab on the first
    /// element, or from an element the container does not track, wraps to
    /// the last. Returns `None` when the container has nothing focusable.
    pub fn next_focus(focusables: &[NodeId], active: Option<NodeId>, backwards: bool) -> Option<NodeId> {
        let last = focusables.len().checked_sub(1)?;
        let position = active.and_then(|node| focusables.iter().position(|candidate| *candidate == node));
        let target = match (position, backwards) {
            (None, true) | (Some(0), true) => last,
            (Some(index), true) => index - 1,
            (Some(index), false) if index == last => 0,
            (Some(index), false) => index + 1,
            (None, false) => 0,
        };
        focusables.get(target).copied()
    }
}
