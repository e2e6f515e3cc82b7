//! Document-level listener registry.
//!
//! Every global listener the navigation system installs goes through one
//! [`InputCoordinator`]. Registrations are explicit values with an owner and a
//! kind, so tests can count them and dispatch can skip anything detached
//! while an event is being delivered.

use tracing::debug;

/// Which part of the navigation system installed a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerOwner {
    /// The controller's lifetime-long keydown handler (palette shortcut, Escape).
    Controller,
    /// The open mega panel for `mega[index]`.
    MegaPanel(usize),
    /// The open mobile drawer's focus trap.
    Drawer,
    /// The open command palette.
    Palette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    /// Pointer-down delivered in the capture phase, before any target handler.
    PointerDownCapture,
}

/// Opaque token returned by [`InputCoordinator::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub handle: ListenerHandle,
    pub owner: ListenerOwner,
    pub kind: ListenerKind,
}

#[derive(Debug, Default)]
pub struct InputCoordinator {
    listeners: Vec<Listener>,
    next_handle: u64,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, owner: ListenerOwner, kind: ListenerKind) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push(Listener { handle, owner, kind });
        debug!(?owner, ?kind, handle = handle.0, "listener attached");
        handle
    }

    /// Removes one registration. Returns `false` if it was already gone.
    pub fn detach(&mut self, handle: ListenerHandle) -> bool {
        let Some(position) = self.listeners.iter().position(|listener| listener.handle == handle) else {
            return false;
        };
        let listener = self.listeners.remove(position);
        debug!(owner = ?listener.owner, kind = ?listener.kind, handle = handle.0, "listener detached");
        true
    }

    /// Removes every registration made by `owner`, returning how many were removed.
    pub fn detach_owner(&mut self, owner: ListenerOwner) -> usize {
        let handles: Vec<ListenerHandle> = self
            .listeners
            .iter()
            .filter(|listener| listener.owner == owner)
            .map(|listener| listener.handle)
            .collect();
        handles.into_iter().filter(|handle| self.detach(*handle)).count()
    }

    pub fn is_attached(&self, handle: ListenerHandle) -> bool {
        self.listeners.iter().any(|listener| listener.handle == handle)
    }

    pub fn is_owner_attached(&self, owner: ListenerOwner, kind: ListenerKind) -> bool {
        self.listeners.iter().any(|listener| listener.owner == owner && listener.kind == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn count_for(&self, owner: ListenerOwner) -> usize {
        self.listeners.iter().filter(|listener| listener.owner == owner).count()
    }

    /// Listeners of `kind` in attach order, frozen at the start of a dispatch.
    pub fn snapshot(&self, kind: ListenerKind) -> Vec<Listener> {
        self.listeners.iter().filter(|listener| listener.kind == kind).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_and_detach_keep_counts_balanced() {
        let mut coordinator = InputCoordinator::new();
        let key = coordinator.attach(ListenerOwner::Drawer, ListenerKind::KeyDown);
        let pointer = coordinator.attach(ListenerOwner::MegaPanel(0), ListenerKind::PointerDownCapture);
        assert_eq!(coordinator.listener_count(), 2);
        assert!(coordinator.detach(key));
        assert!(!coordinator.detach(key));
        assert!(coordinator.is_attached(pointer));
        assert_eq!(coordinator.listener_count(), 1);
    }

    #[test]
    fn detach_owner_removes_only_that_owner() {
        let mut coordinator = InputCoordinator::new();
        coordinator.attach(ListenerOwner::Controller, ListenerKind::KeyDown);
        coordinator.attach(ListenerOwner::MegaPanel(2), ListenerKind::KeyDown);
        coordinator.attach(ListenerOwner::MegaPanel(2), ListenerKind::PointerDownCapture);
        assert_eq!(coordinator.detach_owner(ListenerOwner::MegaPanel(2)), 2);
        assert_eq!(coordinator.count_for(ListenerOwner::Controller), 1);
        assert_eq!(coordinator.listener_count(), 1);
    }

    #[test]
    fn snapshot_preserves_attach_order_and_filters_by_kind() {
        let mut coordinator = InputCoordinator::new();
        coordinator.attach(ListenerOwner::Controller, ListenerKind::KeyDown);
        coordinator.attach(ListenerOwner::MegaPanel(0), ListenerKind::PointerDownCapture);
        coordinator.attach(ListenerOwner::Palette, ListenerKind::KeyDown);
        let owners: Vec<_> = coordinator.snapshot(ListenerKind::KeyDown).iter().map(|l| l.owner).collect();
        assert_eq!(owners, vec![ListenerOwner::Controller, ListenerOwner::Palette]);
    }
}
