//! Mobile navigation drawer.
//!
//! A modal overlay listing every link. Opening it records the focused node
//! and moves focus into the drawer; a keydown listener traps Tab inside it
//! until it closes, at which point the recorded focus is restored.

use evoque_types::{Effect, NavData, NavLink};
use tracing::{debug, info};

use crate::coordinator::{InputCoordinator, ListenerHandle, ListenerKind, ListenerOwner};
use crate::focus::{FocusState, FocusTrap, FocusableSet};
use crate::input::{Key, KeyInput};
use crate::node::{DrawerLinkRef, MegaItemRef, NodeId};

/// One renderable row of the drawer, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEntry<'a> {
    Close,
    Heading(&'a str),
    GroupToggle { index: usize, trigger: &'a str, expanded: bool },
    SectionLabel(&'a str),
    Link { node: NodeId, link: &'a NavLink },
}

impl DrawerEntry<'_> {
    /// The focusable node behind this row, if it is interactive.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            DrawerEntry::Close => Some(NodeId::DrawerClose),
            DrawerEntry::GroupToggle { index, .. } => Some(NodeId::DrawerGroupToggle(*index)),
            DrawerEntry::Link { node, .. } => Some(*node),
            DrawerEntry::Heading(_) | DrawerEntry::SectionLabel(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MobileDrawer {
    open: bool,
    restore_focus: Option<NodeId>,
    collapsed: Vec<bool>,
    key_listener: Option<ListenerHandle>,
}

impl MobileDrawer {
    pub fn new(group_count: usize) -> Self {
        Self {
            collapsed: vec![false; group_count],
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The node that will receive focus when the drawer closes.
    pub fn restore_target(&self) -> Option<NodeId> {
        self.restore_focus
    }

    pub fn is_expanded(&self, group: usize) -> bool {
        !self.collapsed.get(group).copied().unwrap_or(false)
    }

    /// Resizes per-group collapse state after the navigation data changed.
    pub fn reset_groups(&mut self, group_count: usize) {
        self.collapsed = vec![false; group_count];
    }

    pub fn view<'a>(&'a self, data: &'a NavData) -> DrawerView<'a> {
        DrawerView { drawer: self, data }
    }

    pub fn open(&mut self, data: &NavData, focus: &mut FocusState, coordinator: &mut InputCoordinator) {
        if self.open {
            return;
        }
        self.open = true;
        self.restore_focus = focus.active();
        self.key_listener = Some(coordinator.attach(ListenerOwner::Drawer, ListenerKind::KeyDown));
        if let Some(first) = self.view(data).first_focusable() {
            focus.focus(first);
        }
        debug!(restore = ?self.restore_focus, "drawer opened");
    }

    /// Closes the drawer and restores the recorded focus. Returns whether it was open.
    pub fn close(&mut self, focus: &mut FocusState, coordinator: &mut InputCoordinator) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        if let Some(handle) = self.key_listener.take() {
            coordinator.detach(handle);
        }
        focus.restore(self.restore_focus.take());
        debug!(restored = ?focus.active(), "drawer closed");
        true
    }

    /// The drawer's keydown listener: Tab is trapped, Escape closes.
    /// Returns `true` when the key was consumed.
    pub fn handle_key(
        &mut self,
        input: &KeyInput,
        data: &NavData,
        focus: &mut FocusState,
        coordinator: &mut InputCoordinator,
    ) -> bool {
        if !self.open {
            return false;
        }
        match input.key {
            Key::Escape => self.close(focus, coordinator),
            Key::Tab => {
                // Recomputed on every press: collapsing a group changes the list.
                let focusables = self.view(data).focusables();
                match FocusTrap::next_focus(&focusables, focus.active(), input.modifiers.shift) {
                    Some(target) => focus.focus(target),
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Collapses or expands `group`. Focus on a link the collapse hid moves
    /// to the group's toggle.
    pub fn toggle_group(&mut self, group: usize, focus: &mut FocusState) -> bool {
        let Some(collapsed) = self.collapsed.get_mut(group) else {
            return false;
        };
        *collapsed = !*collapsed;
        debug!(group, collapsed = *collapsed, "drawer group toggled");
        if *collapsed
            && let Some(NodeId::DrawerLink(DrawerLinkRef::Mega(item))) = focus.active()
            && item.group == group
        {
            focus.focus(NodeId::DrawerGroupToggle(group));
        }
        true
    }

    /// Navigates to the link and closes the drawer in one action.
    pub fn activate_link(
        &mut self,
        link: DrawerLinkRef,
        data: &NavData,
        focus: &mut FocusState,
        coordinator: &mut InputCoordinator,
    ) -> Vec<Effect> {
        let Some(target) = link.resolve(data) else {
            return Vec::new();
        };
        let href = target.href.clone();
        info!(%href, "navigating from drawer");
        self.close(focus, coordinator);
        vec![Effect::Navigate(href)]
    }
}

/// The drawer's content joined with the navigation data it renders.
pub struct DrawerView<'a> {
    drawer: &'a MobileDrawer,
    data: &'a NavData,
}

impl<'a> DrawerView<'a> {
    pub fn entries(&self) -> Vec<DrawerEntry<'a>> {
        let data = self.data;
        let mut entries = vec![DrawerEntry::Close, DrawerEntry::Heading("Menu")];
        entries.extend(data.primary.iter().enumerate().map(|(index, link)| DrawerEntry::Link {
            node: NodeId::DrawerLink(DrawerLinkRef::Primary(index)),
            link,
        }));
        for (group_index, group) in data.mega.iter().enumerate() {
            let expanded = self.drawer.is_expanded(group_index);
            entries.push(DrawerEntry::GroupToggle {
                index: group_index,
                trigger: &group.trigger,
                expanded,
            });
            if !expanded {
                continue;
            }
            for (section_index, section) in group.sections.iter().enumerate() {
                entries.push(DrawerEntry::SectionLabel(&section.label));
                entries.extend(section.items.iter().enumerate().map(|(item_index, link)| DrawerEntry::Link {
                    node: NodeId::DrawerLink(DrawerLinkRef::Mega(MegaItemRef::new(
                        group_index,
                        section_index,
                        item_index,
                    ))),
                    link,
                }));
            }
        }
        if !data.quick_links.is_empty() {
            entries.push(DrawerEntry::Heading("More"));
            entries.extend(data.quick_links.iter().enumerate().map(|(index, link)| DrawerEntry::Link {
                node: NodeId::DrawerLink(DrawerLinkRef::Quick(index)),
                link,
            }));
        }
        entries
    }
}

impl FocusableSet for DrawerView<'_> {
    fn focusables(&self) -> Vec<NodeId> {
        self.entries().iter().filter_map(DrawerEntry::node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn setup() -> (NavData, MobileDrawer, FocusState, InputCoordinator) {
        let data = NavData::storefront();
        let drawer = MobileDrawer::new(data.mega.len());
        (data, drawer, FocusState::new(), InputCoordinator::new())
    }

    #[test]
    fn open_focuses_close_button_and_close_restores() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        focus.focus(NodeId::DrawerToggle);
        drawer.open(&data, &mut focus, &mut coordinator);
        assert_eq!(focus.active(), Some(NodeId::DrawerClose));
        assert_eq!(coordinator.count_for(ListenerOwner::Drawer), 1);
        assert!(drawer.close(&mut focus, &mut coordinator));
        assert_eq!(focus.active(), Some(NodeId::DrawerToggle));
        assert_eq!(coordinator.listener_count(), 0);
    }

    #[test]
    fn restoring_nothing_blurs() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        drawer.open(&data, &mut focus, &mut coordinator);
        drawer.close(&mut focus, &mut coordinator);
        assert_eq!(focus.active(), None);
    }

    #[test]
    fn tab_wraps_in_both_directions() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        drawer.open(&data, &mut focus, &mut coordinator);
        let focusables = drawer.view(&data).focusables();
        let last = *focusables.last().unwrap();
        assert_eq!(last, NodeId::DrawerLink(DrawerLinkRef::Quick(2)));

        let back_tab = KeyInput::with_modifiers(Key::Tab, Modifiers::SHIFT);
        assert!(drawer.handle_key(&back_tab, &data, &mut focus, &mut coordinator));
        assert_eq!(focus.active(), Some(last));
        assert!(drawer.handle_key(&KeyInput::new(Key::Tab), &data, &mut focus, &mut coordinator));
        assert_eq!(focus.active(), Some(NodeId::DrawerClose));
    }

    #[test]
    fn collapsed_groups_leave_the_trap() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        drawer.open(&data, &mut focus, &mut coordinator);
        let expanded = drawer.view(&data).focusables().len();
        assert_eq!(expanded, 1 + 3 + 16 + 3);
        drawer.toggle_group(1, &mut focus);
        assert!(!drawer.is_expanded(1));
        assert_eq!(drawer.view(&data).focusables().len(), expanded - 9);
        assert!(!drawer.toggle_group(7, &mut focus));
    }

    #[test]
    fn collapsing_a_group_moves_focus_off_its_hidden_links() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        drawer.open(&data, &mut focus, &mut coordinator);
        let hidden = NodeId::DrawerLink(DrawerLinkRef::Mega(MegaItemRef::new(1, 0, 1)));
        focus.focus(hidden);
        drawer.toggle_group(1, &mut focus);
        assert_eq!(focus.active(), Some(NodeId::DrawerGroupToggle(1)));
        assert!(drawer.view(&data).focusables().contains(&NodeId::DrawerGroupToggle(1)));

        // Links of other groups keep their focus.
        let other = NodeId::DrawerLink(DrawerLinkRef::Mega(MegaItemRef::new(0, 0, 0)));
        focus.focus(other);
        drawer.toggle_group(2, &mut focus);
        assert_eq!(focus.active(), Some(other));
        drawer.toggle_group(1, &mut focus);
        assert_eq!(focus.active(), Some(other));
    }

    #[test]
    fn escape_closes_and_link_activation_navigates() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        drawer.open(&data, &mut focus, &mut coordinator);
        assert!(drawer.handle_key(&KeyInput::new(Key::Escape), &data, &mut focus, &mut coordinator));
        assert!(!drawer.is_open());

        drawer.open(&data, &mut focus, &mut coordinator);
        let effects = drawer.activate_link(DrawerLinkRef::Quick(1), &data, &mut focus, &mut coordinator);
        assert_eq!(effects, vec![Effect::Navigate("/blog".into())]);
        assert!(!drawer.is_open());
        assert_eq!(coordinator.listener_count(), 0);
    }

    #[test]
    fn closed_drawer_ignores_keys() {
        let (data, mut drawer, mut focus, mut coordinator) = setup();
        assert!(!drawer.handle_key(&KeyInput::new(Key::Tab), &data, &mut focus, &mut coordinator));
        assert!(!drawer.close(&mut focus, &mut coordinator));
    }
}
