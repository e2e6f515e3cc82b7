//! The navigation controller.
//!
//! Composes the menubar, mega panel, mobile drawer and command palette around
//! one [`InputCoordinator`] and one [`FocusState`]. Hosts feed it key and
//! pointer events and apply the returned [`Effect`]s to their router.
//!
//! Key dispatch mirrors a document: the keydown listeners registered at the
//! start of the event run in attach order (the controller's own listener is
//! attached at mount, so it is always first), listeners detached by an
//! earlier one are skipped, and the default action for the focused node runs
//! last unless a listener consumed the key.

use std::sync::Arc;

use evoque_types::{Direction, Effect, NavData, NavLink};
use tracing::{debug, info, warn};

use crate::coordinator::{InputCoordinator, ListenerHandle, ListenerKind, ListenerOwner};
use crate::drawer::MobileDrawer;
use crate::focus::{FocusState, FocusTrap};
use crate::input::{Key, KeyInput, PointerEvent};
use crate::mega_menu::MegaMenuState;
use crate::menubar::{Menubar, MenubarAction};
use crate::node::NodeId;
use crate::palette::CommandPalette;

/// The modal overlay currently shown. At most one exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    MobileDrawer,
    CommandPalette,
}

/// Header arrangement. `Compact` hides the menubar behind the drawer toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderLayout {
    #[default]
    Wide,
    Compact,
}

#[derive(Debug)]
pub struct NavigationController {
    data: Arc<NavData>,
    menubar: Menubar,
    mega: MegaMenuState,
    drawer: MobileDrawer,
    palette: CommandPalette,
    focus: FocusState,
    coordinator: InputCoordinator,
    global_listener: Option<ListenerHandle>,
    layout: HeaderLayout,
}

impl NavigationController {
    /// Builds a controller. `direction` is read once here and fixed for the
    /// controller's lifetime.
    pub fn new(data: Arc<NavData>, direction: Direction) -> Self {
        log_issues(&data);
        Self {
            menubar: Menubar::new(&data, direction),
            mega: MegaMenuState::new(),
            drawer: MobileDrawer::new(data.mega.len()),
            palette: CommandPalette::new(&data),
            focus: FocusState::new(),
            coordinator: InputCoordinator::new(),
            global_listener: None,
            layout: HeaderLayout::Wide,
            data,
        }
    }

    /// Installs the lifetime keydown listener (palette shortcut and Escape).
    pub fn mount(&mut self) {
        if self.global_listener.is_some() {
            return;
        }
        self.global_listener = Some(self.coordinator.attach(ListenerOwner::Controller, ListenerKind::KeyDown));
        info!(triggers = self.menubar.len(), direction = %self.menubar.direction(), "navigation mounted");
    }

    /// Closes everything and removes every listener.
    pub fn unmount(&mut self) {
        self.close_all();
        if let Some(handle) = self.global_listener.take() {
            self.coordinator.detach(handle);
        }
        debug!(remaining = self.coordinator.listener_count(), "navigation unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.global_listener.is_some()
    }

    /// Swaps in new navigation data, closing every overlay and rebuilding the
    /// trigger registry and search pool.
    pub fn set_data(&mut self, data: Arc<NavData>) {
        self.close_all();
        log_issues(&data);
        self.menubar = Menubar::new(&data, self.menubar.direction());
        self.drawer.reset_groups(data.mega.len());
        self.palette.rebuild(&data);
        if self.focus.active().is_some_and(|node| !self.node_exists(node, &data)) {
            self.focus.blur();
        }
        self.data = data;
    }

    pub fn data(&self) -> &Arc<NavData> {
        &self.data
    }

    pub fn direction(&self) -> Direction {
        self.menubar.direction()
    }

    pub fn menubar(&self) -> &Menubar {
        &self.menubar
    }

    pub fn mega(&self) -> &MegaMenuState {
        &self.mega
    }

    pub fn drawer(&self) -> &MobileDrawer {
        &self.drawer
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn coordinator(&self) -> &InputCoordinator {
        &self.coordinator
    }

    pub fn listener_count(&self) -> usize {
        self.coordinator.listener_count()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.active()
    }

    pub fn layout(&self) -> HeaderLayout {
        self.layout
    }

    pub fn active_overlay(&self) -> Overlay {
        if self.palette.is_open() {
            Overlay::CommandPalette
        } else if self.drawer.is_open() {
            Overlay::MobileDrawer
        } else {
            Overlay::None
        }
    }

    pub fn open_mega_index(&self) -> Option<usize> {
        self.mega.open_index()
    }

    /// Whether `primary[index]` is the page the router is showing.
    pub fn is_active_primary(&self, index: usize, current_path: &str) -> bool {
        self.data.primary.get(index).is_some_and(|link| link.href == current_path)
    }

    /// Switches between the wide menubar and the compact drawer toggle.
    /// Panels only exist in the wide layout and the drawer only in the compact one.
    pub fn set_layout(&mut self, layout: HeaderLayout) {
        if self.layout == layout {
            return;
        }
        self.layout = layout;
        match layout {
            HeaderLayout::Compact => {
                self.mega.close(&mut self.coordinator);
                if self.focus.active().is_some_and(|node| self.menubar.contains(node)) {
                    self.focus.blur();
                }
            }
            HeaderLayout::Wide => {
                self.drawer.close(&mut self.focus, &mut self.coordinator);
                if self.focus.is_focused(NodeId::DrawerToggle) {
                    self.focus.blur();
                }
            }
        }
        debug!(?layout, "header layout changed");
    }

    /// Advances animation hints.
    pub fn tick(&mut self) {
        self.mega.settle();
    }

    /// Moves focus to `node`. Focusing a mega trigger opens its panel.
    pub fn focus_node(&mut self, node: NodeId) {
        if !self.focus.focus(node) {
            return;
        }
        if let NodeId::MegaTrigger(index) = node
            && self.layout == HeaderLayout::Wide
        {
            self.mega.open(index, &mut self.coordinator);
        }
    }

    pub fn open_mega(&mut self, index: usize) {
        if index < self.data.mega.len() {
            self.mega.open(index, &mut self.coordinator);
        }
    }

    pub fn toggle_mega(&mut self, index: usize) {
        if index < self.data.mega.len() {
            self.mega.toggle(index, &mut self.coordinator);
        }
    }

    pub fn close_mega(&mut self) -> bool {
        self.mega.close(&mut self.coordinator)
    }

    pub fn open_drawer(&mut self) {
        self.palette.close(&mut self.focus, &mut self.coordinator);
        self.mega.close(&mut self.coordinator);
        self.drawer.open(&self.data, &mut self.focus, &mut self.coordinator);
    }

    pub fn close_drawer(&mut self) -> bool {
        self.drawer.close(&mut self.focus, &mut self.coordinator)
    }

    pub fn open_palette(&mut self) {
        self.drawer.close(&mut self.focus, &mut self.coordinator);
        self.mega.close(&mut self.coordinator);
        self.palette.open(&mut self.focus, &mut self.coordinator);
    }

    pub fn close_palette(&mut self) -> bool {
        self.palette.close(&mut self.focus, &mut self.coordinator)
    }

    pub fn toggle_palette(&mut self) {
        if self.palette.is_open() {
            self.close_palette();
        } else {
            self.open_palette();
        }
    }

    /// Replaces the palette query, as typing into the search input would.
    pub fn set_palette_query(&mut self, query: &str) {
        if self.palette.is_open() {
            self.palette.set_query(query);
        }
    }

    pub fn toggle_drawer_group(&mut self, group: usize) -> bool {
        self.drawer.is_open() && self.drawer.toggle_group(group, &mut self.focus)
    }

    fn close_all(&mut self) {
        self.palette.close(&mut self.focus, &mut self.coordinator);
        self.mega.close(&mut self.coordinator);
        self.drawer.close(&mut self.focus, &mut self.coordinator);
    }

    pub fn handle_key(&mut self, input: KeyInput) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut consumed = false;
        for listener in self.coordinator.snapshot(ListenerKind::KeyDown) {
            if !self.coordinator.is_attached(listener.handle) {
                continue;
            }
            match listener.owner {
                ListenerOwner::Controller => {
                    if input.is_palette_shortcut() {
                        self.toggle_palette();
                        consumed = true;
                    } else if input.key == Key::Escape {
                        self.close_all();
                    }
                }
                ListenerOwner::MegaPanel(_) => {
                    if input.key == Key::Escape {
                        self.mega.close(&mut self.coordinator);
                    }
                }
                ListenerOwner::Drawer => {
                    consumed |= self.drawer.handle_key(&input, &self.data, &mut self.focus, &mut self.coordinator);
                }
                ListenerOwner::Palette => {
                    effects.extend(self.palette.handle_key(&input, &mut self.focus, &mut self.coordinator));
                    consumed = true;
                }
            }
        }
        if !consumed {
            effects.extend(self.default_key_action(input));
        }
        effects
    }

    fn default_key_action(&mut self, input: KeyInput) -> Vec<Effect> {
        let focused = self.focus.active();
        if self.layout == HeaderLayout::Wide
            && focused.is_some_and(|node| self.menubar.contains(node))
            && let Some(action) = self.menubar.handle_key(focused, &input)
        {
            match action {
                MenubarAction::Focus(node) => self.focus_node(node),
                MenubarAction::CloseMega => {
                    self.mega.close(&mut self.coordinator);
                }
            }
            return Vec::new();
        }
        match input.key {
            Key::Enter => focused.map(|node| self.activate(node)).unwrap_or_default(),
            Key::Tab if self.active_overlay() == Overlay::None => {
                let stops = self.header_focusables();
                if let Some(target) = FocusTrap::next_focus(&stops, focused, input.modifiers.shift) {
                    self.focus_node(target);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<Effect> {
        match event {
            PointerEvent::Down(target) => {
                for listener in self.coordinator.snapshot(ListenerKind::PointerDownCapture) {
                    if !self.coordinator.is_attached(listener.handle) {
                        continue;
                    }
                    if let ListenerOwner::MegaPanel(_) = listener.owner
                        && self.mega.is_outside(target)
                    {
                        self.mega.close(&mut self.coordinator);
                    }
                }
                Vec::new()
            }
            PointerEvent::Enter(target) => {
                match target {
                    NodeId::MegaTrigger(index)
                        if self.layout == HeaderLayout::Wide && self.active_overlay() == Overlay::None =>
                    {
                        self.open_mega(index);
                    }
                    NodeId::PaletteResult(index) if self.palette.is_open() => self.palette.set_active(index),
                    _ => {}
                }
                Vec::new()
            }
            PointerEvent::Click(target) => {
                let reachable = match self.active_overlay() {
                    Overlay::CommandPalette => target.belongs_to_palette(),
                    Overlay::MobileDrawer => target.belongs_to_drawer(),
                    Overlay::None => true,
                };
                if reachable { self.activate(target) } else { Vec::new() }
            }
        }
    }

    /// Performs the action of `node` as a click or Enter would.
    pub fn activate(&mut self, node: NodeId) -> Vec<Effect> {
        match node {
            NodeId::PrimaryLink(index) => {
                let href = self.data.primary.get(index).map(|link| link.href.clone());
                self.navigate_from_header(href)
            }
            NodeId::MegaTrigger(index) => {
                self.toggle_mega(index);
                Vec::new()
            }
            NodeId::MegaLink(item) if self.mega.is_open(item.group) => {
                let href = item.resolve(&self.data).map(|link| link.href.clone());
                self.navigate_from_header(href)
            }
            NodeId::Brand => self.navigate_from_header(Some("/".to_string())),
            NodeId::Cart => self.navigate_from_header(Some("/cart".to_string())),
            NodeId::DrawerToggle => {
                self.open_drawer();
                Vec::new()
            }
            NodeId::DrawerClose | NodeId::DrawerBackdrop => {
                self.close_drawer();
                Vec::new()
            }
            NodeId::DrawerGroupToggle(index) => {
                self.toggle_drawer_group(index);
                Vec::new()
            }
            NodeId::DrawerLink(link) if self.drawer.is_open() => {
                self.drawer.activate_link(link, &self.data, &mut self.focus, &mut self.coordinator)
            }
            NodeId::PaletteBackdrop => {
                self.close_palette();
                Vec::new()
            }
            NodeId::PaletteResult(index) if self.palette.is_open() => {
                self.palette.activate_result(index, &mut self.focus, &mut self.coordinator)
            }
            _ => Vec::new(),
        }
    }

    fn navigate_from_header(&mut self, href: Option<String>) -> Vec<Effect> {
        let Some(href) = href else {
            return Vec::new();
        };
        self.mega.close(&mut self.coordinator);
        info!(%href, "navigating from header");
        vec![Effect::Navigate(href)]
    }

    /// Header tab stops in document order for the current layout. An open
    /// mega panel's links follow its trigger.
    pub fn header_focusables(&self) -> Vec<NodeId> {
        let mut stops = Vec::new();
        match self.layout {
            HeaderLayout::Compact => stops.push(NodeId::DrawerToggle),
            HeaderLayout::Wide => {
                for trigger in self.menubar.triggers() {
                    stops.push(*trigger);
                    if let NodeId::MegaTrigger(index) = trigger
                        && self.mega.is_open(*index)
                    {
                        stops.extend(MegaMenuState::panel_focusables(&self.data, *index));
                    }
                }
            }
        }
        stops.extend([NodeId::Brand, NodeId::Cart, NodeId::Account]);
        stops
    }

    /// The link behind `node`, when it is one.
    pub fn link_for(&self, node: NodeId) -> Option<&NavLink> {
        match node {
            NodeId::PrimaryLink(index) => self.data.primary.get(index),
            NodeId::MegaLink(item) => item.resolve(&self.data),
            NodeId::DrawerLink(link) => link.resolve(&self.data),
            NodeId::PaletteResult(index) => self.palette.results().get(index),
            _ => None,
        }
    }

    fn node_exists(&self, node: NodeId, data: &NavData) -> bool {
        match node {
            NodeId::PrimaryLink(index) => index < data.primary.len(),
            NodeId::MegaTrigger(index) | NodeId::MegaPanel(index) | NodeId::DrawerGroupToggle(index) => {
                index < data.mega.len()
            }
            NodeId::MegaLink(item) => item.resolve(data).is_some(),
            NodeId::DrawerLink(link) => link.resolve(data).is_some(),
            _ => true,
        }
    }
}

fn log_issues(data: &NavData) {
    for issue in data.validate() {
        warn!(%issue, "navigation data issue");
    }
}
