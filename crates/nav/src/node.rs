//! Identifiers for every interactive region of the navigation tree.
//!
//! A [`NodeId`] plays the role of a DOM element handle: focus points at one,
//! pointer events target one, and containment between nodes answers the
//! "is this click inside the panel" questions the dismissal logic needs.

use evoque_types::{NavData, NavLink};

/// Address of one link inside a mega group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MegaItemRef {
    pub group: usize,
    pub section: usize,
    pub item: usize,
}

impl MegaItemRef {
    pub const fn new(group: usize, section: usize, item: usize) -> Self {
        Self { group, section, item }
    }

    pub fn resolve<'a>(&self, data: &'a NavData) -> Option<&'a NavLink> {
        data.mega.get(self.group)?.sections.get(self.section)?.items.get(self.item)
    }
}

/// Address of one link inside the mobile drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawerLinkRef {
    Primary(usize),
    Mega(MegaItemRef),
    Quick(usize),
}

impl DrawerLinkRef {
    pub fn resolve<'a>(&self, data: &'a NavData) -> Option<&'a NavLink> {
        match self {
            DrawerLinkRef::Primary(index) => data.primary.get(*index),
            DrawerLinkRef::Mega(item) => item.resolve(data),
            DrawerLinkRef::Quick(index) => data.quick_links.get(*index),
        }
    }
}

/// An element of the navigation UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// Menubar link for `primary[index]`.
    PrimaryLink(usize),
    /// Menubar button opening `mega[index]`.
    MegaTrigger(usize),
    /// The floating panel of `mega[index]`.
    MegaPanel(usize),
    MegaLink(MegaItemRef),
    Brand,
    Cart,
    Account,
    /// Hamburger button that opens the mobile drawer.
    DrawerToggle,
    DrawerBackdrop,
    DrawerPanel,
    DrawerClose,
    /// Collapse/expand button for `mega[index]` inside the drawer.
    DrawerGroupToggle(usize),
    DrawerLink(DrawerLinkRef),
    PaletteBackdrop,
    PalettePanel,
    PaletteInput,
    /// Row `index` of the current palette results.
    PaletteResult(usize),
    /// Anything outside the navigation UI.
    Page,
}

impl NodeId {
    /// Returns `true` when `self` is `ancestor` or one of its descendants.
    pub fn is_within(self, ancestor: NodeId) -> bool {
        if self == ancestor {
            return true;
        }
        match (self, ancestor) {
            (NodeId::MegaLink(item), NodeId::MegaPanel(group)) => item.group == group,
            (
                NodeId::DrawerClose | NodeId::DrawerGroupToggle(_) | NodeId::DrawerLink(_),
                NodeId::DrawerPanel,
            ) => true,
            (NodeId::PaletteInput | NodeId::PaletteResult(_), NodeId::PalettePanel) => true,
            _ => false,
        }
    }

    /// Whether the node can hold keyboard focus (buttons, links and inputs).
    pub fn is_focusable(self) -> bool {
        !matches!(
            self,
            NodeId::MegaPanel(_)
                | NodeId::DrawerBackdrop
                | NodeId::DrawerPanel
                | NodeId::PaletteBackdrop
                | NodeId::PalettePanel
                | NodeId::Page
        )
    }

    /// Whether the node only exists while the mobile drawer is open.
    pub fn belongs_to_drawer(self) -> bool {
        self.is_within(NodeId::DrawerPanel) || self == NodeId::DrawerBackdrop
    }

    /// Whether the node only exists while the command palette is open.
    pub fn belongs_to_palette(self) -> bool {
        self.is_within(NodeId::PalettePanel) || self == NodeId::PaletteBackdrop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mega_links_are_inside_their_own_panel_only() {
        let link = NodeId::MegaLink(MegaItemRef::new(1, 0, 2));
        assert!(link.is_within(NodeId::MegaPanel(1)));
        assert!(!link.is_within(NodeId::MegaPanel(0)));
        assert!(!NodeId::MegaTrigger(1).is_within(NodeId::MegaPanel(1)));
    }

    #[test]
    fn backdrops_are_outside_their_panels() {
        assert!(!NodeId::DrawerBackdrop.is_within(NodeId::DrawerPanel));
        assert!(NodeId::DrawerBackdrop.belongs_to_drawer());
        assert!(NodeId::PaletteResult(3).belongs_to_palette());
        assert!(!NodeId::PaletteBackdrop.is_focusable());
    }

    #[test]
    fn drawer_refs_resolve_against_data() {
        let data = NavData::storefront();
        let link = DrawerLinkRef::Mega(MegaItemRef::new(1, 2, 2)).resolve(&data).unwrap();
        assert_eq!(link.href, "/collections/premium");
        assert_eq!(DrawerLinkRef::Quick(2).resolve(&data).unwrap().label, "Support");
        assert!(DrawerLinkRef::Primary(0).resolve(&data).is_none());
    }
}
