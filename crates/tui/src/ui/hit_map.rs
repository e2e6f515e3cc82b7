//! Where each navigation node was drawn in the last frame.
//!
//! Components register their areas while rendering, back to front. Mouse
//! input is resolved against the map: the last region containing the cell
//! wins, and cells outside every region belong to [`NodeId::Page`].

use evoque_nav::NodeId;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Default, Clone)]
pub struct HitMap {
    regions: Vec<(Rect, NodeId)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Registers `node` above everything registered so far.
    pub fn push(&mut self, area: Rect, node: NodeId) {
        if area.is_empty() {
            return;
        }
        self.regions.push((area, node));
    }

    /// The topmost node under `(column, row)`.
    pub fn node_at(&self, column: u16, row: u16) -> NodeId {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, node)| *node)
            .unwrap_or(NodeId::Page)
    }

    /// Area last registered for `node`.
    pub fn area_of(&self, node: NodeId) -> Option<Rect> {
        self.regions.iter().rev().find(|(_, candidate)| *candidate == node).map(|(area, _)| *area)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topmost_region_wins() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 80, 24), NodeId::PaletteBackdrop);
        map.push(Rect::new(20, 5, 40, 10), NodeId::PalettePanel);
        map.push(Rect::new(21, 6, 38, 1), NodeId::PaletteInput);

        assert_eq!(map.node_at(0, 0), NodeId::PaletteBackdrop);
        assert_eq!(map.node_at(25, 9), NodeId::PalettePanel);
        assert_eq!(map.node_at(30, 6), NodeId::PaletteInput);
        assert_eq!(map.node_at(90, 30), NodeId::Page);
    }

    #[test]
    fn empty_areas_are_ignored() {
        let mut map = HitMap::default();
        map.push(Rect::new(3, 3, 0, 1), NodeId::Cart);
        assert!(map.is_empty());
        assert_eq!(map.area_of(NodeId::Cart), None);
        map.push(Rect::new(3, 3, 4, 1), NodeId::Cart);
        assert_eq!(map.area_of(NodeId::Cart), Some(Rect::new(3, 3, 4, 1)));
        map.clear();
        assert_eq!(map.node_at(4, 3), NodeId::Page);
    }
}
