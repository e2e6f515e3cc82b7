//! Command palette: a searchable, keyboard-driven list of every link.

use evoque_types::{Effect, NavData, NavLink};
use tracing::{debug, info};

use crate::coordinator::{InputCoordinator, ListenerHandle, ListenerKind, ListenerOwner};
use crate::focus::{FocusState, FocusableSet};
use crate::input::{Key, KeyInput};
use crate::node::NodeId;

/// Upper bound on the number of results shown at once.
pub const MAX_RESULTS: usize = 24;

/// Flattened search pool: primary links, quick links, then every mega item.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    pool: Vec<NavLink>,
}

impl SearchIndex {
    pub fn build(data: &NavData) -> Self {
        let mut index = Self::default();
        index.rebuild(data);
        index
    }

    pub fn rebuild(&mut self, data: &NavData) {
        self.pool = data
            .primary
            .iter()
            .chain(data.quick_links.iter())
            .chain(data.mega.iter().flat_map(|group| group.links()))
            .cloned()
            .collect();
    }

    pub fn pool(&self) -> &[NavLink] {
        &self.pool
    }

    /// Case-insensitive substring match on label or href, in pool order,
    /// capped at [`MAX_RESULTS`]. A blank query returns the head of the pool.
    pub fn search(&self, query: &str) -> Vec<&NavLink> {
        let needle = query.trim().to_lowercase();
        self.pool
            .iter()
            .filter(|link| {
                needle.is_empty()
                    || link.label.to_lowercase().contains(&needle)
                    || link.href.to_lowercase().contains(&needle)
            })
            .take(MAX_RESULTS)
            .collect()
    }
}

/// UTF-8 safe single-line text buffer with a byte cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    /// Always on a char boundary.
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn move_left(&mut self) {
        if let Some(previous) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= previous.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        let Some(previous) = self.text[..self.cursor].chars().next_back() else {
            return;
        };
        let start = self.cursor - previous.len_utf8();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.text.drain(self.cursor..self.cursor + next.len_utf8());
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandPalette {
    open: bool,
    input: QueryInput,
    active_index: usize,
    index: SearchIndex,
    results: Vec<NavLink>,
    key_listener: Option<ListenerHandle>,
    restore_focus: Option<NodeId>,
}

impl CommandPalette {
    pub fn new(data: &NavData) -> Self {
        let mut palette = Self {
            index: SearchIndex::build(data),
            ..Self::default()
        };
        palette.refresh();
        palette
    }

    /// Rebuilds the pool after the navigation data changed.
    pub fn rebuild(&mut self, data: &NavData) {
        self.index.rebuild(data);
        self.refresh();
        self.active_index = 0;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn results(&self) -> &[NavLink] {
        &self.results
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_result(&self) -> Option<&NavLink> {
        self.results.get(self.active_index)
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Opens with an empty query and focuses the search input.
    pub fn open(&mut self, focus: &mut FocusState, coordinator: &mut InputCoordinator) {
        if self.open {
            return;
        }
        self.open = true;
        self.input.clear();
        self.refresh();
        self.active_index = 0;
        self.restore_focus = focus.active();
        self.key_listener = Some(coordinator.attach(ListenerOwner::Palette, ListenerKind::KeyDown));
        focus.focus(NodeId::PaletteInput);
        debug!("command palette opened");
    }

    pub fn close(&mut self, focus: &mut FocusState, coordinator: &mut InputCoordinator) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        if let Some(handle) = self.key_listener.take() {
            coordinator.detach(handle);
        }
        focus.restore(self.restore_focus.take());
        debug!("command palette closed");
        true
    }

    pub fn toggle(&mut self, focus: &mut FocusState, coordinator: &mut InputCoordinator) {
        if self.open {
            self.close(focus, coordinator);
        } else {
            self.open(focus, coordinator);
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.edit(|input| input.set_text(query));
    }

    /// Applies a text edit; any change to the text resets the active index.
    fn edit(&mut self, apply: impl FnOnce(&mut QueryInput)) {
        let before = self.input.text().to_owned();
        apply(&mut self.input);
        if self.input.text() != before {
            self.refresh();
            self.active_index = 0;
        }
    }

    fn refresh(&mut self) {
        self.results = self.index.search(self.input.text()).into_iter().cloned().collect();
    }

    pub fn move_down(&mut self) {
        self.active_index = (self.active_index + 1).min(self.results.len().saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.active_index = self.active_index.saturating_sub(1);
    }

    /// Pointer hover highlights a row without changing the query.
    pub fn set_active(&mut self, index: usize) {
        if index < self.results.len() {
            self.active_index = index;
        }
    }

    /// The palette's keydown listener.
    pub fn handle_key(
        &mut self,
        input: &KeyInput,
        focus: &mut FocusState,
        coordinator: &mut InputCoordinator,
    ) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        match input.key {
            Key::Escape => {
                self.close(focus, coordinator);
            }
            Key::ArrowDown => self.move_down(),
            Key::ArrowUp => self.move_up(),
            Key::Enter => return self.activate_result(self.active_index, focus, coordinator),
            // Focus stays on the search input.
            Key::Tab => {}
            Key::Backspace => self.edit(QueryInput::backspace),
            Key::Delete => self.edit(QueryInput::delete),
            Key::ArrowLeft => self.input.move_left(),
            Key::ArrowRight => self.input.move_right(),
            Key::Home => self.input.move_home(),
            Key::End => self.input.move_end(),
            Key::Char(c) if input.modifiers.ctrl && c.eq_ignore_ascii_case(&'u') => self.edit(QueryInput::clear),
            Key::Char(_) => {
                if let Some(c) = input.text_char() {
                    self.edit(|query| query.insert_char(c));
                }
            }
        }
        Vec::new()
    }

    /// Navigates to result `index` and closes. With no such result this is a
    /// no-op and the palette stays open.
    pub fn activate_result(
        &mut self,
        index: usize,
        focus: &mut FocusState,
        coordinator: &mut InputCoordinator,
    ) -> Vec<Effect> {
        let Some(link) = self.results.get(index) else {
            debug!(query = self.input.text(), "no palette result to activate");
            return Vec::new();
        };
        let href = link.href.clone();
        info!(%href, "navigating from command palette");
        self.close(focus, coordinator);
        vec![Effect::Navigate(href)]
    }
}

impl FocusableSet for CommandPalette {
    fn focusables(&self) -> Vec<NodeId> {
        if !self.open {
            return Vec::new();
        }
        std::iter::once(NodeId::PaletteInput)
            .chain((0..self.results.len()).map(NodeId::PaletteResult))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use evoque_types::{MegaGroup, NavSection};

    fn small() -> NavData {
        NavData {
            brand: "B".into(),
            primary: vec![],
            mega: vec![MegaGroup::new(
                "Shop",
                vec![NavSection::new(
                    "All",
                    vec![
                        NavLink::new("Home", "/"),
                        NavLink::new("Collections", "/collections"),
                        NavLink::new("New", "/new"),
                    ],
                )],
            )],
            quick_links: vec![],
        }
    }

    fn opened(data: &NavData) -> (CommandPalette, FocusState, InputCoordinator) {
        let mut palette = CommandPalette::new(data);
        let mut focus = FocusState::new();
        let mut coordinator = InputCoordinator::new();
        palette.open(&mut focus, &mut coordinator);
        (palette, focus, coordinator)
    }

    #[test]
    fn pool_orders_primary_then_quick_then_mega() {
        let mut data = small();
        data.primary.push(NavLink::new("Sale", "/sale"));
        data.quick_links.push(NavLink::new("Blog", "/blog"));
        let labels: Vec<_> = SearchIndex::build(&data).pool().iter().map(|l| l.label.clone()).collect();
        assert_eq!(labels, ["Sale", "Blog", "Home", "Collections", "New"]);
    }

    #[test]
    fn query_co_matches_collections_only() {
        let data = small();
        let (mut palette, _, _) = opened(&data);
        palette.set_query("co");
        let labels: Vec<_> = palette.results().iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Collections"]);
        assert_eq!(palette.active_index(), 0);
    }

    #[test]
    fn matches_href_case_insensitively_and_trims() {
        let index = SearchIndex::build(&NavData::storefront());
        let hits = index.search("  RESTOCK ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].href, "/new/restocked");
    }

    #[test]
    fn results_are_capped() {
        let data = NavData {
            brand: "B".into(),
            primary: (0..40).map(|i| NavLink::new(format!("Item {i}"), format!("/item/{i}"))).collect(),
            ..NavData::default()
        };
        let index = SearchIndex::build(&data);
        assert_eq!(index.search("").len(), MAX_RESULTS);
        assert_eq!(index.search("").first().map(|l| l.label.as_str()), Some("Item 0"));
        assert_eq!(index.search("item 1").len(), 11);
    }

    #[test]
    fn arrows_clamp_and_query_change_resets() {
        let data = NavData::storefront();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.handle_key(&KeyInput::new(Key::ArrowUp), &mut focus, &mut coordinator);
        assert_eq!(palette.active_index(), 0);
        for _ in 0..100 {
            palette.move_down();
        }
        assert_eq!(palette.active_index(), palette.results().len() - 1);
        palette.handle_key(&KeyInput::new(Key::Char('n')), &mut focus, &mut coordinator);
        assert_eq!(palette.query(), "n");
        assert_eq!(palette.active_index(), 0);
    }

    #[test]
    fn enter_navigates_and_closes() {
        let data = small();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.move_down();
        let effects = palette.handle_key(&KeyInput::new(Key::Enter), &mut focus, &mut coordinator);
        assert_eq!(effects, vec![Effect::Navigate("/collections".into())]);
        assert!(!palette.is_open());
        assert_eq!(coordinator.listener_count(), 0);
    }

    #[test]
    fn enter_without_results_keeps_palette_open() {
        let data = small();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.set_query("zzz");
        assert!(palette.results().is_empty());
        let effects = palette.handle_key(&KeyInput::new(Key::Enter), &mut focus, &mut coordinator);
        assert!(effects.is_empty());
        assert!(palette.is_open());
    }

    #[test]
    fn reopening_starts_from_an_empty_query() {
        let data = small();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.set_query("new");
        palette.close(&mut focus, &mut coordinator);
        palette.open(&mut focus, &mut coordinator);
        assert_eq!(palette.query(), "");
        assert_eq!(palette.results().len(), 3);
        assert_eq!(focus.active(), Some(NodeId::PaletteInput));
    }

    #[test]
    fn query_input_edits_are_utf8_safe() {
        let mut input = QueryInput::new();
        input.set_text("café");
        input.move_left();
        input.delete();
        assert_eq!(input.text(), "caf");
        input.insert_char('é');
        input.move_home();
        input.move_right();
        input.backspace();
        assert_eq!(input.text(), "afé");
        assert_eq!(input.cursor(), 0);
        input.move_end();
        assert_eq!(input.cursor(), "afé".len());
    }

    #[test]
    fn ctrl_u_clears_the_query() {
        let data = small();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.set_query("col");
        palette.handle_key(&KeyInput::ctrl('u'), &mut focus, &mut coordinator);
        assert_eq!(palette.query(), "");
        assert_eq!(palette.results().len(), 3);
    }

    #[test]
    fn alt_chords_are_not_typed_into_the_query() {
        let data = small();
        let (mut palette, mut focus, mut coordinator) = opened(&data);
        palette.handle_key(&KeyInput::new(Key::Char('n')), &mut focus, &mut coordinator);
        palette.handle_key(
            &KeyInput::with_modifiers(Key::Char('x'), Modifiers::ALT),
            &mut focus,
            &mut coordinator,
        );
        assert_eq!(palette.query(), "n");
        assert!(palette.is_open());
    }
}
