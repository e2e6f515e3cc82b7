//! Routing collaborator.

use evoque_types::Effect;
use tracing::info;

/// The host's navigation surface. The controller never calls it directly;
/// hosts feed it the [`Effect`]s returned by event handlers.
pub trait Router {
    fn navigate(&mut self, href: &str);
    fn current_path(&self) -> &str;
}

/// In-memory router with a back stack.
#[derive(Debug, Clone)]
pub struct HistoryRouter {
    history: Vec<String>,
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HistoryRouter {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            history: vec![start.into()],
        }
    }

    /// Pops the current entry. The first entry is never removed.
    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Router for HistoryRouter {
    fn navigate(&mut self, href: &str) {
        if self.current_path() == href {
            return;
        }
        info!(from = self.current_path(), to = href, "route change");
        self.history.push(href.to_string());
    }

    fn current_path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }
}

/// Applies handler effects to `router` in order.
pub fn apply_effects<R: Router + ?Sized>(router: &mut R, effects: impl IntoIterator<Item = Effect>) {
    for effect in effects {
        match effect {
            Effect::Navigate(href) => router.navigate(&href),
        }
    }
}
