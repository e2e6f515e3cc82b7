//! Terminal front-end for the Évoque storefront.
//!
//! Renders the storefront header, the mega-menu panels, the mobile drawer,
//! the command palette and the page area with ratatui, and translates
//! crossterm input into the platform-neutral events of `evoque-nav`.
//!
//! The interaction rules all live in [`evoque_nav::NavigationController`];
//! this crate only draws its state and records where each node was drawn so
//! mouse input can be routed back to it.

mod app;
mod market;
pub mod ui;

pub use app::{App, DEFAULT_BREAKPOINT, Msg, TuiOptions};
pub use market::{MarketBoard, MarketOutcome, MarketWidget, WidgetState};

/// Runs the storefront until the user quits.
pub async fn run(options: TuiOptions) -> anyhow::Result<()> {
    ui::runtime::run_app(options).await
}
