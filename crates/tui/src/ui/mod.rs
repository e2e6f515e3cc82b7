//! Terminal rendering for the storefront header, its overlays and the page
//! behind them.

pub mod components;
pub mod hit_map;
pub mod input;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
