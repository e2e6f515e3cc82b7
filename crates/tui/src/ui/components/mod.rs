//! Storefront components: header, mega panel, drawer, palette, page, hints.

pub mod component;
pub mod drawer;
pub mod header;
pub mod hint_bar;
pub mod market_cards;
pub mod mega_panel;
pub mod page;
pub mod palette;

pub use component::*;
pub use drawer::DrawerComponent;
pub use header::HeaderComponent;
pub use hint_bar::HintBarComponent;
pub use market_cards::MarketCardsComponent;
pub use mega_panel::MegaPanelComponent;
pub use page::PageComponent;
pub use palette::PaletteComponent;
