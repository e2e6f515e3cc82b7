//! # Évoque navigation core
//!
//! A headless implementation of the storefront's navigation interaction
//! system. Nothing in this crate draws anything; it owns the state machines
//! and interaction contracts so they can be driven by any front-end (the
//! terminal UI in `evoque-tui`, or tests).
//!
//! ## Architecture
//!
//! - [`Menubar`] keeps the ordered registry of top-level triggers and
//!   implements roving arrow-key focus, honouring the layout [`Direction`].
//! - [`MegaMenuState`] tracks which mega-menu panel is open and its
//!   outside-click / Escape dismissal listeners.
//! - [`MobileDrawer`] is the modal navigation overlay for narrow layouts with
//!   a focus trap and focus restoration.
//! - [`CommandPalette`] searches a flattened [`SearchIndex`] of every link.
//! - [`InputCoordinator`] owns every document-level listener registration.
//! - [`NavigationController`] composes all of the above, owns the shared UI
//!   state and is the only entry point for input events.
//!
//! Handlers return [`Effect`]s; hosts apply them to a [`Router`].
//!
//! [`Direction`]: evoque_types::Direction
//! [`Effect`]: evoque_types::Effect

mod controller;
mod coordinator;
mod drawer;
mod focus;
mod input;
mod mega_menu;
mod menubar;
mod node;
mod palette;
mod router;

pub use controller::{HeaderLayout, NavigationController, Overlay};
pub use coordinator::{InputCoordinator, Listener, ListenerHandle, ListenerKind, ListenerOwner};
pub use drawer::{DrawerEntry, DrawerView, MobileDrawer};
pub use focus::{FocusState, FocusTrap, FocusableSet};
pub use input::{Key, KeyInput, Modifiers, PointerEvent};
pub use mega_menu::{MegaMenuState, PanelTransition};
pub use menubar::{Menubar, MenubarAction, RovingMove};
pub use node::{DrawerLinkRef, MegaItemRef, NodeId};
pub use palette::{CommandPalette, MAX_RESULTS, QueryInput, SearchIndex};
pub use router::{HistoryRouter, Router, apply_effects};

pub use evoque_types::{Direction, Effect, NavData, NavLink};
