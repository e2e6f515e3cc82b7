//! Shared helpers for the Évoque binaries: persisted preferences, path
//! handling and navigation-file resolution.

pub mod nav_source;
pub mod path_processing;
pub mod preferences;

pub use nav_source::{NAV_PATH_ENV, NavSource};
pub use path_processing::{LOG_PATH_ENV, default_log_path, expand_tilde};
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, PreferencesPayload, UserPreferences};
