//! Locating and loading the navigation tree.
//!
//! Precedence: an explicit path (the `--nav` flag), then [`NAV_PATH_ENV`],
//! then the built-in storefront tree.

use std::env;
use std::path::{Path, PathBuf};

use evoque_types::{NavData, NavDataError};
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable naming a JSON or YAML navigation file.
pub const NAV_PATH_ENV: &str = "EVOQUE_NAV_PATH";

/// Where the navigation tree came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSource {
    File(PathBuf),
    BuiltIn,
}

impl NavSource {
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return NavSource::File(path.to_path_buf());
        }
        match env::var(NAV_PATH_ENV) {
            Ok(value) if !value.trim().is_empty() => NavSource::File(expand_tilde(&value)),
            _ => NavSource::BuiltIn,
        }
    }

    pub fn load(&self) -> Result<NavData, NavDataError> {
        let data = match self {
            NavSource::File(path) => {
                debug!(path = %path.display(), "loading navigation file");
                NavData::from_path(path)?
            }
            NavSource::BuiltIn => NavData::storefront(),
        };
        for issue in data.validate() {
            warn!(%issue, "navigation data issue");
        }
        Ok(data)
    }
}

impl std::fmt::Display for NavSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavSource::File(path) => write!(f, "{}", path.display()),
            NavSource::BuiltIn => f.write_str("built-in storefront"),
        }
    }
}
