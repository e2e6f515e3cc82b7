//! Navigation data model.
//!
//! A [`NavData`] tree is built once when the storefront starts and is never
//! mutated afterwards. Every navigation surface reads it through a shared
//! reference. Field names serialize in camelCase so navigation files authored
//! for the web storefront (`quickLinks`) load without changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod storefront;
mod validation;

pub use validation::NavDataIssue;

/// A single navigable destination.
///
/// Links are identified by `href`; hrefs should be unique within one tree,
/// though nothing enforces it (see [`NavData::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque icon glyph rendered next to the label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavLink {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            description: None,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One column of a mega-menu, or one grouped block in the mobile drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub label: String,
    #[serde(default)]
    pub items: Vec<NavLink>,
}

impl NavSection {
    pub fn new(label: impl Into<String>, items: Vec<NavLink>) -> Self {
        Self {
            label: label.into(),
            items,
        }
    }
}

/// A top-level menubar entry that opens a mega-menu panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaGroup {
    /// Visible label of the menubar trigger.
    pub trigger: String,
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

impl MegaGroup {
    pub fn new(trigger: impl Into<String>, sections: Vec<NavSection>) -> Self {
        Self {
            trigger: trigger.into(),
            sections,
        }
    }

    /// Every link of every section, in section order.
    pub fn links(&self) -> impl Iterator<Item = &NavLink> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }
}

/// The complete navigation tree of the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavData {
    pub brand: String,
    /// Plain links living directly in the menubar.
    #[serde(default)]
    pub primary: Vec<NavLink>,
    /// Groups that open a mega-menu on wide layouts.
    #[serde(default)]
    pub mega: Vec<MegaGroup>,
    /// Secondary links surfaced in search and in the mobile drawer.
    #[serde(default)]
    pub quick_links: Vec<NavLink>,
}

/// Errors raised while loading a navigation tree.
#[derive(Debug, Error)]
pub enum NavDataError {
    #[error("navigation file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid navigation JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid navigation YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported navigation file format '{0}'; expected .json, .yaml or .yml")]
    UnsupportedFormat(String),
}

impl NavData {
    pub fn from_json_str(input: &str) -> Result<Self, NavDataError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, NavDataError> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Load a navigation tree from disk; the format follows the file extension.
    pub fn from_path(path: &Path) -> Result<Self, NavDataError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            _ => Err(NavDataError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Number of menubar triggers: primary links followed by mega triggers.
    pub fn trigger_count(&self) -> usize {
        self.primary.len() + self.mega.len()
    }

    /// Every link in the tree in search-pool order:
    /// primary, then quick links, then each mega group's items.
    pub fn all_links(&self) -> impl Iterator<Item = &NavLink> {
        self.primary
            .iter()
            .chain(self.quick_links.iter())
            .chain(self.mega.iter().flat_map(MegaGroup::links))
    }

    /// Finds the first link whose href matches `href` exactly.
    pub fn find_by_href(&self, href: &str) -> Option<&NavLink> {
        self.all_links().find(|link| link.href == href)
    }
}
