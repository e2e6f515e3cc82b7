//! Structural checks for navigation trees.
//!
//! None of these findings stop a tree from being used. Callers log them and
//! carry on, because a duplicated href or an empty group only degrades the
//! experience.

use std::collections::HashSet;
use std::fmt;

use super::{NavData, NavLink};

/// A single finding reported by [`NavData::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDataIssue {
    /// The same href appears more than once.
    DuplicateHref { href: String },
    /// A link, section or trigger has a blank label.
    EmptyLabel { location: String },
    /// A link has a blank href.
    EmptyHref { label: String },
    /// The href is neither site-relative (`/…`) nor an absolute URL.
    RelativeHref { href: String },
    /// A mega group contains no links at all.
    EmptyMegaGroup { trigger: String },
}

impl fmt::Display for NavDataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavDataIssue::DuplicateHref { href } => write!(f, "href '{href}' is used by more than one link"),
            NavDataIssue::EmptyLabel { location } => write!(f, "empty label at {location}"),
            NavDataIssue::EmptyHref { label } => write!(f, "link '{label}' has an empty href"),
            NavDataIssue::RelativeHref { href } => write!(f, "href '{href}' should start with '/' or a URL scheme"),
            NavDataIssue::EmptyMegaGroup { trigger } => write!(f, "mega group '{trigger}' has no links"),
        }
    }
}

impl NavData {
    /// Returns every structural issue found in the tree, in tree order.
    pub fn validate(&self) -> Vec<NavDataIssue> {
        let mut issues = Vec::new();
        if self.brand.trim().is_empty() {
            issues.push(NavDataIssue::EmptyLabel {
                location: "brand".to_string(),
            });
        }

        for (index, link) in self.primary.iter().enumerate() {
            check_link(link, &format!("primary[{index}]"), &mut issues);
        }
        for (group_index, group) in self.mega.iter().enumerate() {
            if group.trigger.trim().is_empty() {
                issues.push(NavDataIssue::EmptyLabel {
                    location: format!("mega[{group_index}]"),
                });
            }
            if group.links().next().is_none() {
                issues.push(NavDataIssue::EmptyMegaGroup {
                    trigger: group.trigger.clone(),
                });
            }
            for (section_index, section) in group.sections.iter().enumerate() {
                let location = format!("mega[{group_index}].sections[{section_index}]");
                if section.label.trim().is_empty() {
                    issues.push(NavDataIssue::EmptyLabel {
                        location: location.clone(),
                    });
                }
                for (item_index, link) in section.items.iter().enumerate() {
                    check_link(link, &format!("{location}.items[{item_index}]"), &mut issues);
                }
            }
        }
        for (index, link) in self.quick_links.iter().enumerate() {
            check_link(link, &format!("quickLinks[{index}]"), &mut issues);
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for link in self.all_links() {
            if !link.href.is_empty() && !seen.insert(link.href.as_str()) && reported.insert(link.href.as_str()) {
                issues.push(NavDataIssue::DuplicateHref { href: link.href.clone() });
            }
        }
        issues
    }
}

fn check_link(link: &NavLink, location: &str, issues: &mut Vec<NavDataIssue>) {
    if link.label.trim().is_empty() {
        issues.push(NavDataIssue::EmptyLabel {
            location: location.to_string(),
        });
    }
    let href = link.href.trim();
    if href.is_empty() {
        issues.push(NavDataIssue::EmptyHref {
            label: link.label.clone(),
        });
    } else if !href.starts_with('/') && !href.contains("://") && !href.starts_with("mailto:") {
        issues.push(NavDataIssue::RelativeHref {
            href: link.href.clone(),
        });
    }
}
