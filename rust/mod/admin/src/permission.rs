//! Permission evaluation.
//!
//! A permission is an opaque `"{action}:{subject}"` string such as
//! `view:dashboard`. The set is granted by the backend at login and
//! replaced wholesale; nothing here mutates it. Checks are closed-world:
//! a pair absent from the set is denied.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separates action from subject in an encoded permission.
pub const SEPARATOR: char = ':';

/// Encode an (action, subject) pair the way the backend grants it.
pub fn encode(action: &str, subject: &str) -> String {
    format!("{}{}{}", action, SEPARATOR, subject)
}

/// An (action, subject) pair a route or menu entry requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Requirement {
    pub action: String,
    pub subject: String,
}

impl Requirement {
    pub fn new(action: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            subject: subject.into(),
        }
    }

    pub fn encoded(&self) -> String {
        encode(&self.action, &self.subject)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.action, SEPARATOR, self.subject)
    }
}

impl FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(SEPARATOR) {
            Some((action, subject)) if !action.is_empty() && !subject.is_empty() => {
                Ok(Self::new(action, subject))
            }
            _ => Err(format!("expected action{}subject, got '{}'", SEPARATOR, s)),
        }
    }
}

/// The permissions granted to the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list: `"view:dashboard, view:client"`.
    /// Blank entries are skipped.
    pub fn parse_list(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn checker(&self) -> PermissionChecker<'_> {
        PermissionChecker::new(self)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Anything that may declare a required permission.
pub trait Guarded {
    fn requirement(&self) -> Option<&Requirement>;
}

impl Guarded for Requirement {
    fn requirement(&self) -> Option<&Requirement> {
        Some(self)
    }
}

impl Guarded for Option<Requirement> {
    fn requirement(&self) -> Option<&Requirement> {
        self.as_ref()
    }
}

/// Pure predicates over a borrowed [`PermissionSet`].
///
/// Cheap to build; construct one per render pass.
#[derive(Debug, Clone, Copy)]
pub struct PermissionChecker<'a> {
    granted: &'a PermissionSet,
}

impl<'a> PermissionChecker<'a> {
    pub fn new(granted: &'a PermissionSet) -> Self {
        Self { granted }
    }

    pub fn has_permission(&self, action: &str, subject: &str) -> bool {
        self.granted.contains(&encode(action, subject))
    }

    /// `false` for an empty list.
    pub fn has_any_permission(&self, pairs: &[(&str, &str)]) -> bool {
        pairs.iter().any(|(a, s)| self.has_permission(a, s))
    }

    /// `true` for an empty list.
    pub fn has_all_permissions(&self, pairs: &[(&str, &str)]) -> bool {
        pairs.iter().all(|(a, s)| self.has_permission(a, s))
    }

    pub fn allows(&self, requirement: &Requirement) -> bool {
        self.has_permission(&requirement.action, &requirement.subject)
    }

    /// Unguarded routes are open; guarded ones need their pair.
    pub fn can_access_route<G: Guarded + ?Sized>(&self, route: &G) -> bool {
        route.requirement().map_or(true, |r| self.allows(r))
    }

    /// Keep the items whose (action, subject) is granted, in input order.
    pub fn filter_by_permission<T, I, F>(&self, items: I, key: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> (&str, &str),
    {
        items
            .into_iter()
            .filter(|item| {
                let (action, subject) = key(item);
                self.has_permission(action, subject)
            })
            .collect()
    }
}
