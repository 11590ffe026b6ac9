//! Navigation tree: the sidebar's route descriptors.
//!
//! Built once per render pass from a static definition; only the labels
//! depend on the locale. Visibility and the home route are derived from
//! the tree plus a [`PermissionChecker`](crate::PermissionChecker) by the
//! functions in [`visibility`] and [`home`].

pub mod home;
pub mod menu;
pub mod visibility;

use serde::Serialize;

use crate::permission::{Guarded, Requirement};

/// A label between menu blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSection {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    /// Shown regardless of permissions.
    pub auth_bypass: bool,
}

/// A navigable entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub title: String,
    pub path: String,
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    pub auth_bypass: bool,
}

/// A collapsible block of links and nested groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavGroup {
    pub title: String,
    pub icon: String,
    /// Landing page of the group itself, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    pub auth_bypass: bool,
    pub children: Vec<NavNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavNode {
    Section(NavSection),
    Link(NavLink),
    Group(NavGroup),
}

impl NavSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            requirement: None,
            auth_bypass: false,
        }
    }

    pub fn requires(mut self, action: &str, subject: &str) -> Self {
        self.requirement = Some(Requirement::new(action, subject));
        self
    }

    pub fn public(mut self) -> Self {
        self.auth_bypass = true;
        self
    }
}

impl NavLink {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            icon: String::new(),
            requirement: None,
            auth_bypass: false,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn requires(mut self, action: &str, subject: &str) -> Self {
        self.requirement = Some(Requirement::new(action, subject));
        self
    }

    pub fn public(mut self) -> Self {
        self.auth_bypass = true;
        self
    }
}

impl NavGroup {
    pub fn new(title: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            title: title.into(),
            icon: String::new(),
            path: None,
            requirement: None,
            auth_bypass: false,
            children,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn requires(mut self, action: &str, subject: &str) -> Self {
        self.requirement = Some(Requirement::new(action, subject));
        self
    }

    pub fn public(mut self) -> Self {
        self.auth_bypass = true;
        self
    }
}

impl NavNode {
    pub fn title(&self) -> &str {
        match self {
            NavNode::Section(s) => &s.title,
            NavNode::Link(l) => &l.title,
            NavNode::Group(g) => &g.title,
        }
    }

    pub fn auth_bypass(&self) -> bool {
        match self {
            NavNode::Section(s) => s.auth_bypass,
            NavNode::Link(l) => l.auth_bypass,
            NavNode::Group(g) => g.auth_bypass,
        }
    }

    /// The node's own path: a link's target or a group's landing page.
    pub fn path(&self) -> Option<&str> {
        match self {
            NavNode::Section(_) => None,
            NavNode::Link(l) => Some(&l.path),
            NavNode::Group(g) => g.path.as_deref(),
        }
    }

    pub fn children(&self) -> &[NavNode] {
        match self {
            NavNode::Group(g) => &g.children,
            _ => &[],
        }
    }
}

impl Guarded for NavNode {
    fn requirement(&self) -> Option<&Requirement> {
        match self {
            NavNode::Section(s) => s.requirement.as_ref(),
            NavNode::Link(l) => l.requirement.as_ref(),
            NavNode::Group(g) => g.requirement.as_ref(),
        }
    }
}

impl Guarded for NavSection {
    fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }
}

impl Guarded for NavLink {
    fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }
}

impl Guarded for NavGroup {
    fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }
}

impl From<NavSection> for NavNode {
    fn from(s: NavSection) -> Self {
        NavNode::Section(s)
    }
}

impl From<NavLink> for NavNode {
    fn from(l: NavLink) -> Self {
        NavNode::Link(l)
    }
}

impl From<NavGroup> for NavNode {
    fn from(g: NavGroup) -> Self {
        NavNode::Group(g)
    }
}
