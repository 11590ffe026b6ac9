//! Which navigation nodes render.
//!
//! - `auth_bypass` nodes always render.
//! - A node with a requirement renders only if the checker grants it.
//! - A node without one renders by default.
//! - A group also needs at least one visible link or group below it.
//!   Section titles inside a group do not count.

use crate::nav::{NavGroup, NavLink, NavNode, NavSection};
use crate::permission::{Guarded, PermissionChecker};

/// The node's own check, ignoring descendants.
pub(crate) fn passes<G: Guarded + ?Sized>(
    node: &G,
    auth_bypass: bool,
    checker: &PermissionChecker<'_>,
) -> bool {
    auth_bypass || checker.can_access_route(node)
}

pub fn is_visible(node: &NavNode, checker: &PermissionChecker<'_>) -> bool {
    match node {
        NavNode::Section(s) => section_visible(s, checker),
        NavNode::Link(l) => link_visible(l, checker),
        NavNode::Group(g) => group_visible(g, checker),
    }
}

pub fn section_visible(section: &NavSection, checker: &PermissionChecker<'_>) -> bool {
    passes(section, section.auth_bypass, checker)
}

pub fn link_visible(link: &NavLink, checker: &PermissionChecker<'_>) -> bool {
    passes(link, link.auth_bypass, checker)
}

pub fn group_visible(group: &NavGroup, checker: &PermissionChecker<'_>) -> bool {
    if group.auth_bypass {
        return true;
    }
    passes(group, false, checker) && has_visible_descendant(&group.children, checker)
}

/// Depth-first; stops at the first visible link or group.
fn has_visible_descendant(children: &[NavNode], checker: &PermissionChecker<'_>) -> bool {
    children.iter().any(|child| match child {
        NavNode::Section(_) => false,
        NavNode::Link(l) => link_visible(l, checker),
        NavNode::Group(g) => group_visible(g, checker),
    })
}

/// Run `render` only when the section is visible.
pub fn guard_section<R>(
    section: &NavSection,
    checker: &PermissionChecker<'_>,
    render: impl FnOnce() -> R,
) -> Option<R> {
    section_visible(section, checker).then(render)
}

/// Run `render` only when the link is visible.
pub fn guard_link<R>(
    link: &NavLink,
    checker: &PermissionChecker<'_>,
    render: impl FnOnce() -> R,
) -> Option<R> {
    link_visible(link, checker).then(render)
}

/// Run `render` only when the group is visible.
pub fn guard_group<R>(
    group: &NavGroup,
    checker: &PermissionChecker<'_>,
    render: impl FnOnce() -> R,
) -> Option<R> {
    group_visible(group, checker).then(render)
}

/// The tree as it renders: hidden nodes dropped, groups pruned recursively.
pub fn visible_menu(nodes: &[NavNode], checker: &PermissionChecker<'_>) -> Vec<NavNode> {
    nodes
        .iter()
        .filter(|node| is_visible(node, checker))
        .map(|node| match node {
            NavNode::Group(g) => NavNode::Group(NavGroup {
                children: visible_menu(&g.children, checker),
                ..g.clone()
            }),
            other => other.clone(),
        })
        .collect()
}
