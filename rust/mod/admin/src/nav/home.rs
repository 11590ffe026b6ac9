//! Post-login landing page.

use crate::nav::visibility::{group_visible, link_visible, passes};
use crate::nav::NavNode;
use crate::permission::PermissionChecker;

/// The first path the session may open, in declaration order.
///
/// Pre-order walk: earlier siblings win over later siblings and their
/// children. A visible link yields its path. A visible group that has
/// both a landing page and its own grant (or bypass) yields that page
/// without descending; any other visible group is searched. Returns
/// `fallback` when nothing qualifies.
pub fn resolve_home_route(nodes: &[NavNode], checker: &PermissionChecker<'_>, fallback: &str) -> String {
    first_path(nodes, checker).unwrap_or(fallback).to_string()
}

fn first_path<'a>(nodes: &'a [NavNode], checker: &PermissionChecker<'_>) -> Option<&'a str> {
    nodes.iter().find_map(|node| match node {
        NavNode::Section(_) => None,
        NavNode::Link(l) => link_visible(l, checker).then_some(l.path.as_str()),
        NavNode::Group(g) => {
            if !group_visible(g, checker) {
                return None;
            }
            let guarded = g.auth_bypass || g.requirement.is_some();
            match g.path.as_deref() {
                Some(path) if guarded && passes(g, g.auth_bypass, checker) => Some(path),
                _ => first_path(&g.children, checker),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavGroup, NavLink, NavSection};
    use crate::permission::PermissionSet;

    const LOGIN: &str = "/login";

    fn set(perms: &[&str]) -> PermissionSet {
        perms.iter().copied().collect()
    }

    fn dashboard_then_clients() -> Vec<NavNode> {
        vec![
            NavLink::new("Dashboard", "/dashboard").requires("view", "dashboard").into(),
            NavLink::new("Clients", "/clients").into(),
        ]
    }

    #[test]
    fn first_unguarded_link_without_grants() {
        let tree = dashboard_then_clients();
        assert_eq!(resolve_home_route(&tree, &set(&[]).checker(), LOGIN), "/clients");
    }

    #[test]
    fn granted_dashboard_wins_in_declaration_order() {
        let tree = dashboard_then_clients();
        let perms = set(&["view:dashboard"]);
        assert_eq!(resolve_home_route(&tree, &perms.checker(), LOGIN), "/dashboard");
    }

    #[test]
    fn earlier_sibling_wins_even_when_later_is_granted() {
        let mut tree = dashboard_then_clients();
        tree.reverse();
        let perms = set(&["view:dashboard"]);
        assert_eq!(resolve_home_route(&tree, &perms.checker(), LOGIN), "/clients");
    }

    #[test]
    fn falls_back_when_nothing_is_visible() {
        let tree: Vec<NavNode> = vec![
            NavSection::new("Main").into(),
            NavLink::new("Orders", "/orders").requires("view", "order").into(),
        ];
        assert_eq!(resolve_home_route(&tree, &set(&[]).checker(), LOGIN), LOGIN);
        assert_eq!(resolve_home_route(&[], &set(&[]).checker(), LOGIN), LOGIN);
    }

    #[test]
    fn guarded_group_with_path_returns_own_path() {
        let tree: Vec<NavNode> = vec![NavGroup::new(
            "Finance",
            vec![NavLink::new("Currencies", "/finance/currencies").requires("view", "currency").into()],
        )
        .path("/finance")
        .requires("view", "finance")
        .into()];
        let perms = set(&["view:finance", "view:currency"]);
        assert_eq!(resolve_home_route(&tree, &perms.checker(), LOGIN), "/finance");
    }

    #[test]
    fn unguarded_group_path_descends() {
        let tree: Vec<NavNode> = vec![NavGroup::new(
            "Staff",
            vec![
                NavLink::new("Employees", "/employees").requires("view", "employee").into(),
                NavLink::new("Branches", "/branches").requires("view", "branch").into(),
            ],
        )
        .path("/staff")
        .into()];
        let perms = set(&["view:branch"]);
        assert_eq!(resolve_home_route(&tree, &perms.checker(), LOGIN), "/branches");
    }

    #[test]
    fn hidden_group_is_skipped() {
        let tree: Vec<NavNode> = vec![
            NavGroup::new(
                "Staff",
                vec![NavLink::new("Employees", "/employees").into()],
            )
            .requires("view", "staff")
            .into(),
            NavLink::new("Profile", "/profile").public().into(),
        ];
        assert_eq!(resolve_home_route(&tree, &set(&[]).checker(), LOGIN), "/profile");
    }
}
