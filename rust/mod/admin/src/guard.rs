//! Route-level access check.

use crate::nav::home::resolve_home_route;
use crate::nav::visibility::{is_visible, passes};
use crate::nav::NavNode;
use crate::permission::PermissionChecker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Decides whether the session may open a path.
///
/// A path belongs to the menu node whose own path is its longest
/// segment-aligned prefix, so `/clients/42` is governed by `/clients`.
/// Paths outside the menu are allowed; those pages check for themselves.
pub struct RouteGuard<'a> {
    menu: &'a [NavNode],
    checker: PermissionChecker<'a>,
    authenticated: bool,
    login_path: &'a str,
}

impl<'a> RouteGuard<'a> {
    pub fn new(
        menu: &'a [NavNode],
        checker: PermissionChecker<'a>,
        authenticated: bool,
        login_path: &'a str,
    ) -> Self {
        Self {
            menu,
            checker,
            authenticated,
            login_path,
        }
    }

    pub fn check(&self, path: &str) -> RouteDecision {
        if path == self.login_path {
            return RouteDecision::Allow;
        }
        if !self.authenticated {
            return RouteDecision::Redirect(self.login_path.to_string());
        }
        match self.owner(self.menu, path, true) {
            Some((_, false)) => {
                let home = resolve_home_route(self.menu, &self.checker, self.login_path);
                tracing::debug!(%path, %home, "route denied");
                RouteDecision::Redirect(home)
            }
            _ => RouteDecision::Allow,
        }
    }

    /// Longest owning node under `nodes`, with whether it and every
    /// enclosing group pass their own check.
    fn owner(&self, nodes: &'a [NavNode], path: &str, parents_ok: bool) -> Option<(usize, bool)> {
        let mut best: Option<(usize, bool)> = None;
        for node in nodes {
            if let Some(own) = node.path().filter(|own| owns(own, path)) {
                let visible = parents_ok && is_visible(node, &self.checker);
                if best.map_or(true, |(len, _)| own.len() > len) {
                    best = Some((own.len(), visible));
                }
            }
            if let NavNode::Group(g) = node {
                let ok = parents_ok && passes(g, g.auth_bypass, &self.checker);
                if let Some(found) = self.owner(&g.children, path, ok) {
                    if best.map_or(true, |(len, _)| found.0 > len) {
                        best = Some(found);
                    }
                }
            }
        }
        best
    }
}

fn owns(own: &str, path: &str) -> bool {
    match path.strip_prefix(own) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || own.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{NavGroup, NavLink};
    use crate::permission::PermissionSet;

    fn menu() -> Vec<NavNode> {
        vec![
            NavLink::new("Dashboard", "/dashboard").requires("view", "dashboard").into(),
            NavLink::new("Clients", "/clients").requires("view", "client").into(),
            NavGroup::new(
                "Finance",
                vec![
                    NavLink::new("Currencies", "/finance/currencies").requires("view", "currency").into(),
                    NavLink::new("Investors", "/finance/investors").requires("view", "investor").into(),
                ],
            )
            .path("/finance")
            .requires("view", "finance")
            .into(),
            NavLink::new("Profile", "/profile").public().into(),
        ]
    }

    fn decide(perms: &[&str], path: &str) -> RouteDecision {
        let tree = menu();
        let set: PermissionSet = perms.iter().copied().collect();
        RouteGuard::new(&tree, set.checker(), true, "/login").check(path)
    }

    #[test]
    fn granted_paths_allowed() {
        assert_eq!(decide(&["view:client"], "/clients"), RouteDecision::Allow);
        assert_eq!(decide(&["view:client"], "/clients/42/edit"), RouteDecision::Allow);
        assert_eq!(decide(&[], "/profile"), RouteDecision::Allow);
    }

    #[test]
    fn denied_paths_redirect_home() {
        assert_eq!(
            decide(&["view:client"], "/dashboard"),
            RouteDecision::Redirect("/clients".into())
        );
        assert_eq!(decide(&[], "/clients"), RouteDecision::Redirect("/profile".into()));
    }

    #[test]
    fn enclosing_group_must_pass() {
        assert_eq!(
            decide(&["view:currency"], "/finance/currencies"),
            RouteDecision::Redirect("/profile".into())
        );
        assert_eq!(
            decide(&["view:finance", "view:currency"], "/finance/currencies"),
            RouteDecision::Allow
        );
        assert_eq!(
            decide(&["view:finance", "view:currency"], "/finance/investors"),
            RouteDecision::Redirect("/finance".into())
        );
    }

    #[test]
    fn prefix_must_align_on_segment() {
        assert_eq!(decide(&[], "/clientsettings"), RouteDecision::Allow);
        assert_eq!(decide(&[], "/reports"), RouteDecision::Allow);
    }

    #[test]
    fn anonymous_goes_to_login() {
        let tree = menu();
        let set = PermissionSet::new();
        let guard = RouteGuard::new(&tree, set.checker(), false, "/login");
        assert_eq!(guard.check("/profile"), RouteDecision::Redirect("/login".into()));
        assert_eq!(guard.check("/login"), RouteDecision::Allow);
    }
}
