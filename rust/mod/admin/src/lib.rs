//! BNPL back-office core.
//!
//! - [`permission`]: the permission set and its checker
//! - [`nav`]: the sidebar tree, its visibility rules and the home route
//! - [`guard`]: route-level access decisions
//! - [`session`]: login, logout and refresh against the API
//! - [`model`], [`resource`]: the API's resources and payloads
//! - [`AdminApp`]: everything above wired to one store

pub mod app;
pub mod guard;
pub mod model;
pub mod nav;
pub mod permission;
pub mod resource;
pub mod session;

#[cfg(test)]
mod testing;

pub use app::{search_target, AdminApp, NAV_CATALOG};
pub use guard::{RouteDecision, RouteGuard};
pub use nav::home::resolve_home_route;
pub use nav::menu::{admin_menu, DASHBOARD_PATH, PROFILE_PATH};
pub use nav::visibility::{guard_group, guard_link, guard_section, is_visible, visible_menu};
pub use nav::{NavGroup, NavLink, NavNode, NavSection};
pub use permission::{Guarded, PermissionChecker, PermissionSet, Requirement};
pub use resource::Resource;
pub use session::{AppRoute, AuthPhase, AuthState, Credentials, Session, User};
