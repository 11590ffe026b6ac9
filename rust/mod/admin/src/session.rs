//! Authentication state and the login/logout/refresh flows.
//!
//! The session lives in the store at [`AuthState::PATH`]; the current
//! route at [`AppRoute::PATH`]. Every flow replaces `AuthState` wholesale,
//! so a permission set is never patched in place.

use std::sync::Arc;

use bnpl_client::{HttpClient, RequestOptions, SessionToken, TokenSource};
use bnpl_core::AdminError;
use bnpl_flux::StateStore;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::nav::home::resolve_home_route;
use crate::nav::NavNode;
use crate::permission::PermissionSet;

pub const LOGIN_ENDPOINT: &str = "auth/login";
pub const ME_ENDPOINT: &str = "auth/me";

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthPhase {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Authentication state, stored at `auth/state`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub phase: AuthPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub permissions: PermissionSet,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthState {
    pub const PATH: &'static str = "auth/state";

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    fn authenticated(user: User, permissions: PermissionSet) -> Self {
        Self {
            phase: AuthPhase::Authenticated,
            user: Some(user),
            permissions,
            busy: false,
            error: None,
        }
    }
}

/// Current route, stored at `app/route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
    #[serde(default)]
    permissions: PermissionSet,
}

#[derive(Deserialize)]
struct MeResponse {
    user: User,
    #[serde(default)]
    permissions: PermissionSet,
}

/// Drives the auth flows against the API and mirrors them into the store.
pub struct Session {
    store: Arc<StateStore>,
    client: Arc<dyn HttpClient>,
    tokens: Arc<SessionToken>,
    menu: Vec<NavNode>,
    login_path: String,
}

impl Session {
    /// `menu` is only consulted for the home route, so labels do not matter.
    pub fn new(
        store: Arc<StateStore>,
        client: Arc<dyn HttpClient>,
        tokens: Arc<SessionToken>,
        menu: Vec<NavNode>,
        login_path: &str,
    ) -> Self {
        Self {
            store,
            client,
            tokens,
            menu,
            login_path: login_path.to_string(),
        }
    }

    pub fn state(&self) -> AuthState {
        self.store.read::<AuthState>(AuthState::PATH).unwrap_or_default()
    }

    pub fn permissions(&self) -> PermissionSet {
        self.state().permissions
    }

    /// Bearer token of the current login, if any.
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Where this session lands after login.
    pub fn home_route(&self) -> String {
        let permissions = self.permissions();
        resolve_home_route(&self.menu, &permissions.checker(), &self.login_path)
    }

    pub fn route(&self) -> Option<String> {
        self.store.read::<AppRoute>(AppRoute::PATH).map(|r| r.0)
    }

    pub(crate) fn set_route(&self, path: &str) {
        self.store.set(AppRoute::PATH, AppRoute(path.to_string()));
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<User, AdminError> {
        self.store.set(
            AuthState::PATH,
            AuthState {
                busy: true,
                ..AuthState::default()
            },
        );

        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let result = self
            .client
            .request(LOGIN_ENDPOINT, &RequestOptions::post(body), true)
            .await
            .and_then(|v| serde_json::from_value::<LoginResponse>(v).map_err(AdminError::from));

        match result {
            Ok(resp) => {
                self.tokens.set(resp.token);
                let user = resp.user;
                tracing::info!(
                    user = %user.username,
                    permissions = resp.permissions.len(),
                    "logged in"
                );
                self.store.set(
                    AuthState::PATH,
                    AuthState::authenticated(user.clone(), resp.permissions),
                );
                let home = self.home_route();
                self.set_route(&home);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(user = %credentials.username, code = e.error_code(), "login failed: {}", e);
                self.tokens.clear();
                self.store.set(
                    AuthState::PATH,
                    AuthState {
                        error: Some(e.to_string()),
                        ..AuthState::default()
                    },
                );
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.tokens.clear();
        self.store.set(AuthState::PATH, AuthState::default());
        self.set_route(&self.login_path);
        tracing::info!("logged out");
    }

    /// Re-read the user and permissions with the current token.
    ///
    /// An `Unauthorized` answer ends the session; other failures leave
    /// the session as it was.
    pub async fn refresh(&self) -> Result<(), AdminError> {
        let result = self
            .client
            .request(ME_ENDPOINT, &RequestOptions::get(), true)
            .await
            .and_then(|v| serde_json::from_value::<MeResponse>(v).map_err(AdminError::from));

        match result {
            Ok(me) => {
                tracing::debug!(user = %me.user.username, "session refreshed");
                self.store
                    .set(AuthState::PATH, AuthState::authenticated(me.user, me.permissions));
                Ok(())
            }
            Err(e @ AdminError::Unauthorized(_)) => {
                tracing::info!("session expired");
                self.logout();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Adopt a permission set without a backend round-trip.
    ///
    /// Used by the CLI to evaluate menus for a given grant.
    pub fn assume(&self, user: User, permissions: PermissionSet) {
        self.store
            .set(AuthState::PATH, AuthState::authenticated(user, permissions));
    }
}
