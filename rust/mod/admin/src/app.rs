//! Wiring for one dashboard instance.

use std::path::Path;
use std::sync::Arc;

use bnpl_client::{ApiClient, HttpClient, SessionToken};
use bnpl_core::{AdminConfig, AdminError};
use bnpl_flux::{Catalog, I18nStore, KeyTranslator, StateStore};
use bnpl_hooks::{DebouncedFetch, FetchHook, FetchOptions, HookBuilder, Notifier, Payload, ToastNotifier};

use crate::guard::{RouteDecision, RouteGuard};
use crate::model::Page;
use crate::nav::menu::admin_menu;
use crate::nav::visibility::visible_menu;
use crate::nav::NavNode;
use crate::resource::Resource;
use crate::session::Session;

/// Navigation labels shipped with the crate.
pub const NAV_CATALOG: &str = include_str!("../i18n/nav.toml");

/// Store, translations, API client and session for one signed-in shell.
///
/// Everything the UI reads goes through the store: `auth/state`,
/// `app/route`, `ui/toast`, and one `page/<resource>` entry per list hook.
pub struct AdminApp {
    config: AdminConfig,
    store: Arc<StateStore>,
    i18n: Arc<I18nStore>,
    client: Arc<dyn HttpClient>,
    notifier: Arc<dyn Notifier>,
    session: Session,
}

impl AdminApp {
    /// Connect to the API named in `config`, reusing its saved token.
    pub fn new(config: AdminConfig) -> Result<Self, AdminError> {
        let tokens = Arc::new(SessionToken::with_token(config.token.clone()));
        let client = Arc::new(ApiClient::new(&config, tokens.clone())?);
        Self::with_client(config, client, tokens)
    }

    pub fn with_client(
        config: AdminConfig,
        client: Arc<dyn HttpClient>,
        tokens: Arc<SessionToken>,
    ) -> Result<Self, AdminError> {
        let store = Arc::new(StateStore::new());

        let i18n = Arc::new(I18nStore::new(&config.locale));
        let catalog = Catalog::from_toml(NAV_CATALOG)
            .map_err(|e| AdminError::Config(format!("nav catalog: {}", e)))?;
        i18n.handle("nav/#", Arc::new(catalog));

        let notifier: Arc<dyn Notifier> = Arc::new(ToastNotifier::new(store.clone()));
        let session = Session::new(
            store.clone(),
            client.clone(),
            tokens,
            admin_menu(&KeyTranslator),
            &config.login_path,
        );

        Ok(Self {
            config,
            store,
            i18n,
            client,
            notifier,
            session,
        })
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    pub fn i18n(&self) -> &Arc<I18nStore> {
        &self.i18n
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Route `pattern` to a catalog file, e.g. a site-specific override.
    pub fn load_catalog(&self, pattern: &str, path: &Path) -> Result<(), AdminError> {
        let catalog =
            Catalog::load(path).map_err(|e| AdminError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(pattern, entries = catalog.len(), "catalog loaded");
        self.i18n.handle(pattern, Arc::new(catalog));
        Ok(())
    }

    pub fn set_locale(&self, locale: &str) {
        self.i18n.set_locale(locale);
    }

    /// The full sidebar in the current locale.
    pub fn menu(&self) -> Vec<NavNode> {
        admin_menu(self.i18n.as_ref())
    }

    /// The sidebar as the current session sees it.
    pub fn visible_menu(&self) -> Vec<NavNode> {
        let permissions = self.session.permissions();
        visible_menu(&self.menu(), &permissions.checker())
    }

    pub fn home_route(&self) -> String {
        self.session.home_route()
    }

    /// Move to `path`, or to wherever the guard redirects.
    pub fn navigate(&self, path: &str) -> RouteDecision {
        let state = self.session.state();
        let menu = self.menu();
        let guard = RouteGuard::new(
            &menu,
            state.permissions.checker(),
            state.is_authenticated(),
            self.session.login_path(),
        );
        let decision = guard.check(path);
        let target = match &decision {
            RouteDecision::Allow => path,
            RouteDecision::Redirect(to) => to.as_str(),
        };
        tracing::info!(requested = %path, route = %target, "navigate");
        self.session.set_route(target);
        decision
    }

    /// Hook options with the configured debounce delay.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::from_config(&self.config)
    }

    /// A list hook for `resource`, publishing to `page/<resource>`.
    pub fn list<T: Payload>(&self, resource: Resource, options: FetchOptions) -> FetchHook<Page<T>> {
        self.hook(resource, resource.state_path())
            .options(options)
            .mount()
    }

    /// A debounced search hook for `resource`, publishing to
    /// `page/<resource>/search`. Trigger it with [`search_target`].
    pub fn search<T: Payload>(&self, resource: Resource) -> DebouncedFetch<Page<T>> {
        self.hook(resource, format!("{}/search", resource.state_path()))
            .options(self.fetch_options().manual())
            .mount_debounced()
    }

    fn hook(&self, resource: Resource, state_path: String) -> HookBuilder {
        HookBuilder::new(self.client.clone(), resource.api_path())
            .notifier(self.notifier.clone())
            .publish(self.store.clone(), state_path)
    }
}

/// `clients?search=ali` style target for a search hook. The query is
/// percent-encoded.
pub fn search_target(resource: Resource, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        resource.api_path().to_string()
    } else {
        format!("{}?search={}", resource.api_path(), urlencoding::encode(query))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bnpl_hooks::{FetchState, Toast, TOAST_PATH};
    use serde_json::json;

    use super::*;
    use crate::model::{Client, Investor};
    use crate::permission::PermissionSet;
    use crate::session::{AppRoute, User};
    use crate::testing::FakeApi;

    fn app(api: Arc<FakeApi>) -> AdminApp {
        AdminApp::with_client(AdminConfig::default(), api, Arc::new(SessionToken::new())).unwrap()
    }

    fn clients_page(path: &str) -> Result<serde_json::Value, AdminError> {
        Ok(json!({
            "items": [{ "id": "c1", "fullName": path, "phone": "901234567" }],
            "total": 1
        }))
    }

    fn sign_in(app: &AdminApp, perms: &[&str]) {
        let user = User {
            id: "u1".into(),
            username: "operator".into(),
            full_name: "Operator".into(),
            role: None,
            branch_id: None,
        };
        app.session().assume(user, perms.iter().copied().collect::<PermissionSet>());
    }

    #[test]
    fn menu_follows_locale() {
        let app = app(FakeApi::new(|_, _| Ok(json!(null))));
        assert_eq!(app.menu()[1].title(), "Dashboard");
        app.set_locale("uz");
        assert_eq!(app.menu()[3].title(), "Mijozlar");
        app.set_locale("ru-RU");
        assert_eq!(app.menu()[3].title(), "Клиенты");
    }

    #[test]
    fn navigation_is_guarded() {
        let app = app(FakeApi::new(|_, _| Ok(json!(null))));
        assert_eq!(app.navigate("/clients"), RouteDecision::Redirect("/login".into()));
        assert_eq!(app.store().read::<AppRoute>(AppRoute::PATH), Some(AppRoute("/login".into())));

        sign_in(&app, &["view:client"]);
        assert_eq!(app.navigate("/dashboard"), RouteDecision::Redirect("/clients".into()));
        assert_eq!(app.navigate("/clients/c1"), RouteDecision::Allow);
        assert_eq!(app.session().route().as_deref(), Some("/clients/c1"));
    }

    #[test]
    fn visible_menu_uses_session_permissions() {
        let app = app(FakeApi::new(|_, _| Ok(json!(null))));
        sign_in(&app, &["view:currency"]);
        let titles: Vec<String> = app
            .visible_menu()
            .iter()
            .map(|n| n.title().to_string())
            .collect();
        assert!(titles.contains(&"Finance".to_string()));
        assert!(!titles.contains(&"Staff".to_string()));
        assert_eq!(app.home_route(), "/finance/currencies");
    }

    #[tokio::test]
    async fn list_hook_publishes_page() {
        let api = FakeApi::new(|path, _| clients_page(path));
        let app = app(api.clone());
        let hook = app.list::<Client>(Resource::Clients, app.fetch_options().manual());

        hook.fetch_data(None).await;
        let page = hook.data().unwrap();
        assert_eq!(page.items[0].full_name, "clients");

        let published = app
            .store()
            .read::<FetchState<Page<Client>>>("page/clients")
            .unwrap();
        assert_eq!(published.data, Some(page));
        assert_eq!(api.calls(), vec!["clients"]);
    }

    #[tokio::test]
    async fn failed_list_raises_toast() {
        let api = FakeApi::new(|_, _| Err(AdminError::PermissionDenied("view:investor".into())));
        let app = app(api);
        let hook = app.list::<Investor>(Resource::Investors, app.fetch_options().manual());

        hook.fetch_data(None).await;
        assert!(hook.error().is_some());
        let toast = app.store().read::<Toast>(TOAST_PATH).unwrap();
        assert_eq!(toast.seq, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn search_debounces_keystrokes() {
        let api = FakeApi::new(|path, _| clients_page(path));
        let app = app(api.clone());
        let search = app.search::<Client>(Resource::Clients);

        for typed in ["a", "al", "ali"] {
            search.fetch_data(Some(&search_target(Resource::Clients, typed)));
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(api.calls(), vec!["clients?search=ali"]);
        assert_eq!(search.data().unwrap().items[0].full_name, "clients?search=ali");
        assert!(app.store().contains("page/clients/search"));
        assert!(!app.store().contains("page/clients"));
    }

    #[test]
    fn blank_search_lists_everything() {
        assert_eq!(search_target(Resource::Orders, "  "), "orders");
        assert_eq!(search_target(Resource::Orders, " 42 "), "orders?search=42");
    }

    #[test]
    fn search_text_is_percent_encoded() {
        assert_eq!(
            search_target(Resource::Clients, "Karimov & Sons #2"),
            "clients?search=Karimov%20%26%20Sons%20%232"
        );
        assert_eq!(
            search_target(Resource::PaymentPlans, "6+6 plan"),
            "payment-plans?search=6%2B6%20plan"
        );
    }

    #[test]
    fn catalog_override_replaces_builtin_labels() {
        let app = app(FakeApi::new(|_, _| Ok(json!(null))));
        assert_eq!(app.i18n().get("nav/clients"), "Clients");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[entries.\"nav/clients\"]\nen = \"Customers\"\n").unwrap();
        app.load_catalog("nav/#", &path).unwrap();

        assert_eq!(app.i18n().get("nav/clients"), "Customers");
        assert_eq!(app.i18n().get("nav/orders"), "Orders");
        assert_eq!(app.menu()[3].title(), "Customers");
    }
}
