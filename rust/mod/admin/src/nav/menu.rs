//! The dashboard's sidebar definition.

use bnpl_flux::Translator;

use crate::nav::{NavGroup, NavLink, NavNode, NavSection};
use crate::resource::{Resource, VIEW};

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/profile";

fn resource_link(t: &dyn Translator, resource: Resource) -> NavNode {
    NavLink::new(t.translate(resource.i18n_key()), resource.ui_path())
        .icon(resource.icon())
        .requires(VIEW, resource.subject())
        .into()
}

/// Build the sidebar with labels in the translator's current locale.
pub fn admin_menu(t: &dyn Translator) -> Vec<NavNode> {
    vec![
        NavSection::new(t.translate("nav/section/main")).into(),
        NavLink::new(t.translate("nav/dashboard"), DASHBOARD_PATH)
            .icon("home")
            .requires(VIEW, "dashboard")
            .into(),
        NavSection::new(t.translate("nav/section/sales")).into(),
        resource_link(t, Resource::Clients),
        resource_link(t, Resource::Orders),
        resource_link(t, Resource::Devices),
        resource_link(t, Resource::PaymentPlans),
        NavSection::new(t.translate("nav/section/management")).into(),
        NavGroup::new(
            t.translate("nav/staff"),
            vec![
                resource_link(t, Resource::Employees),
                resource_link(t, Resource::Branches),
            ],
        )
        .icon("users-cog")
        .into(),
        NavGroup::new(
            t.translate("nav/finance"),
            vec![
                resource_link(t, Resource::Currencies),
                resource_link(t, Resource::Investors),
            ],
        )
        .icon("wallet")
        .into(),
        NavLink::new(t.translate("nav/profile"), PROFILE_PATH)
            .icon("user")
            .public()
            .into(),
    ]
}
