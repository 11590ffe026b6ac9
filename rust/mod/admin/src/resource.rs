//! The back-office resources and where each one lives.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::permission::Requirement;

/// Action required to list a resource or see it in the menu.
pub const VIEW: &str = "view";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Clients,
    Devices,
    Orders,
    Employees,
    Branches,
    Currencies,
    Investors,
    PaymentPlans,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Clients,
        Resource::Devices,
        Resource::Orders,
        Resource::Employees,
        Resource::Branches,
        Resource::Currencies,
        Resource::Investors,
        Resource::PaymentPlans,
    ];

    /// Path segment under the API base, also the CLI name.
    pub fn api_path(self) -> &'static str {
        match self {
            Resource::Clients => "clients",
            Resource::Devices => "devices",
            Resource::Orders => "orders",
            Resource::Employees => "employees",
            Resource::Branches => "branches",
            Resource::Currencies => "currencies",
            Resource::Investors => "investors",
            Resource::PaymentPlans => "payment-plans",
        }
    }

    pub fn ui_path(self) -> &'static str {
        match self {
            Resource::Clients => "/clients",
            Resource::Devices => "/devices",
            Resource::Orders => "/orders",
            Resource::Employees => "/staff/employees",
            Resource::Branches => "/staff/branches",
            Resource::Currencies => "/finance/currencies",
            Resource::Investors => "/finance/investors",
            Resource::PaymentPlans => "/payment-plans",
        }
    }

    /// Permission subject, as granted by the backend.
    pub fn subject(self) -> &'static str {
        match self {
            Resource::Clients => "client",
            Resource::Devices => "device",
            Resource::Orders => "order",
            Resource::Employees => "employee",
            Resource::Branches => "branch",
            Resource::Currencies => "currency",
            Resource::Investors => "investor",
            Resource::PaymentPlans => "payment_plan",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            Resource::Clients => "nav/clients",
            Resource::Devices => "nav/devices",
            Resource::Orders => "nav/orders",
            Resource::Employees => "nav/employees",
            Resource::Branches => "nav/branches",
            Resource::Currencies => "nav/currencies",
            Resource::Investors => "nav/investors",
            Resource::PaymentPlans => "nav/payment_plans",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Resource::Clients => "users",
            Resource::Devices => "smartphone",
            Resource::Orders => "shopping-cart",
            Resource::Employees => "id-card",
            Resource::Branches => "building",
            Resource::Currencies => "coins",
            Resource::Investors => "briefcase",
            Resource::PaymentPlans => "calendar",
        }
    }

    pub fn requirement(self, action: &str) -> Requirement {
        Requirement::new(action, self.subject())
    }

    /// Store path where this resource's list hook publishes.
    pub fn state_path(self) -> String {
        format!("page/{}", self.api_path())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_path())
    }
}

impl FromStr for Resource {
    type Err = String;

    /// Accepts the API path or the snake_case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|r| r.api_path() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Resource::ALL.iter().map(|r| r.api_path()).collect();
                format!("unknown resource '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
