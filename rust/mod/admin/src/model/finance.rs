use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code.
    pub code: String,
    pub name: String,
    /// Units of the base currency per one unit of this one.
    pub rate: f64,
    #[serde(default)]
    pub is_base: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Invested capital in minor units.
    pub capital: i64,
    pub currency: String,
    /// Profit share, percent.
    #[serde(default)]
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    pub id: String,
    pub name: String,
    pub months: u32,
    /// Markup over the device price, percent.
    pub markup: f64,
    /// Minimum down payment, percent of price.
    #[serde(default)]
    pub min_down_payment: f64,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

impl PaymentPlan {
    /// Monthly installment for `price` (minor units) after `down_payment`.
    pub fn monthly(&self, price: i64, down_payment: i64) -> i64 {
        let financed = price.saturating_sub(down_payment).max(0) as f64;
        let total = financed * (1.0 + self.markup / 100.0);
        (total / f64::from(self.months.max(1))).round() as i64
    }
}
