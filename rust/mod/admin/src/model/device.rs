use serde::{Deserialize, Serialize};

/// A financed product, usually a phone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub model: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    /// Minor units.
    pub price: i64,
    pub currency: String,
    #[serde(default)]
    pub in_stock: u32,
}
