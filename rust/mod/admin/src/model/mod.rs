//! Typed mirrors of the admin API payloads.
//!
//! Money is carried in minor units (tiyin for UZS, cents for USD) and
//! timestamps as RFC 3339 strings; see `bnpl_core::format` for display.

mod client;
mod device;
mod finance;
mod order;
mod staff;

pub use client::{Client, ClientStatus};
pub use device::Device;
pub use finance::{Currency, Investor, PaymentPlan};
pub use order::{Installment, Order, OrderStatus};
pub use staff::{Branch, Employee};

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn first_page() -> u32 {
    1
}

fn default_size() -> u32 {
    20
}

impl<T> Page<T> {
    /// Number of pages at the current size. At least one.
    pub fn page_count(&self) -> u64 {
        let size = u64::from(self.size.max(1));
        self.total.div_ceil(size).max(1)
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) >= self.page_count()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: first_page(),
            size: default_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_defaults_and_count() {
        let page: Page<Branch> = serde_json::from_value(json!({
            "items": [{ "id": "b1", "name": "Chilonzor", "address": "Bunyodkor 12" }],
            "total": 41
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count(), 3);
        assert!(!page.is_last());

        let empty: Page<Branch> = Page::default();
        assert_eq!(empty.page_count(), 1);
        assert!(empty.is_last());
    }

    #[test]
    fn order_payload() {
        let order: Order = serde_json::from_value(json!({
            "id": "o-17",
            "clientId": "c-3",
            "deviceId": "d-9",
            "status": "active",
            "principal": 1_200_000_00i64,
            "downPayment": 200_000_00i64,
            "currency": "UZS",
            "months": 6,
            "createdAt": "2024-03-01T09:30:00Z",
            "schedule": [
                { "dueDate": "2024-04-01", "amount": 18_000_000i64, "paid": true }
            ]
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(order.financed(), 1_000_000_00);
        assert_eq!(order.outstanding(), 0);
        assert_eq!(order.schedule.len(), 1);
        assert_eq!(order.summary(), "01.03.2024 · 1 000 000.00 UZS × 6");
    }

    #[test]
    fn unknown_status_tolerated() {
        let client: Client = serde_json::from_value(json!({
            "id": "c-1",
            "fullName": "Aziz Karimov",
            "phone": "998901234567",
            "status": "frozen"
        }))
        .unwrap();
        assert_eq!(client.status, ClientStatus::Other);
        assert_eq!(client.display_phone(), "+998 90 123 45 67");
    }
}
