use bnpl_core::{format_date, format_money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Draft,
    Active,
    Overdue,
    Closed,
    Cancelled,
    #[serde(other)]
    Other,
}

/// One scheduled repayment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub due_date: String,
    pub amount: i64,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub device_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub principal: i64,
    #[serde(default)]
    pub down_payment: i64,
    pub currency: String,
    pub months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_plan_id: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub schedule: Vec<Installment>,
}

impl Order {
    /// Amount on credit after the down payment.
    pub fn financed(&self) -> i64 {
        self.principal - self.down_payment
    }

    /// Sum of unpaid installments.
    pub fn outstanding(&self) -> i64 {
        self.schedule.iter().filter(|i| !i.paid).map(|i| i.amount).sum()
    }

    /// One-line description for lists: `01.03.2024 · 1 000 000.00 UZS × 6`.
    pub fn summary(&self) -> String {
        format!(
            "{} · {} × {}",
            format_date(&self.created_at),
            format_money(self.financed(), &self.currency),
            self.months
        )
    }
}
