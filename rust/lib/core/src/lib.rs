//! Shared foundations for the BNPL admin client core: the error type,
//! client configuration and display formatting.

pub mod config;
pub mod error;
pub mod format;

pub use config::AdminConfig;
pub use error::AdminError;
pub use format::{format_date, format_datetime, format_money, format_phone, truncate};
