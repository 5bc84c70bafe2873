//! Runtime configuration from environment variables.

use core::str::FromStr;
use std::time::Duration;

use tracing::warn;

use stockflow_inventory::MovePolicy;

pub const STORE_URL: &str = "STOCKFLOW_STORE_URL";
pub const STORE_TIMEOUT_SECS: &str = "STOCKFLOW_STORE_TIMEOUT_SECS";
pub const MOVE_POLICY: &str = "STOCKFLOW_MOVE_POLICY";
pub const WAREHOUSE_ID: &str = "STOCKFLOW_WAREHOUSE_ID";
pub const REPORT_ROWS_PER_PAGE: &str = "STOCKFLOW_REPORT_ROWS_PER_PAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store_url: String,
    pub store_timeout: Duration,
    pub move_policy: MovePolicy,
    /// Dropship warehouse id written on adjustment sheets.
    pub warehouse_id: String,
    pub report_rows_per_page: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:8000".to_string(),
            store_timeout: Duration::from_secs(10),
            move_policy: MovePolicy::default(),
            warehouse_id: "22784".to_string(),
            report_rows_per_page: 40,
        }
    }
}

/// Parse `raw` or keep `default`, warning about the rejected value.
fn parsed_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "invalid configuration value; using default");
                default
            }
        },
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = parsed_or(STORE_TIMEOUT_SECS, lookup(STORE_TIMEOUT_SECS), defaults.store_timeout.as_secs());
        let rows_per_page = parsed_or(
            REPORT_ROWS_PER_PAGE,
            lookup(REPORT_ROWS_PER_PAGE),
            defaults.report_rows_per_page,
        );
        let rows_per_page = match rows_per_page {
            0 => {
                warn!(key = REPORT_ROWS_PER_PAGE, "rows per page must be positive; using default");
                defaults.report_rows_per_page
            }
            n => n,
        };

        Self {
            store_url: non_empty(lookup(STORE_URL)).unwrap_or(defaults.store_url),
            store_timeout: Duration::from_secs(timeout_secs),
            move_policy: parsed_or(MOVE_POLICY, lookup(MOVE_POLICY), defaults.move_policy),
            warehouse_id: non_empty(lookup(WAREHOUSE_ID)).unwrap_or(defaults.warehouse_id),
            report_rows_per_page: rows_per_page,
        }
    }
}
