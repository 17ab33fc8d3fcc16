//! Service configuration.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TABLESIDE_CHANNEL_CAPACITY` | 64 | request buffer of each resource actor |
//! | `TABLESIDE_EVENT_CAPACITY` | 256 | buffer of the floor event bus |
//!
//! ```ignore
//! TABLESIDE_CHANNEL_CAPACITY=128 RUST_LOG=info cargo run
//! ```

use serde::Deserialize;
use tracing::warn;

pub const CHANNEL_CAPACITY_VAR: &str = "TABLESIDE_CHANNEL_CAPACITY";
pub const EVENT_CAPACITY_VAR: &str = "TABLESIDE_EVENT_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub channel_capacity: usize,
    pub event_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            event_capacity: 256,
        }
    }
}

impl ServiceConfig {
    /// Loads from the environment; unset or invalid values use the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            channel_capacity: capacity(&lookup, CHANNEL_CAPACITY_VAR, defaults.channel_capacity),
            event_capacity: capacity(&lookup, EVENT_CAPACITY_VAR, defaults.event_capacity),
        }
    }
}

fn capacity(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!(key, value = %raw, default, "Invalid capacity, using default");
            default
        }
    }
}
