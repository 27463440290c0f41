//! Bridge Configuration
//!
//! Defaults used by [`crate::Bridge::connect_default`].

use serde::Deserialize;
use tracing::warn;

pub const ENV_DEFAULT_NODENAME: &str = "PEB_DEFAULT_NODENAME";
pub const ENV_DEFAULT_COOKIE: &str = "PEB_DEFAULT_COOKIE";
pub const ENV_DEFAULT_TIMEOUT: &str = "PEB_DEFAULT_TIMEOUT";

/// Bridge defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Node used when none is given, `name@host`
    pub default_nodename: String,
    /// Cookie used when none is given
    pub default_cookie: String,
    /// Connect timeout in milliseconds, 0 for none
    pub default_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_nodename: "server@localhost".to_string(),
            default_cookie: "COOKIE".to_string(),
            default_timeout_ms: 5000,
        }
    }
}

impl BridgeConfig {
    /// Defaults overridden by `PEB_DEFAULT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    ///
    /// An unparsable timeout is logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(node) = lookup(ENV_DEFAULT_NODENAME) {
            config.default_nodename = node;
        }
        if let Some(cookie) = lookup(ENV_DEFAULT_COOKIE) {
            config.default_cookie = cookie;
        }
        if let Some(raw) = lookup(ENV_DEFAULT_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(timeout) => config.default_timeout_ms = timeout,
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid {}", ENV_DEFAULT_TIMEOUT),
            }
        }
        config
    }
}
