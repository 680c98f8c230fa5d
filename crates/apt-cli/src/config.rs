//! CLI configuration from environment.

use apt_core::TaxiRules;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub glideslope_deg: Option<f64>,
    pub rules: TaxiRules,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable, non-finite or
    /// non-positive values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
        };
        let defaults = TaxiRules::default();

        Self {
            catalog_path: lookup("APT_CATALOG").map(PathBuf::from),
            glideslope_deg: number("APT_GLIDESLOPE_DEG"),
            rules: TaxiRules {
                node_merge_distance_m: number("APT_NODE_MERGE_M")
                    .unwrap_or(defaults.node_merge_distance_m),
                connection_distance_m: number("APT_CONNECTION_M")
                    .unwrap_or(defaults.connection_distance_m),
                hold_short_distance_m: number("APT_HOLD_SHORT_M")
                    .unwrap_or(defaults.hold_short_distance_m),
                ..defaults
            },
        }
    }
}
