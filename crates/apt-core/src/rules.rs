//! Distance thresholds for taxi graph construction and routing.

use serde::{Deserialize, Serialize};

/// Endpoints closer than this resolve to the same graph node.
pub const NODE_MERGE_DISTANCE_M: f64 = 30.0;
/// Search radius used to snap an off-graph point onto the graph.
pub const CONNECTION_DISTANCE_M: f64 = 50.0;
/// Hold-short offset before a runway threshold.
pub const HOLD_SHORT_DISTANCE_M: f64 = 50.0;

/// Configuration for taxi routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxiRules {
    /// Maximum distance between two endpoints that share a node (meters)
    pub node_merge_distance_m: f64,
    /// Radius used to attach a start/end point to the graph (meters)
    pub connection_distance_m: f64,
    /// Radius multiplier for the second attempt at attaching the start point
    pub start_search_multiplier: f64,
    /// Radius multiplier used when attaching the end point
    pub end_search_multiplier: f64,
    /// Gap between the start point and the first route point above which a midpoint is inserted
    pub interpolation_threshold_m: f64,
    /// Offset of the hold-short point before the runway threshold (meters)
    pub hold_short_distance_m: f64,
    /// A target closer than this to the last route point is not appended again (meters)
    pub arrival_tolerance_m: f64,
}

impl Default for TaxiRules {
    fn default() -> Self {
        Self {
            node_merge_distance_m: NODE_MERGE_DISTANCE_M,
            connection_distance_m: CONNECTION_DISTANCE_M,
            start_search_multiplier: 3.0,
            end_search_multiplier: 2.0,
            interpolation_threshold_m: 50.0,
            hold_short_distance_m: HOLD_SHORT_DISTANCE_M,
            arrival_tolerance_m: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_fill_from_defaults() {
        let rules: TaxiRules =
            serde_json::from_str(r#"{ "hold_short_distance_m": 75.0 }"#).unwrap();
        assert_eq!(rules.hold_short_distance_m, 75.0);
        assert_eq!(rules.node_merge_distance_m, NODE_MERGE_DISTANCE_M);
        assert_eq!(rules.connection_distance_m, CONNECTION_DISTANCE_M);
    }
}
