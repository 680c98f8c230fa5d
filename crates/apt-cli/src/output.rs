//! Text rendering for CLI output.

use apt_core::geometry::{meters_to_feet, meters_to_miles, mps_to_knots, path_length};
use apt_core::{ApproachProcedure, Position};
use std::fmt::Write;

/// Distances under this many feet are announced in feet.
const FEET_THRESHOLD: f64 = 1000.0;

/// Spoken-style distance: feet when close, miles otherwise.
pub fn describe_distance(meters: f64) -> String {
    let feet = meters_to_feet(meters);
    if feet < FEET_THRESHOLD {
        format!("{:.0} feet", feet)
    } else {
        let miles = meters_to_miles(meters);
        let unit = if (miles - 1.0).abs() < 0.05 { "mile" } else { "miles" };
        format!("{:.1} {}", miles, unit)
    }
}

pub fn render_route(label: &str, route: &[Position]) -> String {
    if route.is_empty() {
        return format!("{label}: no taxi route available\n");
    }
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{label}: {} points, {}",
        route.len(),
        describe_distance(path_length(route))
    );
    for (idx, point) in route.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}  x={:>10.1}  y={:>10.1}  z={:>7.1}", idx + 1, point.x, point.y, point.z);
    }
    out
}

pub fn render_approach(procedure: &ApproachProcedure) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (course {:03.0}, glideslope {:.1} deg)",
        procedure.name, procedure.course_deg, procedure.glideslope_deg
    );
    for waypoint in &procedure.waypoints {
        let _ = writeln!(
            out,
            "  {:<10} {:>8.0} m out  {:>5.0} ft AGL  {:>4.0} kt",
            waypoint.name,
            waypoint.distance_from_threshold_m,
            meters_to_feet(waypoint.altitude_agl_m),
            mps_to_knots(waypoint.target_speed_mps)
        );
    }
    out
}
