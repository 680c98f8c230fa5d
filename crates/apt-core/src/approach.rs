//! Instrument approach generation from runway geometry.
//!
//! Every runway gets the same five-fix straight-in procedure laid out on the
//! extended centerline behind the threshold.

use crate::geometry::{heading_vector, knots_to_mps, Position};
use crate::models::{ApproachProcedure, ApproachWaypoint, ApproachWaypointType, Runway};

pub const DEFAULT_GLIDESLOPE_DEG: f64 = 3.0;
pub const DEFAULT_LOCALIZER_WIDTH_DEG: f64 = 5.0;

struct FixTemplate {
    waypoint_type: ApproachWaypointType,
    distance_m: f64,
    altitude_agl_m: f64,
    speed_kt: f64,
}

const FIXES: [FixTemplate; 5] = [
    FixTemplate {
        waypoint_type: ApproachWaypointType::InitialApproachFix,
        distance_m: 18_500.0,
        altitude_agl_m: 1220.0, // 4000 ft
        speed_kt: 250.0,
    },
    FixTemplate {
        waypoint_type: ApproachWaypointType::IntermediateFix,
        distance_m: 9_200.0,
        altitude_agl_m: 760.0, // 2500 ft
        speed_kt: 200.0,
    },
    FixTemplate {
        waypoint_type: ApproachWaypointType::FinalApproachFix,
        distance_m: 5_500.0,
        altitude_agl_m: 450.0, // 1500 ft
        speed_kt: 160.0,
    },
    FixTemplate {
        waypoint_type: ApproachWaypointType::MissedApproachPoint,
        distance_m: 900.0,
        altitude_agl_m: 60.0, // 200 ft
        speed_kt: 140.0,
    },
    FixTemplate {
        waypoint_type: ApproachWaypointType::Threshold,
        distance_m: 0.0,
        altitude_agl_m: 0.0,
        speed_kt: 130.0,
    },
];

/// Generate the straight-in approach for `runway`.
///
/// Fixes are projected from the threshold along the reciprocal heading; each
/// fix's `z` is the runway elevation plus its altitude above ground.
pub fn generate_approach(runway: &Runway, glideslope_deg: Option<f64>) -> ApproachProcedure {
    let designator = runway.designator();
    let reciprocal = runway.reciprocal_heading();
    let elevation = runway.elevation();

    let waypoints = FIXES
        .iter()
        .map(|fix| ApproachWaypoint {
            name: format!("{designator} {}", fix.waypoint_type.abbreviation()),
            position: runway
                .threshold
                .offset_by_heading(reciprocal, fix.distance_m)
                .with_z(elevation + fix.altitude_agl_m),
            waypoint_type: fix.waypoint_type,
            altitude_agl_m: fix.altitude_agl_m,
            target_speed_mps: knots_to_mps(fix.speed_kt),
            distance_from_threshold_m: fix.distance_m,
        })
        .collect();

    ApproachProcedure {
        name: format!("ILS RWY {designator}"),
        runway_name: runway.name.clone(),
        threshold: runway.threshold,
        course_deg: runway.heading_deg,
        waypoints,
        glideslope_deg: glideslope_deg.unwrap_or(DEFAULT_GLIDESLOPE_DEG),
        localizer_width_deg: DEFAULT_LOCALIZER_WIDTH_DEG,
    }
}

impl ApproachProcedure {
    pub fn waypoint(&self, waypoint_type: ApproachWaypointType) -> Option<&ApproachWaypoint> {
        self.waypoints
            .iter()
            .find(|waypoint| waypoint.waypoint_type == waypoint_type)
    }

    /// Height above the threshold of the nominal glidepath at `distance_m` out.
    pub fn glideslope_altitude_agl(&self, distance_m: f64) -> f64 {
        distance_m.max(0.0) * self.glideslope_deg.to_radians().tan()
    }

    /// Horizontal distance from `position` to the threshold measured along
    /// the extended centerline. Negative past the threshold.
    pub fn distance_along_course(&self, position: &Position) -> f64 {
        let (along, _) = self.course_offsets(position);
        -along
    }

    /// Angle between the inbound course and the line from the threshold to
    /// `position`, positive when `position` is right of course.
    pub fn localizer_deviation_deg(&self, position: &Position) -> f64 {
        let (along, cross) = self.course_offsets(position);
        cross.atan2(-along).to_degrees()
    }

    /// Whether `position` sits on the approach side inside the localizer beam.
    pub fn is_within_localizer(&self, position: &Position) -> bool {
        self.distance_along_course(position) > 0.0
            && self.localizer_deviation_deg(position).abs() <= self.localizer_width_deg / 2.0
    }

    fn course_offsets(&self, position: &Position) -> (f64, f64) {
        let (east, north) = heading_vector(self.course_deg);
        let dx = position.x - self.threshold.x;
        let dy = position.y - self.threshold.y;
        (dx * east + dy * north, dx * north - dy * east)
    }
}
