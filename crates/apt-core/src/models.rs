//! Core data models for airport facilities.
//!
//! Everything here is plain data built once when the catalog is loaded and
//! read-only afterwards. Derived quantities (runway end, designation,
//! reciprocal, parking radius) are computed on demand rather than stored so
//! they can never drift from the fields they come from.

use crate::geometry::{heading_vector, meters_to_feet, normalize_heading, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runway side designator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunwaySide {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl RunwaySide {
    /// Side designator seen from the opposite end.
    pub fn reciprocal(self) -> Self {
        match self {
            RunwaySide::Left => RunwaySide::Right,
            RunwaySide::Right => RunwaySide::Left,
            other => other,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            RunwaySide::None => "",
            RunwaySide::Left => "L",
            RunwaySide::Right => "R",
            RunwaySide::Center => "C",
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'L' => Some(RunwaySide::Left),
            'R' => Some(RunwaySide::Right),
            'C' => Some(RunwaySide::Center),
            _ => None,
        }
    }
}

/// Parsed runway designation, e.g. `03L`.
///
/// `number` is 0 when the label carried no usable number. Designations are
/// only used for naming, so a bad label never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunwayDesignation {
    pub number: u8,
    pub side: RunwaySide,
}

impl RunwayDesignation {
    const PREFIXES: [&'static str; 2] = ["runway ", "rwy "];

    /// Parse labels such as `"Runway 03L"`, `"RWY 12"` or `"27c"`.
    pub fn parse(label: &str) -> Self {
        let mut rest = label.trim();
        for prefix in Self::PREFIXES {
            let matches = rest
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            if matches {
                rest = rest[prefix.len()..].trim();
                break;
            }
        }

        let mut side = RunwaySide::None;
        if let Some(last) = rest.chars().last() {
            if let Some(parsed) = RunwaySide::from_letter(last) {
                side = parsed;
                rest = rest[..rest.len() - last.len_utf8()].trim_end();
            }
        }

        let number = rest
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=36).contains(n))
            .unwrap_or(0);

        Self { number, side }
    }

    /// Runway number of the opposite end (`18 -> 36`, `36 -> 18`).
    pub fn reciprocal_number(&self) -> u8 {
        if self.number == 0 {
            return 0;
        }
        ((self.number as u16 + 18 - 1) % 36 + 1) as u8
    }

    pub fn reciprocal(&self) -> Self {
        Self {
            number: self.reciprocal_number(),
            side: self.side.reciprocal(),
        }
    }
}

impl fmt::Display for RunwayDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.number, self.side.letter())
    }
}

/// A runway end: threshold, heading and dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runway {
    /// Raw label as supplied by the facility data
    pub name: String,
    pub threshold: Position,
    /// Compass heading in degrees
    pub heading_deg: f64,
    pub length_m: f64,
    pub width_m: f64,
    /// Generated after loading, never read from facility data
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub approach: Option<ApproachProcedure>,
}

impl Runway {
    pub fn new(
        name: impl Into<String>,
        threshold: Position,
        heading_deg: f64,
        length_m: f64,
        width_m: f64,
    ) -> Self {
        Self {
            name: name.into(),
            threshold,
            heading_deg: normalize_heading(heading_deg),
            length_m,
            width_m,
            approach: None,
        }
    }

    pub fn designation(&self) -> RunwayDesignation {
        RunwayDesignation::parse(&self.name)
    }

    pub fn side(&self) -> RunwaySide {
        self.designation().side
    }

    /// Short designator such as `03L`.
    pub fn designator(&self) -> String {
        self.designation().to_string()
    }

    pub fn reciprocal_number(&self) -> u8 {
        self.designation().reciprocal_number()
    }

    pub fn reciprocal_side(&self) -> RunwaySide {
        self.side().reciprocal()
    }

    /// Designator of the opposite end, e.g. `21R` for `03L`.
    pub fn reciprocal_designator(&self) -> String {
        self.designation().reciprocal().to_string()
    }

    pub fn reciprocal_heading(&self) -> f64 {
        normalize_heading(self.heading_deg + 180.0)
    }

    pub fn elevation(&self) -> f64 {
        self.threshold.z
    }

    pub fn elevation_ft(&self) -> f64 {
        meters_to_feet(self.elevation())
    }

    /// `threshold + length * (sin θ, cos θ, 0)`.
    pub fn end_position(&self) -> Position {
        self.threshold
            .offset_by_heading(self.heading_deg, self.length_m)
    }

    /// Point `distance_m` before the threshold along the reciprocal heading.
    pub fn hold_short_position(&self, distance_m: f64) -> Position {
        self.threshold
            .offset_by_heading(self.reciprocal_heading(), distance_m)
    }

    /// Whether `position` lies on the paved rectangle of this runway.
    pub fn contains_position(&self, position: &Position) -> bool {
        let (along, cross) = self.track_offsets(position);
        (0.0..=self.length_m).contains(&along) && cross.abs() <= self.width_m / 2.0
    }

    /// Along-track and cross-track offsets of `position` from the threshold.
    /// Cross-track is positive to the right of the runway heading.
    pub fn track_offsets(&self, position: &Position) -> (f64, f64) {
        let (east, north) = heading_vector(self.heading_deg);
        let dx = position.x - self.threshold.x;
        let dy = position.y - self.threshold.y;
        (dx * east + dy * north, dx * north - dy * east)
    }

    /// Attach an approach generated from this runway's geometry.
    pub fn with_approach(mut self, glideslope_deg: Option<f64>) -> Self {
        self.approach = Some(crate::approach::generate_approach(&self, glideslope_deg));
        self
    }
}

/// Phase of an instrument approach, ordered from farthest to closest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApproachWaypointType {
    InitialApproachFix,
    IntermediateFix,
    FinalApproachFix,
    MissedApproachPoint,
    Threshold,
}

impl ApproachWaypointType {
    pub fn abbreviation(self) -> &'static str {
        match self {
            ApproachWaypointType::InitialApproachFix => "IAF",
            ApproachWaypointType::IntermediateFix => "IF",
            ApproachWaypointType::FinalApproachFix => "FAF",
            ApproachWaypointType::MissedApproachPoint => "MAP",
            ApproachWaypointType::Threshold => "THR",
        }
    }
}

/// A single fix of an approach procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachWaypoint {
    pub name: String,
    pub position: Position,
    pub waypoint_type: ApproachWaypointType,
    pub altitude_agl_m: f64,
    /// Stored in meters per second
    pub target_speed_mps: f64,
    /// Horizontal distance to the runway threshold
    pub distance_from_threshold_m: f64,
}

/// Instrument approach generated from a runway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproachProcedure {
    pub name: String,
    pub runway_name: String,
    pub threshold: Position,
    /// Inbound course, equal to the runway heading
    pub course_deg: f64,
    pub waypoints: Vec<ApproachWaypoint>,
    pub glideslope_deg: f64,
    pub localizer_width_deg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParkingType {
    #[default]
    Gate,
    Ramp,
    Hangar,
    #[serde(rename = "FBO", alias = "Fbo")]
    Fbo,
    Cargo,
    Military,
}

/// A parking stand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingPosition {
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub heading_deg: f64,
    #[serde(default)]
    pub parking_type: ParkingType,
}

impl ParkingPosition {
    pub fn new(
        name: impl Into<String>,
        position: Position,
        heading_deg: f64,
        parking_type: ParkingType,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            heading_deg: normalize_heading(heading_deg),
            parking_type,
        }
    }

    /// Stand radius: hangars are larger than every other stand type.
    pub fn radius_m(&self) -> f64 {
        match self.parking_type {
            ParkingType::Hangar => 30.0,
            _ => 15.0,
        }
    }

    pub fn contains_position(&self, position: &Position) -> bool {
        self.position.horizontal_distance_to(position) <= self.radius_m()
    }
}

/// A straight piece of taxiway between two points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiwaySegment {
    pub name: String,
    pub start: Position,
    pub end: Position,
    #[serde(default = "default_taxiway_width")]
    pub width_m: f64,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

fn default_taxiway_width() -> f64 {
    23.0
}

fn default_bidirectional() -> bool {
    true
}

impl TaxiwaySegment {
    pub fn new(name: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            width_m: default_taxiway_width(),
            bidirectional: true,
        }
    }

    /// Restrict travel to `start -> end`.
    pub fn one_way(mut self) -> Self {
        self.bidirectional = false;
        self
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// An airport with its runways, stands and taxiway network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub code: String,
    pub center: Position,
    pub radius_m: f64,
    #[serde(default)]
    pub runways: Vec<Runway>,
    #[serde(default)]
    pub parkings: Vec<ParkingPosition>,
    #[serde(default)]
    pub taxiways: Vec<TaxiwaySegment>,
}

impl Airport {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        center: Position,
        radius_m: f64,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            center,
            radius_m,
            runways: Vec::new(),
            parkings: Vec::new(),
            taxiways: Vec::new(),
        }
    }

    pub fn with_runway(mut self, runway: Runway) -> Self {
        self.runways.push(runway);
        self
    }

    pub fn with_parking(mut self, parking: ParkingPosition) -> Self {
        self.parkings.push(parking);
        self
    }

    pub fn with_taxiway(mut self, segment: TaxiwaySegment) -> Self {
        self.taxiways.push(segment);
        self
    }

    pub fn contains_position(&self, position: &Position) -> bool {
        self.center.distance_to(position) <= self.radius_m
    }

    pub fn distance_to(&self, position: &Position) -> f64 {
        self.center.distance_to(position)
    }

    /// Field elevation: first runway threshold, else the center.
    pub fn elevation(&self) -> f64 {
        self.runways
            .first()
            .map(Runway::elevation)
            .unwrap_or(self.center.z)
    }

    /// Runway whose threshold is closest to `position`.
    pub fn find_nearest_runway(&self, position: &Position) -> Option<&Runway> {
        nearest_by(&self.runways, position, |runway| runway.threshold)
    }

    pub fn find_nearest_parking(&self, position: &Position) -> Option<&ParkingPosition> {
        nearest_by(&self.parkings, position, |parking| parking.position)
    }

    /// Look a runway up by label (`"03L"`, `"Runway 3L"`) or raw name.
    pub fn runway_by_name(&self, label: &str) -> Option<&Runway> {
        let wanted = RunwayDesignation::parse(label);
        self.runways.iter().find(|runway| {
            runway.name.eq_ignore_ascii_case(label.trim())
                || (wanted.number != 0 && runway.designation() == wanted)
        })
    }

    pub fn parking_by_name(&self, name: &str) -> Option<&ParkingPosition> {
        let name = name.trim();
        self.parkings
            .iter()
            .find(|parking| parking.name.eq_ignore_ascii_case(name))
    }
}

/// Linear scan for the minimum distance; ties keep the earliest item.
pub(crate) fn nearest_by<'a, T, F>(items: &'a [T], position: &Position, key: F) -> Option<&'a T>
where
    F: Fn(&T) -> Position,
{
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let distance = key(item).distance_to(position);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((item, distance)),
        }
    }
    best.map(|(item, _)| item)
}
