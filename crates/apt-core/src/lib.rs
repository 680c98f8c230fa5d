//! Airport ground and approach navigation.
//!
//! Models runways, parking stands and taxiway networks, generates straight-in
//! instrument approaches from runway geometry, and routes taxiing aircraft
//! through a graph assembled from loose taxiway segments.

pub mod approach;
pub mod geometry;
pub mod models;
pub mod pathfinding;
pub mod registry;
pub mod rules;
pub mod taxi_graph;

pub use approach::generate_approach;
pub use geometry::Position;
pub use models::{
    Airport, ApproachProcedure, ApproachWaypoint, ApproachWaypointType, ParkingPosition,
    ParkingType, Runway, RunwayDesignation, RunwaySide, TaxiwaySegment,
};
pub use pathfinding::{find_path, find_route, TaxiPath};
pub use registry::AirportRegistry;
pub use rules::TaxiRules;
pub use taxi_graph::{NodeId, TaxiGraph};
