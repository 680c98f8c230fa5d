//! End-to-end routing and lookup tests against small synthetic catalogs.

use apt_core::geometry::{path_length, Position};
use apt_core::{
    find_route, Airport, AirportRegistry, ApproachWaypointType, ParkingPosition, ParkingType,
    Runway, TaxiGraph, TaxiRules, TaxiwaySegment,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn p(x: f64, y: f64) -> Position {
    Position::new(x, y, 0.0)
}

#[test]
fn route_to_runway_ends_with_hold_short_and_threshold() {
    let runway = Runway::new("Runway 09", p(0.0, 0.0), 90.0, 800.0, 30.0);
    let airport = Airport::new("Test Field", "TST", p(400.0, 0.0), 2000.0)
        .with_runway(runway.clone())
        .with_taxiway(TaxiwaySegment::new("A", p(0.0, 100.0), p(-50.0, 50.0)));
    let registry = AirportRegistry::new(vec![airport]);
    let airport = &registry.airports()[0];

    let route = registry.taxi_route_to_runway(airport, &p(-50.0, 48.0), &runway);
    assert!(!route.is_empty());
    assert_eq!(*route.last().unwrap(), p(0.0, 0.0));

    let hold_short = route[route.len() - 2];
    assert!((hold_short.x + 50.0).abs() < 1e-6, "hold short at {hold_short:?}");
    assert!(hold_short.y.abs() < 1e-6);
    assert!((hold_short.distance_to(&runway.threshold) - 50.0).abs() < 1e-6);
}

#[test]
fn hold_short_not_duplicated_when_route_already_there() {
    let runway = Runway::new("27", p(500.0, 0.0), 270.0, 800.0, 30.0);
    let airport = Airport::new("Test Field", "TST", p(0.0, 0.0), 2000.0)
        .with_runway(runway.clone())
        .with_taxiway(TaxiwaySegment::new("B", p(550.0, 300.0), p(555.0, 10.0)));
    let registry = AirportRegistry::new(vec![airport]);
    let airport = &registry.airports()[0];

    // Hold short for 27 sits at (550, 0); the last taxi node is 11 m from it.
    let route = registry.taxi_route_to_runway(airport, &p(550.0, 300.0), &runway);
    assert_eq!(route, vec![p(550.0, 300.0), p(555.0, 10.0), p(500.0, 0.0)]);
}

#[test]
fn multi_segment_route_to_parking() {
    let stand = ParkingPosition::new("Hangar 2", p(420.0, 260.0), 180.0, ParkingType::Hangar);
    let airport = Airport::new("Test Field", "TST", p(0.0, 0.0), 3000.0)
        .with_taxiway(TaxiwaySegment::new("A", p(0.0, 0.0), p(200.0, 5.0)))
        // Ends 12 m apart: merged into one node.
        .with_taxiway(TaxiwaySegment::new("A", p(212.0, 0.0), p(400.0, 0.0)))
        .with_taxiway(TaxiwaySegment::new("C", p(400.0, 0.0), p(400.0, 250.0)))
        .with_parking(stand.clone());
    let registry = AirportRegistry::new(vec![airport]);
    let airport = &registry.airports()[0];

    let route = registry.taxi_route_to_parking(airport, &p(-10.0, 0.0), &stand);
    assert_eq!(
        route,
        vec![p(0.0, 0.0), p(200.0, 5.0), p(400.0, 0.0), p(400.0, 250.0), p(420.0, 260.0)]
    );
    let graph = registry.taxi_graph(airport);
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn route_length_matches_graph_distance() {
    let segments = vec![TaxiwaySegment::new("A", p(0.0, 0.0), p(100.0, 0.0))];
    let graph = TaxiGraph::build(&segments, 30.0);
    let route = find_route(&graph, &p(-5.0, 0.0), &p(105.0, 0.0), &TaxiRules::default())
        .expect("route");
    assert!((path_length(&route.points) - 100.0).abs() < 1e-6);
}

#[test]
fn nearest_queries_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let airports: Vec<Airport> = (0..8)
        .map(|i| {
            let center = p(
                rng.random_range(-50_000.0..50_000.0),
                rng.random_range(-50_000.0..50_000.0),
            );
            let mut airport = Airport::new(format!("Field {i}"), format!("F{i:03}"), center, 3000.0);
            for r in 0..3 {
                let threshold = p(
                    center.x + rng.random_range(-2000.0..2000.0),
                    center.y + rng.random_range(-2000.0..2000.0),
                );
                let heading = rng.random_range(0.0..360.0);
                airport = airport.with_runway(Runway::new(format!("{:02}", r * 9 + 9), threshold, heading, 2500.0, 45.0));
            }
            airport
        })
        .collect();
    let registry = AirportRegistry::new(airports.clone());

    for _ in 0..50 {
        let query = p(
            rng.random_range(-60_000.0..60_000.0),
            rng.random_range(-60_000.0..60_000.0),
        );

        let nearest = registry.find_nearest_airport(&query).unwrap();
        let best = airports
            .iter()
            .map(|a| a.center.distance_to(&query))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(nearest.center.distance_to(&query), best);

        let (_, runway) = registry.find_nearest_runway(&query).unwrap();
        let best = airports
            .iter()
            .flat_map(|a| a.runways.iter())
            .map(|r| r.threshold.distance_to(&query))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(runway.threshold.distance_to(&query), best);
    }
}

#[test]
fn generated_approach_is_attached_to_runway() {
    let runway = Runway::new("Runway 27R", Position::new(0.0, 0.0, 100.0), 270.0, 3000.0, 45.0)
        .with_approach(None);
    let procedure = runway.approach.as_ref().expect("approach");
    assert_eq!(procedure.runway_name, "Runway 27R");
    let iaf = procedure
        .waypoint(ApproachWaypointType::InitialApproachFix)
        .unwrap();
    // Approach from the east for a westbound runway.
    assert!((iaf.position.x - 18_500.0).abs() < 1e-6);
    assert!((iaf.position.z - 1320.0).abs() < 1e-9);
    assert!(procedure.is_within_localizer(&iaf.position));
}
