//! Airport catalog and taxi route composition.
//!
//! The registry is an immutable view over a set of airports. Taxi graphs are
//! built lazily per airport the first time a route is requested there and
//! reused afterwards.

use crate::geometry::Position;
use crate::models::{nearest_by, Airport, ParkingPosition, Runway};
use crate::pathfinding::find_path;
use crate::rules::TaxiRules;
use crate::taxi_graph::TaxiGraph;
use std::borrow::Cow;
use std::sync::OnceLock;

static GLOBAL_REGISTRY: OnceLock<AirportRegistry> = OnceLock::new();

#[derive(Debug)]
pub struct AirportRegistry {
    airports: Vec<Airport>,
    /// Taxi graph cache, parallel to `airports`
    graphs: Vec<OnceLock<TaxiGraph>>,
    rules: TaxiRules,
}

impl AirportRegistry {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self::with_rules(airports, TaxiRules::default())
    }

    pub fn with_rules(airports: Vec<Airport>, rules: TaxiRules) -> Self {
        let graphs = airports.iter().map(|_| OnceLock::new()).collect();
        tracing::info!(count = airports.len(), "Built airport registry");
        Self {
            airports,
            graphs,
            rules,
        }
    }

    /// Process-wide registry, built by `init` on the first call only.
    ///
    /// Later calls return the same instance and never run their `init`.
    pub fn global<F>(init: F) -> &'static AirportRegistry
    where
        F: FnOnce() -> AirportRegistry,
    {
        GLOBAL_REGISTRY.get_or_init(init)
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// First airport whose area contains `position`.
    pub fn find_airport_at_position(&self, position: &Position) -> Option<&Airport> {
        self.airports
            .iter()
            .find(|airport| airport.contains_position(position))
    }

    pub fn find_nearest_airport(&self, position: &Position) -> Option<&Airport> {
        nearest_by(&self.airports, position, |airport| airport.center)
    }

    /// Nearest runway threshold across every airport.
    pub fn find_nearest_runway(&self, position: &Position) -> Option<(&Airport, &Runway)> {
        let mut best: Option<(&Airport, &Runway, f64)> = None;
        for airport in &self.airports {
            for runway in &airport.runways {
                let distance = runway.threshold.distance_to(position);
                match best {
                    Some((_, _, best_distance)) if distance >= best_distance => {}
                    _ => best = Some((airport, runway, distance)),
                }
            }
        }
        best.map(|(airport, runway, _)| (airport, runway))
    }

    pub fn airport_by_code(&self, code: &str) -> Option<&Airport> {
        let code = code.trim();
        self.airports
            .iter()
            .find(|airport| airport.code.eq_ignore_ascii_case(code))
    }

    /// Taxi graph for `airport`, cached when the airport belongs to this registry.
    pub fn taxi_graph<'a>(&'a self, airport: &'a Airport) -> Cow<'a, TaxiGraph> {
        let merge_distance = self.rules.node_merge_distance_m;
        match self
            .airports
            .iter()
            .position(|candidate| std::ptr::eq(candidate, airport))
        {
            Some(index) => Cow::Borrowed(
                self.graphs[index]
                    .get_or_init(|| TaxiGraph::build(&airport.taxiways, merge_distance)),
            ),
            None => Cow::Owned(TaxiGraph::build(&airport.taxiways, merge_distance)),
        }
    }

    /// Taxi route from `from` to the threshold of `runway`.
    ///
    /// The route ends with a hold-short point before the threshold followed
    /// by the threshold itself. Empty when no taxi path exists.
    pub fn taxi_route_to_runway(
        &self,
        airport: &Airport,
        from: &Position,
        runway: &Runway,
    ) -> Vec<Position> {
        let graph = self.taxi_graph(airport);
        let mut route = find_path(&graph, from, &runway.threshold, &self.rules);
        if route.is_empty() {
            tracing::warn!(
                airport = %airport.code,
                runway = %runway.name,
                "No taxi route to runway"
            );
            return route;
        }

        let hold_short = runway.hold_short_position(self.rules.hold_short_distance_m);
        self.push_unless_arrived(&mut route, hold_short);
        route.push(runway.threshold);

        tracing::debug!(
            airport = %airport.code,
            runway = %runway.name,
            points = route.len(),
            "Computed taxi route to runway"
        );
        route
    }

    /// Taxi route from `from` to `parking`, ending on the stand.
    pub fn taxi_route_to_parking(
        &self,
        airport: &Airport,
        from: &Position,
        parking: &ParkingPosition,
    ) -> Vec<Position> {
        let graph = self.taxi_graph(airport);
        let mut route = find_path(&graph, from, &parking.position, &self.rules);
        if route.is_empty() {
            tracing::warn!(
                airport = %airport.code,
                parking = %parking.name,
                "No taxi route to parking"
            );
            return route;
        }

        self.push_unless_arrived(&mut route, parking.position);

        tracing::debug!(
            airport = %airport.code,
            parking = %parking.name,
            points = route.len(),
            "Computed taxi route to parking"
        );
        route
    }

    fn push_unless_arrived(&self, route: &mut Vec<Position>, target: Position) {
        let arrived = route
            .last()
            .is_some_and(|last| last.distance_to(&target) <= self.rules.arrival_tolerance_m);
        if !arrived {
            route.push(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParkingType, TaxiwaySegment};

    fn p(x: f64, y: f64) -> Position {
        Position::new(x, y, 0.0)
    }

    fn field(code: &str, center: Position, radius_m: f64) -> Airport {
        Airport::new(format!("{code} Field"), code, center, radius_m)
    }

    #[test]
    fn airport_at_position_returns_first_match() {
        let registry = AirportRegistry::new(vec![
            field("AAA", p(0.0, 0.0), 1000.0),
            field("BBB", p(500.0, 0.0), 1000.0),
        ]);
        let found = registry.find_airport_at_position(&p(400.0, 0.0)).unwrap();
        assert_eq!(found.code, "AAA");
        let found = registry.find_airport_at_position(&p(1400.0, 0.0)).unwrap();
        assert_eq!(found.code, "BBB");
        assert!(registry.find_airport_at_position(&p(5000.0, 0.0)).is_none());
    }

    #[test]
    fn nearest_runway_spans_all_airports() {
        let registry = AirportRegistry::new(vec![
            field("AAA", p(0.0, 0.0), 1000.0)
                .with_runway(Runway::new("09", p(-300.0, 0.0), 90.0, 600.0, 30.0)),
            field("BBB", p(5000.0, 0.0), 1000.0)
                .with_runway(Runway::new("18", p(4000.0, 500.0), 180.0, 1000.0, 30.0))
                .with_runway(Runway::new("36", p(4000.0, -500.0), 0.0, 1000.0, 30.0)),
        ]);
        let (airport, runway) = registry.find_nearest_runway(&p(3900.0, -450.0)).unwrap();
        assert_eq!((airport.code.as_str(), runway.name.as_str()), ("BBB", "36"));
        assert!(AirportRegistry::new(Vec::new())
            .find_nearest_runway(&p(0.0, 0.0))
            .is_none());
    }

    #[test]
    fn lookup_by_code_ignores_case() {
        let registry = AirportRegistry::new(vec![field("KSFO", p(0.0, 0.0), 10.0)]);
        assert!(registry.airport_by_code("ksfo").is_some());
        assert!(registry.airport_by_code("KLAX").is_none());
    }

    #[test]
    fn graph_is_cached_for_registered_airports() {
        let registry = AirportRegistry::new(vec![field("AAA", p(0.0, 0.0), 1000.0)
            .with_taxiway(TaxiwaySegment::new("A", p(0.0, 0.0), p(100.0, 0.0)))]);
        let airport = &registry.airports()[0];
        let first = registry.taxi_graph(airport);
        let second = registry.taxi_graph(airport);
        assert!(matches!(first, Cow::Borrowed(_)));
        assert!(std::ptr::eq(&*first, &*second));

        let outside = airport.clone();
        assert!(matches!(registry.taxi_graph(&outside), Cow::Owned(_)));
    }

    #[test]
    fn parking_route_ends_on_stand() {
        let stand = ParkingPosition::new("Gate 1", p(100.0, 60.0), 0.0, ParkingType::Gate);
        let airport = field("AAA", p(0.0, 0.0), 1000.0)
            .with_taxiway(TaxiwaySegment::new("A", p(0.0, 0.0), p(100.0, 0.0)))
            .with_parking(stand.clone());
        let registry = AirportRegistry::new(vec![airport]);
        let airport = &registry.airports()[0];

        let route = registry.taxi_route_to_parking(airport, &p(0.0, 0.0), &stand);
        assert_eq!(route, vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 60.0)]);

        // Stand within the arrival tolerance of the last node is not repeated.
        let near = ParkingPosition::new("Gate 2", p(100.0, 15.0), 0.0, ParkingType::Gate);
        let route = registry.taxi_route_to_parking(airport, &p(0.0, 0.0), &near);
        assert_eq!(route, vec![p(0.0, 0.0), p(100.0, 0.0)]);
    }

    #[test]
    fn unreachable_targets_give_empty_routes() {
        let runway = Runway::new("09", p(0.0, 0.0), 90.0, 800.0, 30.0);
        let airport = field("AAA", p(0.0, 0.0), 1000.0)
            .with_taxiway(TaxiwaySegment::new("A", p(0.0, 100.0), p(0.0, 200.0)).one_way())
            .with_runway(runway.clone());
        let registry = AirportRegistry::new(vec![airport]);
        let airport = &registry.airports()[0];

        // Against the one-way direction.
        assert!(registry
            .taxi_route_to_runway(airport, &p(0.0, 200.0), &runway)
            .is_empty());
        // Nowhere near the network.
        let stand = ParkingPosition::new("R1", p(0.0, 0.0), 0.0, ParkingType::Ramp);
        assert!(registry
            .taxi_route_to_parking(airport, &p(900.0, 900.0), &stand)
            .is_empty());
    }

    #[test]
    fn global_registry_initializes_once() {
        let first = AirportRegistry::global(|| {
            AirportRegistry::new(vec![field("ONE", p(0.0, 0.0), 10.0)])
        });
        let second = AirportRegistry::global(|| {
            AirportRegistry::new(vec![field("TWO", p(0.0, 0.0), 10.0)])
        });
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.airports()[0].code, "ONE");
    }
}
