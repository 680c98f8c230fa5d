//! A* search over the taxi graph.
//!
//! Start and end points do not need to sit on the graph: each is attached to
//! a nearby node first. The start must be reasonably close to a taxiway,
//! while the end falls back to the globally nearest node so a route can
//! still be offered toward targets lying off the network (runway
//! thresholds, remote stands).

use crate::geometry::{path_length, Position};
use crate::rules::TaxiRules;
use crate::taxi_graph::{NodeId, TaxiGraph};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct TaxiPath {
    /// Graph nodes visited, start to end
    pub nodes: Vec<NodeId>,
    /// Points to follow, including any lead-in point off the graph
    pub points: Vec<Position>,
    pub length_m: f64,
    pub nodes_visited: usize,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f_score: FloatOrd,
    node: NodeId,
    g_score: f64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.node == other.node
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Shortest route from `start` to `end` as a list of points.
///
/// Returns an empty vector when the start cannot be attached to the graph or
/// the end is unreachable.
pub fn find_path(
    graph: &TaxiGraph,
    start: &Position,
    end: &Position,
    rules: &TaxiRules,
) -> Vec<Position> {
    find_route(graph, start, end, rules)
        .map(|path| path.points)
        .unwrap_or_default()
}

/// Same as [`find_path`] but keeps search details.
pub fn find_route(
    graph: &TaxiGraph,
    start: &Position,
    end: &Position,
    rules: &TaxiRules,
) -> Option<TaxiPath> {
    let radius = rules.connection_distance_m;
    let Some(start_node) = graph
        .nearest_node(start, radius)
        .or_else(|| graph.nearest_node(start, radius * rules.start_search_multiplier))
    else {
        tracing::debug!(?start, "No taxi node near start position");
        return None;
    };
    let end_node = graph
        .nearest_node(end, radius * rules.end_search_multiplier)
        .or_else(|| graph.nearest_node_any(end))?;

    let Some((nodes, nodes_visited)) = astar(graph, start_node, end_node) else {
        tracing::debug!(start_node, end_node, "Taxi graph has no path between nodes");
        return None;
    };

    let mut points: Vec<Position> = nodes.iter().filter_map(|&id| graph.position(id)).collect();
    if let Some(first) = points.first().copied() {
        if start.distance_to(&first) > rules.interpolation_threshold_m {
            points.insert(0, start.lerp(&first, 0.5));
        }
    }

    let length_m = path_length(&points);
    tracing::debug!(
        start_node,
        end_node,
        nodes_visited,
        length_m,
        "Found taxi path"
    );

    Some(TaxiPath {
        length_m,
        nodes,
        points,
        nodes_visited,
    })
}

fn astar(graph: &TaxiGraph, start: NodeId, goal: NodeId) -> Option<(Vec<NodeId>, usize)> {
    let goal_position = graph.position(goal)?;
    let heuristic = |id: NodeId| {
        graph
            .position(id)
            .map(|p| p.distance_to(&goal_position))
            .unwrap_or(f64::INFINITY)
    };

    let node_count = graph.node_count();
    let mut g_score = vec![f64::INFINITY; node_count];
    let mut came_from: Vec<Option<NodeId>> = vec![None; node_count];
    let mut closed = vec![false; node_count];
    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();

    g_score[start] = 0.0;
    open_set.push(Reverse(OpenNode {
        f_score: FloatOrd(heuristic(start)),
        node: start,
        g_score: 0.0,
    }));

    let mut nodes_visited = 0usize;

    while let Some(Reverse(current)) = open_set.pop() {
        let id = current.node;
        // Stale heap entry from a since-improved score.
        if closed[id] || current.g_score > g_score[id] {
            continue;
        }
        nodes_visited += 1;

        if id == goal {
            let mut path = vec![goal];
            let mut cursor = goal;
            while let Some(previous) = came_from[cursor] {
                path.push(previous);
                cursor = previous;
            }
            path.reverse();
            return Some((path, nodes_visited));
        }

        closed[id] = true;
        let Some(position) = graph.position(id) else {
            continue;
        };

        for &next in graph.neighbors(id) {
            if closed[next] {
                continue;
            }
            let Some(next_position) = graph.position(next) else {
                continue;
            };
            let tentative_g = g_score[id] + position.distance_to(&next_position);
            if tentative_g < g_score[next] {
                g_score[next] = tentative_g;
                came_from[next] = Some(id);
                open_set.push(Reverse(OpenNode {
                    f_score: FloatOrd(tentative_g + heuristic(next)),
                    node: next,
                    g_score: tentative_g,
                }));
            }
        }
    }

    None
}
