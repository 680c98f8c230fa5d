//! Taxiway network graph built from loose segments.
//!
//! Facility data describes taxiways as independent line segments whose
//! endpoints only roughly coincide. Endpoints are snapped together into
//! shared nodes when they fall within the merge distance of a node that
//! already exists.
//!
//! Merging is first-match-wins over discovery order and is not transitive:
//! an endpoint joins the earliest node within range, even when a later node
//! is closer, and two nodes that each sit within range of a third endpoint
//! are never fused together.

use crate::geometry::Position;
use crate::models::TaxiwaySegment;

pub type NodeId = usize;

#[derive(Debug, Clone, Default)]
pub struct TaxiGraph {
    /// Node positions indexed by node id, in discovery order
    nodes: Vec<Position>,
    /// Outgoing neighbors per node id
    adjacency: Vec<Vec<NodeId>>,
}

impl TaxiGraph {
    /// Build a graph from `segments`, merging endpoints within `merge_distance_m`.
    pub fn build(segments: &[TaxiwaySegment], merge_distance_m: f64) -> Self {
        let mut graph = TaxiGraph::default();

        for segment in segments {
            let start = graph.resolve_node(segment.start, merge_distance_m);
            let end = graph.resolve_node(segment.end, merge_distance_m);

            graph.adjacency[start].push(end);
            if segment.bidirectional {
                graph.adjacency[end].push(start);
            }
        }

        tracing::debug!(
            segments = segments.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built taxi graph"
        );

        graph
    }

    /// Return the first existing node within range, or allocate a new one.
    fn resolve_node(&mut self, position: Position, merge_distance_m: f64) -> NodeId {
        if let Some(id) = self
            .nodes
            .iter()
            .position(|node| node.distance_to(&position) <= merge_distance_m)
        {
            return id;
        }
        self.nodes.push(position);
        self.adjacency.push(Vec::new());
        self.nodes.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.nodes.get(id).copied()
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Closest node to `position` no farther than `max_distance_m`.
    pub fn nearest_node(&self, position: &Position, max_distance_m: f64) -> Option<NodeId> {
        self.nearest_node_any(position)
            .filter(|&id| self.nodes[id].distance_to(position) <= max_distance_m)
    }

    /// Closest node to `position` regardless of distance. Ties keep the lower id.
    pub fn nearest_node_any(&self, position: &Position) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for (id, node) in self.nodes.iter().enumerate() {
            let distance = node.distance_to(position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((id, distance)),
            }
        }
        best.map(|(id, _)| id)
    }
}
