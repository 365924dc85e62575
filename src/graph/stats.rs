//! Summary figures shown next to a rendered network.

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use super::model::{CanonicalGraph, EntityId};

/// Node/edge counts and density of a canonical graph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NetworkStats {
	pub nodes: usize,
	pub edges: usize,
	/// Edge count relative to a complete undirected graph, in percent,
	/// rounded to two decimals.
	pub density_percent: f64,
	/// Connected components, ignoring edge direction. Edges to nodes outside
	/// the graph are not counted.
	pub components: usize,
}

impl NetworkStats {
	pub fn of(graph: &CanonicalGraph) -> Self {
		let (nodes, edges) = (graph.nodes.len(), graph.edges.len());
		let max_edges = nodes * nodes.saturating_sub(1) / 2;
		let density_percent = if max_edges > 0 {
			(edges as f64 / max_edges as f64 * 10_000.0).round() / 100.0
		} else {
			0.0
		};
		Self {
			nodes,
			edges,
			density_percent,
			components: components(graph),
		}
	}
}

fn components(graph: &CanonicalGraph) -> usize {
	let mut network = UnGraph::<(), ()>::with_capacity(graph.nodes.len(), graph.edges.len());
	let index: HashMap<&EntityId, NodeIndex> = graph
		.nodes
		.iter()
		.map(|n| (&n.id, network.add_node(())))
		.collect();
	for edge in &graph.edges {
		if let (Some(&a), Some(&b)) = (index.get(&edge.from), index.get(&edge.to)) {
			network.add_edge(a, b, ());
		}
	}
	connected_components(&network)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::normalize;
	use serde_json::json;

	#[test]
	fn density_of_triangle_with_one_edge() {
		let graph = normalize(&json!({
			"nodes": [{"id": 1}, {"id": 2}, {"id": 3}],
			"edges": [{"from": 1, "to": 2}]
		}));
		let stats = NetworkStats::of(&graph);
		assert_eq!((stats.nodes, stats.edges), (3, 1));
		assert_eq!(stats.density_percent, 33.33);
		assert_eq!(stats.components, 2);
	}

	#[test]
	fn components_ignore_direction_and_dangling_edges() {
		let graph = normalize(&json!({
			"nodes": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}],
			"edges": [
				{"from": 2, "to": 1},
				{"from": 3, "to": 2},
				{"from": 4, "to": 99}
			]
		}));
		assert_eq!(NetworkStats::of(&graph).components, 2);
	}

	#[test]
	fn self_loops_and_parallel_edges_do_not_split_or_merge() {
		let graph = normalize(&json!({
			"nodes": [{"id": 1}, {"id": "1"}, {"id": 2}],
			"edges": [
				{"from": 1, "to": 1},
				{"from": 1, "to": 2},
				{"from": 2, "to": 1}
			]
		}));
		let stats = NetworkStats::of(&graph);
		assert_eq!(stats.edges, 3);
		// The string id "1" is its own, unconnected character.
		assert_eq!(stats.components, 2);
	}

	#[test]
	fn single_node_has_zero_density() {
		let graph = normalize(&json!({"nodes": [{"id": 1}]}));
		assert_eq!(NetworkStats::of(&graph).density_percent, 0.0);
		assert_eq!(NetworkStats::of(&CanonicalGraph::default()), NetworkStats::default());
	}
}
