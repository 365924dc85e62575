//! Render input derived from a canonical graph.
//!
//! Everything the canvas needs is resolved here (string ids, display color,
//! edge labels) so the simulation never looks at backend data.

use std::collections::HashSet;

use crate::characters::{NEUTRAL_COLOR, faction_color};
use crate::graph::{CanonicalGraph, EntityId, GraphNode};

/// A node ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderNode {
	pub id: String,
	pub label: String,
	/// Resolved CSS color: explicit color, then faction color, then neutral.
	pub color: String,
}

/// A directed edge ready for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderLink {
	pub source: String,
	pub target: String,
	/// May be empty.
	pub label: String,
}

/// Nodes and links as handed to the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<RenderNode>,
	pub links: Vec<RenderLink>,
}

/// Display color of `node`.
pub fn node_color(node: &GraphNode) -> String {
	node.color
		.clone()
		.or_else(|| {
			node.faction
				.as_deref()
				.and_then(faction_color)
				.map(str::to_string)
		})
		.unwrap_or_else(|| NEUTRAL_COLOR.to_string())
}

/// Canvas key of `id`. Text ids are tagged so that `1` and `"1"` stay two
/// different nodes.
fn render_key(id: &EntityId) -> String {
	match id {
		EntityId::Int(n) => n.to_string(),
		EntityId::Str(s) => format!("str:{s}"),
	}
}

impl From<&CanonicalGraph> for GraphData {
	/// Links whose endpoints are not both among the nodes are left out; the
	/// simulation has nothing to attach them to.
	fn from(graph: &CanonicalGraph) -> Self {
		let nodes: Vec<RenderNode> = graph
			.nodes
			.iter()
			.map(|n| RenderNode {
				id: render_key(&n.id),
				label: n.label.clone(),
				color: node_color(n),
			})
			.collect();
		let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		let links = graph
			.edges
			.iter()
			.map(|e| RenderLink {
				source: render_key(&e.from),
				target: render_key(&e.to),
				label: e.label.clone(),
			})
			.filter(|l| known.contains(l.source.as_str()) && known.contains(l.target.as_str()))
			.collect();
		GraphData { nodes, links }
	}
}
