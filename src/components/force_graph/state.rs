//! Simulation state behind the canvas.
//!
//! Wraps the `force_graph` physics with per-node display data, the pan/zoom
//! transform and hover highlighting. The state can be rebuilt from new data
//! in place, keeping the view transform.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::types::GraphData;

/// Display data attached to each simulated node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub color: String,
	/// Radius multiplier; better connected characters are drawn larger.
	pub size: f64,
}

/// Display data attached to each simulated edge.
///
/// The simulation graph is undirected and keeps one edge per node pair, so
/// relationships between the same two characters share an entry.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	/// Node the first relationship starts at; arrows point away from it.
	pub from: DefaultNodeIdx,
	pub label: String,
}

/// Pan and zoom transform.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to `0.1..=10.0`.
	pub k: f64,
}

/// A node being dragged.
#[derive(Clone, Debug)]
pub struct Drag {
	pub node: DefaultNodeIdx,
	pub start: (f64, f64),
	pub node_start: (f32, f32),
}

/// A background pan in progress.
#[derive(Clone, Debug)]
pub struct Pan {
	pub start: (f64, f64),
	pub transform_start: (f64, f64),
}

/// Hovered node, its neighbors, and an eased intensity for fading the
/// highlight in and out.
#[derive(Clone, Debug, Default)]
pub struct Highlight {
	pub hovered: Option<DefaultNodeIdx>,
	/// Hovered node and its neighbors; kept after hover ends while fading out.
	lit: HashSet<DefaultNodeIdx>,
	intensity: f64,
}

impl Highlight {
	const FADE_IN: f64 = 8.0;
	const FADE_OUT: f64 = 5.0;

	fn set(&mut self, node: Option<DefaultNodeIdx>, pairs: &[(DefaultNodeIdx, DefaultNodeIdx)]) {
		if self.hovered == node {
			return;
		}
		self.hovered = node;
		if let Some(idx) = node {
			self.lit.clear();
			self.lit.insert(idx);
			for &(a, b) in pairs {
				if a == idx {
					self.lit.insert(b);
				} else if b == idx {
					self.lit.insert(a);
				}
			}
		}
	}

	fn tick(&mut self, dt: f64) {
		let (target, speed) = if self.hovered.is_some() {
			(1.0, Self::FADE_IN)
		} else {
			(0.0, Self::FADE_OUT)
		};
		self.intensity += (target - self.intensity) * (1.0 - (-speed * dt).exp());
		if self.hovered.is_none() && self.intensity < 0.005 {
			self.intensity = 0.0;
			self.lit.clear();
		}
	}

	/// How strongly everything else is dimmed, `0.0..=1.0`.
	pub fn strength(&self) -> f64 {
		self.intensity
	}

	pub fn is_lit(&self, idx: DefaultNodeIdx) -> bool {
		self.lit.contains(&idx)
	}
}

/// Physics simulation plus interaction state.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: Option<Drag>,
	pub pan: Option<Pan>,
	pub highlight: Highlight,
	pub width: f64,
	pub height: f64,
	pairs: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn simulation() -> ForceGraph<NodeInfo, EdgeInfo> {
	ForceGraph::new(SimulationParameters {
		force_charge: 250.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: None,
			pan: None,
			highlight: Highlight::default(),
			width,
			height,
			pairs: Vec::new(),
		};
		state.load(data);
		state
	}

	/// Replace the simulated graph, keeping pan and zoom.
	pub fn rebuild(&mut self, data: &GraphData) {
		self.graph = simulation();
		self.pairs.clear();
		self.drag = None;
		self.highlight = Highlight::default();
		self.load(data);
	}

	fn load(&mut self, data: &GraphData) {
		let mut degree: HashMap<&str, usize> = HashMap::new();
		for link in &data.links {
			*degree.entry(link.source.as_str()).or_default() += 1;
			*degree.entry(link.target.as_str()).or_default() += 1;
		}
		let max_degree = degree.values().copied().max().unwrap_or(1).max(1) as f64;
		let count = data.nodes.len().max(1) as f64;

		// Start on a circle in world space; the transform centers it.
		let mut index: HashMap<&str, DefaultNodeIdx> = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count;
			let spread = 60.0 + 8.0 * count.sqrt();
			let d = degree.get(node.id.as_str()).copied().unwrap_or(0) as f64;
			let idx = self.graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					color: node.color.clone(),
					size: 1.0 + 0.8 * (d / max_degree).sqrt(),
				},
			});
			index.insert(node.id.as_str(), idx);
		}

		let mut labels: HashMap<(DefaultNodeIdx, DefaultNodeIdx), EdgeInfo> = HashMap::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				index.get(link.source.as_str()),
				index.get(link.target.as_str()),
			) else {
				continue;
			};
			let key = if src <= tgt { (src, tgt) } else { (tgt, src) };
			match labels.get_mut(&key) {
				Some(info) => {
					if !link.label.is_empty() && !info.label.split(" / ").any(|l| l == link.label) {
						if !info.label.is_empty() {
							info.label.push_str(" / ");
						}
						info.label.push_str(&link.label);
					}
				}
				None => {
					self.pairs.push((src, tgt));
					labels.insert(
						key,
						EdgeInfo {
							from: src,
							label: link.label.clone(),
						},
					);
				}
			}
		}
		for (src, tgt) in self.pairs.clone() {
			let key = if src <= tgt { (src, tgt) } else { (tgt, src) };
			if let Some(info) = labels.remove(&key) {
				self.graph.add_edge(src, tgt, EdgeData { user_data: info });
			}
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius * node.data.user_data.size {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn move_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set(node, &self.pairs);
	}

	/// Zoom by `factor` around the screen point `(x, y)`.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{RenderLink, RenderNode};

	fn node(id: &str) -> RenderNode {
		RenderNode {
			id: id.into(),
			label: id.into(),
			color: "#97C2FC".into(),
		}
	}

	fn link(source: &str, target: &str, label: &str) -> RenderLink {
		RenderLink {
			source: source.into(),
			target: target.into(),
			label: label.into(),
		}
	}

	fn edge_labels(state: &ForceGraphState) -> Vec<String> {
		let mut labels = Vec::new();
		state
			.graph
			.visit_edges(|_, _, e| labels.push(e.user_data.label.clone()));
		labels.sort();
		labels
	}

	#[test]
	fn parallel_relationships_share_one_labelled_edge() {
		let data = GraphData {
			nodes: vec![node("1"), node("2"), node("3")],
			links: vec![
				link("1", "2", "Nghĩa huynh"),
				link("2", "1", "Chủ - tướng"),
				link("1", "2", "Nghĩa huynh"),
				link("1", "3", ""),
			],
		};
		let state = ForceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(state.graph.get_graph().node_count(), 3);
		assert_eq!(edge_labels(&state), ["", "Nghĩa huynh / Chủ - tướng"]);
	}

	#[test]
	fn rebuild_replaces_graph_and_keeps_zoom() {
		let mut state = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("a"), node("b")],
				links: vec![link("a", "b", "Kẻ thù")],
			},
			800.0,
			600.0,
		);
		state.zoom_at(400.0, 300.0, 2.0);
		state.rebuild(&GraphData {
			nodes: vec![node("x")],
			links: Vec::new(),
		});
		assert_eq!(state.graph.get_graph().node_count(), 1);
		assert!(edge_labels(&state).is_empty());
		assert_eq!(state.transform.k, 2.0);
	}

	#[test]
	fn hover_lights_node_and_neighbors() {
		let mut state = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("a"), node("b"), node("c")],
				links: vec![link("a", "b", "")],
			},
			800.0,
			600.0,
		);
		let mut ids = Vec::new();
		state.graph.visit_nodes(|n| ids.push(n.index()));
		state.set_hover(Some(ids[0]));
		state.tick(0.1);
		assert!(state.highlight.is_lit(ids[0]));
		assert!(state.highlight.is_lit(ids[1]));
		assert!(!state.highlight.is_lit(ids[2]));
		assert!(state.highlight.strength() > 0.0);
	}
}
