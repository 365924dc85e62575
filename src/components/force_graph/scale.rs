//! Zoom-dependent sizes.
//!
//! Sizes are given in world units and drawn after the canvas transform, so
//! they grow when zooming in. Where that would make an element unreadably
//! small, a minimum on-screen size applies.

/// Base sizes of the canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radius in world units.
	pub node_radius: f64,
	/// Smallest on-screen node radius, in pixels.
	pub node_min_screen: f64,
	/// Hover and drag hit radius in world units.
	pub hit_radius: f64,
	/// Node label font size in screen pixels.
	pub label_size: f64,
	/// Below this zoom level labels stop shrinking.
	pub label_min_k: f64,
	/// Edge label font size in screen pixels.
	pub edge_label_size: f64,
	/// Below this zoom level edge labels are hidden.
	pub edge_label_min_k: f64,
	/// Edge width in screen pixels.
	pub edge_width: f64,
	/// Arrow head length in world units, at most `arrow_max_screen` pixels.
	pub arrow_size: f64,
	pub arrow_max_screen: f64,
	/// Hover ring width in screen pixels.
	pub ring_width: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 9.0,
			node_min_screen: 5.0,
			hit_radius: 14.0,
			label_size: 12.0,
			label_min_k: 0.5,
			edge_label_size: 10.0,
			edge_label_min_k: 0.6,
			edge_width: 1.5,
			arrow_size: 7.0,
			arrow_max_screen: 16.0,
			ring_width: 2.0,
		}
	}
}

/// World-space value of `base`, kept between `min_screen` and `max_screen`
/// pixels once zoom `k` is applied.
fn clamp_screen(base: f64, k: f64, min_screen: f64, max_screen: f64) -> f64 {
	base.clamp(min_screen / k, max_screen / k)
}

/// Sizes for one zoom level, computed once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub node_radius: f64,
	pub hit_radius: f64,
	pub label_font: String,
	pub edge_label_font: String,
	pub show_edge_labels: bool,
	pub edge_width: f64,
	pub arrow_size: f64,
	pub ring_width: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let k = k.max(f64::EPSILON);
		let label_px = config.label_size / k.max(config.label_min_k);
		let edge_label_px = config.edge_label_size / k.max(config.edge_label_min_k);
		Self {
			node_radius: clamp_screen(config.node_radius, k, config.node_min_screen, f64::INFINITY),
			hit_radius: clamp_screen(config.hit_radius, k, config.node_min_screen, f64::INFINITY),
			label_font: format!("{label_px}px sans-serif"),
			edge_label_font: format!("{edge_label_px}px sans-serif"),
			show_edge_labels: k >= config.edge_label_min_k,
			edge_width: config.edge_width / k,
			arrow_size: clamp_screen(config.arrow_size, k, 0.0, config.arrow_max_screen),
			ring_width: config.ring_width / k,
		}
	}
}
