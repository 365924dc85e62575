//! Canvas drawing.
//!
//! Passes, back to front: background (screen space), edges with arrow
//! heads, nodes, then edge and node labels (world space) so text is never
//! covered by a line.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeInfo, ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};

type Node = force_graph::Node<NodeInfo>;

fn ease(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Draw one frame.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let dim = ease(state.highlight.strength());

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	state.graph.visit_edges(|a, b, edge| {
		let alpha = alpha_for(state, dim, a.index(), b.index());
		draw_edge(ctx, &scale, theme, a, b, &edge.user_data, alpha);
	});
	state.graph.visit_nodes(|node| {
		let lit = state.highlight.is_lit(node.index());
		let alpha = if lit { 1.0 } else { 1.0 - 0.75 * dim };
		let hovered = state.highlight.hovered == Some(node.index());
		draw_node(ctx, &scale, theme, node, alpha, hovered);
	});
	if scale.show_edge_labels {
		state.graph.visit_edges(|a, b, edge| {
			let alpha = alpha_for(state, dim, a.index(), b.index());
			draw_edge_label(ctx, &scale, theme, a, b, &edge.user_data.label, alpha);
		});
	}
	state.graph.visit_nodes(|node| {
		let lit = state.highlight.is_lit(node.index());
		let alpha = if lit { 1.0 } else { 1.0 - 0.75 * dim };
		draw_node_label(ctx, &scale, theme, node, alpha);
	});

	ctx.restore();
}

fn alpha_for(
	state: &ForceGraphState,
	dim: f64,
	a: force_graph::DefaultNodeIdx,
	b: force_graph::DefaultNodeIdx,
) -> f64 {
	if state.highlight.is_lit(a) && state.highlight.is_lit(b) {
		1.0
	} else {
		1.0 - 0.8 * dim
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = theme.background_center.and_then(|center| {
		let g = ctx
			.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.75)
			.ok()?;
		g.add_color_stop(0.0, &center.to_css()).ok()?;
		g.add_color_stop(1.0, &theme.background.to_css()).ok()?;
		Some(g)
	});
	match gradient {
		Some(g) => {
			#[allow(deprecated)]
			ctx.set_fill_style(&g);
		}
		None => ctx.set_fill_style_str(&theme.background.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Unit vector from `a` to `b` and their distance, or `None` when the two
/// nodes overlap.
fn direction(a: &Node, b: &Node) -> Option<(f64, f64, f64)> {
	let (dx, dy) = ((b.x() - a.x()) as f64, (b.y() - a.y()) as f64);
	let dist = (dx * dx + dy * dy).sqrt();
	(dist > 0.001).then(|| (dx / dist, dy / dist, dist))
}

fn node_radius(scale: &ScaledValues, node: &Node) -> f64 {
	scale.node_radius * node.data.user_data.size
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	a: &Node,
	b: &Node,
	edge: &EdgeInfo,
	alpha: f64,
) {
	// Orient from the relationship's source.
	let (from, to) = if edge.from == a.index() { (a, b) } else { (b, a) };
	let Some((ux, uy, dist)) = direction(from, to) else {
		return;
	};
	let (r_from, r_to) = (node_radius(scale, from), node_radius(scale, to));
	if dist <= r_from + r_to {
		return;
	}
	let color = theme.edge.with_alpha(theme.edge.a * alpha).to_css();
	let (x1, y1) = (from.x() as f64, from.y() as f64);
	let (x2, y2) = (to.x() as f64, to.y() as f64);
	let (tip_x, tip_y) = (x2 - ux * r_to, y2 - uy * r_to);

	ctx.set_stroke_style_str(&color);
	ctx.set_line_width(scale.edge_width);
	ctx.begin_path();
	ctx.move_to(x1 + ux * r_from, y1 + uy * r_from);
	ctx.line_to(tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	ctx.stroke();

	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
	ctx.set_fill_style_str(&color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	a: &Node,
	b: &Node,
	label: &str,
	alpha: f64,
) {
	if label.is_empty() || direction(a, b).is_none() {
		return;
	}
	let (mx, my) = (
		(a.x() + b.x()) as f64 / 2.0,
		(a.y() + b.y()) as f64 / 2.0,
	);
	ctx.set_font(&scale.edge_label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_line_width(scale.edge_width * 3.0);
	ctx.set_stroke_style_str(&theme.edge_label_halo.with_alpha(theme.edge_label_halo.a * alpha).to_css());
	let _ = ctx.stroke_text(label, mx, my);
	ctx.set_fill_style_str(&theme.edge_label.with_alpha(alpha).to_css());
	let _ = ctx.fill_text(label, mx, my);
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node,
	alpha: f64,
	hovered: bool,
) {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = node_radius(scale, node) * if hovered { 1.2 } else { 1.0 };
	let base = Color::parse(&node.data.user_data.color);

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	let shaded = theme
		.node_gradient
		.then(|| {
			let g = ctx
				.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()?;
			g.add_color_stop(0.0, &base.lighten(0.35).to_css()).ok()?;
			g.add_color_stop(0.75, &base.to_css()).ok()?;
			g.add_color_stop(1.0, &base.darken(0.15).to_css()).ok()?;
			Some(g)
		})
		.flatten();
	match shaded {
		Some(g) => {
			#[allow(deprecated)]
			ctx.set_fill_style(&g);
		}
		None => ctx.set_fill_style_str(&base.to_css()),
	}
	ctx.fill();
	ctx.set_stroke_style_str(&theme.node_border.to_css());
	ctx.set_line_width(scale.ring_width * 0.75);
	ctx.stroke();

	if hovered {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + scale.ring_width * 2.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.hover_ring.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node: &Node,
	alpha: f64,
) {
	let label = &node.data.user_data.label;
	if label.is_empty() {
		return;
	}
	let (x, y) = (node.x() as f64, node.y() as f64);
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	ctx.set_fill_style_str(&theme.node_label.with_alpha(alpha).to_css());
	let _ = ctx.fill_text(label, x, y + node_radius(scale, node) + 3.0);
}
