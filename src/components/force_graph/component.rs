//! Leptos component wrapping the relationship canvas.
//!
//! The canvas sizes itself to its parent's width and the given height. One
//! `requestAnimationFrame` loop runs per mounted canvas; new data rebuilds
//! the simulation inside that loop's state instead of starting another. The
//! loop stops once the canvas has left the document.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::scale::ScaleConfig;
use super::state::{Drag, ForceGraphState, Pan};
use super::theme::Theme;
use super::types::GraphData;

struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

type Shared<T> = Rc<RefCell<Option<T>>>;

fn canvas_size(canvas: &HtmlCanvasElement, height: f64) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(800.0);
	(width, height)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Mouse position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive force-directed drawing of a relationship graph.
///
/// Drag a node to pin it, drag the background to pan, scroll to zoom.
/// Hovering a character highlights its direct relationships.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Shared<GraphContext> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let graph = data.get();

		if let Some(c) = context_init.borrow_mut().as_mut() {
			c.state.rebuild(&graph);
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("three-kingdoms: canvas has no 2d context");
			return;
		};
		let (w, h) = canvas_size(&canvas, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&graph, w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = canvas_size(&canvas_resize, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(c) = context_resize.borrow_mut().as_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(cb) = resize_init.borrow().as_ref() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, resize_inner) =
			(context_init.clone(), animate_init.clone(), resize_init.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if !canvas.is_connected() {
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				return;
			}
			// Seconds since the previous frame, capped so a background tab
			// doesn't fling the layout apart when it comes back.
			let now = js_sys::Date::now();
			let dt = ((now - last_frame) / 1000.0).clamp(0.0, 0.05);
			last_frame = now;
			if let Some(c) = context_anim.borrow_mut().as_mut() {
				c.state.tick(dt as f32);
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(cb) = animate_inner.borrow().as_ref() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(cb) = animate_init.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			let state = &mut c.state;
			let hit = state
				.node_at(x, y, &c.scale)
				.and_then(|idx| state.node_position(idx).map(|pos| (idx, pos)));
			match hit {
				Some((node, node_start)) => {
					state.drag = Some(Drag {
						node,
						start: (x, y),
						node_start,
					});
				}
				None => {
					state.pan = Some(Pan {
						start: (x, y),
						transform_start: (state.transform.x, state.transform.y),
					});
				}
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			let state = &mut c.state;
			if let Some(drag) = state.drag.clone() {
				let k = state.transform.k;
				let (dx, dy) = ((x - drag.start.0) / k, (y - drag.start.1) / k);
				state.move_node(
					drag.node,
					drag.node_start.0 + dx as f32,
					drag.node_start.1 + dy as f32,
				);
				return;
			}
			let hovered = state.node_at(x, y, &c.scale);
			state.set_hover(hovered);
			if let Some(pan) = &state.pan {
				let (tx, ty) = (
					pan.transform_start.0 + (x - pan.start.0),
					pan.transform_start.1 + (y - pan.start.1),
				);
				state.transform.x = tx;
				state.transform.y = ty;
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(c) = context_mu.borrow_mut().as_mut() {
			c.state.drag = None;
			c.state.pan = None;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.drag = None;
			c.state.pan = None;
			c.state.set_hover(None);
		}
	};

	let context_wh = context;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; width: 100%; cursor: grab;"
		/>
	}
}
