//! Force-directed relationship canvas.
//!
//! [`GraphData`] is built from a [`CanonicalGraph`](crate::graph::CanonicalGraph)
//! and drawn on an HTML canvas with physics-based layout, pan, zoom, node
//! dragging, hover highlighting and relationship labels.
//!
//! ```ignore
//! let data = Signal::derive(move || GraphData::from(&graph.get()));
//! view! { <ForceGraphCanvas data=data height=600.0 /> }
//! ```

mod component;
mod render;
mod scale;
mod state;
mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use theme::{Color, Theme};
pub use types::{GraphData, RenderLink, RenderNode, node_color};
