//! Canonical graph model, payload normalization and summary statistics.

mod model;
mod normalize;
mod stats;

pub use model::{CanonicalGraph, EntityId, GraphEdge, GraphNode};
pub use normalize::{as_text, fields, first_of, normalize};
pub use stats::NetworkStats;
