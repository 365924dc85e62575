//! Which backend query a given view state calls for.

use std::fmt;

use crate::api::{Direction, MultiHopParams};
use crate::config::ExplorerConfig;

/// Exploration mode of the network view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
	/// Subgraph around the selected character.
	#[default]
	Subgraph,
	/// Multi-hop neighborhood of the selected character.
	Neighbors,
	/// Wide view anchored at a configured seed character.
	Full,
}

impl ViewMode {
	pub const ALL: [ViewMode; 3] = [ViewMode::Subgraph, ViewMode::Neighbors, ViewMode::Full];

	pub fn as_str(self) -> &'static str {
		match self {
			ViewMode::Subgraph => "subgraph",
			ViewMode::Neighbors => "neighbors",
			ViewMode::Full => "full",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			ViewMode::Subgraph => "Subgraph",
			ViewMode::Neighbors => "Neighbors",
			ViewMode::Full => "Full",
		}
	}
}

impl fmt::Display for ViewMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Inputs that decide the query of the network view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	/// Name of the focal character; empty when nothing is selected.
	pub selected: String,
	pub mode: ViewMode,
	pub depth: u32,
	/// First character of the loaded list, used by [`ViewMode::Full`] when
	/// no explicit seed is configured.
	pub seed: Option<String>,
}

/// A graph query the network view can issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphQuery {
	/// Visual subgraph around `name`, `depth` levels deep.
	Subgraph { name: String, depth: u32 },
	/// Multi-hop traversal for the neighbors view.
	Neighbors(MultiHopParams),
	/// Visual subgraph around the full-view seed.
	Full { seed: String, depth: u32 },
}

impl fmt::Display for GraphQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GraphQuery::Subgraph { name, depth } => write!(f, "subgraph({name}, depth {depth})"),
			GraphQuery::Neighbors(p) => write!(f, "neighbors({}, hops {})", p.name, p.hops),
			GraphQuery::Full { seed, depth } => write!(f, "full({seed}, depth {depth})"),
		}
	}
}

/// The query `view` calls for, or `None` when it calls for none (no
/// selection outside full mode, or full mode without any seed).
pub fn next_query(view: &ViewState, config: &ExplorerConfig) -> Option<GraphQuery> {
	match view.mode {
		ViewMode::Full => full_seed(view, config).map(|seed| GraphQuery::Full {
			seed,
			depth: config.full_depth,
		}),
		_ if view.selected.is_empty() => None,
		ViewMode::Subgraph => Some(GraphQuery::Subgraph {
			name: view.selected.clone(),
			depth: view.depth,
		}),
		ViewMode::Neighbors => Some(GraphQuery::Neighbors(MultiHopParams {
			name: view.selected.clone(),
			hops: view.depth,
			direction: Direction::Any,
			rel_types: Vec::new(),
			limit: config.neighbor_limit,
		})),
	}
}

fn full_seed(view: &ViewState, config: &ExplorerConfig) -> Option<String> {
	config
		.full_seed
		.clone()
		.filter(|s| !s.is_empty())
		.or_else(|| view.seed.clone())
		.filter(|s| !s.is_empty())
}
