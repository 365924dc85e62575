//! View state of the network explorer and the last-request-wins rule.
//!
//! Every state change that alters the query returns a [`PendingQuery`]
//! carrying a fresh [`RequestTicket`]. Results are handed back through
//! [`Explorer::commit`], which drops anything but the newest ticket, so the
//! displayed graph always belongs to the latest selection, mode and depth
//! no matter in which order responses arrive.

use log::debug;

use super::query::{GraphQuery, ViewMode, ViewState, next_query};
use crate::api::ApiError;
use crate::config::ExplorerConfig;
use crate::graph::CanonicalGraph;

/// Identifies one issued query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

/// Hands out [`RequestTicket`]s. Only the most recently issued one is
/// current, whatever the request asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSeq(u64);

impl RequestSeq {
	/// Start a new request; every earlier ticket goes stale.
	pub fn issue(&mut self) -> RequestTicket {
		self.0 += 1;
		RequestTicket(self.0)
	}

	pub fn is_current(&self, ticket: RequestTicket) -> bool {
		ticket.0 == self.0
	}
}

/// A query the caller should run and then [`commit`](Explorer::commit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingQuery {
	pub ticket: RequestTicket,
	pub query: GraphQuery,
}

/// What [`Explorer::commit`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
	/// The graph was replaced.
	Applied,
	/// The error was recorded; the previous graph stays.
	Failed,
	/// A newer query was issued since; the result was discarded.
	Stale,
}

/// Selection, mode and depth of the network view plus the graph on display.
#[derive(Clone, Debug)]
pub struct Explorer {
	config: ExplorerConfig,
	view: ViewState,
	graph: CanonicalGraph,
	issued: RequestSeq,
	loading: bool,
	error: Option<ApiError>,
}

impl Explorer {
	pub fn new(config: ExplorerConfig) -> Self {
		let view = ViewState {
			depth: config.clamp_depth(config.default_depth),
			..ViewState::default()
		};
		Self {
			config,
			view,
			graph: CanonicalGraph::default(),
			issued: RequestSeq::default(),
			loading: false,
			error: None,
		}
	}

	pub fn config(&self) -> &ExplorerConfig {
		&self.config
	}

	pub fn view(&self) -> &ViewState {
		&self.view
	}

	pub fn selected(&self) -> &str {
		&self.view.selected
	}

	pub fn mode(&self) -> ViewMode {
		self.view.mode
	}

	pub fn depth(&self) -> u32 {
		self.view.depth
	}

	/// Graph currently on display.
	pub fn graph(&self) -> &CanonicalGraph {
		&self.graph
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// Error of the latest query, if it failed.
	pub fn error(&self) -> Option<&ApiError> {
		self.error.as_ref()
	}

	/// Query for the current state, without issuing anything.
	pub fn next_query(&self) -> Option<GraphQuery> {
		next_query(&self.view, &self.config)
	}

	/// Take in the freshly loaded character list. The first name becomes the
	/// full-view seed and, when nothing is selected yet, the selection.
	pub fn load_characters<'a>(
		&mut self,
		names: impl IntoIterator<Item = &'a str>,
	) -> Option<PendingQuery> {
		let first = names.into_iter().find(|n| !n.is_empty()).map(str::to_string);
		self.view.seed = first.clone();
		if self.view.selected.is_empty() {
			if let Some(name) = first {
				self.view.selected = name;
			}
		}
		self.reissue()
	}

	/// Change the focal character. In full mode the view does not depend on
	/// the selection, so nothing is issued.
	pub fn select(&mut self, name: &str) -> Option<PendingQuery> {
		let name = name.trim();
		if name == self.view.selected {
			return None;
		}
		self.view.selected = name.to_string();
		if self.view.mode == ViewMode::Full {
			return None;
		}
		self.reissue()
	}

	pub fn set_mode(&mut self, mode: ViewMode) -> Option<PendingQuery> {
		if mode == self.view.mode {
			return None;
		}
		self.view.mode = mode;
		self.reissue()
	}

	/// Change the depth, clamped to `1..=max_depth`. Full mode has its own
	/// fixed depth, so nothing is issued there.
	pub fn set_depth(&mut self, depth: u32) -> Option<PendingQuery> {
		let depth = self.config.clamp_depth(depth);
		if depth == self.view.depth {
			return None;
		}
		self.view.depth = depth;
		if self.view.mode == ViewMode::Full {
			return None;
		}
		self.reissue()
	}

	/// Re-run the query of the current state.
	pub fn refresh(&mut self) -> Option<PendingQuery> {
		self.reissue()
	}

	/// Hand back the result of `ticket`. Only the newest ticket is applied;
	/// a failure keeps the previous graph and records the error.
	pub fn commit(
		&mut self,
		ticket: RequestTicket,
		result: Result<CanonicalGraph, ApiError>,
	) -> CommitOutcome {
		if !self.issued.is_current(ticket) {
			debug!(
				"three-kingdoms: discarding stale result {} (latest is {})",
				ticket.0, self.issued.0
			);
			return CommitOutcome::Stale;
		}
		self.loading = false;
		match result {
			Ok(graph) => {
				self.graph = graph;
				self.error = None;
				CommitOutcome::Applied
			}
			Err(error) => {
				self.error = Some(error);
				CommitOutcome::Failed
			}
		}
	}

	// Every call invalidates outstanding tickets, even when the new state
	// calls for no query, so an older response can't land afterwards.
	fn reissue(&mut self) -> Option<PendingQuery> {
		let ticket = self.issued.issue();
		let query = self.next_query();
		self.loading = query.is_some();
		let query = query?;
		debug!("three-kingdoms: issuing {query} as #{}", ticket.0);
		Some(PendingQuery { ticket, query })
	}
}

impl Default for Explorer {
	fn default() -> Self {
		Self::new(ExplorerConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::Direction;
	use crate::graph::{EntityId, GraphNode};
	use serde_json::Map;

	fn graph_of(names: &[&str]) -> CanonicalGraph {
		CanonicalGraph {
			nodes: names
				.iter()
				.enumerate()
				.map(|(i, n)| GraphNode {
					id: EntityId::Int(i as i64),
					label: n.to_string(),
					faction: None,
					color: None,
					extra: Map::new(),
				})
				.collect(),
			edges: Vec::new(),
		}
	}

	#[test]
	fn repeating_an_earlier_request_does_not_revive_its_ticket() {
		// Degree, then betweenness, then degree again: the first degree
		// response must not count as the answer to the third request.
		let mut seq = RequestSeq::default();
		let degree = seq.issue();
		let betweenness = seq.issue();
		let degree_again = seq.issue();

		assert!(!seq.is_current(degree));
		assert!(!seq.is_current(betweenness));
		assert!(seq.is_current(degree_again));
		assert_ne!(degree, degree_again);
	}

	#[test]
	fn fresh_sequence_has_no_current_ticket() {
		let mut seq = RequestSeq::default();
		let mut other = RequestSeq::default();
		let first = other.issue();
		assert!(!seq.is_current(first));
		let own = seq.issue();
		assert!(seq.is_current(own));
	}

	#[test]
	fn starts_at_default_depth_in_subgraph_mode() {
		let explorer = Explorer::default();
		assert_eq!(explorer.mode(), ViewMode::Subgraph);
		assert_eq!(explorer.depth(), 2);
		assert!(explorer.graph().is_empty());
		assert_eq!(explorer.next_query(), None);
	}

	#[test]
	fn loading_characters_selects_first_and_issues_subgraph() {
		let mut explorer = Explorer::default();
		let pending = explorer
			.load_characters(["Lưu Bị", "Quan Vũ"])
			.unwrap();
		assert_eq!(
			pending.query,
			GraphQuery::Subgraph {
				name: "Lưu Bị".into(),
				depth: 2
			}
		);
		assert!(explorer.is_loading());
		assert_eq!(explorer.view().seed.as_deref(), Some("Lưu Bị"));
	}

	#[test]
	fn reloading_characters_keeps_selection() {
		let mut explorer = Explorer::default();
		explorer.select("Tào Tháo");
		let pending = explorer.load_characters(["Lưu Bị"]).unwrap();
		assert_eq!(explorer.selected(), "Tào Tháo");
		assert!(matches!(pending.query, GraphQuery::Subgraph { ref name, .. } if name == "Tào Tháo"));
	}

	#[test]
	fn select_in_subgraph_mode_issues_subgraph() {
		let mut explorer = Explorer::default();
		let pending = explorer.select("Tôn Quyền").unwrap();
		assert_eq!(
			pending.query,
			GraphQuery::Subgraph {
				name: "Tôn Quyền".into(),
				depth: 2
			}
		);
		assert_eq!(explorer.select("Tôn Quyền"), None);
	}

	#[test]
	fn switching_to_neighbors_issues_multi_hop_at_current_depth() {
		let mut explorer = Explorer::default();
		explorer.select("Quan Vũ");
		explorer.set_depth(3);
		let pending = explorer.set_mode(ViewMode::Neighbors).unwrap();
		let GraphQuery::Neighbors(params) = pending.query else {
			panic!("expected a neighbors query");
		};
		assert_eq!(params.name, "Quan Vũ");
		assert_eq!(params.hops, 3);
		assert_eq!(params.direction, Direction::Any);
		assert_eq!(params.limit, 500);
	}

	#[test]
	fn full_mode_ignores_selection_and_depth() {
		let mut explorer = Explorer::default();
		explorer.load_characters(["Lưu Bị"]);
		let pending = explorer.set_mode(ViewMode::Full).unwrap();
		assert_eq!(
			pending.query,
			GraphQuery::Full {
				seed: "Lưu Bị".into(),
				depth: 3
			}
		);
		assert_eq!(explorer.select("Tào Tháo"), None);
		assert_eq!(explorer.set_depth(4), None);
		assert_eq!(explorer.depth(), 4);

		// The full load issued above is still the latest.
		let outcome = explorer.commit(pending.ticket, Ok(graph_of(&["Lưu Bị", "Quan Vũ"])));
		assert_eq!(outcome, CommitOutcome::Applied);
	}

	#[test]
	fn depth_is_clamped() {
		let mut explorer = Explorer::default();
		explorer.select("Lưu Bị");
		let pending = explorer.set_depth(99).unwrap();
		assert_eq!(
			pending.query,
			GraphQuery::Subgraph {
				name: "Lưu Bị".into(),
				depth: 5
			}
		);
		explorer.set_depth(0);
		assert_eq!(explorer.depth(), 1);
	}

	#[test]
	fn only_latest_ticket_is_applied() {
		let mut explorer = Explorer::default();
		let first = explorer.select("Lưu Bị").unwrap();
		let second = explorer.select("Tào Tháo").unwrap();

		let newest = explorer.commit(second.ticket, Ok(graph_of(&["Tào Tháo"])));
		let late = explorer.commit(first.ticket, Ok(graph_of(&["Lưu Bị"])));

		assert_eq!(newest, CommitOutcome::Applied);
		assert_eq!(late, CommitOutcome::Stale);
		assert_eq!(explorer.graph().nodes[0].label, "Tào Tháo");
		assert!(!explorer.is_loading());
	}

	#[test]
	fn failure_keeps_previous_graph() {
		let mut explorer = Explorer::default();
		let ok = explorer.select("Lưu Bị").unwrap();
		explorer.commit(ok.ticket, Ok(graph_of(&["Lưu Bị", "Quan Vũ"])));

		let failing = explorer.refresh().unwrap();
		let outcome = explorer.commit(
			failing.ticket,
			Err(ApiError::Unreachable("connection refused".into())),
		);

		assert_eq!(outcome, CommitOutcome::Failed);
		assert_eq!(explorer.graph().nodes.len(), 2);
		assert!(explorer.error().is_some_and(ApiError::is_connectivity));
		assert!(!explorer.is_loading());
	}

	#[test]
	fn clearing_selection_invalidates_outstanding_query() {
		let mut explorer = Explorer::default();
		let pending = explorer.select("Lưu Bị").unwrap();
		assert_eq!(explorer.select(""), None);
		assert!(!explorer.is_loading());
		assert_eq!(
			explorer.commit(pending.ticket, Ok(graph_of(&["Lưu Bị"]))),
			CommitOutcome::Stale
		);
	}
}
