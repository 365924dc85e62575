//! Request and response shapes of the relationship backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::graph::EntityId;

/// A character as listed by `/characters` and `/search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
	pub id: EntityId,
	pub name: String,
	#[serde(default)]
	pub faction: Option<String>,
	/// Birth year.
	#[serde(default)]
	pub born: Option<i64>,
	#[serde(default)]
	pub info: Option<String>,
}

/// Body of character create and update requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterInput {
	pub name: String,
	pub born: Option<i64>,
	pub faction: Option<String>,
	pub info: Option<String>,
}

/// Body of `POST /relationships`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewRelationship {
	pub from_id: String,
	pub to_id: String,
	pub rel_type: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub since: Option<i64>,
	#[serde(skip_serializing_if = "Map::is_empty")]
	pub properties: Map<String, Value>,
}

/// Body of `POST /query/add_relation_type`: both endpoints resolved by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NamedRelationship {
	pub from_name: String,
	pub to_name: String,
	pub rel_type: String,
	pub properties: Map<String, Value>,
}

/// Parameters of `POST /relationships/upsert`, keyed by internal node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipUpsert {
	pub rel_type: String,
	pub from_id: i64,
	pub to_id: i64,
	pub properties: Map<String, Value>,
}

/// Traversal direction filter for multi-hop queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	In,
	Out,
	#[default]
	Any,
}

impl Direction {
	pub fn as_str(self) -> &'static str {
		match self {
			Direction::In => "in",
			Direction::Out => "out",
			Direction::Any => "any",
		}
	}
}

/// Ranking method for `/query/centrality`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMethod {
	#[default]
	Degree,
	PageRank,
	Betweenness,
}

impl CentralityMethod {
	pub const ALL: [CentralityMethod; 3] = [
		CentralityMethod::Degree,
		CentralityMethod::PageRank,
		CentralityMethod::Betweenness,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			CentralityMethod::Degree => "degree",
			CentralityMethod::PageRank => "pagerank",
			CentralityMethod::Betweenness => "betweenness",
		}
	}

	/// Human-readable name for method pickers.
	pub fn title(self) -> &'static str {
		match self {
			CentralityMethod::Degree => "Degree Centrality",
			CentralityMethod::PageRank => "PageRank",
			CentralityMethod::Betweenness => "Betweenness",
		}
	}
}

impl fmt::Display for CentralityMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Parameters of `/query/multi_hop`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiHopParams {
	pub name: String,
	pub hops: u32,
	pub direction: Direction,
	/// Relationship types to follow; empty means all.
	pub rel_types: Vec<String>,
	pub limit: u32,
}

/// Parameters of `/query/complex`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexPathParams {
	pub from_name: String,
	pub to_name: String,
	pub max_hops: u32,
	pub limit: u32,
}

/// Parameters of `/query/shortest_path`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPathParams {
	pub from_name: String,
	pub to_name: String,
	pub max_len: u32,
	/// Number of alternative paths requested.
	pub k: u32,
}

/// Node selector of `/visual/neighbors`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NeighborAnchor {
	Id(i64),
	Name(String),
}

/// Parameters of `/visual/neighbors`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborPage {
	pub anchor: NeighborAnchor,
	pub depth: u32,
	pub offset: u32,
	pub limit: u32,
}

/// Path search result; each path is a raw `{nodes, edges}` payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PathsResponse {
	#[serde(default)]
	pub count: usize,
	#[serde(default)]
	pub paths: Vec<Value>,
	/// Algorithm the backend used, when it reports one.
	#[serde(default)]
	pub engine: Option<String>,
}

/// One ranked character.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CentralityScore {
	pub name: String,
	#[serde(default)]
	pub score: f64,
}

/// Result of `/query/centrality`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CentralityResponse {
	#[serde(default)]
	pub method: Option<String>,
	#[serde(default)]
	pub results: Vec<CentralityScore>,
}

/// Result of `/health`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
	#[serde(default)]
	pub status: Option<String>,
}

impl HealthStatus {
	pub fn is_ok(&self) -> bool {
		self.status.as_deref() == Some("ok")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn character_optional_fields_default() {
		let c: Character = serde_json::from_value(json!({"id": "17", "name": "Gia Cát Lượng"})).unwrap();
		assert_eq!(c.id, EntityId::Str("17".into()));
		assert_eq!((c.faction, c.born, c.info), (None, None, None));
	}

	#[test]
	fn centrality_scores_accept_integer_degree() {
		let r: CentralityResponse = serde_json::from_value(json!({
			"method": "degree",
			"results": [{"name": "Lưu Bị", "score": 12}, {"name": "Tào Tháo", "score": 10.5}]
		}))
		.unwrap();
		assert_eq!(r.results[0].score, 12.0);
		assert_eq!(r.results[1].name, "Tào Tháo");
	}

	#[test]
	fn paths_response_tolerates_missing_fields() {
		let r: PathsResponse = serde_json::from_value(json!({})).unwrap();
		assert_eq!(r, PathsResponse::default());
	}

	#[test]
	fn relationship_body_omits_empty_optionals() {
		let body = NewRelationship {
			from_id: "Lưu Bị".into(),
			to_id: "Quan Vũ".into(),
			rel_type: "SWORN_BROTHER".into(),
			since: None,
			properties: Map::new(),
		};
		assert_eq!(
			serde_json::to_value(&body).unwrap(),
			json!({"from_id": "Lưu Bị", "to_id": "Quan Vũ", "rel_type": "SWORN_BROTHER"})
		);
	}
}
