//! Canonical graph model shared by the explorer, the tabs and the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a node or edge as sent by the backend.
///
/// Graph-internal ids are integers, character ids are strings; both occur in
/// the same payloads depending on the endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
	Int(i64),
	Str(String),
}

impl EntityId {
	/// Interpret a JSON value as an identifier. Empty strings, floats and
	/// structured values are not identifiers.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(n) => n.as_i64().map(EntityId::Int),
			Value::String(s) if !s.is_empty() => Some(EntityId::Str(s.clone())),
			_ => None,
		}
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EntityId::Int(n) => write!(f, "{n}"),
			EntityId::Str(s) => f.write_str(s),
		}
	}
}

impl From<i64> for EntityId {
	fn from(value: i64) -> Self {
		EntityId::Int(value)
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		EntityId::Str(value.to_string())
	}
}

/// A character (or any other entity) in a canonical graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: EntityId,
	/// Display name, never empty.
	pub label: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub faction: Option<String>,
	/// Explicit display color. When unset the renderer picks one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Backend properties this layer does not interpret.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A relationship between two nodes in a canonical graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<EntityId>,
	pub from: EntityId,
	pub to: EntityId,
	/// Relationship type or display label; may be empty.
	pub label: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Normalized `{nodes, edges}` graph used by all view code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalGraph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl CanonicalGraph {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &EntityId) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| &n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn entity_id_accepts_integers_and_strings() {
		assert_eq!(EntityId::from_value(&json!(7)), Some(EntityId::Int(7)));
		assert_eq!(
			EntityId::from_value(&json!("4:abc:12")),
			Some(EntityId::Str("4:abc:12".into()))
		);
		assert_eq!(EntityId::from_value(&json!("")), None);
		assert_eq!(EntityId::from_value(&json!(1.5)), None);
		assert_eq!(EntityId::from_value(&json!(null)), None);
		assert_eq!(EntityId::from_value(&json!({"id": 1})), None);
	}

	#[test]
	fn entity_id_round_trips_untagged() {
		let ids: Vec<EntityId> = serde_json::from_value(json!([3, "x"])).unwrap();
		assert_eq!(ids, vec![EntityId::Int(3), EntityId::Str("x".into())]);
		assert_eq!(serde_json::to_value(&ids).unwrap(), json!([3, "x"]));
		assert_eq!(ids[0].to_string(), "3");
		assert_eq!(ids[1].to_string(), "x");
	}

	#[test]
	fn node_serializes_extra_fields_flat() {
		let mut extra = Map::new();
		extra.insert("born".into(), json!(161));
		let node = GraphNode {
			id: EntityId::Int(1),
			label: "Lưu Bị".into(),
			faction: Some("Thục Hán".into()),
			color: None,
			extra,
		};
		assert_eq!(
			serde_json::to_value(&node).unwrap(),
			json!({"id": 1, "label": "Lưu Bị", "faction": "Thục Hán", "born": 161})
		);
	}
}
