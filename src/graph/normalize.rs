//! Maps backend graph payloads onto the canonical node/edge model.
//!
//! Endpoints disagree on field names: `/query/visual` sends `source`/`target`
//! with a `props` bag, `/query/subgraph` and `/query/multi_hop` send
//! `start`/`end`/`type`, and previously normalized data uses `from`/`to`.
//! Every canonical field is resolved from an ordered list of candidate keys;
//! the first usable candidate wins.

use log::debug;
use serde_json::{Map, Value};

use super::model::{CanonicalGraph, EntityId, GraphEdge, GraphNode};

const NODE_LABEL_KEYS: &[&str] = &["label", "name"];
const EDGE_FROM_KEYS: &[&str] = &["from", "start", "source"];
const EDGE_TO_KEYS: &[&str] = &["to", "end", "target"];
const EDGE_LABEL_KEYS: &[&str] = &["type", "label"];

/// Keys consumed by node resolution; never copied into `extra`.
const NODE_RESERVED: &[&str] = &["id", "label", "faction", "color", "props"];
/// Keys consumed by edge resolution; never copied into `extra`. Both label
/// candidates are consumed so a normalized edge only carries `label`.
const EDGE_RESERVED: &[&str] = &[
	"id", "from", "to", "start", "end", "source", "target", "type", "label", "props",
];

/// Normalize a raw graph payload.
///
/// Total: a payload without `nodes`/`edges` (or one that is not an object at
/// all) yields an empty graph. Items that cannot be used are dropped, order
/// of the remaining items is preserved, and normalizing already-canonical
/// data returns it unchanged.
pub fn normalize(payload: &Value) -> CanonicalGraph {
	let raw_nodes = items(payload, "nodes");
	let raw_edges = items(payload, "edges");

	let nodes: Vec<GraphNode> = raw_nodes.iter().filter_map(normalize_node).collect();
	let edges: Vec<GraphEdge> = raw_edges.iter().filter_map(normalize_edge).collect();

	let (dropped_nodes, dropped_edges) = (
		raw_nodes.len() - nodes.len(),
		raw_edges.len() - edges.len(),
	);
	if dropped_nodes > 0 || dropped_edges > 0 {
		debug!(
			"three-kingdoms: dropped {} nodes and {} edges while normalizing",
			dropped_nodes, dropped_edges
		);
	}

	CanonicalGraph { nodes, edges }
}

fn items<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
	payload
		.get(key)
		.and_then(Value::as_array)
		.map(Vec::as_slice)
		.unwrap_or(&[])
}

/// Return the first candidate that `parse` accepts.
///
/// Candidates are tried strictly in order; absent, `null` and unparseable
/// values fall through to the next one.
pub fn first_of<'a, T>(
	candidates: impl IntoIterator<Item = Option<&'a Value>>,
	parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
	candidates.into_iter().flatten().find_map(parse)
}

/// Candidate values for `keys`, looked up in `obj` in order.
pub fn fields<'a>(
	obj: &'a Map<String, Value>,
	keys: &'a [&'a str],
) -> impl Iterator<Item = Option<&'a Value>> + 'a {
	keys.iter().map(move |key| obj.get(*key))
}

/// Display text: non-empty strings, or numbers rendered as text.
pub fn as_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn props(obj: &Map<String, Value>) -> Option<&Map<String, Value>> {
	obj.get("props").and_then(Value::as_object)
}

fn normalize_node(raw: &Value) -> Option<GraphNode> {
	let obj = raw.as_object()?;
	let id = obj.get("id").and_then(EntityId::from_value)?;
	let props = props(obj);

	let label = first_of(
		fields(obj, NODE_LABEL_KEYS).chain(props.into_iter().flat_map(|p| fields(p, NODE_LABEL_KEYS))),
		as_text,
	)
	.unwrap_or_else(|| format!("Node {id}"));
	let faction = first_of(
		[obj.get("faction"), props.and_then(|p| p.get("faction"))],
		as_text,
	);
	let color = first_of(
		[obj.get("color"), props.and_then(|p| p.get("color"))],
		as_text,
	);

	Some(GraphNode {
		id,
		label,
		faction,
		color,
		extra: pass_through(obj, props, NODE_RESERVED),
	})
}

fn normalize_edge(raw: &Value) -> Option<GraphEdge> {
	let obj = raw.as_object()?;
	let from = first_of(fields(obj, EDGE_FROM_KEYS), EntityId::from_value)?;
	let to = first_of(fields(obj, EDGE_TO_KEYS), EntityId::from_value)?;
	let props = props(obj);
	let label = first_of(
		fields(obj, EDGE_LABEL_KEYS).chain(props.into_iter().flat_map(|p| fields(p, EDGE_LABEL_KEYS))),
		as_text,
	)
	.unwrap_or_default();

	Some(GraphEdge {
		id: obj.get("id").and_then(EntityId::from_value),
		from,
		to,
		label,
		extra: pass_through(obj, props, EDGE_RESERVED),
	})
}

/// Copy uninterpreted properties. Entries of a nested `props` object are
/// flattened in and override top-level keys of the same name.
fn pass_through(
	obj: &Map<String, Value>,
	props: Option<&Map<String, Value>>,
	reserved: &[&str],
) -> Map<String, Value> {
	obj.iter()
		.chain(props.into_iter().flatten())
		.filter(|(key, _)| !reserved.contains(&key.as_str()))
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn missing_collections_yield_empty_graph() {
		assert_eq!(normalize(&json!({})), CanonicalGraph::default());
		assert_eq!(normalize(&json!(null)), CanonicalGraph::default());
		assert_eq!(normalize(&json!([1, 2, 3])), CanonicalGraph::default());
		assert_eq!(
			normalize(&json!({"nodes": "oops", "edges": null})),
			CanonicalGraph::default()
		);
	}

	#[test]
	fn node_label_falls_back_to_name_then_id() {
		let graph = normalize(&json!({
			"nodes": [{"id": 5, "name": "Quan Vũ"}, {"id": 7}, {"id": 9, "label": "", "name": "Trương Phi"}]
		}));
		let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
		assert_eq!(labels, ["Quan Vũ", "Node 7", "Trương Phi"]);
	}

	#[test]
	fn label_takes_precedence_over_name() {
		let graph = normalize(&json!({"nodes": [{"id": 1, "label": "Huyền Đức", "name": "Lưu Bị"}]}));
		assert_eq!(graph.nodes[0].label, "Huyền Đức");
		assert_eq!(graph.nodes[0].extra.get("name"), Some(&json!("Lưu Bị")));
	}

	#[test]
	fn faction_and_color_are_not_defaulted() {
		let graph = normalize(&json!({"nodes": [{"id": 1, "name": "Hoa Đà"}]}));
		assert_eq!(graph.nodes[0].faction, None);
		assert_eq!(graph.nodes[0].color, None);
	}

	#[test]
	fn visual_payload_props_are_flattened() {
		let graph = normalize(&json!({
			"nodes": [{
				"id": 12,
				"label": "Tào Tháo",
				"props": {"name": "Tào Tháo", "faction": "Tào Ngụy", "born": 155}
			}],
			"edges": []
		}));
		let node = &graph.nodes[0];
		assert_eq!(node.faction.as_deref(), Some("Tào Ngụy"));
		assert_eq!(node.extra.get("born"), Some(&json!(155)));
		assert!(!node.extra.contains_key("props"));
		assert!(!node.extra.contains_key("faction"));
	}

	#[test]
	fn edge_fields_resolve_from_alternate_names() {
		let graph = normalize(&json!({
			"edges": [
				{"source": 1, "target": 2, "type": "Nghĩa huynh"},
				{"start": 3, "end": 4, "type": "KE_THU", "id": 99},
				{"from": 5, "to": 6}
			]
		}));
		let e = &graph.edges;
		assert_eq!((&e[0].from, &e[0].to, e[0].label.as_str()), (&EntityId::Int(1), &EntityId::Int(2), "Nghĩa huynh"));
		assert_eq!((&e[1].from, &e[1].to, e[1].label.as_str()), (&EntityId::Int(3), &EntityId::Int(4), "KE_THU"));
		assert_eq!(e[1].id, Some(EntityId::Int(99)));
		assert_eq!(e[2].label, "");
		assert_eq!(e[2].id, None);
	}

	#[test]
	fn edge_type_wins_over_label() {
		let graph = normalize(&json!({"edges": [{"from": 1, "to": 2, "label": "L", "type": "T"}]}));
		assert_eq!(graph.edges[0].label, "T");
		assert!(!graph.edges[0].extra.contains_key("type"));
	}

	#[test]
	fn labels_fall_back_to_props() {
		let graph = normalize(&json!({
			"nodes": [{"id": 4, "props": {"name": "Gia Cát Lượng"}}],
			"edges": [
				{"from": 1, "to": 2, "props": {"type": "ALLY"}},
				{"from": 1, "to": 2, "label": "Quân sư", "props": {"type": "ALLY"}}
			]
		}));
		assert_eq!(graph.nodes[0].label, "Gia Cát Lượng");
		assert_eq!(graph.edges[0].label, "ALLY");
		assert_eq!(graph.edges[1].label, "Quân sư");
	}

	#[test]
	fn null_endpoint_falls_through_to_next_alias() {
		let graph = normalize(&json!({"edges": [{"from": null, "start": 8, "target": 9}]}));
		assert_eq!(graph.edges[0].from, EntityId::Int(8));
	}

	#[test]
	fn edges_without_endpoints_are_dropped() {
		let payload = json!({
			"nodes": [{"id": 1}, {"id": 2}],
			"edges": [
				{"to": 2, "label": "missing from"},
				{"from": 1, "to": 2, "label": "ok"},
				{"from": 1, "label": "missing to"},
				"not an object"
			]
		});
		let graph = normalize(&payload);
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.edges.len(), 1);
		assert_eq!(graph.edges[0].label, "ok");
	}

	#[test]
	fn nodes_without_id_are_dropped() {
		let graph = normalize(&json!({"nodes": [{"name": "ghost"}, {"id": 3}, 42]}));
		assert_eq!(graph.nodes.len(), 1);
		assert_eq!(graph.nodes[0].id, EntityId::Int(3));
	}

	#[test]
	fn input_order_is_preserved() {
		let graph = normalize(&json!({
			"nodes": [{"id": 30}, {"id": 10}, {"id": 20}],
			"edges": [{"from": 30, "to": 10, "label": "b"}, {"from": 10, "to": 20, "label": "a"}]
		}));
		let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.clone()).collect();
		assert_eq!(ids, vec![EntityId::Int(30), EntityId::Int(10), EntityId::Int(20)]);
		assert_eq!(graph.edges[0].label, "b");
	}

	#[test]
	fn normalizing_twice_is_a_no_op() {
		let payloads = [
			json!({
				"nodes": [
					{"id": 1, "label": "Lưu Bị", "props": {"name": "Lưu Bị", "faction": "Thục Hán", "born": 161}},
					{"id": 2, "name": "Quan Vũ", "labels": ["Character"]},
					{"id": "c-3"}
				],
				"edges": [
					{"id": 10, "source": 1, "target": 2, "type": "NGHIA_HUYNH", "props": {"since": 184}},
					{"start": 2, "end": "c-3", "type": "KE_THU", "properties": {"battle": "Phàn Thành"}},
					{"to": 1}
				]
			}),
			json!({"nodes": [{"id": 1, "label": "", "color": "#fff"}], "edges": [{"from": 1, "to": 1, "label": "", "type": null}]}),
			json!({
				"nodes": [{"id": 4, "props": {"name": "Gia Cát Lượng"}}],
				"edges": [
					{"from": 1, "to": 2, "props": {"type": "ALLY"}},
					{"from": 1, "to": 2, "label": "Quân sư", "props": {"type": "ALLY", "label": "x"}},
					{"from": 1, "to": 2, "type": {"kind": "odd"}, "label": "Chủ - tướng"}
				]
			}),
			json!({}),
		];
		for payload in payloads {
			let once = normalize(&payload);
			let twice = normalize(&serde_json::to_value(&once).unwrap());
			assert_eq!(once, twice);
		}
	}

	#[test]
	fn first_of_respects_candidate_order() {
		let obj = json!({"a": null, "b": "", "c": "third", "d": "fourth"});
		let obj = obj.as_object().unwrap();
		assert_eq!(
			first_of(fields(obj, &["a", "b", "c", "d"]), as_text),
			Some("third".to_string())
		);
		assert_eq!(first_of(fields(obj, &["x", "y"]), as_text), None);
	}
}
