//! Backend endpoints described as plain request values.
//!
//! Every operation is built here first and sent by
//! [`ApiClient`](super::ApiClient) afterwards, so what goes over the wire can
//! be checked without a server. Caller-supplied bounds are passed through
//! untouched.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::types::{
	CentralityMethod, CharacterInput, ComplexPathParams, MultiHopParams, NamedRelationship,
	NeighborAnchor, NeighborPage, NewRelationship, RelationshipUpsert, ShortestPathParams,
};

/// A single HTTP request against the backend, relative to its base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	pub method: Method,
	/// Path segments, unescaped.
	pub segments: Vec<String>,
	pub query: Vec<(&'static str, String)>,
	pub body: Option<Value>,
	/// Why the body could not be encoded. Reported when the request is sent.
	body_error: Option<String>,
}

impl ApiRequest {
	pub(super) fn new(method: Method, path: &str) -> Self {
		Self {
			method,
			segments: path
				.split('/')
				.filter(|s| !s.is_empty())
				.map(str::to_string)
				.collect(),
			query: Vec::new(),
			body: None,
			body_error: None,
		}
	}

	fn get(path: &str) -> Self {
		Self::new(Method::GET, path)
	}

	fn segment(mut self, segment: impl ToString) -> Self {
		self.segments.push(segment.to_string());
		self
	}

	fn param(mut self, key: &'static str, value: impl ToString) -> Self {
		self.query.push((key, value.to_string()));
		self
	}

	pub(super) fn json<B: Serialize>(mut self, body: &B) -> Self {
		match serde_json::to_value(body) {
			Ok(value) => self.body = Some(value),
			Err(e) => self.body_error = Some(format!("{} body: {e}", self.path())),
		}
		self
	}

	/// Fails with [`ApiError::InvalidRequest`] when the body could not be
	/// encoded as JSON.
	pub fn validate(&self) -> Result<(), ApiError> {
		match &self.body_error {
			Some(reason) => Err(ApiError::InvalidRequest(reason.clone())),
			None => Ok(()),
		}
	}

	/// Path as it appears in logs, e.g. `/query/visual`.
	pub fn path(&self) -> String {
		format!("/{}", self.segments.join("/"))
	}

	/// Value of a query parameter, if set.
	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.as_str())
	}
}

pub fn list_characters(limit: u32) -> ApiRequest {
	ApiRequest::get("/characters").param("limit", limit)
}

pub fn get_character(id: &str) -> ApiRequest {
	ApiRequest::get("/characters").segment(id)
}

pub fn create_character(input: &CharacterInput) -> ApiRequest {
	ApiRequest::new(Method::POST, "/characters").json(input)
}

pub fn update_character(id: &str, input: &CharacterInput) -> ApiRequest {
	ApiRequest::new(Method::PUT, "/characters")
		.segment(id)
		.json(input)
}

pub fn delete_character(id: &str) -> ApiRequest {
	ApiRequest::new(Method::DELETE, "/characters").segment(id)
}

pub fn search_characters(name: &str) -> ApiRequest {
	ApiRequest::get("/search").param("name", name)
}

pub fn list_factions() -> ApiRequest {
	ApiRequest::get("/factions")
}

pub fn create_relationship(relationship: &NewRelationship) -> ApiRequest {
	ApiRequest::new(Method::POST, "/relationships").json(relationship)
}

pub fn add_relationship_by_names(relationship: &NamedRelationship) -> ApiRequest {
	ApiRequest::new(Method::POST, "/query/add_relation_type").json(relationship)
}

/// The ids and type travel as query parameters, the properties as the body.
pub fn upsert_relationship(upsert: &RelationshipUpsert) -> ApiRequest {
	ApiRequest::new(Method::POST, "/relationships/upsert")
		.param("rel_type", &upsert.rel_type)
		.param("from_id", upsert.from_id)
		.param("to_id", upsert.to_id)
		.json(&upsert.properties)
}

pub fn complex_paths(params: &ComplexPathParams) -> ApiRequest {
	ApiRequest::get("/query/complex")
		.param("from_name", &params.from_name)
		.param("to_name", &params.to_name)
		.param("max_hops", params.max_hops)
		.param("limit", params.limit)
}

pub fn shortest_path(params: &ShortestPathParams) -> ApiRequest {
	ApiRequest::get("/query/shortest_path")
		.param("from_name", &params.from_name)
		.param("to_name", &params.to_name)
		.param("max_len", params.max_len)
		.param("k", params.k)
}

pub fn centrality(method: CentralityMethod, limit: u32) -> ApiRequest {
	ApiRequest::get("/query/centrality")
		.param("method", method)
		.param("limit", limit)
}

pub fn multi_hop(params: &MultiHopParams) -> ApiRequest {
	let request = ApiRequest::get("/query/multi_hop")
		.param("name", &params.name)
		.param("hops", params.hops)
		.param("direction", params.direction.as_str());
	let request = if params.rel_types.is_empty() {
		request
	} else {
		request.param("rel_types", params.rel_types.join(","))
	};
	request.param("limit", params.limit)
}

pub fn filter_relation(name: &str, rel_type: &str, limit: u32) -> ApiRequest {
	ApiRequest::get("/query/filter_relation")
		.param("name", name)
		.param("rel_type", rel_type)
		.param("limit", limit)
}

pub fn subgraph(name: &str, max_depth: u32) -> ApiRequest {
	ApiRequest::get("/query/subgraph")
		.param("name", name)
		.param("maxDepth", max_depth)
}

pub fn visual(name: &str, max_depth: u32) -> ApiRequest {
	ApiRequest::get("/query/visual")
		.param("name", name)
		.param("maxDepth", max_depth)
}

pub fn visual_neighbors(page: &NeighborPage) -> ApiRequest {
	let request = ApiRequest::get("/visual/neighbors");
	let request = match &page.anchor {
		NeighborAnchor::Id(id) => request.param("id", id),
		NeighborAnchor::Name(name) => request.param("name", name),
	};
	request
		.param("depth", page.depth)
		.param("offset", page.offset)
		.param("limit", page.limit)
}

pub fn schema_labels() -> ApiRequest {
	ApiRequest::get("/schema/labels")
}

pub fn relationship_types() -> ApiRequest {
	ApiRequest::get("/schema/relationship_types")
}

pub fn health() -> ApiRequest {
	ApiRequest::get("/health")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::types::Direction;
	use serde_json::{Map, json};

	#[test]
	fn character_paths_carry_id_segment() {
		let req = get_character("4:abc:17");
		assert_eq!(req.method, Method::GET);
		assert_eq!(req.segments, ["characters", "4:abc:17"]);
		assert_eq!(delete_character("9").method, Method::DELETE);
		assert_eq!(delete_character("9").path(), "/characters/9");
	}

	#[test]
	fn unencodable_body_is_reported_not_dropped() {
		use std::collections::HashMap;

		// JSON object keys must be strings; tuple keys cannot be encoded.
		let body = HashMap::from([((1, 2), "Xích Bích")]);
		let req = ApiRequest::new(Method::POST, "/relationships").json(&body);
		assert_eq!(req.body, None);
		let Err(ApiError::InvalidRequest(reason)) = req.validate() else {
			panic!("expected an invalid request");
		};
		assert!(reason.starts_with("/relationships body:"));
		assert!(list_characters(10).validate().is_ok());
		assert!(create_character(&CharacterInput::default()).validate().is_ok());
	}

	#[test]
	fn list_passes_caller_limit() {
		let req = list_characters(100);
		assert_eq!(req.path(), "/characters");
		assert_eq!(req.query_value("limit"), Some("100"));
	}

	#[test]
	fn update_sends_body() {
		let input = CharacterInput {
			name: "Triệu Vân".into(),
			born: Some(168),
			faction: Some("Thục Hán".into()),
			info: None,
		};
		let req = update_character("4", &input);
		assert_eq!(req.method, Method::PUT);
		assert_eq!(
			req.body,
			Some(json!({"name": "Triệu Vân", "born": 168, "faction": "Thục Hán", "info": null}))
		);
	}

	#[test]
	fn multi_hop_omits_empty_rel_types() {
		let params = MultiHopParams {
			name: "Lưu Bị".into(),
			hops: 3,
			direction: Direction::Any,
			rel_types: vec![],
			limit: 500,
		};
		let req = multi_hop(&params);
		assert_eq!(req.path(), "/query/multi_hop");
		assert_eq!(req.query_value("hops"), Some("3"));
		assert_eq!(req.query_value("direction"), Some("any"));
		assert_eq!(req.query_value("limit"), Some("500"));
		assert_eq!(req.query_value("rel_types"), None);

		let filtered = multi_hop(&MultiHopParams {
			rel_types: vec!["ALLY".into(), "ENEMY".into()],
			direction: Direction::Out,
			..params
		});
		assert_eq!(filtered.query_value("rel_types"), Some("ALLY,ENEMY"));
		assert_eq!(filtered.query_value("direction"), Some("out"));
	}

	#[test]
	fn visual_uses_camel_case_depth() {
		let req = visual("Tào Tháo", 4);
		assert_eq!(req.query_value("name"), Some("Tào Tháo"));
		assert_eq!(req.query_value("maxDepth"), Some("4"));
		assert_eq!(subgraph("Tào Tháo", 1).path(), "/query/subgraph");
	}

	#[test]
	fn query_bounds_are_not_capped() {
		let req = shortest_path(&ShortestPathParams {
			from_name: "Lưu Bị".into(),
			to_name: "Tôn Quyền".into(),
			max_len: 40,
			k: 7,
		});
		assert_eq!(req.query_value("max_len"), Some("40"));
		assert_eq!(req.query_value("k"), Some("7"));

		let req = complex_paths(&ComplexPathParams {
			from_name: "a".into(),
			to_name: "b".into(),
			max_hops: 12,
			limit: 10_000,
		});
		assert_eq!(req.query_value("max_hops"), Some("12"));
		assert_eq!(req.query_value("limit"), Some("10000"));

		let req = centrality(CentralityMethod::PageRank, 250);
		assert_eq!(req.query_value("method"), Some("pagerank"));
		assert_eq!(req.query_value("limit"), Some("250"));
	}

	#[test]
	fn upsert_splits_params_and_body() {
		let mut properties = Map::new();
		properties.insert("since".into(), json!(184));
		let req = upsert_relationship(&RelationshipUpsert {
			rel_type: "SWORN".into(),
			from_id: 1,
			to_id: 2,
			properties,
		});
		assert_eq!(req.method, Method::POST);
		assert_eq!(req.query_value("from_id"), Some("1"));
		assert_eq!(req.body, Some(json!({"since": 184})));
	}

	#[test]
	fn neighbors_select_by_id_or_name() {
		let by_id = visual_neighbors(&NeighborPage {
			anchor: NeighborAnchor::Id(42),
			depth: 1,
			offset: 50,
			limit: 50,
		});
		assert_eq!(by_id.query_value("id"), Some("42"));
		assert_eq!(by_id.query_value("name"), None);
		assert_eq!(by_id.query_value("offset"), Some("50"));
	}

	#[test]
	fn add_by_names_body_matches_backend_fields() {
		let req = add_relationship_by_names(&NamedRelationship {
			from_name: "Lưu Bị".into(),
			to_name: "Gia Cát Lượng".into(),
			rel_type: "Quân sư".into(),
			properties: Map::new(),
		});
		assert_eq!(req.path(), "/query/add_relation_type");
		assert_eq!(
			req.body,
			Some(json!({"from_name": "Lưu Bị", "to_name": "Gia Cát Lượng", "rel_type": "Quân sư", "properties": {}}))
		);
	}
}
