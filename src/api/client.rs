//! HTTP client for the relationship backend.

use std::sync::Arc;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::observer::RequestObserver;
use super::request::{self, ApiRequest};
use super::types::{
	CentralityMethod, CentralityResponse, Character, CharacterInput, ComplexPathParams,
	HealthStatus, MultiHopParams, NamedRelationship, NeighborPage, NewRelationship, PathsResponse,
	RelationshipUpsert, ShortestPathParams,
};

/// Typed wrapper over the backend's JSON API.
///
/// Cheap to clone; every call builds its own request. Graph-shaped results
/// are returned as raw JSON for [`normalize`](crate::graph::normalize).
#[derive(Clone)]
pub struct ApiClient {
	base_url: String,
	observer: Option<Arc<dyn RequestObserver>>,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.to_string(),
			observer: None,
		}
	}

	/// Attach an observer notified of every request, response and failure.
	pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
		self.observer = Some(observer);
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Absolute URL of `request`, without its query string.
	pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
		let mut url =
			Url::parse(&self.base_url).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
		url.path_segments_mut()
			.map_err(|_| ApiError::InvalidRequest(format!("{} cannot be a base URL", self.base_url)))?
			.pop_if_empty()
			.extend(&request.segments);
		Ok(url)
	}

	fn notify(&self, f: impl FnOnce(&dyn RequestObserver)) {
		if let Some(observer) = &self.observer {
			f(observer.as_ref());
		}
	}

	fn fail(&self, request: &ApiRequest, error: ApiError) -> ApiError {
		self.notify(|o| o.on_error(request, &error));
		error
	}

	async fn execute(&self, request: &ApiRequest) -> Result<Response, ApiError> {
		request.validate().map_err(|e| self.fail(request, e))?;
		let url = self.url_for(request).map_err(|e| self.fail(request, e))?;
		self.notify(|o| o.on_request(request));

		let mut builder = reqwest::Client::new().request(request.method.clone(), url);
		if !request.query.is_empty() {
			builder = builder.query(&request.query);
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		let response = builder.send().await.map_err(|e| {
			let error = if e.is_builder() {
				ApiError::InvalidRequest(e.to_string())
			} else {
				ApiError::Unreachable(e.to_string())
			};
			self.fail(request, error)
		})?;

		let status = response.status();
		self.notify(|o| o.on_response(request, status.as_u16()));
		if status.is_success() {
			return Ok(response);
		}

		let body = response.text().await.unwrap_or_default();
		Err(self.fail(request, ApiError::from_status(status.as_u16(), &body)))
	}

	/// Send `request` and decode the JSON body.
	pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
		let response = self.execute(&request).await?;
		response
			.json::<T>()
			.await
			.map_err(|e| self.fail(&request, ApiError::Decode(e.to_string())))
	}

	/// Send `request` and ignore whatever body comes back.
	pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
		self.execute(&request).await.map(|_| ())
	}

	// Characters

	pub async fn list_characters(&self, limit: u32) -> Result<Vec<Character>, ApiError> {
		self.send(request::list_characters(limit)).await
	}

	pub async fn get_character(&self, id: &str) -> Result<Character, ApiError> {
		self.send(request::get_character(id)).await
	}

	pub async fn create_character(&self, input: &CharacterInput) -> Result<Character, ApiError> {
		self.send(request::create_character(input)).await
	}

	pub async fn update_character(
		&self,
		id: &str,
		input: &CharacterInput,
	) -> Result<Character, ApiError> {
		self.send(request::update_character(id, input)).await
	}

	pub async fn delete_character(&self, id: &str) -> Result<(), ApiError> {
		self.send_empty(request::delete_character(id)).await
	}

	pub async fn search_characters(&self, name: &str) -> Result<Vec<Character>, ApiError> {
		self.send(request::search_characters(name)).await
	}

	pub async fn list_factions(&self) -> Result<Vec<String>, ApiError> {
		self.send(request::list_factions()).await
	}

	// Relationships

	pub async fn create_relationship(
		&self,
		relationship: &NewRelationship,
	) -> Result<Value, ApiError> {
		self.send(request::create_relationship(relationship)).await
	}

	pub async fn add_relationship_by_names(
		&self,
		relationship: &NamedRelationship,
	) -> Result<Value, ApiError> {
		self.send(request::add_relationship_by_names(relationship))
			.await
	}

	pub async fn upsert_relationship(
		&self,
		upsert: &RelationshipUpsert,
	) -> Result<Value, ApiError> {
		self.send(request::upsert_relationship(upsert)).await
	}

	// Graph queries

	pub async fn complex_paths(
		&self,
		params: &ComplexPathParams,
	) -> Result<PathsResponse, ApiError> {
		self.send(request::complex_paths(params)).await
	}

	pub async fn shortest_path(
		&self,
		params: &ShortestPathParams,
	) -> Result<PathsResponse, ApiError> {
		self.send(request::shortest_path(params)).await
	}

	pub async fn centrality(
		&self,
		method: CentralityMethod,
		limit: u32,
	) -> Result<CentralityResponse, ApiError> {
		self.send(request::centrality(method, limit)).await
	}

	pub async fn multi_hop(&self, params: &MultiHopParams) -> Result<Value, ApiError> {
		self.send(request::multi_hop(params)).await
	}

	pub async fn filter_relation(
		&self,
		name: &str,
		rel_type: &str,
		limit: u32,
	) -> Result<Value, ApiError> {
		self.send(request::filter_relation(name, rel_type, limit))
			.await
	}

	pub async fn subgraph(&self, name: &str, max_depth: u32) -> Result<Value, ApiError> {
		self.send(request::subgraph(name, max_depth)).await
	}

	pub async fn visual(&self, name: &str, max_depth: u32) -> Result<Value, ApiError> {
		self.send(request::visual(name, max_depth)).await
	}

	pub async fn visual_neighbors(&self, page: &NeighborPage) -> Result<Value, ApiError> {
		self.send(request::visual_neighbors(page)).await
	}

	// Schema and health

	pub async fn schema_labels(&self) -> Result<Vec<String>, ApiError> {
		self.send(request::schema_labels()).await
	}

	pub async fn relationship_types(&self) -> Result<Vec<String>, ApiError> {
		self.send(request::relationship_types()).await
	}

	pub async fn health(&self) -> Result<HealthStatus, ApiError> {
		self.send(request::health()).await
	}
}
