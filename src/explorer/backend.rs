//! Running explorer queries against a graph source.

use async_trait::async_trait;
use serde_json::Value;

use super::query::GraphQuery;
use crate::api::{ApiClient, ApiError};
use crate::graph::{CanonicalGraph, normalize};

/// Anything that can answer a [`GraphQuery`] with a raw graph payload.
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait GraphBackend {
	async fn fetch_graph(&self, query: &GraphQuery) -> Result<Value, ApiError>;
}

#[async_trait(?Send)]
impl GraphBackend for ApiClient {
	async fn fetch_graph(&self, query: &GraphQuery) -> Result<Value, ApiError> {
		match query {
			GraphQuery::Subgraph { name, depth } => self.visual(name, *depth).await,
			GraphQuery::Neighbors(params) => self.multi_hop(params).await,
			GraphQuery::Full { seed, depth } => self.visual(seed, *depth).await,
		}
	}
}

/// Run `query` and normalize whatever comes back.
pub async fn execute<B>(backend: &B, query: &GraphQuery) -> Result<CanonicalGraph, ApiError>
where
	B: GraphBackend + ?Sized,
{
	let payload = backend.fetch_graph(query).await?;
	Ok(normalize(&payload))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct Fixed(Result<Value, ApiError>);

	#[async_trait(?Send)]
	impl GraphBackend for Fixed {
		async fn fetch_graph(&self, _query: &GraphQuery) -> Result<Value, ApiError> {
			self.0.clone()
		}
	}

	fn query() -> GraphQuery {
		GraphQuery::Subgraph {
			name: "Lưu Bị".into(),
			depth: 2,
		}
	}

	#[test]
	fn payload_is_normalized() {
		let backend = Fixed(Ok(json!({
			"nodes": [{"id": 1, "name": "Lưu Bị"}, {"id": 2, "name": "Quan Vũ"}],
			"edges": [{"start": 1, "end": 2, "type": "Nghĩa huynh"}]
		})));
		let graph = pollster::block_on(execute(&backend, &query())).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.edges[0].label, "Nghĩa huynh");
	}

	#[test]
	fn errors_pass_through() {
		let backend = Fixed(Err(ApiError::Server {
			status: 404,
			message: Some("Character not found".into()),
		}));
		let err = pollster::block_on(execute(&backend, &query())).unwrap_err();
		assert_eq!(err.user_message("fallback"), "Character not found");
	}

	#[test]
	fn unexpected_shape_is_an_empty_graph() {
		let backend = Fixed(Ok(json!({"count": 0, "paths": []})));
		let graph = pollster::block_on(execute(&backend, &query())).unwrap();
		assert!(graph.is_empty());
	}
}
