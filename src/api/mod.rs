//! Client side of the relationship backend's HTTP API.
//!
//! The backend owns all graph computation (paths, centrality, traversal);
//! this module only shapes requests and decodes responses. Failures are
//! always reported as [`ApiError`], never as an empty success.

mod client;
mod error;
mod observer;
pub mod request;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, UNREACHABLE_MESSAGE};
pub use observer::{LogObserver, RequestObserver};
pub use request::ApiRequest;
pub use types::{
	CentralityMethod, CentralityResponse, CentralityScore, Character, CharacterInput,
	ComplexPathParams, Direction, HealthStatus, MultiHopParams, NamedRelationship, NeighborAnchor,
	NeighborPage, NewRelationship, PathsResponse, RelationshipUpsert, ShortestPathParams,
};
