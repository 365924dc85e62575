//! Failure outcomes of backend calls.

use serde_json::Value;
use thiserror::Error;

/// Message shown when no response reached the client.
pub const UNREACHABLE_MESSAGE: &str = "Network error. Please check if the API server is running.";

/// Errors returned by [`ApiClient`](super::ApiClient) operations.
///
/// An empty result is always `Ok`; any variant here means the request itself
/// failed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
	/// No response reached the client (connection refused, DNS, CORS, ...).
	#[error("service unreachable: {0}")]
	Unreachable(String),
	/// The server answered with a non-success status.
	#[error("server returned {status}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
	Server { status: u16, message: Option<String> },
	/// A success response whose body did not match the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
	/// The request could not be constructed.
	#[error("invalid request: {0}")]
	InvalidRequest(String),
}

impl ApiError {
	/// Build a [`ApiError::Server`] from a status code and the raw error body.
	///
	/// The backend reports failures as `{"detail": "..."}`; some proxies use
	/// `{"message": "..."}`. Non-string details (validation error lists) are
	/// not surfaced verbatim.
	pub fn from_status(status: u16, body: &str) -> Self {
		let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
			["detail", "message"]
				.iter()
				.find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
		});
		ApiError::Server { status, message }
	}

	/// Whether the failure means the backend could not be reached at all.
	pub fn is_connectivity(&self) -> bool {
		matches!(self, ApiError::Unreachable(_))
	}

	/// Text for the user: the server's own message when it sent one, a
	/// connectivity hint when nothing came back, otherwise `fallback`.
	pub fn user_message(&self, fallback: &str) -> String {
		match self {
			ApiError::Server {
				message: Some(message),
				..
			} => message.clone(),
			ApiError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
			_ => fallback.to_string(),
		}
	}
}
