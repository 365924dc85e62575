//! Hooks for watching backend traffic.

use log::{info, warn};

use super::error::ApiError;
use super::request::ApiRequest;

/// Receives notifications for every request an [`ApiClient`](super::ApiClient)
/// sends. All methods default to doing nothing.
pub trait RequestObserver: Send + Sync {
	fn on_request(&self, _request: &ApiRequest) {}

	fn on_response(&self, _request: &ApiRequest, _status: u16) {}

	fn on_error(&self, _request: &ApiRequest, _error: &ApiError) {}
}

/// Writes request/response lines to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl RequestObserver for LogObserver {
	fn on_request(&self, request: &ApiRequest) {
		info!("three-kingdoms: {} {}", request.method, request.path());
	}

	fn on_response(&self, request: &ApiRequest, status: u16) {
		info!("three-kingdoms: {} {} -> {}", request.method, request.path(), status);
	}

	fn on_error(&self, request: &ApiRequest, error: &ApiError) {
		warn!("three-kingdoms: {} {} failed: {}", request.method, request.path(), error);
	}
}
