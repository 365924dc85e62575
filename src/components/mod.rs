//! User interface: navigation, the four tabs and the relationship canvas.

pub mod force_graph;
mod navbar;
pub mod tabs;

use leptos::prelude::*;

use crate::api::ApiError;

pub use navbar::{Navbar, Tab};

/// Whether the backend could be reached, as seen by the latest call.
/// `None` until some call has finished.
#[derive(Clone, Copy, Debug)]
pub struct Connectivity(RwSignal<Option<bool>>);

impl Connectivity {
	pub fn new() -> Self {
		Self(RwSignal::new(None))
	}

	pub fn status(&self) -> Option<bool> {
		self.0.get()
	}

	/// Record the outcome of a backend call. Server-side errors still mean
	/// the backend is up.
	pub fn observe<T>(&self, result: &Result<T, ApiError>) {
		match result {
			Err(e) if e.is_connectivity() => self.0.set(Some(false)),
			_ => self.0.set(Some(true)),
		}
	}
}

impl Default for Connectivity {
	fn default() -> Self {
		Self::new()
	}
}
