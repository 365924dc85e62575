//! three-kingdoms-graph: interactive explorer for the relationships between
//! Three Kingdoms characters.
//!
//! The crate is a client-side (WASM) application. A remote backend stores the
//! characters and relationships and runs every graph algorithm; this crate
//! shapes requests, normalizes the graph payloads it gets back, tracks what
//! the user is looking at, and draws relationship networks with a
//! physics-based layout.

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod api;
pub mod characters;
pub mod components;
pub mod config;
pub mod explorer;
pub mod graph;

use api::{ApiClient, LogObserver};
use components::tabs::{AnalyticsTab, CharactersTab, DashboardTab, NetworkTab, SettingsTab};
use components::{Connectivity, Navbar, Tab};
use config::AppConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("three-kingdoms: logging initialized");
}

/// Load configuration overrides from a script element with id="app-config".
/// Falls back to the built-in defaults when the element is missing or
/// malformed.
fn load_app_config() -> AppConfig {
	let Some(text) = config_script_text() else {
		return AppConfig::default();
	};
	match AppConfig::from_json(&text) {
		Ok(config) => {
			info!("three-kingdoms: using API at {}", config.api_base_url);
			config
		}
		Err(e) => {
			warn!("three-kingdoms: failed to parse app config: {}", e);
			AppConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("app-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Provides the API client and configuration to every tab.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_app_config();
	let client = ApiClient::new(&config.api_base_url).with_observer(Arc::new(LogObserver));
	let connectivity = Connectivity::new();
	provide_context(client.clone());
	provide_context(config);
	provide_context(connectivity);

	spawn_local(async move {
		let result = client.health().await;
		connectivity.observe(&result);
		if let Err(e) = result {
			warn!("three-kingdoms: backend health check failed: {e}");
		}
	});

	let active = RwSignal::new(Tab::default());

	view! {
		<Html attr:lang="vi" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Tam Quốc - Mạng lưới nhân vật" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app">
			<Navbar active=active />
			<main class="content">
				{move || match active.get() {
					Tab::Dashboard => view! { <DashboardTab /> }.into_any(),
					Tab::Network => view! { <NetworkTab /> }.into_any(),
					Tab::Characters => view! { <CharactersTab /> }.into_any(),
					Tab::Analytics => view! { <AnalyticsTab /> }.into_any(),
					Tab::Settings => view! { <SettingsTab /> }.into_any(),
				}}
			</main>
		</div>
	}
}
