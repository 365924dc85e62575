//! The application's tabs and the small widgets they share.

mod analytics;
mod characters;
mod dashboard;
mod network;
mod settings;

use leptos::prelude::*;

use crate::characters::{FACTIONS, NEUTRAL_COLOR, faction_color};

pub use analytics::AnalyticsTab;
pub use characters::CharactersTab;
pub use dashboard::DashboardTab;
pub use network::NetworkTab;
pub use settings::SettingsTab;

/// One figure with a caption.
#[component]
fn StatCard(#[prop(into)] label: String, #[prop(into)] value: Signal<String>) -> impl IntoView {
	view! {
		<div class="stat-card">
			<div class="stat-value">{move || value.get()}</div>
			<div class="stat-label">{label}</div>
		</div>
	}
}

/// Red banner shown while `message` holds text.
#[component]
fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
	view! {
		<Show when=move || message.with(Option::is_some)>
			<div class="error-banner">{move || message.get().unwrap_or_default()}</div>
		</Show>
	}
}

/// Color key of the factions.
#[component]
fn FactionLegend() -> impl IntoView {
	view! {
		<div class="legend">
			{FACTIONS
				.into_iter()
				.map(|faction| {
					let color = faction_color(faction).unwrap_or(NEUTRAL_COLOR);
					view! {
						<span class="legend-item">
							<span class="legend-dot" style=format!("background: {color}")></span>
							{faction}
						</span>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Spinner placeholder.
#[component]
fn Loading(#[prop(into, default = "Đang tải...".to_string())] text: String) -> impl IntoView {
	view! {
		<div class="loading">
			<span class="spinner"></span>
			{text}
		</div>
	}
}
