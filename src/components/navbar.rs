//! Top navigation bar with the backend status light.

use leptos::prelude::*;

use super::Connectivity;

/// Sections of the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
	#[default]
	Dashboard,
	Network,
	Characters,
	Analytics,
	Settings,
}

impl Tab {
	pub const ALL: [Tab; 5] = [
		Tab::Dashboard,
		Tab::Network,
		Tab::Characters,
		Tab::Analytics,
		Tab::Settings,
	];

	pub fn title(self) -> &'static str {
		match self {
			Tab::Dashboard => "Dashboard",
			Tab::Network => "Network View",
			Tab::Characters => "Characters",
			Tab::Analytics => "Analytics",
			Tab::Settings => "Settings",
		}
	}
}

#[component]
pub fn Navbar(active: RwSignal<Tab>) -> impl IntoView {
	let connectivity = expect_context::<Connectivity>();
	let (light, status) = (
		move || match connectivity.status() {
			Some(true) => "status-light online",
			Some(false) => "status-light offline",
			None => "status-light unknown",
		},
		move || match connectivity.status() {
			Some(true) => "API Connected",
			Some(false) => "API Disconnected",
			None => "Checking API...",
		},
	);

	view! {
		<nav class="navbar">
			<div class="brand">
				<span class="brand-mark">"三"</span>
				<span class="brand-name">"Tam Quốc"</span>
			</div>
			<div class="nav-tabs">
				{Tab::ALL
					.into_iter()
					.map(|tab| {
						view! {
							<button
								class=move || if active.get() == tab { "nav-tab active" } else { "nav-tab" }
								on:click=move |_| active.set(tab)
							>
								{tab.title()}
							</button>
						}
					})
					.collect_view()}
			</div>
			<div class="api-status">
				<span class=light></span>
				<span>{status}</span>
			</div>
		</nav>
	}
}
