//! Overview: backend health, headline figures, factions, most connected
//! characters and a sample network.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::{ErrorBanner, FactionLegend, Loading, StatCard};
use crate::api::{ApiClient, CentralityMethod, CentralityScore, Character};
use crate::characters::group_by_faction;
use crate::components::Connectivity;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::config::AppConfig;
use crate::graph::{CanonicalGraph, normalize};

/// Names listed on each faction card before the rest is summarized.
const FACTION_PREVIEW: usize = 3;

#[component]
pub fn DashboardTab() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let connectivity = expect_context::<Connectivity>();

	let healthy = RwSignal::new(None::<bool>);
	let characters = RwSignal::new(Vec::<Character>::new());
	let sample = RwSignal::new(CanonicalGraph::default());
	let top = RwSignal::new(Vec::<CentralityScore>::new());
	let loading = RwSignal::new(true);
	let error = RwSignal::new(None::<String>);

	let (limit, depth, top_n) = (
		config.character_limit,
		config.dashboard.sample_depth,
		config.dashboard.top_characters,
	);
	spawn_local(async move {
		let health = api.health().await;
		connectivity.observe(&health);
		healthy.try_set(Some(health.is_ok_and(|h| h.is_ok())));

		let result = api.list_characters(limit).await;
		connectivity.observe(&result);
		let list = match result {
			Ok(list) => list,
			Err(e) => {
				warn!("three-kingdoms: dashboard characters failed: {e}");
				error.try_set(Some(e.user_message("Không thể tải dữ liệu dashboard")));
				loading.try_set(false);
				return;
			}
		};

		// The sample network and the ranking are extras; the dashboard is
		// usable without them.
		if let Some(first) = list.first() {
			match api.visual(&first.name, depth).await {
				Ok(payload) => {
					sample.try_set(normalize(&payload));
				}
				Err(e) => warn!("three-kingdoms: sample network for {} failed: {e}", first.name),
			}
		}
		match api.centrality(CentralityMethod::Degree, top_n).await {
			Ok(ranking) => {
				top.try_set(ranking.results);
			}
			Err(e) => warn!("three-kingdoms: degree ranking failed: {e}"),
		}

		info!("three-kingdoms: dashboard loaded {} characters", list.len());
		characters.try_set(list);
		loading.try_set(false);
	});

	let groups = Memo::new(move |_| characters.with(|cs| group_by_faction(cs)));
	let data = Memo::new(move |_| sample.with(|g| GraphData::from(g)));

	view! {
		<div class="tab dashboard-tab">
			<ErrorBanner message=error />
			<Show when=move || loading.get()>
				<Loading />
			</Show>

			<div class="stats-row">
				<StatCard
					label="Nhân vật"
					value=Signal::derive(move || characters.with(Vec::len).to_string())
				/>
				<StatCard
					label="Mối quan hệ"
					value=Signal::derive(move || sample.with(|g| g.edges.len()).to_string())
				/>
				<StatCard
					label="Phe phái"
					value=Signal::derive(move || groups.with(Vec::len).to_string())
				/>
				<StatCard
					label="API"
					value=Signal::derive(move || {
						match healthy.get() {
							Some(true) => "Online",
							Some(false) => "Offline",
							None => "...",
						}
						.to_string()
					})
				/>
			</div>

			<section class="panel">
				<h2>"Phe phái"</h2>
				<div class="faction-grid">
					{move || {
						groups
							.get()
							.into_iter()
							.map(|group| {
								let (names, rest) = group.preview(FACTION_PREVIEW);
								let names = names.join(", ");
								let more = (rest > 0).then(|| format!(" +{rest} khác"));
								view! {
									<div class="faction-card" style=format!("border-color: {}", group.color())>
										<h3>{group.faction.clone()}</h3>
										<div class="faction-count">
											{format!("{} nhân vật", group.characters.len())}
										</div>
										<div class="faction-members">{names}{more}</div>
									</div>
								}
							})
							.collect_view()
					}}
				</div>
			</section>

			<section class="panel">
				<h2>"Nhân vật trung tâm"</h2>
				<ol class="ranking">
					{move || {
						top.get()
							.into_iter()
							.map(|entry| {
								view! {
									<li>
										<span class="name">{entry.name}</span>
										<span class="score">{entry.score.to_string()}</span>
									</li>
								}
							})
							.collect_view()
					}}
				</ol>
			</section>

			<section class="panel">
				<h2>"Mạng lưới mẫu"</h2>
				<FactionLegend />
				<ForceGraphCanvas data=data height=400.0 />
			</section>
		</div>
	}
}
