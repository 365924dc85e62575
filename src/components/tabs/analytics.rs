//! Graph analytics computed by the backend: centrality rankings, shortest
//! and multi-hop paths, and summary statistics of a character's network.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::{ErrorBanner, Loading, StatCard};
use crate::api::{
	ApiClient, CentralityMethod, CentralityScore, Character, ComplexPathParams, PathsResponse,
	ShortestPathParams,
};
use crate::components::Connectivity;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::config::AppConfig;
use crate::explorer::RequestSeq;
use crate::graph::{NetworkStats, normalize};

fn option_label(character: &Character) -> String {
	match character.faction.as_deref().filter(|f| !f.is_empty()) {
		Some(faction) => format!("{} ({faction})", character.name),
		None => character.name.clone(),
	}
}

#[component]
pub fn AnalyticsTab() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let connectivity = expect_context::<Connectivity>();
	let analytics = config.analytics.clone();

	let characters = RwSignal::new(Vec::<Character>::new());
	let from = RwSignal::new(String::new());
	let to = RwSignal::new(String::new());

	let method = RwSignal::new(CentralityMethod::default());
	let ranking = RwSignal::new(Vec::<CentralityScore>::new());
	let ranking_loading = RwSignal::new(false);
	let ranking_error = RwSignal::new(None::<String>);

	let shortest = RwSignal::new(None::<PathsResponse>);
	let complex = RwSignal::new(None::<PathsResponse>);
	let path_loading = RwSignal::new(false);
	let path_error = RwSignal::new(None::<String>);

	let stats = RwSignal::new(None::<NetworkStats>);
	let stats_error = RwSignal::new(None::<String>);

	let (limit, stats_depth) = (config.character_limit, analytics.stats_depth);
	let api_init = api.clone();
	spawn_local(async move {
		let result = api_init.list_characters(limit).await;
		connectivity.observe(&result);
		let list = match result {
			Ok(list) => list,
			Err(e) => {
				let message = e.user_message("Không thể tải danh sách nhân vật");
				path_error.try_set(Some(message.clone()));
				stats_error.try_set(Some(message));
				return;
			}
		};
		let first = list.first().map(|c| c.name.clone());
		let second = list.get(1).map(|c| c.name.clone());
		// Options first, so the selects can take the defaults.
		characters.try_set(list);
		from.try_set(first.clone().unwrap_or_default());
		to.try_set(second.unwrap_or_default());

		let Some(name) = first else {
			stats.try_set(Some(NetworkStats::default()));
			return;
		};
		match api_init.visual(&name, stats_depth).await {
			Ok(payload) => {
				stats.try_set(Some(NetworkStats::of(&normalize(&payload))));
			}
			Err(e) => {
				warn!("three-kingdoms: network statistics for {name} failed: {e}");
				stats_error.try_set(Some(e.user_message("Không thể tính thống kê mạng lưới")));
			}
		}
	});

	let (centrality_limit, api_rank) = (analytics.centrality_limit, api.clone());
	let ranking_seq = RwSignal::new(RequestSeq::default());
	Effect::new(move |_| {
		let requested = method.get();
		let Some(ticket) = ranking_seq.try_update(RequestSeq::issue) else {
			return;
		};
		let api = api_rank.clone();
		ranking_loading.set(true);
		spawn_local(async move {
			let result = api.centrality(requested, centrality_limit).await;
			connectivity.observe(&result);
			// Another method may have been picked while this one ran.
			if ranking_seq.try_with_untracked(|seq| seq.is_current(ticket)) != Some(true) {
				return;
			}
			match result {
				Ok(response) => {
					ranking.try_set(response.results);
					ranking_error.try_set(None);
				}
				Err(e) => {
					warn!("three-kingdoms: {requested} centrality failed: {e}");
					ranking_error.try_set(Some(e.user_message("Không thể tính độ trung tâm")));
				}
			}
			ranking_loading.try_set(false);
		});
	});

	let endpoints = move || -> Option<(String, String)> {
		let (a, b) = (from.get_untracked(), to.get_untracked());
		if a.is_empty() || b.is_empty() {
			path_error.set(Some("Vui lòng chọn hai nhân vật".to_string()));
			return None;
		}
		Some((a, b))
	};

	let (max_len, k, api_shortest) = (
		analytics.shortest_path_max_len,
		analytics.shortest_path_k,
		api.clone(),
	);
	let find_shortest = move |_: MouseEvent| {
		let Some((from_name, to_name)) = endpoints() else {
			return;
		};
		let params = ShortestPathParams {
			from_name,
			to_name,
			max_len,
			k,
		};
		let api = api_shortest.clone();
		path_loading.set(true);
		path_error.set(None);
		spawn_local(async move {
			let result = api.shortest_path(&params).await;
			connectivity.observe(&result);
			match result {
				Ok(response) => {
					shortest.try_set(Some(response));
				}
				Err(e) => {
					shortest.try_set(None);
					path_error.try_set(Some(e.user_message("Không thể tìm đường đi")));
				}
			}
			path_loading.try_set(false);
		});
	};

	let (max_hops, complex_limit) = (analytics.complex_max_hops, analytics.complex_limit);
	let find_complex = move |_: MouseEvent| {
		let Some((from_name, to_name)) = endpoints() else {
			return;
		};
		let params = ComplexPathParams {
			from_name,
			to_name,
			max_hops,
			limit: complex_limit,
		};
		let api = api.clone();
		path_loading.set(true);
		path_error.set(None);
		spawn_local(async move {
			let result = api.complex_paths(&params).await;
			connectivity.observe(&result);
			match result {
				Ok(response) => {
					complex.try_set(Some(response));
				}
				Err(e) => {
					complex.try_set(None);
					path_error.try_set(Some(e.user_message("Không thể tìm đường đi phức tạp")));
				}
			}
			path_loading.try_set(false);
		});
	};

	// Only the first path is drawn.
	let path_data = Memo::new(move |_| {
		shortest.with(|r| {
			r.as_ref()
				.and_then(|r| r.paths.first())
				.map(|p| GraphData::from(&normalize(p)))
				.unwrap_or_default()
		})
	});

	let character_options = move || {
		characters
			.get()
			.iter()
			.map(|c| view! { <option value=c.name.clone()>{option_label(c)}</option> })
			.collect_view()
	};

	view! {
		<div class="tab analytics-tab">
			<section class="panel">
				<h2>"Thống kê mạng lưới"</h2>
				{move || match (stats.get(), stats_error.get()) {
					(Some(s), _) => {
						view! {
							<div class="stats-row">
								<StatCard label="Số nút" value=Signal::stored(s.nodes.to_string()) />
								<StatCard label="Số cạnh" value=Signal::stored(s.edges.to_string()) />
								<StatCard
									label="Mật độ"
									value=Signal::stored(format!("{:.2}%", s.density_percent))
								/>
								<StatCard
									label="Thành phần liên thông"
									value=Signal::stored(s.components.to_string())
								/>
							</div>
						}
							.into_any()
					}
					(None, Some(message)) => {
						view! { <div class="error-banner">{message}</div> }.into_any()
					}
					(None, None) => view! { <Loading text="Đang tính thống kê..." /> }.into_any(),
				}}
			</section>

			<section class="panel">
				<h2>"Độ trung tâm"</h2>
				<div class="button-group">
					{CentralityMethod::ALL
						.into_iter()
						.map(|m| {
							view! {
								<button
									class=move || if method.get() == m { "active" } else { "" }
									on:click=move |_| method.set(m)
								>
									{m.title()}
								</button>
							}
						})
						.collect_view()}
				</div>
				<ErrorBanner message=ranking_error />
				<Show when=move || ranking_loading.get()>
					<Loading />
				</Show>
				<table class="ranking-table">
					<thead>
						<tr>
							<th>"#"</th>
							<th>"Nhân vật"</th>
							<th>"Điểm"</th>
						</tr>
					</thead>
					<tbody>
						{move || {
							ranking
								.get()
								.into_iter()
								.enumerate()
								.map(|(i, entry)| {
									view! {
										<tr>
											<td>{i + 1}</td>
											<td>{entry.name}</td>
											<td>{format!("{:.3}", entry.score)}</td>
										</tr>
									}
								})
								.collect_view()
						}}
					</tbody>
				</table>
			</section>

			<section class="panel">
				<h2>"Tìm đường đi"</h2>
				<div class="controls">
					<select
						prop:value=move || from.get()
						on:change=move |ev| from.set(event_target_value(&ev))
					>
						{character_options}
					</select>
					<span>"→"</span>
					<select
						prop:value=move || to.get()
						on:change=move |ev| to.set(event_target_value(&ev))
					>
						{character_options}
					</select>
					<button on:click=find_shortest>"Đường đi ngắn nhất"</button>
					<button on:click=find_complex>"Đường đi phức tạp"</button>
				</div>
				<ErrorBanner message=path_error />
				<Show when=move || path_loading.get()>
					<Loading />
				</Show>
				{move || {
					complex
						.get()
						.map(|r| {
							view! {
								<p class="result">
									{format!("Tìm thấy {} đường đi phức tạp (tối đa {max_hops} bước)", r.count)}
								</p>
							}
						})
				}}
				{move || {
					shortest
						.get()
						.map(|r| {
							let text = if r.paths.is_empty() {
								"Không tìm thấy đường đi".to_string()
							} else {
								format!("Tìm thấy {} đường đi", r.count.max(r.paths.len()))
							};
							view! { <p class="result">{text}</p> }
						})
				}}
				<Show when=move || path_data.with(|d| !d.nodes.is_empty())>
					<ForceGraphCanvas data=path_data height=350.0 />
				</Show>
			</section>
		</div>
	}
}
