//! Network exploration: pick a character, a view mode and a depth, and see
//! the relationships around them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::{ErrorBanner, FactionLegend, Loading, StatCard};
use crate::api::{ApiClient, Character};
use crate::characters::CharacterFilter;
use crate::components::Connectivity;
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::config::AppConfig;
use crate::explorer::{Explorer, PendingQuery, ViewMode, execute};

#[component]
pub fn NetworkTab() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let connectivity = expect_context::<Connectivity>();

	let explorer = RwSignal::new(Explorer::new(config.explorer.clone()));
	let characters = RwSignal::new(Vec::<Character>::new());
	let search = RwSignal::new(String::new());
	let list_error = RwSignal::new(None::<String>);

	let api_run = api.clone();
	let run = Callback::new(move |pending: Option<PendingQuery>| {
		let Some(PendingQuery { ticket, query }) = pending else {
			return;
		};
		let api = api_run.clone();
		spawn_local(async move {
			let result = execute(&api, &query).await;
			connectivity.observe(&result);
			if let Err(e) = &result {
				warn!("three-kingdoms: {query} failed: {e}");
			}
			explorer.try_update(|e| e.commit(ticket, result));
		});
	});

	let limit = config.character_limit;
	spawn_local(async move {
		let result = api.list_characters(limit).await;
		connectivity.observe(&result);
		match result {
			Ok(list) => {
				let pending = explorer
					.try_update(|e| e.load_characters(list.iter().map(|c| c.name.as_str())))
					.flatten();
				characters.try_set(list);
				if pending.is_some() {
					run.run(pending);
				}
			}
			Err(e) => {
				warn!("three-kingdoms: character list failed: {e}");
				list_error.try_set(Some(e.user_message("Không thể tải danh sách nhân vật")));
			}
		}
	});

	let options = Memo::new(move |_| {
		let filter = CharacterFilter {
			search: search.get(),
			faction: String::new(),
		};
		characters.with(|cs| filter.apply(cs))
	});
	let data = Memo::new(move |_| explorer.with(|e| GraphData::from(e.graph())));
	let graph_error = Signal::derive(move || {
		explorer.with(|e| {
			e.error()
				.map(|err| err.user_message("Không thể tải dữ liệu mạng lưới"))
		})
	});
	let max_depth = config.explorer.max_depth.to_string();

	view! {
		<div class="tab network-tab">
			<div class="controls">
				<div class="control">
					<label>"Tìm nhân vật"</label>
					<input
						type="text"
						placeholder="Nhập tên..."
						prop:value=move || search.get()
						on:input=move |ev| search.set(event_target_value(&ev))
					/>
				</div>
				<div class="control">
					<label>"Nhân vật"</label>
					<select
						prop:value=move || explorer.with(|e| e.selected().to_string())
						on:change=move |ev| {
							let name = event_target_value(&ev);
							run.run(explorer.try_update(|e| e.select(&name)).flatten());
						}
					>
						<option value="">"-- Chọn nhân vật --"</option>
						{move || {
							options
								.get()
								.into_iter()
								.map(|c| {
									let value = c.name.clone();
									view! { <option value=value>{c.name}</option> }
								})
								.collect_view()
						}}
					</select>
				</div>
				<div class="control">
					<label>"Chế độ"</label>
					<div class="button-group">
						{ViewMode::ALL
							.into_iter()
							.map(|mode| {
								view! {
									<button
										class=move || {
											if explorer.with(|e| e.mode() == mode) { "active" } else { "" }
										}
										on:click=move |_| {
											run.run(explorer.try_update(|e| e.set_mode(mode)).flatten())
										}
									>
										{mode.title()}
									</button>
								}
							})
							.collect_view()}
					</div>
				</div>
				<div class="control">
					<label>{move || format!("Độ sâu: {}", explorer.with(|e| e.depth()))}</label>
					<input
						type="range"
						min="1"
						max=max_depth
						prop:value=move || explorer.with(|e| e.depth().to_string())
						on:input=move |ev| {
							if let Ok(depth) = event_target_value(&ev).parse::<u32>() {
								run.run(explorer.try_update(|e| e.set_depth(depth)).flatten());
							}
						}
					/>
				</div>
				<button class="refresh" on:click=move |_| run.run(explorer.try_update(Explorer::refresh).flatten())>
					"Làm mới"
				</button>
			</div>

			<ErrorBanner message=list_error />
			<ErrorBanner message=graph_error />

			<div class="stats-row">
				<StatCard
					label="Nhân vật"
					value=Signal::derive(move || data.with(|d| d.nodes.len().to_string()))
				/>
				<StatCard
					label="Mối quan hệ"
					value=Signal::derive(move || data.with(|d| d.links.len().to_string()))
				/>
				<StatCard
					label="Độ sâu"
					value=Signal::derive(move || {
						explorer.with(|e| match e.mode() {
							ViewMode::Full => e.config().full_depth.to_string(),
							_ => e.depth().to_string(),
						})
					})
				/>
			</div>
			<FactionLegend />

			<div class="graph-panel">
				<Show when=move || explorer.with(Explorer::is_loading)>
					<Loading text="Đang tải mạng lưới..." />
				</Show>
				<Show when=move || {
					explorer.with(|e| !e.is_loading() && e.error().is_none() && e.graph().is_empty())
				}>
					<div class="empty">"Chọn một nhân vật để xem mạng lưới quan hệ"</div>
				</Show>
				<ForceGraphCanvas data=data height=600.0 />
			</div>
		</div>
	}
}
