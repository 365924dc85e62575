//! Character management: filtered list, create/edit/delete, and adding
//! relationships between characters by name.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::{ErrorBanner, Loading};
use crate::api::{ApiClient, Character};
use crate::characters::{
	CharacterDraft, CharacterFilter, FACTIONS, RELATION_TYPES, RelationshipDraft,
};
use crate::components::Connectivity;
use crate::config::AppConfig;
use crate::explorer::RequestSeq;
use crate::graph::EntityId;

/// Outcome message of the last mutation.
#[derive(Clone, Debug)]
struct Notice {
	ok: bool,
	text: String,
}

impl Notice {
	fn success(text: impl Into<String>) -> Option<Self> {
		Some(Self {
			ok: true,
			text: text.into(),
		})
	}

	fn failure(text: impl Into<String>) -> Option<Self> {
		Some(Self {
			ok: false,
			text: text.into(),
		})
	}
}

fn confirm(message: &str) -> bool {
	web_sys::window()
		.and_then(|w| w.confirm_with_message(message).ok())
		.unwrap_or(false)
}

#[component]
pub fn CharactersTab() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let connectivity = expect_context::<Connectivity>();

	let characters = RwSignal::new(Vec::<Character>::new());
	let factions = RwSignal::new(FACTIONS.map(String::from).to_vec());
	let filter = RwSignal::new(CharacterFilter::default());
	let draft = RwSignal::new(CharacterDraft::default());
	let editing = RwSignal::new(None::<EntityId>);
	let relation = RwSignal::new(RelationshipDraft {
		rel_type: RELATION_TYPES[0].to_string(),
		..Default::default()
	});
	let loading = RwSignal::new(true);
	let error = RwSignal::new(None::<String>);
	let notice = RwSignal::new(None::<Notice>);

	// Mutations each trigger a reload; only the newest list is shown.
	let list_seq = RwSignal::new(RequestSeq::default());
	let limit = config.character_limit;
	let api_reload = api.clone();
	let reload = move || {
		let Some(ticket) = list_seq.try_update(RequestSeq::issue) else {
			return;
		};
		let api = api_reload.clone();
		spawn_local(async move {
			let result = api.list_characters(limit).await;
			connectivity.observe(&result);
			if list_seq.try_with_untracked(|seq| seq.is_current(ticket)) != Some(true) {
				return;
			}
			match result {
				Ok(list) => {
					characters.try_set(list);
					error.try_set(None);
				}
				Err(e) => {
					warn!("three-kingdoms: character list failed: {e}");
					error.try_set(Some(e.user_message("Không thể tải danh sách nhân vật")));
				}
			}
			loading.try_set(false);
		});
	};
	reload();

	let api_factions = api.clone();
	spawn_local(async move {
		match api_factions.list_factions().await {
			Ok(list) if !list.is_empty() => {
				factions.try_set(list);
			}
			Ok(_) => {}
			Err(e) => warn!("three-kingdoms: faction list failed, using built-in list: {e}"),
		}
	});

	let (api_save, reload_save) = (api.clone(), reload.clone());
	let save = Callback::new(move |_: ()| {
		let input = match draft.with(CharacterDraft::validate) {
			Ok(input) => input,
			Err(e) => {
				notice.set(Notice::failure(format!("Dữ liệu không hợp lệ: {e}")));
				return;
			}
		};
		let (api, reload) = (api_save.clone(), reload_save.clone());
		let target = editing.get_untracked();
		spawn_local(async move {
			let result = match &target {
				Some(id) => api.update_character(&id.to_string(), &input).await,
				None => api.create_character(&input).await,
			};
			connectivity.observe(&result);
			match result {
				Ok(saved) => {
					info!("three-kingdoms: saved character {}", saved.name);
					notice.try_set(Notice::success(if target.is_some() {
						"Cập nhật nhân vật thành công"
					} else {
						"Thêm nhân vật thành công"
					}));
					draft.try_set(CharacterDraft::default());
					editing.try_set(None);
					reload();
				}
				Err(e) => {
					notice.try_set(Notice::failure(e.user_message("Không thể lưu nhân vật")));
				}
			}
		});
	});

	let (api_delete, reload_delete) = (api.clone(), reload.clone());
	let delete = Callback::new(move |character: Character| {
		if !confirm(&format!("Bạn có chắc muốn xóa {}?", character.name)) {
			return;
		}
		let (api, reload) = (api_delete.clone(), reload_delete.clone());
		spawn_local(async move {
			let result = api.delete_character(&character.id.to_string()).await;
			connectivity.observe(&result);
			match result {
				Ok(()) => {
					notice.try_set(Notice::success(format!("Đã xóa {}", character.name)));
					let was_editing = editing
						.try_with_untracked(|e| e.as_ref() == Some(&character.id))
						.unwrap_or(false);
					if was_editing {
						editing.try_set(None);
						draft.try_set(CharacterDraft::default());
					}
					reload();
				}
				Err(e) => {
					notice.try_set(Notice::failure(e.user_message("Không thể xóa nhân vật")));
				}
			}
		});
	});

	let add_relation = Callback::new(move |_: ()| {
		let body = match relation.with(RelationshipDraft::validate) {
			Ok(body) => body,
			Err(e) => {
				notice.set(Notice::failure(format!("Dữ liệu không hợp lệ: {e}")));
				return;
			}
		};
		let (api, reload) = (api.clone(), reload.clone());
		spawn_local(async move {
			let result = api.add_relationship_by_names(&body).await;
			connectivity.observe(&result);
			match result {
				Ok(_) => {
					notice.try_set(Notice::success(format!(
						"Đã thêm quan hệ {} → {} ({})",
						body.from_name, body.to_name, body.rel_type
					)));
					reload();
				}
				Err(e) => {
					notice.try_set(Notice::failure(e.user_message("Không thể thêm mối quan hệ")));
				}
			}
		});
	});

	let edit = move |character: &Character| {
		editing.set(Some(character.id.clone()));
		draft.set(CharacterDraft::from_character(character));
	};

	let filtered = Memo::new(move |_| filter.with(|f| characters.with(|cs| f.apply(cs))));
	let names = Memo::new(move |_| {
		characters.with(|cs| cs.iter().map(|c| c.name.clone()).collect::<Vec<_>>())
	});
	let name_options = move || {
		names
			.get()
			.into_iter()
			.map(|n| {
				let value = n.clone();
				view! { <option value=value>{n}</option> }
			})
			.collect_view()
	};

	view! {
		<div class="tab characters-tab">
			<ErrorBanner message=error />
			{move || {
				notice
					.get()
					.map(|n| {
						view! {
							<div class=if n.ok { "notice success" } else { "notice error" }>
								<span>{n.text}</span>
								<button class="close" on:click=move |_| notice.set(None)>"×"</button>
							</div>
						}
					})
			}}

			<div class="filters">
				<input
					type="text"
					placeholder="Tìm theo tên hoặc thông tin..."
					prop:value=move || filter.with(|f| f.search.clone())
					on:input=move |ev| filter.update(|f| f.search = event_target_value(&ev))
				/>
				<select
					prop:value=move || filter.with(|f| f.faction.clone())
					on:change=move |ev| filter.update(|f| f.faction = event_target_value(&ev))
				>
					<option value="">"Tất cả phe phái"</option>
					{move || {
						factions
							.get()
							.into_iter()
							.map(|f| {
								let value = f.clone();
								view! { <option value=value>{f}</option> }
							})
							.collect_view()
					}}
				</select>
				<span class="counter">
					{move || {
						format!(
							"Hiển thị {} / {} nhân vật",
							filtered.with(Vec::len),
							characters.with(Vec::len),
						)
					}}
				</span>
			</div>

			<div class="columns">
				<section class="panel">
					<h2>"Danh sách nhân vật"</h2>
					<Show when=move || loading.get()>
						<Loading />
					</Show>
					<table class="character-table">
						<thead>
							<tr>
								<th>"Tên"</th>
								<th>"Phe phái"</th>
								<th>"Năm sinh"</th>
								<th>"Thông tin"</th>
								<th></th>
							</tr>
						</thead>
						<tbody>
							{move || {
								filtered
									.get()
									.into_iter()
									.map(|c| {
										let row = c.clone();
										view! {
											<tr>
												<td>{c.name.clone()}</td>
												<td>{c.faction.clone().unwrap_or_default()}</td>
												<td>{c.born.map(|b| b.to_string()).unwrap_or_default()}</td>
												<td>{c.info.clone().unwrap_or_default()}</td>
												<td class="actions">
													<button on:click=move |_| edit(&c)>"Sửa"</button>
													<button
														class="danger"
														on:click=move |_| delete.run(row.clone())
													>
														"Xóa"
													</button>
												</td>
											</tr>
										}
									})
									.collect_view()
							}}
						</tbody>
					</table>
				</section>

				<section class="panel">
					<h2>
						{move || {
							if editing.with(Option::is_some) { "Sửa nhân vật" } else { "Thêm nhân vật" }
						}}
					</h2>
					<form on:submit=move |ev: SubmitEvent| {
						ev.prevent_default();
						save.run(());
					}>
						<label>"Tên"</label>
						<input
							type="text"
							prop:value=move || draft.with(|d| d.name.clone())
							on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
						/>
						<label>"Năm sinh"</label>
						<input
							type="text"
							prop:value=move || draft.with(|d| d.born.clone())
							on:input=move |ev| draft.update(|d| d.born = event_target_value(&ev))
						/>
						<label>"Phe phái"</label>
						<select
							prop:value=move || draft.with(|d| d.faction.clone())
							on:change=move |ev| draft.update(|d| d.faction = event_target_value(&ev))
						>
							<option value="">"-- Chọn phe phái --"</option>
							{FACTIONS
								.into_iter()
								.map(|f| view! { <option value=f>{f}</option> })
								.collect_view()}
						</select>
						<label>"Thông tin"</label>
						<textarea
							prop:value=move || draft.with(|d| d.info.clone())
							on:input=move |ev| draft.update(|d| d.info = event_target_value(&ev))
						></textarea>
						<div class="form-actions">
							<button type="submit">
								{move || if editing.with(Option::is_some) { "Cập nhật" } else { "Thêm" }}
							</button>
							<Show when=move || editing.with(Option::is_some)>
								<button
									type="button"
									on:click=move |_| {
										editing.set(None);
										draft.set(CharacterDraft::default());
									}
								>
									"Hủy"
								</button>
							</Show>
						</div>
					</form>

					<h2>"Thêm mối quan hệ"</h2>
					<form on:submit=move |ev: SubmitEvent| {
						ev.prevent_default();
						add_relation.run(());
					}>
						<label>"Từ"</label>
						<select
							prop:value=move || relation.with(|r| r.from_name.clone())
							on:change=move |ev| relation.update(|r| r.from_name = event_target_value(&ev))
						>
							<option value="">"-- Chọn nhân vật --"</option>
							{name_options}
						</select>
						<label>"Đến"</label>
						<select
							prop:value=move || relation.with(|r| r.to_name.clone())
							on:change=move |ev| relation.update(|r| r.to_name = event_target_value(&ev))
						>
							<option value="">"-- Chọn nhân vật --"</option>
							{name_options}
						</select>
						<label>"Loại quan hệ"</label>
						<select
							prop:value=move || relation.with(|r| r.rel_type.clone())
							on:change=move |ev| relation.update(|r| r.rel_type = event_target_value(&ev))
						>
							{RELATION_TYPES
								.into_iter()
								.map(|t| view! { <option value=t>{t}</option> })
								.collect_view()}
						</select>
						<button type="submit">"Thêm quan hệ"</button>
					</form>
				</section>
			</div>
		</div>
	}
}
