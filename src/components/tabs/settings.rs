//! Connection details and the active configuration.

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use crate::api::ApiClient;
use crate::components::Connectivity;
use crate::config::AppConfig;

#[component]
pub fn SettingsTab() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let connectivity = expect_context::<Connectivity>();
	let checking = RwSignal::new(false);

	let base_url = api.base_url().to_string();
	let check = move |_: MouseEvent| {
		let api = api.clone();
		checking.set(true);
		spawn_local(async move {
			let result = api.health().await;
			connectivity.observe(&result);
			info!("three-kingdoms: health check: {}", result.is_ok_and(|h| h.is_ok()));
			checking.try_set(false);
		});
	};

	let explorer = &config.explorer;
	let rows = [
		("Số nhân vật tải mỗi lần", config.character_limit.to_string()),
		("Độ sâu mặc định", explorer.default_depth.to_string()),
		("Độ sâu tối đa", explorer.max_depth.to_string()),
		("Giới hạn láng giềng", explorer.neighbor_limit.to_string()),
		("Độ sâu toàn mạng", explorer.full_depth.to_string()),
	];

	view! {
		<div class="tab settings-tab">
			<section class="panel">
				<h2>"Kết nối API"</h2>
				<p>
					<strong>"Địa chỉ: "</strong>
					<code>{base_url}</code>
				</p>
				<p>
					<strong>"Trạng thái: "</strong>
					{move || match connectivity.status() {
						Some(true) => "Đã kết nối",
						Some(false) => "Mất kết nối",
						None => "Chưa kiểm tra",
					}}
				</p>
				<button on:click=check disabled=move || checking.get()>
					{move || if checking.get() { "Đang kiểm tra..." } else { "Kiểm tra kết nối" }}
				</button>
			</section>
			<section class="panel">
				<h2>"Cấu hình"</h2>
				<table>
					<tbody>
						{rows
							.into_iter()
							.map(|(label, value)| {
								view! {
									<tr>
										<td>{label}</td>
										<td>{value}</td>
									</tr>
								}
							})
							.collect_view()}
					</tbody>
				</table>
			</section>
		</div>
	}
}
