//! Runtime configuration.
//!
//! Defaults are compiled in; a page can override any subset by embedding
//! `<script id="app-config" type="application/json">{...}</script>`.

use serde::Deserialize;

/// Backend used when neither the page nor the build environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

fn default_api_url() -> String {
	option_env!("THREE_KINGDOMS_API_URL")
		.unwrap_or(DEFAULT_API_URL)
		.to_string()
}

/// Top-level application settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub api_base_url: String,
	/// Page size of character listings.
	pub character_limit: u32,
	pub explorer: ExplorerConfig,
	pub analytics: AnalyticsConfig,
	pub dashboard: DashboardConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: default_api_url(),
			character_limit: 100,
			explorer: ExplorerConfig::default(),
			analytics: AnalyticsConfig::default(),
			dashboard: DashboardConfig::default(),
		}
	}
}

impl AppConfig {
	/// Parse a JSON override; absent keys keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let mut config: AppConfig = serde_json::from_str(text)?;
		config.explorer.max_depth = config.explorer.max_depth.max(1);
		config.explorer.default_depth = config.explorer.clamp_depth(config.explorer.default_depth);
		Ok(config)
	}
}

/// Settings of the network exploration view.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
	pub default_depth: u32,
	/// Upper bound of the depth slider.
	pub max_depth: u32,
	/// Result cap of neighbor (multi-hop) queries.
	pub neighbor_limit: u32,
	/// Depth of the full-network view around its seed.
	pub full_depth: u32,
	/// Character anchoring the full-network view. `None` uses the first
	/// character of the loaded list.
	pub full_seed: Option<String>,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			default_depth: 2,
			max_depth: 5,
			neighbor_limit: 500,
			full_depth: 3,
			full_seed: None,
		}
	}
}

impl ExplorerConfig {
	pub fn clamp_depth(&self, depth: u32) -> u32 {
		depth.clamp(1, self.max_depth.max(1))
	}
}

/// Settings of the analytics tab.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
	pub centrality_limit: u32,
	pub shortest_path_max_len: u32,
	pub shortest_path_k: u32,
	pub complex_max_hops: u32,
	pub complex_limit: u32,
	/// Depth of the subgraph sampled for network statistics.
	pub stats_depth: u32,
}

impl Default for AnalyticsConfig {
	fn default() -> Self {
		Self {
			centrality_limit: 20,
			shortest_path_max_len: 15,
			shortest_path_k: 1,
			complex_max_hops: 4,
			complex_limit: 50,
			stats_depth: 3,
		}
	}
}

/// Settings of the dashboard tab.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
	/// Depth of the sample network around the first character.
	pub sample_depth: u32,
	pub top_characters: u32,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			sample_depth: 2,
			top_characters: 10,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_override_keeps_defaults() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn partial_override_merges_nested_sections() {
		let config = AppConfig::from_json(
			r#"{"api_base_url": "https://kingdoms.example", "explorer": {"neighbor_limit": 120, "full_seed": "Tào Tháo"}}"#,
		)
		.unwrap();
		assert_eq!(config.api_base_url, "https://kingdoms.example");
		assert_eq!(config.explorer.neighbor_limit, 120);
		assert_eq!(config.explorer.full_seed.as_deref(), Some("Tào Tháo"));
		assert_eq!(config.explorer.max_depth, 5);
		assert_eq!(config.analytics, AnalyticsConfig::default());
	}

	#[test]
	fn default_depth_is_kept_within_bounds() {
		let config =
			AppConfig::from_json(r#"{"explorer": {"default_depth": 9, "max_depth": 0}}"#).unwrap();
		assert_eq!(config.explorer.max_depth, 1);
		assert_eq!(config.explorer.default_depth, 1);
	}

	#[test]
	fn malformed_override_is_an_error() {
		assert!(AppConfig::from_json(r#"{"character_limit": "many"}"#).is_err());
	}
}
