//! Build-time configuration.
//!
//! A CSR bundle has no process environment at runtime, so settings are baked
//! in when the crate is compiled and handed to components through context.

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_DEBOUNCE_MS: u32 = 800;

/// Settings shared by every page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Root of the REST backend, without a trailing slash.
	pub api_base_url: String,
	/// Server-side proxy for the gap analysis model. `None` disables analysis.
	pub analyzer_url: Option<String>,
	/// Settle window before a gap analysis is requested.
	pub debounce_ms: u32,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_BASE_URL.to_owned(),
			analyzer_url: None,
			debounce_ms: DEFAULT_DEBOUNCE_MS,
		}
	}
}

impl AppConfig {
	/// Reads the values captured by `option_env!` at compile time.
	pub fn from_build_env() -> Self {
		Self::from_lookup(|key| match key {
			"SKILLGAP_API_BASE_URL" => option_env!("SKILLGAP_API_BASE_URL"),
			"SKILLGAP_ANALYZER_URL" => option_env!("SKILLGAP_ANALYZER_URL"),
			"SKILLGAP_DEBOUNCE_MS" => option_env!("SKILLGAP_DEBOUNCE_MS"),
			_ => None,
		})
	}

	pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
		let defaults = Self::default();
		let non_empty = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());

		let api_base_url = non_empty("SKILLGAP_API_BASE_URL")
			.map(|v| v.trim_end_matches('/').to_owned())
			.unwrap_or(defaults.api_base_url);
		let analyzer_url = non_empty("SKILLGAP_ANALYZER_URL").map(str::to_owned);
		let debounce_ms = match non_empty("SKILLGAP_DEBOUNCE_MS") {
			Some(raw) => raw.parse().unwrap_or_else(|_| {
				log::warn!("invalid SKILLGAP_DEBOUNCE_MS {raw:?}, using {DEFAULT_DEBOUNCE_MS}");
				DEFAULT_DEBOUNCE_MS
			}),
			None => defaults.debounce_ms,
		};

		Self {
			api_base_url,
			analyzer_url,
			debounce_ms,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_lookup_yields_defaults() {
		assert_eq!(AppConfig::from_lookup(|_| None), AppConfig::default());
		assert_eq!(AppConfig::default().debounce_ms, 800);
	}

	#[test]
	fn lookup_overrides_and_normalizes() {
		let cfg = AppConfig::from_lookup(|key| match key {
			"SKILLGAP_API_BASE_URL" => Some("https://placement.example.edu/api/"),
			"SKILLGAP_ANALYZER_URL" => Some("  "),
			"SKILLGAP_DEBOUNCE_MS" => Some("250"),
			_ => None,
		});
		assert_eq!(cfg.api_base_url, "https://placement.example.edu/api");
		assert_eq!(cfg.analyzer_url, None);
		assert_eq!(cfg.debounce_ms, 250);
	}

	#[test]
	fn bad_debounce_falls_back() {
		let cfg = AppConfig::from_lookup(|key| (key == "SKILLGAP_DEBOUNCE_MS").then_some("soon"));
		assert_eq!(cfg.debounce_ms, 800);
	}
}
