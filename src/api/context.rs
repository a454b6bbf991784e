use gloo_net::http::{Request, RequestBuilder, Response};
use log::debug;

use super::error::ApiError;

const TOKEN_KEY: &str = "token";

/// Per-call request settings: where the backend lives and who is calling.
///
/// Passed explicitly (through Leptos context) instead of mutating a shared
/// client's default headers, so logging out is just dropping the token here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	base_url: String,
	token: Option<String>,
}

impl RequestContext {
	pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_owned();
		Self { base_url, token }
	}

	/// Context for `base_url` carrying whatever token the browser has stored.
	pub fn from_browser(base_url: impl Into<String>) -> Self {
		Self::new(base_url, stored_token())
	}

	pub fn url(&self, path: &str) -> String {
		if path.starts_with("http://") || path.starts_with("https://") {
			return path.to_owned();
		}
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}

	pub fn authorization(&self) -> Option<String> {
		self.token.as_ref().map(|t| format!("Bearer {t}"))
	}

	fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
		match self.authorization() {
			Some(value) => builder.header("Authorization", &value),
			None => builder,
		}
	}

	pub fn get(&self, path: &str) -> RequestBuilder {
		let url = self.url(path);
		debug!("GET {url}");
		self.authorize(Request::get(&url))
	}

	pub fn post(&self, path: &str) -> RequestBuilder {
		let url = self.url(path);
		debug!("POST {url}");
		self.authorize(Request::post(&url))
	}
}

/// Rejects non-2xx responses, keeping the body for diagnostics.
pub async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
	if response.ok() {
		return Ok(response);
	}
	let status = response.status();
	let body = response.text().await.unwrap_or_default();
	Err(ApiError::Status { status, body })
}

fn stored_token() -> Option<String> {
	web_sys::window()?
		.local_storage()
		.ok()
		.flatten()?
		.get_item(TOKEN_KEY)
		.ok()
		.flatten()
		.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_paths_with_single_slash() {
		let ctx = RequestContext::new("http://localhost:5000/api/", None);
		assert_eq!(ctx.url("/resumes/STU002"), "http://localhost:5000/api/resumes/STU002");
		assert_eq!(ctx.url("resumes/STU002/info"), "http://localhost:5000/api/resumes/STU002/info");
	}

	#[test]
	fn absolute_urls_pass_through() {
		let ctx = RequestContext::new("http://localhost:5000/api", None);
		assert_eq!(ctx.url("https://proxy.example.edu/gap"), "https://proxy.example.edu/gap");
	}

	#[test]
	fn bearer_header_only_with_token() {
		let anon = RequestContext::new("http://x", None);
		assert_eq!(anon.authorization(), None);

		let ctx = RequestContext::new("http://x", Some("abc123".into()));
		assert_eq!(ctx.authorization().as_deref(), Some("Bearer abc123"));
	}
}
