use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use log::{error, info};
use serde::Deserialize;
use thiserror::Error;

use super::lease::BlobLeases;
use crate::api::{ApiError, RequestContext, ensure_ok};
use crate::browser;
use crate::components::toast::Toasts;

pub const LEASE_MS: u32 = 60_000;
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResumeError {
	#[error("not signed in")]
	Unauthorized,
	#[error("access denied")]
	Forbidden,
	#[error("student not found")]
	StudentNotFound,
	#[error("resume not found")]
	ResumeNotFound,
	#[error("server answered {0}")]
	Server(u16),
	#[error("network error: {0}")]
	Network(String),
	#[error("browser error: {0}")]
	Browser(String),
	#[error("popup blocked")]
	PopupBlocked,
}

impl From<ApiError> for ResumeError {
	fn from(err: ApiError) -> Self {
		match err {
			ApiError::Status { status: 401, .. } => ResumeError::Unauthorized,
			ApiError::Status { status: 403, .. } => ResumeError::Forbidden,
			ApiError::Status { status: 404, body } if body.contains("Student not found") => {
				ResumeError::StudentNotFound
			}
			ApiError::Status { status: 404, .. } => ResumeError::ResumeNotFound,
			ApiError::Status { status, .. } => ResumeError::Server(status),
			ApiError::Transport(msg) => ResumeError::Network(msg),
			ApiError::Body(msg) => ResumeError::Browser(msg),
		}
	}
}

impl ResumeError {
	pub fn user_message(&self, student_name: &str) -> String {
		match self {
			ResumeError::Unauthorized => "Please log in to view resumes".into(),
			ResumeError::Forbidden => {
				"Access denied: You don't have permission to view this resume".into()
			}
			ResumeError::StudentNotFound => "Student not found".into(),
			ResumeError::ResumeNotFound => format!("{student_name}'s resume not found"),
			ResumeError::Server(_) => "Failed to load resume. Please try again.".into(),
			ResumeError::Network(_) => "Network error: Unable to load resume".into(),
			ResumeError::Browser(_) => "Error loading resume".into(),
			ResumeError::PopupBlocked => "Please allow popups to view resume".into(),
		}
	}
}

/// Live resume blob URLs for the whole app, shared through context.
#[derive(Clone, Copy)]
pub struct ResumeLeases(StoredValue<BlobLeases>);

impl ResumeLeases {
	pub fn new() -> Self {
		Self(StoredValue::new(BlobLeases::default()))
	}

	fn acquire(&self, url: &str) {
		self.0.update_value(|l| l.acquire(url));
	}

	/// Revokes `url` unless something else already did.
	pub fn release(&self, url: &str) {
		let owned = self.0.try_update_value(|l| l.release(url)).unwrap_or(false);
		if owned {
			browser::revoke(url);
		}
	}

	/// Revokes every outstanding URL. Called when the app is torn down.
	pub fn release_all(&self) {
		let urls = self.0.try_update_value(|l| l.drain()).unwrap_or_default();
		for url in &urls {
			browser::revoke(url);
		}
		if !urls.is_empty() {
			info!("released {} resume blob url(s)", urls.len());
		}
	}
}

impl Default for ResumeLeases {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInfo {
	#[serde(default)]
	pub has_resume: bool,
}

/// Whether the backend has a resume on file; any failure reads as "no".
pub async fn check_resume_availability(ctx: &RequestContext, student_id: &str) -> ResumeInfo {
	let result: Result<ResumeInfo, ApiError> = async {
		let response = ctx.get(&format!("resumes/{student_id}/info")).send().await?;
		let response = ensure_ok(response).await?;
		response
			.json()
			.await
			.map_err(|e| ApiError::Body(e.to_string()))
	}
	.await;
	result.unwrap_or_else(|err| {
		error!("resume availability check for {student_id} failed: {err}");
		ResumeInfo::default()
	})
}

async fn fetch_resume(ctx: &RequestContext, student_id: &str) -> Result<Vec<u8>, ResumeError> {
	let response = ctx
		.get(&format!("resumes/{student_id}"))
		.send()
		.await
		.map_err(ApiError::from)?;
	let response = ensure_ok(response).await?;
	Ok(response
		.binary()
		.await
		.map_err(|e| ApiError::Body(e.to_string()))?)
}

fn open_in_tab(bytes: &[u8], leases: ResumeLeases) -> Result<(), ResumeError> {
	let window = web_sys::window().ok_or_else(|| ResumeError::Browser("no window".into()))?;
	let blob = browser::blob_from_bytes(bytes, PDF_MIME).map_err(ResumeError::Browser)?;
	let url = browser::object_url(&blob).map_err(ResumeError::Browser)?;
	leases.acquire(&url);

	let opened = window
		.open_with_url_and_target(&url, "_blank")
		.ok()
		.flatten();
	if opened.is_none() {
		leases.release(&url);
		return Err(ResumeError::PopupBlocked);
	}

	Timeout::new(LEASE_MS, move || leases.release(&url)).forget();
	Ok(())
}

/// Fetches the PDF with the caller's credentials and opens it in a new tab.
pub async fn open_resume_securely(
	ctx: &RequestContext,
	leases: ResumeLeases,
	toasts: Toasts,
	student_id: &str,
	student_name: &str,
) {
	let loading = toasts.info("Opening resume...");
	let result = match fetch_resume(ctx, student_id).await {
		Ok(bytes) => open_in_tab(&bytes, leases),
		Err(err) => Err(err),
	};
	toasts.dismiss(loading);

	match result {
		Ok(()) => {
			info!("opened resume for {student_id}");
			toasts.success("Resume opened successfully");
		}
		Err(err) => {
			error!("resume loading error for {student_id}: {err}");
			toasts.error(err.user_message(student_name));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn status(status: u16, body: &str) -> ApiError {
		ApiError::Status {
			status,
			body: body.into(),
		}
	}

	#[test]
	fn status_codes_map_to_messages() {
		let name = "Priya Patel";
		let msg = |e: ApiError| ResumeError::from(e).user_message(name);
		assert_eq!(msg(status(401, "")), "Please log in to view resumes");
		assert!(msg(status(403, "")).starts_with("Access denied"));
		assert_eq!(msg(status(404, r#"{"error":"Student not found"}"#)), "Student not found");
		assert_eq!(msg(status(404, "{}")), "Priya Patel's resume not found");
		assert_eq!(msg(status(500, "")), "Failed to load resume. Please try again.");
		assert_eq!(
			msg(ApiError::Transport("offline".into())),
			"Network error: Unable to load resume"
		);
	}

	#[test]
	fn info_defaults_to_absent() {
		let info: ResumeInfo = serde_json::from_str(r#"{"hasResume":true,"studentId":"STU002"}"#).unwrap();
		assert!(info.has_resume);
		let info: ResumeInfo = serde_json::from_str("{}").unwrap();
		assert!(!info.has_resume);
	}
}
