//! Client-side CSV and JSON export.

use std::borrow::Cow;

use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::browser;
use crate::components::skill_gap::GapAnalysis;
use crate::components::skill_graph::{Skill, WeakSkillSet};

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";
pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Error)]
pub enum ExportError {
	#[error("could not serialize export: {0}")]
	Json(#[from] serde_json::Error),
	#[error("browser refused the download: {0}")]
	Browser(String),
}

fn csv_field(field: &str) -> Cow<'_, str> {
	if field.contains([',', '"', '\n']) {
		Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
	} else {
		Cow::Borrowed(field)
	}
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
	fields
		.iter()
		.map(|f| csv_field(f.as_ref()))
		.collect::<Vec<_>>()
		.join(",")
}

pub fn to_csv<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
	std::iter::once(csv_line(headers))
		.chain(rows.iter().map(|r| csv_line(r)))
		.collect::<Vec<_>>()
		.join("\n")
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
	Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportSkill {
	pub id: &'static str,
	pub label: &'static str,
	pub category: &'static str,
}

/// Snapshot of the widget: flagged skills plus the displayed analysis.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
	pub generated_at: f64,
	pub weak_skills: Vec<ReportSkill>,
	pub analysis: Option<GapAnalysis>,
}

impl GapReport {
	pub fn new(
		catalog: &'static [Skill],
		weak: &WeakSkillSet,
		analysis: Option<GapAnalysis>,
		generated_at: f64,
	) -> Self {
		let weak_skills = weak
			.skills_in(catalog)
			.map(|s| ReportSkill {
				id: s.id,
				label: s.label,
				category: s.category.as_str(),
			})
			.collect();
		Self {
			generated_at,
			weak_skills,
			analysis,
		}
	}

	pub fn csv(&self) -> String {
		const HEADERS: &[&str] = &["Skill ID", "Skill", "Category", "Status", "Recommended Focus"];
		let (status, focus) = self
			.analysis
			.as_ref()
			.map(|a| (a.status.as_str(), a.recommended_focus.as_str()))
			.unwrap_or(("", ""));
		let rows: Vec<Vec<&str>> = self
			.weak_skills
			.iter()
			.map(|s| vec![s.id, s.label, s.category, status, focus])
			.collect();
		to_csv(HEADERS, &rows)
	}

	pub fn filename(&self, ext: &str) -> String {
		format!("skill_gap_{}.{ext}", self.generated_at as u64)
	}
}

/// Saves `contents` through a temporary anchor; the object URL is revoked at once.
pub fn download(filename: &str, mime: &str, contents: &str) -> Result<(), ExportError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ExportError::Browser("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| ExportError::Browser("no body".into()))?;

	let blob = browser::blob_from_str(contents, mime).map_err(ExportError::Browser)?;
	let url = browser::object_url(&blob).map_err(ExportError::Browser)?;

	let result = (|| {
		let link: HtmlAnchorElement = document
			.create_element("a")
			.map_err(browser::js_error)?
			.dyn_into()
			.map_err(|_| "anchor cast failed".to_owned())?;
		link.set_href(&url);
		link.set_download(filename);
		body.append_child(&link).map_err(browser::js_error)?;
		link.click();
		body.remove_child(&link).map_err(browser::js_error)?;
		Ok::<_, String>(())
	})();

	browser::revoke(&url);
	result.map_err(ExportError::Browser)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::SKILLS;

	#[test]
	fn csv_quotes_only_when_needed() {
		let rows = vec![
			vec!["APP-1", "Priya Patel", "Applied"],
			vec!["APP-2", "Doe, Jane", "said \"hi\""],
			vec!["APP-3", "multi\nline", ""],
		];
		let csv = to_csv(&["ID", "Name", "Status"], &rows);
		assert_eq!(
			csv,
			"ID,Name,Status\nAPP-1,Priya Patel,Applied\nAPP-2,\"Doe, Jane\",\"said \"\"hi\"\"\"\nAPP-3,\"multi\nline\","
		);
	}

	#[test]
	fn report_rows_follow_catalog_order() {
		let weak: WeakSkillSet = ["sql", "py"].into_iter().collect();
		let report = GapReport::new(SKILLS, &weak, Some(GapAnalysis::fallback()), 1_700_000_000_000.0);
		assert_eq!(
			report.csv(),
			"Skill ID,Skill,Category,Status,Recommended Focus\n\
			 py,Python,core,Moderate,Review Fundamentals\n\
			 sql,SQL,data,Moderate,Review Fundamentals"
		);
		assert_eq!(report.filename("csv"), "skill_gap_1700000000000.csv");
	}

	#[test]
	fn json_export_is_pretty_camel_case() {
		let weak: WeakSkillSet = ["db"].into_iter().collect();
		let report = GapReport::new(SKILLS, &weak, None, 1.0);
		let json = to_json_pretty(&report).unwrap();
		assert!(json.contains("\n  \"weakSkills\": ["));
		assert!(json.contains("\"analysis\": null"));
		assert!(json.contains("\"category\": \"data\""));
	}
}
