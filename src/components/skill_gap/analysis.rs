use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::skill_graph::{Skill, WeakSkillSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapStatus {
	Strong,
	Moderate,
	Critical,
}

impl GapStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			GapStatus::Strong => "Strong",
			GapStatus::Moderate => "Moderate",
			GapStatus::Critical => "Critical",
		}
	}

	/// Badge classes for the presenter.
	pub fn badge_class(self) -> &'static str {
		match self {
			GapStatus::Strong => "gap-status gap-status--strong",
			GapStatus::Moderate => "gap-status gap-status--moderate",
			GapStatus::Critical => "gap-status gap-status--critical",
		}
	}
}

impl fmt::Display for GapStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Structured assessment returned by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
	pub status: GapStatus,
	pub summary: String,
	pub missing_concepts: Vec<String>,
	pub recommended_focus: String,
}

impl GapAnalysis {
	/// Shown whenever the analysis call fails for any reason.
	pub fn fallback() -> Self {
		Self {
			status: GapStatus::Moderate,
			summary: "Analysis unavailable. Focus on the highlighted nodes.".into(),
			missing_concepts: vec!["Basics".into()],
			recommended_focus: "Review Fundamentals".into(),
		}
	}

	/// Shown when no analyzer endpoint was configured at build time.
	pub fn unconfigured() -> Self {
		Self {
			status: GapStatus::Moderate,
			summary: "Analyzer endpoint missing. Set SKILLGAP_ANALYZER_URL when building the app."
				.into(),
			missing_concepts: vec![
				"Configuration".into(),
				"Environment Variables".into(),
				"API Keys".into(),
			],
			recommended_focus: "Setup the project environment variables.".into(),
		}
	}

	/// Parses the model's JSON answer, tolerating a Markdown code fence.
	pub fn from_model_text(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(strip_code_fence(text))
	}
}

fn strip_code_fence(text: &str) -> &str {
	let t = text.trim();
	let Some(rest) = t.strip_prefix("```") else {
		return t;
	};
	// drop an optional language tag on the opening line
	let body = rest.split_once('\n').map_or(rest, |(_, b)| b);
	body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Payload sent to the analysis proxy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
	pub prompt: String,
	pub weak_skills: Vec<String>,
}

impl AnalysisRequest {
	pub fn new(catalog: &[Skill], weak: &WeakSkillSet) -> Self {
		let weak_skills: Vec<String> = weak
			.skills_in(catalog)
			.map(|s| s.label.to_owned())
			.collect();
		let prompt = build_prompt(&weak_skills.join(", "));
		Self {
			prompt,
			weak_skills,
		}
	}
}

fn build_prompt(weak_skill_names: &str) -> String {
	format!(
		"Context: You are a senior engineering mentor.
Task: Analyze a computer science student's self-assessment.
Weaknesses Identified: {weak_skill_names}.

Output JSON with these fields:
1. status (Strong/Moderate/Critical)
2. summary (One short sentence explaining why this combination is bad)
3. missingConcepts (Array of 3 technical terms)
4. recommendedFocus (One specific topic to study)"
	)
}
