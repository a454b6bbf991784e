use std::future::Future;

use log::{error, info};
use thiserror::Error;

use super::analysis::{AnalysisRequest, GapAnalysis};
use crate::api::{ApiError, RequestContext, ensure_ok};

#[derive(Debug, Error)]
pub enum AnalyzeError {
	#[error("no analyzer endpoint configured")]
	NotConfigured,
	#[error(transparent)]
	Api(#[from] ApiError),
	#[error("analyzer returned an empty answer")]
	EmptyResponse,
	#[error("analyzer answer is not a gap analysis: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Turns a set of weak skills into a structured assessment.
pub trait SkillAnalyzer {
	fn analyze(
		&self,
		request: &AnalysisRequest,
	) -> impl Future<Output = Result<GapAnalysis, AnalyzeError>>;
}

/// Runs `analyzer`, replacing any failure with placeholder content.
pub async fn analyze_or_fallback<A: SkillAnalyzer>(
	analyzer: &A,
	request: &AnalysisRequest,
) -> GapAnalysis {
	match analyzer.analyze(request).await {
		Ok(analysis) => {
			info!("[SkillGap] analysis ready: {}", analysis.status);
			analysis
		}
		Err(AnalyzeError::NotConfigured) => {
			error!("[SkillGap] analyzer endpoint missing");
			GapAnalysis::unconfigured()
		}
		Err(err) => {
			error!("[SkillGap] analysis failed: {err}");
			GapAnalysis::fallback()
		}
	}
}

/// Posts the request to a server-side proxy that holds the model credentials.
#[derive(Clone, Debug)]
pub struct ProxyAnalyzer {
	ctx: RequestContext,
	endpoint: Option<String>,
}

impl ProxyAnalyzer {
	pub fn new(ctx: RequestContext, endpoint: Option<String>) -> Self {
		Self { ctx, endpoint }
	}
}

impl SkillAnalyzer for ProxyAnalyzer {
	async fn analyze(&self, request: &AnalysisRequest) -> Result<GapAnalysis, AnalyzeError> {
		let endpoint = self.endpoint.as_deref().ok_or(AnalyzeError::NotConfigured)?;
		let response = self
			.ctx
			.post(endpoint)
			.json(request)
			.map_err(ApiError::from)?
			.send()
			.await
			.map_err(ApiError::from)?;
		let response = ensure_ok(response).await?;
		let text = response
			.text()
			.await
			.map_err(|e| ApiError::Body(e.to_string()))?;
		if text.trim().is_empty() {
			return Err(AnalyzeError::EmptyResponse);
		}
		Ok(GapAnalysis::from_model_text(&text)?)
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::components::skill_gap::analysis::GapStatus;
	use crate::components::skill_graph::{SKILLS, WeakSkillSet};

	struct Canned(fn() -> Result<GapAnalysis, AnalyzeError>);

	impl SkillAnalyzer for Canned {
		async fn analyze(&self, _: &AnalysisRequest) -> Result<GapAnalysis, AnalyzeError> {
			(self.0)()
		}
	}

	fn request() -> AnalysisRequest {
		let weak: WeakSkillSet = ["py", "dsa"].into_iter().collect();
		AnalysisRequest::new(SKILLS, &weak)
	}

	#[test]
	fn network_failure_yields_fallback() {
		let failing = Canned(|| Err(ApiError::Transport("connection refused".into()).into()));
		let shown = block_on(analyze_or_fallback(&failing, &request()));
		assert_eq!(shown.status, GapStatus::Moderate);
		assert_eq!(shown.missing_concepts, ["Basics"]);
	}

	#[test]
	fn parse_failure_yields_fallback() {
		let garbled = Canned(|| Ok(GapAnalysis::from_model_text("{\"status\":")?));
		assert_eq!(block_on(analyze_or_fallback(&garbled, &request())), GapAnalysis::fallback());
	}

	#[test]
	fn missing_endpoint_yields_configuration_hint() {
		let proxy = ProxyAnalyzer::new(RequestContext::new("http://localhost:5000/api", None), None);
		let shown = block_on(analyze_or_fallback(&proxy, &request()));
		assert_eq!(shown, GapAnalysis::unconfigured());
	}

	#[test]
	fn success_passes_through() {
		let ok = Canned(|| {
			Ok(GapAnalysis {
				status: GapStatus::Critical,
				summary: "Python and DSA underpin most interviews.".into(),
				missing_concepts: vec!["Recursion".into()],
				recommended_focus: "Dynamic programming".into(),
			})
		});
		let shown = block_on(analyze_or_fallback(&ok, &request()));
		assert_eq!(shown.status, GapStatus::Critical);
		assert_eq!(shown.recommended_focus, "Dynamic programming");
	}
}
