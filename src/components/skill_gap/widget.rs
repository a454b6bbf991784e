use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use super::analysis::{AnalysisRequest, GapAnalysis};
use super::analyzer::{ProxyAnalyzer, analyze_or_fallback};
use super::result::AnalysisResult;
use super::trigger::{AnalysisTrigger, Settle, Ticket};
use crate::api::RequestContext;
use crate::browser;
use crate::components::skill_graph::{SKILLS, SkillGraphCanvas, WeakSkillSet};
use crate::components::toast::use_toasts;
use crate::config::AppConfig;
use crate::export::{self, CSV_MIME, GapReport, JSON_MIME};

/// Skill graph, debounced analysis and result panel in one card.
#[component]
pub fn SkillGapWidget() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let ctx = use_context::<RequestContext>()
		.unwrap_or_else(|| RequestContext::new(config.api_base_url.clone(), None));
	let analyzer = ProxyAnalyzer::new(ctx, config.analyzer_url.clone());
	let toasts = use_toasts();

	let weak = RwSignal::new(WeakSkillSet::default());
	let analysis = RwSignal::new(None::<GapAnalysis>);
	let loading = RwSignal::new(false);

	let trigger: Rc<RefCell<AnalysisTrigger<Timeout>>> =
		Rc::new(RefCell::new(AnalysisTrigger::new(config.debounce_ms)));

	Effect::new(move |_| {
		let current = weak.get();
		// The armed timeout only holds a weak handle, so unmounting drops the
		// trigger and with it any pending timeout.
		let handle = Rc::downgrade(&trigger);
		let analyzer = analyzer.clone();
		let arm = move |ticket: Ticket, delay_ms: u32| {
			Timeout::new(delay_ms, move || {
				let Some(trigger) = handle.upgrade() else {
					return;
				};
				let Some(settled) = trigger.borrow_mut().fire(ticket) else {
					return;
				};
				loading.try_set(true);
				let request = AnalysisRequest::new(SKILLS, &settled);
				spawn_local(async move {
					let result = analyze_or_fallback(&analyzer, &request).await;
					if trigger.borrow_mut().complete(ticket) {
						analysis.try_set(Some(result));
						loading.try_set(false);
					} else {
						debug!("[SkillGap] dropped stale analysis for {ticket:?}");
					}
				});
			})
		};

		let settle = trigger.borrow_mut().on_change(&current, arm);
		match settle {
			Settle::Reset => {
				analysis.set(None);
				loading.set(false);
			}
			Settle::Scheduled { ticket, delay_ms } => debug!(
				"[SkillGap] active weak skills: {} {:?}, {ticket:?} due in {delay_ms}ms",
				current.len(),
				current.ids().collect::<Vec<_>>()
			),
		}
	});

	let toggle = Callback::new(move |id: String| {
		weak.update(|set| {
			if set.toggle(&id) {
				debug!("[SkillGap] added key: {id}");
			} else {
				debug!("[SkillGap] removed key: {id}");
			}
		});
	});

	let report = move || {
		GapReport::new(SKILLS, &weak.get_untracked(), analysis.get_untracked(), browser::now_ms())
	};
	let export_csv = move |_| {
		let report = report();
		match export::download(&report.filename("csv"), CSV_MIME, &report.csv()) {
			Ok(()) => toasts.success("CSV exported"),
			Err(err) => toasts.error(format!("Export failed: {err}")),
		};
	};
	let export_json = move |_| {
		let report = report();
		let result = export::to_json_pretty(&report)
			.and_then(|json| export::download(&report.filename("json"), JSON_MIME, &json));
		match result {
			Ok(()) => toasts.success("JSON exported"),
			Err(err) => toasts.error(format!("Export failed: {err}")),
		};
	};

	let has_weakness = Signal::derive(move || weak.with(|w| !w.is_empty()));

	view! {
		<section class="skill-gap-widget">
			<header class="skill-gap-widget__header">
				<div>
					<h2>"SkillGap AI"</h2>
					<p class="subtitle">"Tap skills to identify gaps"</p>
				</div>
				<Show when=move || analysis.with(Option::is_some)>
					<span class="pill">"AI Active"</span>
				</Show>
			</header>

			<div class="skill-gap-widget__grid">
				<div class="skill-gap-widget__graph">
					<div class="legend">
						<span class="legend__dot"></span>
						"Strong"
					</div>
					<SkillGraphCanvas skills=SKILLS weak=weak on_toggle=toggle />
				</div>

				<div class="skill-gap-widget__result">
					<AnalysisResult analysis=analysis loading=loading has_weakness=has_weakness />
				</div>
			</div>

			<footer class="skill-gap-widget__actions">
				<button class="btn btn--outline" disabled=move || !has_weakness.get() on:click=export_csv>
					"Export CSV"
				</button>
				<button class="btn btn--outline" disabled=move || !has_weakness.get() on:click=export_json>
					"Export JSON"
				</button>
			</footer>
		</section>
	}
}
