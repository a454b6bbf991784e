use leptos::prelude::*;

use super::analysis::{GapAnalysis, GapStatus};

const TUTORIAL_SEARCH: &str = "https://www.youtube.com/results?search_query=";

/// What the result panel shows, in priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelState {
	Idle,
	Loading,
	Ready(GapAnalysis),
	Blank,
}

impl PanelState {
	pub fn from_inputs(has_weakness: bool, loading: bool, analysis: Option<&GapAnalysis>) -> Self {
		if !has_weakness {
			PanelState::Idle
		} else if loading {
			PanelState::Loading
		} else if let Some(a) = analysis {
			PanelState::Ready(a.clone())
		} else {
			PanelState::Blank
		}
	}
}

#[cfg(target_arch = "wasm32")]
pub fn encode_uri_component(input: &str) -> String {
	js_sys::encode_uri_component(input).into()
}

/// Native mirror of `encodeURIComponent` so link building is testable off the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn encode_uri_component(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for byte in input.bytes() {
		match byte {
			b'A'..=b'Z'
			| b'a'..=b'z'
			| b'0'..=b'9'
			| b'-'
			| b'_'
			| b'.'
			| b'!'
			| b'~'
			| b'*'
			| b'\''
			| b'('
			| b')' => out.push(byte as char),
			_ => out.push_str(&format!("%{byte:02X}")),
		}
	}
	out
}

pub fn tutorial_search_url(focus: &str) -> String {
	format!("{TUTORIAL_SEARCH}{}", encode_uri_component(&format!("{focus} tutorial")))
}

#[component]
pub fn AnalysisResult(
	#[prop(into)] analysis: Signal<Option<GapAnalysis>>,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] has_weakness: Signal<bool>,
) -> impl IntoView {
	let state = Memo::new(move |_| {
		analysis.with(|a| PanelState::from_inputs(has_weakness.get(), loading.get(), a.as_ref()))
	});

	move || match state.get() {
		PanelState::Idle => view! {
			<div class="gap-panel gap-panel--idle">
				<div class="gap-panel__icon">"🎯"</div>
				<h3>"Identify Your Gaps"</h3>
				<p>
					"Tap on the skills (circles) connected to your target role where you feel least confident."
				</p>
			</div>
		}
		.into_any(),
		PanelState::Loading => view! {
			<div class="gap-panel gap-panel--loading">
				<div class="spinner"></div>
				<p class="pulse">"Analyzing skill matrix..."</p>
				<p class="hint">"Waiting for the analysis service"</p>
			</div>
		}
		.into_any(),
		PanelState::Ready(a) => ready_view(a).into_any(),
		PanelState::Blank => ().into_any(),
	}
}

fn ready_view(a: GapAnalysis) -> impl IntoView {
	let icon = if a.status == GapStatus::Strong { "✓" } else { "!" };
	let href = tutorial_search_url(&a.recommended_focus);
	let chips = a
		.missing_concepts
		.into_iter()
		.map(|concept| view! { <span class="chip">{concept}</span> })
		.collect_view();

	view! {
		<div class="gap-panel gap-panel--ready">
			<div class={a.status.badge_class()}>
				<span class="gap-status__icon">{icon}</span>
				<div>
					<h4>{format!("{} Impact", a.status)}</h4>
					<p>{a.summary}</p>
				</div>
			</div>

			<div class="gap-missing">
				<h5>"Key Concepts Missing"</h5>
				<div class="chips">{chips}</div>
			</div>

			<div class="gap-focus">
				<h3>"Immediate Focus"</h3>
				<p>{a.recommended_focus}</p>
				<a href=href target="_blank" rel="noopener noreferrer" class="tutorial-link">
					"Watch Tutorials"
				</a>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idle_wins_over_everything() {
		let a = GapAnalysis::fallback();
		assert_eq!(PanelState::from_inputs(false, true, Some(&a)), PanelState::Idle);
	}

	#[test]
	fn loading_hides_previous_result() {
		let a = GapAnalysis::fallback();
		assert_eq!(PanelState::from_inputs(true, true, Some(&a)), PanelState::Loading);
		assert_eq!(PanelState::from_inputs(true, false, Some(&a)), PanelState::Ready(a));
		assert_eq!(PanelState::from_inputs(true, false, None), PanelState::Blank);
	}

	#[test]
	fn search_link_encodes_focus() {
		assert_eq!(
			tutorial_search_url("Review Fundamentals"),
			"https://www.youtube.com/results?search_query=Review%20Fundamentals%20tutorial"
		);
		assert_eq!(encode_uri_component("C++ & SQL/DB"), "C%2B%2B%20%26%20SQL%2FDB");
		assert_eq!(encode_uri_component("é"), "%C3%A9");
		assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
		assert_eq!(encode_uri_component("?#=:"), "%3F%23%3D%3A");
	}
}
