use leptos::prelude::*;

use crate::components::skill_gap::SkillGapWidget;

/// Student dashboard hosting the skill gap widget.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="dashboard">
				<div class="dashboard__intro">
					<h1>"Your Placement Readiness"</h1>
					<p class="subtitle">"Flag the skills you feel least confident about to get a focused study plan."</p>
				</div>
				<SkillGapWidget />
			</main>
		</ErrorBoundary>
	}
}
