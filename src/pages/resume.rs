use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::resume_viewer::ResumeButton;

/// `/students/:id/resume?name=...`: opens a student's resume behind auth.
#[component]
pub fn StudentResume() -> impl IntoView {
	let params = use_params_map();
	let query = use_query_map();

	move || {
		let id = params.with(|p| p.get("id")).unwrap_or_default();
		let name = query
			.with(|q| q.get("name"))
			.filter(|n| !n.trim().is_empty())
			.unwrap_or_else(|| "Student".to_owned());

		view! {
			<main class="student-resume">
				<h1>{name.clone()}</h1>
				<p class="subtitle">{format!("Student ID {id}")}</p>
				<ResumeButton student_id=id student_name=name />
			</main>
		}
	}
}
