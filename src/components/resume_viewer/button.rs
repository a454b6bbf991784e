use leptos::prelude::*;
use leptos::task::spawn_local;

use super::viewer::{ResumeLeases, check_resume_availability, open_resume_securely};
use crate::api::RequestContext;
use crate::components::toast::use_toasts;

/// Opens a student's resume after checking that one exists.
#[component]
pub fn ResumeButton(
	#[prop(into)] student_id: String,
	#[prop(into)] student_name: String,
) -> impl IntoView {
	let ctx = use_context::<RequestContext>().unwrap_or_default();
	let leases = use_context::<ResumeLeases>().unwrap_or_default();
	let toasts = use_toasts();

	let has_resume = RwSignal::new(true);
	{
		let (ctx, student_id) = (ctx.clone(), student_id.clone());
		spawn_local(async move {
			let info = check_resume_availability(&ctx, &student_id).await;
			has_resume.try_set(info.has_resume);
		});
	}

	let title = {
		let name = student_name.clone();
		move || {
			if has_resume.get() {
				format!("View {name}'s resume")
			} else {
				"Resume not available".to_owned()
			}
		}
	};

	let on_click = move |_| {
		if !has_resume.get_untracked() {
			toasts.error(format!("{student_name} hasn't uploaded a resume yet"));
			return;
		}
		let (ctx, id, name) = (ctx.clone(), student_id.clone(), student_name.clone());
		spawn_local(async move {
			open_resume_securely(&ctx, leases, toasts, &id, &name).await;
		});
	};

	view! {
		<button
			class="btn btn--primary"
			disabled=move || !has_resume.get()
			title=title
			on:click=on_click
		>
			{move || if has_resume.get() { "View Resume" } else { "No Resume" }}
		</button>
	}
}
