//! Leptos client-side skill gap dashboard: wiring, context and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod browser;
mod components;
mod config;
mod export;
mod pages;

use crate::api::RequestContext;
use crate::components::resume_viewer::ResumeLeases;
use crate::components::toast::{ToastHost, Toasts};
use crate::config::AppConfig;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::resume::StudentResume;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the dashboard and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_build_env();
	info!(
		"backend {} | analyzer {}",
		config.api_base_url,
		config.analyzer_url.as_deref().unwrap_or("<unset>")
	);
	provide_context(RequestContext::from_browser(config.api_base_url.clone()));
	provide_context(config);
	provide_context(Toasts::new());

	let leases = ResumeLeases::new();
	provide_context(leases);
	on_cleanup(move || leases.release_all());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="SkillGap AI" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/students/:id/resume") view=StudentResume />
			</Routes>
		</Router>
		<ToastHost />
	}
}
