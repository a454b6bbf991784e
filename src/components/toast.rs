use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_MS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
	Info,
	Success,
	Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
	pub id: u64,
	pub kind: ToastKind,
	pub message: String,
}

/// Transient notifications, shared through context.
#[derive(Clone, Copy)]
pub struct Toasts {
	items: RwSignal<Vec<Toast>>,
	next_id: StoredValue<u64>,
}

impl Toasts {
	pub fn new() -> Self {
		Self {
			items: RwSignal::new(Vec::new()),
			next_id: StoredValue::new(0),
		}
	}

	pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
		let id = self.next_id.get_value();
		self.next_id.set_value(id + 1);
		let toast = Toast {
			id,
			kind,
			message: message.into(),
		};
		self.items.update(|items| items.push(toast));
		let items = self.items;
		Timeout::new(TOAST_MS, move || {
			items.try_update(|items| items.retain(|t| t.id != id));
		})
		.forget();
		id
	}

	pub fn info(&self, message: impl Into<String>) -> u64 {
		self.push(ToastKind::Info, message)
	}

	pub fn success(&self, message: impl Into<String>) -> u64 {
		self.push(ToastKind::Success, message)
	}

	pub fn error(&self, message: impl Into<String>) -> u64 {
		self.push(ToastKind::Error, message)
	}

	pub fn dismiss(&self, id: u64) {
		self.items.update(|items| items.retain(|t| t.id != id));
	}
}

impl Default for Toasts {
	fn default() -> Self {
		Self::new()
	}
}

/// Toasts from context, or a detached set if none was provided.
pub fn use_toasts() -> Toasts {
	use_context::<Toasts>().unwrap_or_default()
}

#[component]
pub fn ToastHost() -> impl IntoView {
	let toasts = use_toasts();
	view! {
		<div class="toast-host" aria-live="polite">
			<For
				each=move || toasts.items.get()
				key=|t: &Toast| t.id
				children=move |t: Toast| {
					let class = match t.kind {
						ToastKind::Info => "toast toast--info",
						ToastKind::Success => "toast toast--success",
						ToastKind::Error => "toast toast--error",
					};
					let id = t.id;
					view! {
						<div class=class on:click=move |_| toasts.dismiss(id)>
							{t.message}
						</div>
					}
				}
			/>
		</div>
	}
}
