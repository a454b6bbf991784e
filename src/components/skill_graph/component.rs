use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::render;
use super::state::SkillGraphState;
use super::types::{Skill, WeakSkillSet};

const MIN_HEIGHT: f64 = 300.0;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

/// CSS size of the canvas plus the device pixel ratio.
fn measure(canvas: &HtmlCanvasElement, window: &Window) -> (f64, f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	let dpr = window.device_pixel_ratio();
	(rect.width(), rect.height().max(MIN_HEIGHT), dpr)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Current weak set, or `None` once the owning widget has been disposed.
fn weak_snapshot(weak: Signal<WeakSkillSet>) -> Option<WeakSkillSet> {
	weak.try_get_untracked()
}

fn cursor_for(hovered: Option<&str>) -> &'static str {
	if hovered.is_some() { "pointer" } else { "default" }
}

fn redraw(canvas: &HtmlCanvasElement, state: &SkillGraphState, weak: Signal<WeakSkillSet>) {
	let (Some(ctx), Some(weak_now)) = (context_2d(canvas), weak_snapshot(weak)) else {
		return;
	};
	render::render(state, &weak_now, &ctx);
}

fn apply_hover(
	canvas: &HtmlCanvasElement,
	state: &mut SkillGraphState,
	hovered: Option<&'static str>,
	weak: Signal<WeakSkillSet>,
) {
	if !state.set_hover(hovered) {
		return;
	}
	let _ = HtmlElement::style(canvas).set_property("cursor", cursor_for(hovered));
	redraw(canvas, state, weak);
}

#[component]
pub fn SkillGraphCanvas(
	skills: &'static [Skill],
	#[prop(into)] weak: Signal<WeakSkillSet>,
	#[prop(into)] on_toggle: Callback<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<SkillGraphState>>> = Rc::new(RefCell::new(None));
	let resize_cb = StoredValue::new_local(None::<Closure<dyn FnMut()>>);
	let state_draw = state.clone();

	// Any change to the weak set or the mounted canvas triggers a full redraw.
	Effect::new(move |_| {
		let weak_now = weak.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("no window; skipping skill graph draw");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("2d context unavailable; skipping skill graph draw");
			return;
		};

		let (w, h, dpr) = measure(&canvas, &window);
		canvas.set_width((w * dpr) as u32);
		canvas.set_height((h * dpr) as u32);

		let mut slot = state_draw.borrow_mut();
		let s = slot.get_or_insert_with(|| SkillGraphState::new(skills, w, h, dpr));
		s.resize(w, h);
		s.dpr = dpr;
		render::render(s, &weak_now, &ctx);
		drop(slot);

		if resize_cb.with_value(Option::is_some) {
			return;
		}
		let (state_resize, canvas_resize) = (state_draw.clone(), canvas.clone());
		let cb = Closure::<dyn FnMut()>::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh, ndpr) = measure(&canvas_resize, &win);
			canvas_resize.set_width((nw * ndpr) as u32);
			canvas_resize.set_height((nh * ndpr) as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
				s.dpr = ndpr;
				redraw(&canvas_resize, s, weak);
			}
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		resize_cb.set_value(Some(cb));
	});

	// The listener outlives the component otherwise: detach and drop it on unmount.
	on_cleanup(move || {
		let Some(cb) = resize_cb.try_update_value(Option::take).flatten() else {
			return;
		};
		if let Some(window) = web_sys::window() {
			let _ =
				window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let hit = state_click
			.borrow()
			.as_ref()
			.and_then(|s| s.node_at_position(x, y));
		if let Some(id) = hit {
			debug!("[SkillGap] hit {id} at ({x:.1}, {y:.1})");
			on_toggle.run(id.to_owned());
		}
	};

	let state_hover = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_hover.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			apply_hover(&canvas, s, hovered, weak);
		}
	};

	let state_leave = state;
	let on_mouseleave = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut s) = *state_leave.borrow_mut() {
			apply_hover(&canvas, s, None, weak);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="skill-graph-canvas"
			on:click=on_click
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%; min-height: 300px;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use leptos::reactive::owner::Owner;

	use super::*;

	#[test]
	fn cursor_follows_hover() {
		assert_eq!(cursor_for(Some("dsa")), "pointer");
		assert_eq!(cursor_for(None), "default");
	}

	#[test]
	fn weak_set_reads_none_after_widget_disposal() {
		let owner = Owner::new();
		let weak = owner.with(|| {
			let set: WeakSkillSet = ["py"].into_iter().collect();
			Signal::from(RwSignal::new(set))
		});
		assert_eq!(weak_snapshot(weak).map(|w| w.len()), Some(1));

		owner.cleanup();
		assert_eq!(weak_snapshot(weak), None);
	}
}
