use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{NODE_RADIUS, SkillGraphState};
use super::types::{SKILL_EDGES, WeakSkillSet};

const EDGE_COLOR: &str = "#e2e8f0";
const WEAK_FILL: &str = "#f87171";
const WEAK_STROKE: &str = "#ef4444";
const WEAK_GLOW: &str = "rgba(239, 68, 68, 0.4)";
const LABEL_COLOR: &str = "#475569";
const LABEL_FONT: &str = "bold 12px Inter, sans-serif";

/// Full redraw of the graph in CSS pixel space.
pub fn render(state: &SkillGraphState, weak: &WeakSkillSet, ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_transform(state.dpr, 0.0, 0.0, state.dpr, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_nodes(state, weak, ctx);
}

fn draw_edges(state: &SkillGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);
	for (a, b) in SKILL_EDGES {
		let (Some(p1), Some(p2)) = (state.position_of(a), state.position_of(b)) else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(p1.x, p1.y);
		ctx.line_to(p2.x, p2.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &SkillGraphState, weak: &WeakSkillSet, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(LABEL_FONT);

	for (skill, pos) in state.placed() {
		let is_weak = weak.contains(skill.id);
		let base = skill.category.color();

		ctx.begin_path();
		let _ = ctx.arc(pos.x, pos.y, NODE_RADIUS, 0.0, 2.0 * PI);

		if is_weak {
			ctx.set_fill_style_str(WEAK_FILL);
			ctx.fill();
			ctx.set_stroke_style_str(WEAK_STROKE);
			ctx.set_line_width(3.0);
			ctx.stroke();

			// glow pass
			ctx.set_shadow_color(WEAK_GLOW);
			ctx.set_shadow_blur(15.0);
			ctx.stroke();
			ctx.set_shadow_blur(0.0);
		} else {
			ctx.set_fill_style_str(base);
			ctx.set_global_alpha(0.2);
			ctx.fill();
			ctx.set_global_alpha(1.0);

			let hovered = state.hovered == Some(skill.id);
			ctx.set_stroke_style_str(base);
			ctx.set_line_width(if hovered { 3.0 } else { 2.0 });
			ctx.stroke();
		}

		ctx.set_fill_style_str(if is_weak { "#fff" } else { LABEL_COLOR });
		let _ = ctx.fill_text(skill.label, pos.x, pos.y);
	}
}
