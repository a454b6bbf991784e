use super::types::{NodePosition, Skill, anchor_of};

pub const NODE_RADIUS: f64 = 24.0;

/// Drawing surface geometry plus transient pointer state.
#[derive(Clone, Debug)]
pub struct SkillGraphState {
	pub skills: &'static [Skill],
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
	pub hovered: Option<&'static str>,
}

impl SkillGraphState {
	pub fn new(skills: &'static [Skill], width: f64, height: f64, dpr: f64) -> Self {
		Self {
			skills,
			width,
			height,
			dpr: if dpr > 0.0 { dpr } else { 1.0 },
			hovered: None,
		}
	}

	pub fn position_of(&self, id: &str) -> Option<NodePosition> {
		anchor_of(id).map(|a| a.resolve(self.width, self.height))
	}

	/// Skills that have a layout slot, paired with their centers.
	pub fn placed(&self) -> impl Iterator<Item = (&'static Skill, NodePosition)> + '_ {
		self.skills
			.iter()
			.filter_map(|s| self.position_of(s.id).map(|p| (s, p)))
	}

	/// First skill (in catalog order) whose circle strictly contains the point.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<&'static str> {
		let r2 = NODE_RADIUS * NODE_RADIUS;
		self.placed()
			.find(|(_, p)| {
				let (dx, dy) = (x - p.x, y - p.y);
				dx * dx + dy * dy < r2
			})
			.map(|(s, _)| s.id)
	}

	pub fn set_hover(&mut self, id: Option<&'static str>) -> bool {
		if self.hovered == id {
			return false;
		}
		self.hovered = id;
		true
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
