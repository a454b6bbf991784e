mod component;
mod render;
mod state;
mod types;

pub use component::SkillGraphCanvas;
pub use types::{SKILLS, Skill, WeakSkillSet};
