mod analysis;
mod analyzer;
mod result;
mod trigger;
mod widget;

pub use analysis::GapAnalysis;
pub use widget::SkillGapWidget;
