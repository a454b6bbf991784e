pub mod resume_viewer;
pub mod skill_gap;
pub mod skill_graph;
pub mod toast;
