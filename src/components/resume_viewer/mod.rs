mod button;
mod lease;
mod viewer;

pub use button::ResumeButton;
pub use viewer::ResumeLeases;
