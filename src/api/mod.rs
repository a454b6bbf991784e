//! Calls against the placement backend.

mod context;
mod error;

pub use context::{RequestContext, ensure_ok};
pub use error::ApiError;
