use thiserror::Error;

/// Failure of a call against the backend or the analysis proxy.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("request could not be sent: {0}")]
	Transport(String),
	#[error("server answered {status}: {body}")]
	Status { status: u16, body: String },
	#[error("response body could not be read: {0}")]
	Body(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		ApiError::Transport(err.to_string())
	}
}
