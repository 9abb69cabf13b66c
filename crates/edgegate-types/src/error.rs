use axum::{Json, http::StatusCode, response::IntoResponse};

pub type EgResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	/// A collaborator call did not answer within the configured deadline
	Timeout,
	/// A collaborator answered, but with an error
	Collaborator(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Timeout => write!(f, "collaborator timed out"),
			Error::Collaborator(msg) => write!(f, "collaborator error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, code) = match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-NOT-FOUND"),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "E-PERMISSION"),
			Error::Timeout => (StatusCode::GATEWAY_TIMEOUT, "E-TIMEOUT"),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "E-INTERNAL"),
		};
		let body = serde_json::json!({
			"error": {
				"code": code,
				"message": self.to_string(),
			}
		});
		(status, Json(body)).into_response()
	}
}

// vim: ts=4
