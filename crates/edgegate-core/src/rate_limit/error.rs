//! Rate Limiting Error Types
//!
//! Rejection rendering for the rate limiter. The 429 body is machine
//! readable and names the limited class; standard rate-limit headers are
//! attached for well-behaved clients.

use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::policy::RateLimitClass;

#[derive(Debug)]
pub enum RateLimitError {
	/// Request exceeded the window ceiling for its class
	Limited {
		class: RateLimitClass,
		limit: u32,
		retry_after: Duration,
	},
	/// The limiter backend itself failed and the deployment is configured
	/// to fail closed
	Unavailable,
}

impl std::fmt::Display for RateLimitError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RateLimitError::Limited { class, retry_after, .. } => {
				write!(f, "Rate limited ({}), retry after {:?}", class.as_str(), retry_after)
			}
			RateLimitError::Unavailable => write!(f, "Rate limiter unavailable"),
		}
	}
}

impl std::error::Error for RateLimitError {}

impl IntoResponse for RateLimitError {
	fn into_response(self) -> Response {
		match self {
			RateLimitError::Limited { class, limit, retry_after } => {
				// Round up so clients never retry a second early
				let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
				let body = serde_json::json!({
					"error": "rate_limited",
					"message": "Too many requests. Please try again later.",
					"rateLimitType": class.as_str(),
				});

				let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

				let headers = response.headers_mut();
				if let Ok(val) = limit.to_string().parse() {
					headers.insert("X-RateLimit-Limit", val);
				}
				headers.insert("X-RateLimit-Remaining", axum::http::HeaderValue::from_static("0"));
				if let Ok(val) = retry_secs.to_string().parse() {
					headers.insert("Retry-After", val);
				}

				response
			}
			RateLimitError::Unavailable => {
				let body = serde_json::json!({
					"error": "rate_limiter_unavailable",
					"message": "Request rejected: rate limiting is unavailable.",
				});
				(StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_limited_response_shape() {
		let err = RateLimitError::Limited {
			class: RateLimitClass::Login,
			limit: 10,
			retry_after: Duration::from_secs(90),
		};
		let response = err.into_response();

		assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
		let headers = response.headers();
		assert_eq!(headers.get("X-RateLimit-Limit").and_then(|v| v.to_str().ok()), Some("10"));
		assert_eq!(headers.get("X-RateLimit-Remaining").and_then(|v| v.to_str().ok()), Some("0"));
		assert_eq!(headers.get("Retry-After").and_then(|v| v.to_str().ok()), Some("90"));
	}

	#[test]
	fn test_retry_after_rounds_up() {
		let err = RateLimitError::Limited {
			class: RateLimitClass::PasswordReset,
			limit: 3,
			retry_after: Duration::from_millis(1500),
		};
		let response = err.into_response();
		assert_eq!(response.headers().get("Retry-After").and_then(|v| v.to_str().ok()), Some("2"));
	}

	#[test]
	fn test_unavailable_is_503() {
		let response = RateLimitError::Unavailable.into_response();
		assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
	}
}

// vim: ts=4
