//! Client-level error types shared across the session, auth, and perms surfaces.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// A 401 that survives a failed refresh is deliberately absent from this
/// taxonomy: it is surfaced as the original response (or an absent-session
/// `Ok(None)`), never as an error value.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Request or refresh aborted via the session's abort scope.
	#[error("Request was cancelled by the session's abort scope.")]
	Cancelled,
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Non-2xx, non-401 response from the remote service.
	#[error(transparent)]
	Remote(#[from] RemoteError),
	/// Transport failure (DNS, TCP, TLS) unrelated to cancellation or auth.
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns true if the error represents a cancellation.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

/// Non-2xx, non-401 response propagated with status and message intact.
#[derive(Debug, ThisError)]
#[error("Remote service returned {status}: {message}.")]
pub struct RemoteError {
	/// HTTP status code returned by the remote service.
	pub status: u16,
	/// Server-supplied message when the body carried one, caller context otherwise.
	pub message: String,
}

/// Configuration and validation failures raised locally.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint `{endpoint}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// The offending endpoint path.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request payload could not be serialized to JSON.
	#[error("Request payload could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// Response body could not be decoded into the expected shape.
	#[error("Response body could not be decoded.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the undecodable response.
		status: u16,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the remote service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn cancelled_is_distinguishable() {
		assert!(Error::Cancelled.is_cancelled());
		assert!(!Error::from(RemoteError { status: 500, message: "boom".into() }).is_cancelled());
	}

	#[test]
	fn remote_error_displays_status_and_message() {
		let err = RemoteError { status: 503, message: "Service Unavailable".into() };

		assert_eq!(err.to_string(), "Remote service returned 503: Service Unavailable.");
	}
}
