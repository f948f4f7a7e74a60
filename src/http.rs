//! Transport primitives for authenticated service calls.
//!
//! The module exposes [`HttpTransport`] alongside [`TransportRequest`] and
//! [`TransportResponse`] so downstream crates can integrate custom HTTP stacks.
//! The trait covers raw execution only: credential attachment, 401 recovery,
//! and cancellation racing all live in [`SessionClient`](crate::client::SessionClient),
//! so an implementation never needs to know about the session state machine.

// self
use crate::_prelude::*;

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing JSON service calls.
///
/// The trait acts as the client's only dependency on an HTTP implementation.
/// Implementations must be `Send + Sync + 'static` so they can be shared
/// behind `Arc<T>` across concurrent callers, and must preserve any cookies
/// the remote service sets: the refresh credential travels as a cookie, so a
/// cookie-less transport silently breaks token renewal.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes the request and resolves with the raw response.
	///
	/// Implementations report network and IO failures through
	/// [`TransportError`]; HTTP error statuses are ordinary responses and are
	/// interpreted by the caller.
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// HTTP methods used by the Heimdall service surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved request handed to the transport; immutable per call.
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute request URL.
	pub url: Url,
	/// Header name/value pairs, already including auth and content type.
	pub headers: Vec<(&'static str, String)>,
	/// JSON-encoded request body, when the method carries one.
	pub body: Option<Vec<u8>>,
}

/// Raw response surfaced by the transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response header name/value pairs.
	pub headers: Vec<(String, String)>,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns true for the expiry status the session layer recovers from.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Decodes the JSON body into `T`, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T>
	where
		T: for<'de> Deserialize<'de>,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
			Error::from(ConfigError::ResponseParse { source, status: self.status })
		})
	}

	/// Builds a [`RemoteError`] for this response, preferring the server's
	/// `message` field over the caller-supplied context.
	pub fn remote_error(&self, context: &str) -> RemoteError {
		#[derive(Deserialize)]
		struct ServerMessage {
			message: String,
		}

		let message = serde_json::from_slice::<ServerMessage>(&self.body)
			.map(|m| m.message)
			.unwrap_or_else(|_| context.to_owned());

		RemoteError { status: self.status, message }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The default construction enables a cookie store, which the service
/// contract requires: the refresh credential is exchanged as a cookie while
/// the access credential rides in the bearer header.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with cookie persistence enabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().cookie_store(true).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// Configure the provided client with a cookie store, otherwise refresh
	/// credentials never reach the `/refresh` endpoint.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(*name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|v| (name.as_str().to_owned(), v.to_owned()))
				})
				.collect();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(TransportResponse { status, headers, body })
		})
	}
}
