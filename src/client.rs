//! Authenticated request lifecycle manager.
//!
//! [`SessionClient`] wraps every outgoing call with credential attachment,
//! detects expiry (HTTP 401), performs a single-flight credential refresh,
//! replays the original call at most once, and binds all in-flight work to
//! the shared [`CancelScope`]. The refresher never raises to the caller of
//! the original request: a failed refresh clears the credential, aborts the
//! current cancellation generation, and lets `send` hand the original 401
//! back so callers interpret it as "not authenticated".

mod counters;

pub use counters::RefreshCounters;

// self
use crate::{
	_prelude::*,
	cancel::{CancelScope, ScopedToken},
	http::{HttpMethod, HttpTransport, TransportRequest, TransportResponse},
	obs::{self, OpKind, OpOutcome, OpSpan},
	session::Session,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Endpoints that must be called without an attached access credential.
const CREDENTIAL_EXEMPT: &[&str] =
	&["/login", "/register", "/forgot_password", "/reset_password", "/check_code"];
/// Endpoint that trades the refresh credential cookie for a new access token.
const REFRESH_ENDPOINT: &str = "/refresh";

/// Access token payload returned by the refresh endpoint.
#[derive(Deserialize)]
struct RefreshGrant {
	access_token: String,
}

/// Immutable description of one service call.
///
/// `retry_attempted` bounds the post-refresh replay to exactly one,
/// independent of how the lifecycle loop is structured.
#[derive(Clone, Debug)]
pub struct RequestEnvelope {
	/// Endpoint path relative to the configured base URL.
	pub endpoint: String,
	/// HTTP method.
	pub method: HttpMethod,
	/// JSON-encoded request body, when the method carries one.
	pub body: Option<Vec<u8>>,
	/// Set once the envelope has been replayed after a refresh.
	pub retry_attempted: bool,
}
impl RequestEnvelope {
	/// Builds a `GET` envelope.
	pub fn get(endpoint: impl Into<String>) -> Self {
		Self { endpoint: endpoint.into(), method: HttpMethod::Get, body: None, retry_attempted: false }
	}

	/// Builds a `DELETE` envelope.
	pub fn delete(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			method: HttpMethod::Delete,
			body: None,
			retry_attempted: false,
		}
	}

	/// Builds a `POST` envelope carrying `payload` as JSON.
	pub fn post<P>(endpoint: impl Into<String>, payload: &P) -> Result<Self, ConfigError>
	where
		P: ?Sized + Serialize,
	{
		Ok(Self {
			endpoint: endpoint.into(),
			method: HttpMethod::Post,
			body: Some(serde_json::to_vec(payload)?),
			retry_attempted: false,
		})
	}

	/// Returns true for endpoints that never receive the bearer header.
	pub fn is_credential_exempt(&self) -> bool {
		CREDENTIAL_EXEMPT.contains(&self.endpoint.as_str())
	}
}

/// Facade coordinating credential attachment, refresh, retry, and cancellation
/// for a single logical session against one remote service.
///
/// The client owns the [`Session`] and [`CancelScope`]; callers may issue many
/// concurrent [`send`](Self::send) calls from independent tasks without any
/// global lock serializing ordinary requests. Only the refresh exchange is
/// single-flight.
pub struct SessionClient<T>
where
	T: ?Sized + HttpTransport,
{
	base_url: Url,
	transport: Arc<T>,
	session: Arc<Session>,
	cancel: Arc<CancelScope>,
	refresh_gate: Arc<AsyncMutex<()>>,
	refresh_counters: Arc<RefreshCounters>,
}
impl<T> SessionClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(base_url: Url, transport: impl Into<Arc<T>>) -> Self {
		Self {
			base_url,
			transport: transport.into(),
			session: Default::default(),
			cancel: Default::default(),
			refresh_gate: Default::default(),
			refresh_counters: Default::default(),
		}
	}

	/// Session state shared by every call issued through this client.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Cancellation scope shared by every call issued through this client.
	pub fn cancel_scope(&self) -> &CancelScope {
		&self.cancel
	}

	/// Counters describing refresh behavior, useful for tests and dashboards.
	pub fn refresh_counters(&self) -> &RefreshCounters {
		&self.refresh_counters
	}

	/// Base URL the client was constructed with.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Cancels every in-flight request and mints a fresh cancellation
	/// generation so subsequent calls proceed normally.
	pub fn abort_all(&self) {
		self.cancel.abort_all();
	}

	/// Executes one service call through the full lifecycle.
	///
	/// Fails fast with [`Error::Cancelled`] when the active generation is
	/// already aborted. On a 401 with no prior replay, drives the
	/// single-flight refresher; if the credential is restored the envelope is
	/// replayed exactly once, otherwise the original 401 response is returned
	/// as an `Ok` value. Every other status passes through unchanged.
	pub async fn send(&self, envelope: RequestEnvelope) -> Result<TransportResponse> {
		const KIND: OpKind = OpKind::Request;

		let span = OpSpan::new(KIND, "send");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result = span.instrument(self.send_inner(envelope)).await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}

	async fn send_inner(&self, mut envelope: RequestEnvelope) -> Result<TransportResponse> {
		loop {
			let scoped = self.cancel.current();

			if scoped.is_cancelled() {
				return Err(Error::Cancelled);
			}

			let url = self.endpoint_url(&envelope.endpoint)?;
			let mut headers = vec![("content-type", "application/json".to_owned())];

			if !envelope.is_credential_exempt()
				&& let Some(bearer) = self.session.bearer()
			{
				headers.push(("authorization", bearer));
			}

			// Snapshot before dispatch so a settlement that races this request
			// is still visible to the single-flight check below.
			let observed_epoch = self.session.refresh_epoch();
			let request =
				TransportRequest { method: envelope.method, url, headers, body: envelope.body.clone() };
			let response = self.execute_raced(request, &scoped).await?;

			if response.is_unauthorized() && !envelope.retry_attempted {
				self.refresh_access_token(observed_epoch).await;

				if !self.session.is_authenticated() {
					// The refresh failed; hand back the original 401 so the
					// caller observes "not authenticated" instead of an error.
					return Ok(response);
				}

				envelope.retry_attempted = true;

				continue;
			}

			return Ok(response);
		}
	}

	/// Performs the refresh exchange with single-flight semantics.
	///
	/// Only the first caller to observe the idle gate starts the network
	/// exchange; everyone who queued while it was pending compares
	/// `observed_epoch` against the session's settled-refresh counter and
	/// adopts the outcome when it advanced. Failure (non-2xx, transport
	/// error, cancellation, or an undecodable grant) clears the credential
	/// and aborts the current cancellation generation; no error is raised.
	async fn refresh_access_token(&self, observed_epoch: u64) {
		const KIND: OpKind = OpKind::Refresh;

		let span = OpSpan::new(KIND, "refresh_access_token");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);
		self.refresh_counters.record_attempt();

		span.instrument(async {
			let _singleflight = self.refresh_gate.lock().await;

			if self.session.refresh_epoch() != observed_epoch {
				self.refresh_counters.record_joined();

				return;
			}
			if self.exchange_refresh().await {
				self.refresh_counters.record_success();
				obs::record_op_outcome(KIND, OpOutcome::Success);
			} else {
				self.session.clear_access_token();
				self.cancel.abort_all();
				self.refresh_counters.record_failure();
				obs::record_op_outcome(KIND, OpOutcome::Failure);
			}

			self.session.settle_refresh();
		})
		.await
	}

	/// Runs the `GET /refresh` exchange and stores the new credential.
	/// Returns false on any failure; the caller handles the fallout.
	async fn exchange_refresh(&self) -> bool {
		let Ok(url) = self.endpoint_url(REFRESH_ENDPOINT) else {
			return false;
		};
		let scoped = self.cancel.current();
		let request = TransportRequest {
			method: HttpMethod::Get,
			url,
			headers: vec![("content-type", "application/json".to_owned())],
			body: None,
		};
		let Ok(response) = self.execute_raced(request, &scoped).await else {
			return false;
		};

		if !response.is_success() {
			return false;
		}

		match response.json::<RefreshGrant>() {
			Ok(grant) => {
				self.session.set_access_token(grant.access_token);

				true
			},
			Err(_) => false,
		}
	}

	/// Races the transport against the request's cancellation token so an
	/// abort is reported as [`Error::Cancelled`] rather than a network error.
	async fn execute_raced(
		&self,
		request: TransportRequest,
		scoped: &ScopedToken,
	) -> Result<TransportResponse> {
		tokio::select! {
			outcome = self.transport.execute(request) => outcome.map_err(|err| {
				if scoped.is_cancelled() { Error::Cancelled } else { Error::from(err) }
			}),
			_ = scoped.token.cancelled() => Err(Error::Cancelled),
		}
	}

	fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		// Plain concatenation keeps any path prefix carried by the base URL.
		let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint);

		Url::parse(&raw)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), source })
	}
}
#[cfg(feature = "reqwest")]
impl SessionClient<ReqwestTransport> {
	/// Creates a client backed by the crate's default reqwest transport.
	///
	/// The transport enables a cookie store so the refresh credential cookie
	/// set at sign-in propagates to `/refresh`.
	pub fn new(base_url: Url) -> Result<Self> {
		Ok(Self::with_transport(base_url, ReqwestTransport::new()?))
	}
}
impl<T> Clone for SessionClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			base_url: self.base_url.clone(),
			transport: self.transport.clone(),
			session: self.session.clone(),
			cancel: self.cancel.clone(),
			refresh_gate: self.refresh_gate.clone(),
			refresh_counters: self.refresh_counters.clone(),
		}
	}
}
impl<T> Debug for SessionClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionClient")
			.field("base_url", &self.base_url.as_str())
			.field("authenticated", &self.session.is_authenticated())
			.field("generation", &self.cancel.generation())
			.finish()
	}
}
