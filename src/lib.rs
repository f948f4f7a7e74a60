//! Async client SDK for the Heimdall identity and permissions service. It
//! bundles bearer session management, single-flight token refresh, and
//! generation-scoped cancellation behind one facade.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cancel;
pub mod client;
pub mod error;
pub mod http;
pub mod obs;
pub mod perms;
pub mod provider;
pub mod session;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{Heimdall, client::SessionClient, http::ReqwestTransport};

	/// Session client type used by reqwest-backed integration tests.
	pub type ReqwestTestClient = SessionClient<ReqwestTransport>;

	/// Builds a session client pointed at a mock server's base URL.
	pub fn build_test_client(base_url: &str) -> ReqwestTestClient {
		let url = Url::parse(base_url).expect("Mock server base URL should parse.");

		SessionClient::new(url).expect("Failed to build reqwest session client for tests.")
	}

	/// Builds the full facade over a fresh test client.
	pub fn build_test_facade(base_url: &str) -> Heimdall<ReqwestTransport> {
		Heimdall::with_transport(
			Url::parse(base_url).expect("Mock server base URL should parse."),
			ReqwestTransport::new().expect("Failed to build reqwest transport for tests."),
		)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{ConfigError, Error, RemoteError, Result, TransportError};
}

// self
use crate::{_prelude::*, auth::Auth, client::SessionClient, http::HttpTransport, perms::Perms};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Entry point bundling the auth and perms surfaces over one shared
/// [`SessionClient`], so a sign-out or fatal refresh failure cancels every
/// in-flight request on both surfaces.
pub struct Heimdall<T>
where
	T: ?Sized + HttpTransport,
{
	/// Session operations (sign-in, sign-out, password recovery, ...).
	pub auth: Auth<T>,
	/// Tenant and permission operations.
	pub perms: Perms<T>,
}
impl<T> Heimdall<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the facade over a caller-provided transport.
	pub fn with_transport(base_url: Url, transport: impl Into<Arc<T>>) -> Self {
		let client = SessionClient::with_transport(base_url, transport);

		Self { auth: Auth::new(client.clone()), perms: Perms::new(client) }
	}

	/// The session client shared by both surfaces.
	pub fn client(&self) -> &SessionClient<T> {
		self.auth.client()
	}
}
#[cfg(feature = "reqwest")]
impl Heimdall<ReqwestTransport> {
	/// Builds the facade with the crate's default reqwest transport.
	pub fn new(base_url: Url) -> Result<Self> {
		let client = SessionClient::new(base_url)?;

		Ok(Self { auth: Auth::new(client.clone()), perms: Perms::new(client) })
	}
}
impl<T> Clone for Heimdall<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { auth: self.auth.clone(), perms: self.perms.clone() }
	}
}
impl<T> Debug for Heimdall<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Heimdall").field("client", self.auth.client()).finish()
	}
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use heimdall_client as _;
#[cfg(test)] use httpmock as _;
