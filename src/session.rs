//! In-memory session state: the access credential slot and refresh bookkeeping.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::_prelude::*;

/// Redacted access credential wrapper keeping the bearer string out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Process-lifetime session state owned by the session client.
///
/// The access credential is the only mutable shared state beyond the
/// cancellation generation; it is written exclusively by the refresher and
/// the sign-in/sign-out operations. `refresh_epoch` counts settled refresh
/// operations (success or failure) and backs the single-flight check: a
/// caller that queued on the refresh gate compares the epoch it observed at
/// its 401 against the current one, and adopts the settlement instead of
/// re-exchanging when they differ.
#[derive(Debug, Default)]
pub struct Session {
	access_token: RwLock<Option<TokenSecret>>,
	refresh_epoch: AtomicU64,
}
impl Session {
	/// Creates an empty, unauthenticated session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true while an access credential is present.
	pub fn is_authenticated(&self) -> bool {
		self.access_token.read().is_some()
	}

	/// Returns the current access credential, if any.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.access_token.read().clone()
	}

	/// Formats the `Authorization` header value when a credential is present.
	pub fn bearer(&self) -> Option<String> {
		self.access_token.read().as_ref().map(|secret| format!("Bearer {}", secret.expose()))
	}

	/// Stores a freshly issued access credential.
	pub fn set_access_token(&self, token: impl Into<String>) {
		*self.access_token.write() = Some(TokenSecret::new(token));
	}

	/// Clears the access credential (sign-out or failed refresh).
	pub fn clear_access_token(&self) {
		*self.access_token.write() = None;
	}

	/// Number of refresh operations that have settled so far.
	pub fn refresh_epoch(&self) -> u64 {
		self.refresh_epoch.load(Ordering::Acquire)
	}

	/// Marks one refresh operation as settled.
	pub(crate) fn settle_refresh(&self) {
		self.refresh_epoch.fetch_add(1, Ordering::AcqRel);
	}
}
