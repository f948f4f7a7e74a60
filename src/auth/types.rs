//! Request and response shapes for the session operation surface.
//!
//! Field names mirror the service wire format exactly; most payloads are
//! snake_case while the user record carries camelCase timestamps.

// self
use crate::{_prelude::*, provider::OAuthProvider};

/// Email/password sign-in payload for `POST /login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginCredentials {
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// Magic-link request payload for `POST /generate_magiclink`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MagicLinkCredentials {
	/// Account email address.
	pub email: String,
	/// URL the emailed link redirects back to.
	#[serde(rename = "redirectTo")]
	pub redirect_to: String,
}

/// Registration payload for `POST /register`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterCredentials {
	/// Display name.
	pub name: String,
	/// Account email address.
	pub email: String,
	/// Account password.
	pub password: String,
}

/// Password recovery payload for `POST /forgot_password`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForgetPasswordCredentials {
	/// Account email address.
	pub email: String,
	/// Optional URL the recovery email redirects back to.
	#[serde(rename = "redirectTo", skip_serializing_if = "Option::is_none")]
	pub redirect_to: Option<String>,
}

/// Password reset payload for `POST /reset_password`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetPasswordCredentials {
	/// Replacement password.
	pub password: String,
	/// One-time code from the recovery email.
	pub code: String,
}

/// Social sign-in request resolved into `POST /oauth/url`.
#[derive(Clone, Debug)]
pub struct SocialSignInRequest {
	/// Provider to build an authorization URL for.
	pub provider: OAuthProvider,
	/// URL the provider redirects back to after consent.
	pub callback_url: String,
	/// Caller-supplied scopes; the provider's required set is merged in.
	pub scopes: Vec<String>,
}
impl SocialSignInRequest {
	/// Creates a request with no caller-supplied scopes.
	pub fn new(provider: OAuthProvider, callback_url: impl Into<String>) -> Self {
		Self { provider, callback_url: callback_url.into(), scopes: Vec::new() }
	}

	/// Adds caller-supplied scopes on top of the provider's required set.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}
}

/// Credential grant returned by sign-in and refresh endpoints.
///
/// The refresh credential itself travels as a cookie; the body only ever
/// carries the access token (and, for completeness, an optional refresh
/// token some deployments include).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
	/// Opaque bearer string authorizing subsequent requests.
	pub access_token: String,
	/// Refresh credential, when the deployment returns it in the body.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
}

/// Authenticated user record returned by `GET /users/me`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
	/// Stable user identifier.
	pub id: String,
	/// Account email address.
	pub email: String,
	/// Display name.
	pub name: String,
	/// Whether the email address has been verified.
	pub verified: bool,
	/// Assigned role, when the deployment uses roles.
	#[serde(default)]
	pub role: String,
	/// Avatar URL, when set.
	#[serde(default)]
	pub photo: String,
	/// Account creation instant.
	#[serde(rename = "createdAt", with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	/// Last update instant.
	#[serde(rename = "updatedAt", with = "time::serde::rfc3339")]
	pub updated_at: OffsetDateTime,
}

/// Session payload wrapping the current user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionResponse {
	/// The authenticated user.
	pub user: User,
}

/// Result of validating a one-time code via `POST /check_code`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CodeResponse {
	/// Whether the code is still valid.
	pub is_valid: bool,
}

/// Acknowledgement returned by `POST /forgot_password`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForgetPasswordResponse {
	/// Human-readable confirmation.
	pub message: String,
}

/// Acknowledgement returned by `POST /reset_password`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
	/// Human-readable confirmation.
	pub message: String,
}

/// Authorization URL returned by `POST /oauth/url`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OAuthResponse {
	/// Provider authorization URL the embedder should redirect to.
	pub url: String,
}
