//! Session operations: sign-in, sign-up, sign-out, password recovery, and
//! session inspection.
//!
//! Every operation returns an explicit [`Result`]; the [`Callbacks`] adapter
//! exists for callers that prefer success/error hooks, and is a thin layer
//! over the result rather than part of the contract. An absent session
//! (a 401 that survived refresh) is modeled as `Ok(None)` where the remote
//! contract allows it, never as an error.

pub mod types;

pub use types::*;

// self
use crate::{
	_prelude::*,
	client::{RequestEnvelope, SessionClient},
	http::HttpTransport,
	provider,
};

/// Wire payload for `POST /oauth/url`.
#[derive(Serialize)]
struct OAuthUrlRequest<'a> {
	provider: &'a str,
	callback_url: &'a str,
	scopes: String,
}

/// Wire payload for `POST /check_code`.
#[derive(Serialize)]
struct CheckCodeRequest<'a> {
	code: &'a str,
}

/// Optional success/error hooks layered over operation results.
///
/// ```
/// use heimdall_client::auth::Callbacks;
///
/// let callbacks = Callbacks::new().on_success(|| println!("signed in"));
/// let result: heimdall_client::error::Result<()> = Ok(());
///
/// callbacks.settle(&result);
/// ```
#[derive(Default)]
pub struct Callbacks {
	on_success: Option<Box<dyn Fn() + Send + Sync>>,
	on_error: Option<Box<dyn Fn(&Error) + Send + Sync>>,
}
impl Callbacks {
	/// Creates an adapter with no hooks attached.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attaches a success hook.
	pub fn on_success(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
		self.on_success = Some(Box::new(hook));

		self
	}

	/// Attaches an error hook.
	pub fn on_error(mut self, hook: impl Fn(&Error) + Send + Sync + 'static) -> Self {
		self.on_error = Some(Box::new(hook));

		self
	}

	/// Invokes the matching hook for `result`.
	pub fn settle<T>(&self, result: &Result<T>) {
		match result {
			Ok(_) =>
				if let Some(hook) = &self.on_success {
					hook();
				},
			Err(err) =>
				if let Some(hook) = &self.on_error {
					hook(err);
				},
		}
	}
}
impl Debug for Callbacks {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Callbacks")
			.field("on_success", &self.on_success.is_some())
			.field("on_error", &self.on_error.is_some())
			.finish()
	}
}

/// Authentication surface layered over a shared [`SessionClient`].
pub struct Auth<T>
where
	T: ?Sized + HttpTransport,
{
	client: SessionClient<T>,
}
impl<T> Clone for Auth<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<T> Debug for Auth<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Auth").field("client", &self.client).finish()
	}
}
impl<T> Auth<T>
where
	T: ?Sized + HttpTransport,
{
	/// Wraps the shared session client.
	pub fn new(client: SessionClient<T>) -> Self {
		Self { client }
	}

	/// The underlying session client.
	pub fn client(&self) -> &SessionClient<T> {
		&self.client
	}

	/// Signs in with email + password, stores the access credential, and
	/// returns the authenticated session.
	pub async fn sign_in_email(&self, credentials: &LoginCredentials) -> Result<SessionResponse> {
		self.sign_in_grant("/login", credentials, "Login failed").await
	}

	/// Requests a magic link; when the service issues a credential directly,
	/// it is stored and the session is returned like an email sign-in.
	pub async fn sign_in_magic_link(
		&self,
		credentials: &MagicLinkCredentials,
	) -> Result<SessionResponse> {
		self.sign_in_grant("/generate_magiclink", credentials, "Magic link creation failed").await
	}

	/// Resolves a provider authorization URL for social sign-in.
	///
	/// The provider's required scope set is always merged into the request,
	/// even when the caller supplies none. The embedder is responsible for
	/// redirecting the user's browser to the returned URL.
	pub async fn sign_in_social(&self, request: SocialSignInRequest) -> Result<OAuthResponse> {
		let scopes = provider::merge_scopes(request.provider, request.scopes).join(",");
		let payload = OAuthUrlRequest {
			provider: request.provider.as_str(),
			callback_url: &request.callback_url,
			scopes,
		};
		let response = self.client.send(RequestEnvelope::post("/oauth/url", &payload)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Social authorization URL generation failed").into());
		}

		response.json()
	}

	/// Registers a new account, then signs it in with the same credentials.
	pub async fn sign_up_email(&self, credentials: &RegisterCredentials) -> Result<SessionResponse> {
		let response = self.client.send(RequestEnvelope::post("/register", credentials)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Registration failed").into());
		}

		let login = LoginCredentials {
			email: credentials.email.clone(),
			password: credentials.password.clone(),
		};

		self.sign_in_email(&login).await
	}

	/// Signs out: notifies the service, clears the access credential, and
	/// cancels every in-flight request.
	///
	/// The service response status is ignored on purpose; only transport or
	/// cancellation failures keep the local session alive.
	pub async fn sign_out(&self) -> Result<()> {
		let _response = self.client.send(RequestEnvelope::get("/logout")).await?;

		self.client.session().clear_access_token();
		self.client.abort_all();

		Ok(())
	}

	/// Starts password recovery for the provided email address.
	pub async fn forget_password(
		&self,
		credentials: &ForgetPasswordCredentials,
	) -> Result<ForgetPasswordResponse> {
		let response =
			self.client.send(RequestEnvelope::post("/forgot_password", credentials)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Forget password request failed").into());
		}

		response.json()
	}

	/// Completes password recovery with the emailed one-time code.
	pub async fn reset_password(
		&self,
		credentials: &ResetPasswordCredentials,
	) -> Result<ResetPasswordResponse> {
		let response =
			self.client.send(RequestEnvelope::post("/reset_password", credentials)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Password reset failed").into());
		}

		response.json()
	}

	/// Fetches the current session; `Ok(None)` means "not authenticated".
	pub async fn get_session(&self) -> Result<Option<SessionResponse>> {
		let response = self.client.send(RequestEnvelope::get("/users/me")).await?;

		if response.is_unauthorized() {
			return Ok(None);
		}
		if !response.is_success() {
			return Err(response.remote_error("Failed to get session").into());
		}

		response.json().map(Some)
	}

	/// Validates a one-time code; `Ok(None)` means "not authenticated".
	pub async fn check_code(&self, code: &str) -> Result<Option<CodeResponse>> {
		let response =
			self.client.send(RequestEnvelope::post("/check_code", &CheckCodeRequest { code })?).await?;

		if response.is_unauthorized() {
			return Ok(None);
		}
		if !response.is_success() {
			return Err(response.remote_error("Failed to check code").into());
		}

		response.json().map(Some)
	}

	async fn sign_in_grant<P>(
		&self,
		endpoint: &str,
		payload: &P,
		context: &str,
	) -> Result<SessionResponse>
	where
		P: Serialize,
	{
		let response = self.client.send(RequestEnvelope::post(endpoint, payload)?).await?;

		if !response.is_success() {
			return Err(response.remote_error(context).into());
		}

		let grant: AuthResponse = response.json()?;

		self.client.session().set_access_token(grant.access_token);

		match self.get_session().await? {
			Some(session) => Ok(session),
			None => Err(RemoteError {
				status: 401,
				message: "Failed to get user data after sign-in.".into(),
			}
			.into()),
		}
	}
}
