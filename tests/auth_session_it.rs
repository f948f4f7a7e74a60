#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use heimdall_client::{
	_preludet::*,
	auth::{ForgetPasswordCredentials, LoginCredentials, SocialSignInRequest},
	provider::OAuthProvider,
};

const USER_BODY: &str = r#"{
	"user": {
		"id": "u-1",
		"email": "ada@example.com",
		"name": "Ada",
		"verified": true,
		"role": "",
		"photo": "",
		"createdAt": "2024-01-02T03:04:05Z",
		"updatedAt": "2024-01-02T03:04:05Z"
	}
}"#;

#[tokio::test]
async fn sign_in_stores_credential_and_returns_the_session() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());
	let login = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/login")
				.header_missing("authorization")
				.json_body(json!({ "email": "ada@example.com", "password": "hunter2" }));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","access_token":"tok-1"}"#);
		})
		.await;
	let me = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer tok-1");
			then.status(200).header("content-type", "application/json").body(USER_BODY);
		})
		.await;
	let session = heimdall
		.auth
		.sign_in_email(&LoginCredentials {
			email: "ada@example.com".into(),
			password: "hunter2".into(),
		})
		.await
		.expect("Sign-in should succeed.");

	login.assert_async().await;
	me.assert_async().await;

	assert_eq!(session.user.email, "ada@example.com");
	assert!(heimdall.client().session().is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_the_credential_and_advances_the_generation() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	heimdall.client().session().set_access_token("tok-1");

	let logout = server
		.mock_async(|when, then| {
			when.method(GET).path("/logout").header("authorization", "Bearer tok-1");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let generation_before = heimdall.client().cancel_scope().generation();

	heimdall.auth.sign_out().await.expect("Sign-out should succeed.");
	logout.assert_async().await;

	assert!(!heimdall.client().session().is_authenticated());
	assert_eq!(heimdall.client().cancel_scope().generation(), generation_before + 1);
}

#[tokio::test]
async fn credential_exempt_endpoints_never_carry_the_bearer_header() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	// A present credential must still be withheld from exempt endpoints.
	heimdall.client().session().set_access_token("tok-1");

	let forgot = server
		.mock_async(|when, then| {
			when.method(POST).path("/forgot_password").header_missing("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"message":"recovery email sent"}"#);
		})
		.await;
	let response = heimdall
		.auth
		.forget_password(&ForgetPasswordCredentials {
			email: "ada@example.com".into(),
			redirect_to: None,
		})
		.await
		.expect("Forget password should succeed without a bearer header.");

	forgot.assert_async().await;

	assert_eq!(response.message, "recovery email sent");
}

#[tokio::test]
async fn social_sign_in_merges_required_scopes_for_an_empty_request() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());
	let oauth_url = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/url").json_body(json!({
				"provider": "google",
				"callback_url": "https://app.example/callback",
				"scopes": "email,openid,profile"
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"url":"https://accounts.google.com/o/oauth2/v2/auth?state=xyz"}"#);
		})
		.await;
	let response = heimdall
		.auth
		.sign_in_social(SocialSignInRequest::new(
			OAuthProvider::Google,
			"https://app.example/callback",
		))
		.await
		.expect("Social sign-in should resolve an authorization URL.");

	oauth_url.assert_async().await;

	assert!(response.url.starts_with("https://accounts.google.com/"));
}

#[tokio::test]
async fn social_sign_in_dedups_caller_supplied_scopes() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());
	let oauth_url = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/url").json_body(json!({
				"provider": "tiktok",
				"callback_url": "https://app.example/callback",
				"scopes": "user.info.basic,video.list"
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"url":"https://www.tiktok.com/v2/auth/authorize"}"#);
		})
		.await;

	heimdall
		.auth
		.sign_in_social(
			SocialSignInRequest::new(OAuthProvider::TikTok, "https://app.example/callback")
				.with_scopes(["video.list", "user.info.basic"]),
		)
		.await
		.expect("Social sign-in should resolve an authorization URL.");

	oauth_url.assert_async().await;
}

#[tokio::test]
async fn check_code_maps_a_dead_401_to_an_absent_result() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());
	let check = server
		.mock_async(|when, then| {
			when.method(POST).path("/check_code").json_body(json!({ "code": "1234" }));
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"expired"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/refresh");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"no refresh cookie"}"#);
		})
		.await;
	let result = heimdall.auth.check_code("1234").await.expect("A surviving 401 is not an error.");

	check.assert_async().await;
	refresh.assert_async().await;

	assert!(result.is_none());
}
