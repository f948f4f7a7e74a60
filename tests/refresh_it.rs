#![cfg(feature = "reqwest")]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use heimdall_client::{_preludet::*, auth::ForgetPasswordCredentials};

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
async fn expired_credential_is_refreshed_and_the_call_replayed_once() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	heimdall.client().session().set_access_token("stale");

	let stale_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"token expired"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","access_token":"fresh"}"#);
		})
		.await;
	let replayed_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer fresh");
			then.status(200).header("content-type", "application/json").body(USER_BODY);
		})
		.await;
	let session = heimdall
		.auth
		.get_session()
		.await
		.expect("Session fetch should succeed after refresh.")
		.expect("Refreshed session should be present.");

	stale_call.assert_async().await;
	refresh.assert_async().await;
	replayed_call.assert_async().await;

	assert_eq!(session.user.name, "Ada");
	assert_eq!(heimdall.client().refresh_counters().attempts(), 1);
	assert_eq!(heimdall.client().refresh_counters().successes(), 1);
}

#[tokio::test]
async fn a_replayed_401_is_returned_without_a_second_refresh() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	heimdall.client().session().set_access_token("stale");

	// The service keeps rejecting even the freshly minted credential.
	let rejected_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"token expired"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/refresh");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"status":"success","access_token":"fresh"}"#);
		})
		.await;
	let session = heimdall.auth.get_session().await.expect("A surviving 401 is not an error.");

	assert!(session.is_none());

	refresh.assert_hits_async(1).await;
	rejected_call.assert_hits_async(2).await;
}

#[tokio::test]
async fn failed_refresh_surfaces_the_original_401_and_clears_the_credential() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	heimdall.client().session().set_access_token("stale");

	let rejected_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"token expired"}"#);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/refresh");
			then.status(500)
				.header("content-type", "application/json")
				.body(r#"{"status":"error","message":"database down"}"#);
		})
		.await;
	let session = heimdall.auth.get_session().await.expect("A surviving 401 is not an error.");

	rejected_call.assert_hits_async(1).await;
	refresh.assert_hits_async(1).await;

	assert!(session.is_none());
	assert!(!heimdall.client().session().is_authenticated());
	assert_eq!(heimdall.client().refresh_counters().failures(), 1);

	// The failure aborted the old generation; a credential-exempt call on the
	// freshly minted generation must still go through.
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
		.expect("The client must remain usable after a failed refresh.");

	forgot.assert_async().await;

	assert_eq!(response.message, "recovery email sent");
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh_exchange() {
	let server = MockServer::start_async().await;
	let heimdall = build_test_facade(&server.base_url());

	heimdall.client().session().set_access_token("stale");

	let _stale_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"status":"fail","message":"token expired"}"#);
		})
		.await;
	// The delay holds the refresh pending until every caller has observed
	// its 401 and queued on the gate.
	let refresh = server
		.mock_async(|when, then| {
			when.method(GET).path("/refresh");
			then.status(200)
				.delay(Duration::from_millis(300))
				.header("content-type", "application/json")
				.body(r#"{"status":"success","access_token":"fresh"}"#);
		})
		.await;
	let _replayed_call = server
		.mock_async(|when, then| {
			when.method(GET).path("/users/me").header("authorization", "Bearer fresh");
			then.status(200).header("content-type", "application/json").body(USER_BODY);
		})
		.await;
	let tasks: Vec<_> = (0..3)
		.map(|_| {
			let auth = heimdall.auth.clone();

			tokio::spawn(async move { auth.get_session().await })
		})
		.collect();

	for task in tasks {
		let session = task
			.await
			.expect("Session task should not panic.")
			.expect("Session fetch should succeed after the shared refresh.")
			.expect("Every caller should observe the refreshed session.");

		assert_eq!(session.user.id, "u-1");
	}

	refresh.assert_hits_async(1).await;

	let counters = heimdall.client().refresh_counters();

	assert_eq!(counters.attempts(), 3);
	assert_eq!(counters.joined(), 2);
	assert_eq!(counters.successes(), 1);
}
