//! Tenant management and permission checks layered over the shared client.
//!
//! Unlike the session operations there is no token handling here at all;
//! every call rides the same lifecycle (`bearer attachment, refresh, retry`)
//! through [`SessionClient::send`].

pub mod types;

pub use types::*;

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	client::{RequestEnvelope, SessionClient},
	http::HttpTransport,
};

/// Wire payload for `POST /permissions/check`: the caller's body with the
/// tenant identifier merged in.
#[derive(Serialize)]
struct CheckRequest<'a> {
	#[serde(rename = "tenantId")]
	tenant_id: &'a str,
	#[serde(flatten)]
	body: &'a CheckBody,
}

/// Permission and tenant surface layered over a shared [`SessionClient`].
pub struct Perms<T>
where
	T: ?Sized + HttpTransport,
{
	client: SessionClient<T>,
}
impl<T> Clone for Perms<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone() }
	}
}
impl<T> Debug for Perms<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Perms").field("client", &self.client).finish()
	}
}
impl<T> Perms<T>
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

	/// Creates a tenant.
	pub async fn tenant_create(&self, body: &TenantCreateRequest) -> Result<TenantCreateResponse> {
		let response = self.client.send(RequestEnvelope::post("/tenants", body)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Tenant creation failed").into());
		}

		response.json()
	}

	/// Deletes a tenant by identifier.
	pub async fn tenant_delete(&self, tenant_id: &str) -> Result<TenantDeleteResponse> {
		let response =
			self.client.send(RequestEnvelope::delete(format!("/tenants/{tenant_id}"))).await?;

		if !response.is_success() {
			return Err(response.remote_error("Tenant deletion failed").into());
		}

		response.json()
	}

	/// Lists tenants, optionally paginated.
	pub async fn tenant_list(
		&self,
		options: Option<&TenantListRequest>,
	) -> Result<TenantListResponse> {
		let mut endpoint = "/tenants".to_owned();

		if let Some(options) = options {
			// Continuation tokens are opaque and may carry reserved characters.
			let mut query = form_urlencoded::Serializer::new(String::new());

			if let Some(page_size) = options.page_size {
				query.append_pair("page_size", &page_size.to_string());
			}
			if let Some(token) = &options.continuous_token {
				query.append_pair("continuous_token", token);
			}

			let query = query.finish();

			if !query.is_empty() {
				endpoint = format!("{endpoint}?{query}");
			}
		}

		let response = self.client.send(RequestEnvelope::get(endpoint)).await?;

		if !response.is_success() {
			return Err(response.remote_error("Tenant listing failed").into());
		}

		response.json()
	}

	/// Evaluates a permission check within the given tenant.
	pub async fn check(
		&self,
		tenant_id: &str,
		body: &CheckBody,
	) -> Result<PermissionCheckResponse> {
		let payload = CheckRequest { tenant_id, body };
		let response =
			self.client.send(RequestEnvelope::post("/permissions/check", &payload)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Permission check failed").into());
		}

		response.json()
	}

	/// Writes an authorization schema for the given tenant.
	pub async fn write_schema(
		&self,
		tenant_id: &str,
		body: &SchemaWriteRequest,
	) -> Result<SchemaWriteResponse> {
		let response =
			self.client.send(RequestEnvelope::post(format!("/schemas/{tenant_id}"), body)?).await?;

		if !response.is_success() {
			return Err(response.remote_error("Schema write failed").into());
		}

		response.json()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn check_request_merges_the_tenant_identifier() {
		let body = CheckBody {
			permission: Some("read".into()),
			entity: Some(Entity { kind: Some("document".into()), id: Some("doc-1".into()) }),
			..Default::default()
		};
		let json = serde_json::to_value(CheckRequest { tenant_id: "t-1", body: &body })
			.expect("Check request should serialize.");

		assert_eq!(json["tenantId"], "t-1");
		assert_eq!(json["permission"], "read");
		assert_eq!(json["entity"]["type"], "document");
	}
}
