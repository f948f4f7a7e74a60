//! Request and response shapes for the tenant and permission surface.
//!
//! The service fronts a relationship-based access control engine, so the
//! check body mirrors its entity/subject/context tuple vocabulary. Most
//! fields are optional on the wire; camelCase names follow the service.

// std
use std::collections::BTreeMap;
// self
use crate::_prelude::*;

/// Tenant creation payload for `POST /tenants`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TenantCreateRequest {
	/// Caller-chosen tenant identifier, when not server-assigned.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}

/// Tenant record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Tenant {
	/// Tenant identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Creation instant.
	#[serde(
		default,
		rename = "createdAt",
		with = "time::serde::rfc3339::option",
		skip_serializing_if = "Option::is_none"
	)]
	pub created_at: Option<OffsetDateTime>,
}

/// Response for `POST /tenants`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TenantCreateResponse {
	/// The created tenant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant: Option<Tenant>,
}

/// Response for `DELETE /tenants/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TenantDeleteResponse {
	/// The deleted tenant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant: Option<Tenant>,
}

/// Pagination options for `GET /tenants`.
#[derive(Clone, Debug, Default)]
pub struct TenantListRequest {
	/// Maximum number of tenants per page.
	pub page_size: Option<u32>,
	/// Continuation token from a previous page.
	pub continuous_token: Option<String>,
}

/// Response for `GET /tenants`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TenantListResponse {
	/// Tenants on this page.
	#[serde(default)]
	pub tenants: Vec<Tenant>,
	/// Continuation token for the next page, when more remain.
	#[serde(
		default,
		rename = "continuousToken",
		skip_serializing_if = "Option::is_none"
	)]
	pub continuous_token: Option<String>,
}

/// Entity reference (`type:id`) inside a permission check.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Entity {
	/// Entity type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Entity identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
}

/// Subject reference, optionally narrowed to a relation set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Subject {
	/// Subject type.
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Subject identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Relation narrowing the subject set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relation: Option<String>,
}

/// Evaluation metadata for a permission check.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckMetadata {
	/// Schema version to evaluate against.
	#[serde(default, rename = "schemaVersion", skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<String>,
	/// Snapshot token pinning the relationship state.
	#[serde(default, rename = "snapToken", skip_serializing_if = "Option::is_none")]
	pub snap_token: Option<String>,
	/// Maximum evaluation depth.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub depth: Option<u32>,
}

/// Contextual relationship tuple supplied with a check.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContextTuple {
	/// Tuple entity.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub entity: Option<Entity>,
	/// Tuple relation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relation: Option<String>,
	/// Tuple subject.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject: Option<Subject>,
}

/// Contextual attribute value supplied with a check.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContextAttribute {
	/// Attribute entity.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub entity: Option<Entity>,
	/// Attribute name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attribute: Option<String>,
	/// Attribute value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<serde_json::Value>,
}

/// Request-scoped context for a permission check.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckContext {
	/// Extra relationship tuples considered during evaluation.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tuples: Vec<ContextTuple>,
	/// Extra attribute values considered during evaluation.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<ContextAttribute>,
	/// Free-form data available to rule expressions.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub data: BTreeMap<String, serde_json::Value>,
}

/// Permission check body for `POST /permissions/check`.
///
/// The tenant identifier is merged in by [`Perms::check`](crate::perms::Perms::check);
/// callers only describe the entity/permission/subject triple.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckBody {
	/// Evaluation metadata.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<CheckMetadata>,
	/// Entity the permission is checked on.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub entity: Option<Entity>,
	/// Permission name to evaluate.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub permission: Option<String>,
	/// Subject the permission is checked for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject: Option<Subject>,
	/// Request-scoped context.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<CheckContext>,
}

/// Response for `POST /permissions/check`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PermissionCheckResponse {
	/// Whether the subject holds the permission.
	pub allowed: bool,
	/// Engine-specific extras (metadata, traces) passed through untouched.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

/// Schema write payload for `POST /schemas/{tenant_id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchemaWriteRequest {
	/// Authorization schema source text.
	pub schema: String,
}

/// Response for `POST /schemas/{tenant_id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemaWriteResponse {
	/// Version assigned to the written schema.
	#[serde(
		default,
		rename = "schemaVersion",
		skip_serializing_if = "Option::is_none"
	)]
	pub schema_version: Option<String>,
}
