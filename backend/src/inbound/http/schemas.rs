//! Wire envelopes shared by the HTTP handlers.
//!
//! Domain types stay framework-agnostic and never derive `ToSchema`. The
//! payloads defined here are what clients actually see, so they carry both the
//! serde and the OpenAPI derivations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response body.
///
/// `code` repeats the HTTP status so clients that only read the body can still
/// branch on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code.
    #[schema(example = 400)]
    pub code: u16,
    /// Human-readable message.
    #[schema(example = "user validation failed")]
    pub error: String,
    /// Field map for validation failures, or the offending identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Correlation identifier matching the `trace-id` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub trace_id: Option<String>,
}

/// Acknowledges an update: `{"updated": "<id>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedAck {
    #[schema(example = "66db2c856699531daa9abc16")]
    pub updated: String,
}

/// Acknowledges a delete: `{"deleted": "<id>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedAck {
    #[schema(example = "66db2c856699531daa9abc16")]
    pub deleted: String,
}

/// Acknowledges a friend addition: `{"add friend": "<friend id>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FriendAddedAck {
    #[serde(rename = "add friend")]
    #[schema(example = "66db21cdb5d96466fa5f3c3c")]
    pub added: String,
}

/// Acknowledges a friend removal: `{"remove friend": "<friend id>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FriendRemovedAck {
    #[serde(rename = "remove friend")]
    #[schema(example = "66db21cdb5d96466fa5f3c3c")]
    pub removed: String,
}
