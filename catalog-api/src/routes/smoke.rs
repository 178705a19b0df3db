/// Smoke-test endpoints
///
/// - `POST /api/test` - Echoes the `name` field of the body
/// - `GET /api/test/v1` - Fixed payload
/// - `GET /api/test/v2` - Fixed payload

use crate::extract::JsonOrForm;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// `{ "name": ... }` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct NamePayload {
    /// Echoed back unchanged; omitted from the reply when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "widget")]
    pub name: Option<Value>,
}

impl NamePayload {
    fn fixed(name: &str) -> Self {
        Self {
            name: Some(Value::String(name.to_string())),
        }
    }
}

/// Echo the posted name
#[utoipa::path(
    post,
    path = "/api/test",
    tag = "test",
    request_body = NamePayload,
    responses(
        (status = 200, description = "The posted name", body = NamePayload),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse)
    )
)]
pub async fn echo(JsonOrForm(payload): JsonOrForm<NamePayload>) -> Json<NamePayload> {
    tracing::debug!(?payload, "Echo request");
    Json(payload)
}

#[utoipa::path(
    get,
    path = "/api/test/v1",
    tag = "test",
    responses((status = 200, description = "Fixed payload", body = NamePayload))
)]
pub async fn test_v1() -> Json<NamePayload> {
    Json(NamePayload::fixed("test v1 work"))
}

#[utoipa::path(
    get,
    path = "/api/test/v2",
    tag = "test",
    responses((status = 200, description = "Fixed payload", body = NamePayload))
)]
pub async fn test_v2() -> Json<NamePayload> {
    Json(NamePayload::fixed("test v2 work"))
}
