//! GraphQL identifier query.

use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use serde_json::json;
use tracing::debug;

/// GraphQL text selecting `_additional.id` for every object of `class`.
pub fn id_query(class: &str) -> String {
    format!("{{ Get {{ {} {{ _additional {{ id }} }} }} }}", class)
}

/// POST the identifier query for `class` and return the raw response.
///
/// A non-2xx status is `QueryFailed` carrying the response body.
pub async fn fetch_ids<T: Transport + ?Sized>(transport: &T, class: &str) -> Result<ApiResponse> {
    let body = json!({ "query": id_query(class) });
    let response = transport
        .execute(ApiRequest::post(["v1", "graphql"], body))
        .await?;
    debug!(class, status = response.status, "identifier query answered");

    if !response.is_success() {
        return Err(ClientError::QueryFailed {
            status: response.status,
            body: response.body,
        });
    }
    Ok(response)
}
