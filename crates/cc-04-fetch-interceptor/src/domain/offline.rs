use super::request::FetchResponse;
use serde_json::json;

/// Static-partition document served to HTML requests while offline.
pub const OFFLINE_DOCUMENT_PATH: &str = "/offline.html";

pub const OFFLINE_MESSAGE: &str =
    "You are offline. Your request will be retried when the connection returns.";

/// Answer to an API request with no network and no cached copy.
pub fn offline_api_response() -> FetchResponse {
    FetchResponse::json(
        503,
        &json!({
            "status": "offline",
            "message": OFFLINE_MESSAGE,
        }),
    )
}
