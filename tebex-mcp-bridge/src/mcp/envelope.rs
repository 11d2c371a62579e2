//! Uniform response envelope for tool invocations.
//!
//! Every tool call, success or failure, returns a [`ToolResponse`]: a
//! sequence of content blocks holding one pretty-printed JSON text payload.
//! Errors are not flattened into prose; the text payload of a failed call
//! deserializes back into the structured detail from
//! [`BridgeError::detail`](crate::error::BridgeError::detail), so a calling
//! agent can tell a rejected argument from a rejected request.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::BridgeError;
use crate::tebex::ApiResponse;

/// One content block inside a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Text payload; this bridge always emits pretty-printed JSON.
    Text {
        /// The serialized payload.
        text: String,
    },
}

impl Content {
    fn json(payload: &Value) -> Self {
        Self::Text { text: format!("{payload:#}") }
    }
}

/// Envelope returned to the host runtime for every tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Content blocks; always exactly one text block in this bridge.
    pub content: Vec<Content>,
    /// Set when the payload is a structured error detail.
    #[serde(rename = "isError", default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl ToolResponse {
    /// Wraps a successful outcome.
    ///
    /// A no-content outcome renders as `{"success": true}` so the caller
    /// receives an acknowledgment rather than an empty payload.
    #[must_use]
    pub fn success(outcome: ApiResponse) -> Self {
        let payload = outcome.into_json_or(json!({"success": true}));
        Self { content: vec![Content::json(&payload)], is_error: false }
    }

    /// Wraps a caught error as its structured JSON detail.
    #[must_use]
    pub fn failure(error: &BridgeError) -> Self {
        Self { content: vec![Content::json(&error.detail())], is_error: true }
    }

    /// Text of the first content block.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.first().map(|Content::Text { text }| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_payload_is_pretty_printed() {
        let response = ToolResponse::success(ApiResponse::Json(json!({"id": 1, "code": "X"})));
        assert!(!response.is_error);
        let text = response.text().unwrap();
        assert!(text.contains("\n"));
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, json!({"id": 1, "code": "X"}));
    }

    #[test]
    fn test_no_content_renders_success_acknowledgment() {
        let response = ToolResponse::success(ApiResponse::NoContent);
        let parsed: Value = serde_json::from_str(response.text().unwrap()).unwrap();
        assert_eq!(parsed, json!({"success": true}));
    }

    #[test]
    fn test_failure_payload_round_trips_error_detail() {
        let error = BridgeError::Api {
            status: 404,
            status_text: "Not Found".to_owned(),
            body: r#"{"error":"not found"}"#.to_owned(),
        };
        let response = ToolResponse::failure(&error);
        assert!(response.is_error);

        let detail: Value = serde_json::from_str(response.text().unwrap()).unwrap();
        assert_eq!(detail, error.detail());
    }

    #[test]
    fn test_envelope_wire_shape() {
        let response = ToolResponse::success(ApiResponse::Json(json!([])));
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire, json!({"content": [{"type": "text", "text": "[]"}]}));

        let failed = ToolResponse::failure(&BridgeError::UnknownTool("nope".to_owned()));
        let wire = serde_json::to_value(&failed).unwrap();
        assert_eq!(wire["isError"], json!(true));
    }
}
