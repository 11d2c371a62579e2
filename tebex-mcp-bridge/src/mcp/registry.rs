//! Tool descriptors and the registry dispatching them.
//!
//! Each resource family contributes a list of [`Tool`]s; the
//! [`ToolRegistry`] aggregates them once at construction into a single
//! immutable namespace. Registration order is irrelevant and no tool
//! depends on another: the only shared state is the read-only
//! [`TebexClient`].
//!
//! [`ToolRegistry::invoke`] is the sole invocation entry point:
//! dispatch by name, validate arguments against the tool's contract, run
//! the handler, and render the outcome into the response envelope. A
//! validation failure never reaches the client.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::error::{BridgeError, Result};
use crate::mcp::envelope::ToolResponse;
use crate::mcp::{bans, coupons, gift_cards, packages, payments, players, sales, store};
use crate::schema::ToolSchema;
use crate::tebex::{ApiResponse, TebexClient};

/// Future returned by a tool handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send>>;

type Handler = Box<dyn Fn(Arc<TebexClient>, Map<String, Value>) -> HandlerFuture + Send + Sync>;

/// One callable operation: stable name, human description, parameter
/// contract, and the handler translating validated arguments into a Tebex
/// API call.
pub struct Tool {
    name: &'static str,
    description: &'static str,
    schema: ToolSchema,
    handler: Handler,
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl Tool {
    pub(crate) fn new<F>(
        name: &'static str,
        description: &'static str,
        schema: ToolSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(Arc<TebexClient>, Map<String, Value>) -> HandlerFuture + Send + Sync + 'static,
    {
        Self { name, description, schema, handler: Box::new(handler) }
    }

    /// Stable tool name (e.g. `list-payments`).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human description surfaced on tool discovery.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// JSON Schema of the parameter contract, for tool discovery.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        self.schema.to_json_schema()
    }
}

/// Immutable registry of every tool, keyed by name.
#[derive(Debug)]
pub struct ToolRegistry {
    client: Arc<TebexClient>,
    tools: BTreeMap<&'static str, Tool>,
}

impl ToolRegistry {
    /// Builds the registry from every resource family's declarations.
    #[must_use]
    pub fn new(client: TebexClient) -> Self {
        let mut tools = BTreeMap::new();
        let families = [
            store::tools(),
            payments::tools(),
            coupons::tools(),
            sales::tools(),
            bans::tools(),
            gift_cards::tools(),
            players::tools(),
            packages::tools(),
        ];
        for tool in families.into_iter().flatten() {
            let previous = tools.insert(tool.name(), tool);
            debug_assert!(previous.is_none(), "duplicate tool name");
        }
        Self { client: Arc::new(client), tools }
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty (it never is in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates over all tools in name order, for discovery.
    pub fn tools(&self) -> impl Iterator<Item = &Tool> {
        self.tools.values()
    }

    /// Looks up one tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Invokes a tool by name with raw caller arguments.
    ///
    /// Every outcome, success or failure, is rendered into a
    /// [`ToolResponse`]; no error propagates to the host runtime.
    #[instrument(skip(self, arguments), fields(tool = name))]
    pub async fn invoke(&self, name: &str, arguments: Option<&Map<String, Value>>) -> ToolResponse {
        match self.try_invoke(name, arguments).await {
            Ok(outcome) => {
                info!("tool call succeeded");
                ToolResponse::success(outcome)
            }
            Err(error) => {
                warn!(error = %error, "tool call failed");
                ToolResponse::failure(&error)
            }
        }
    }

    async fn try_invoke(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse> {
        let tool =
            self.tools.get(name).ok_or_else(|| BridgeError::UnknownTool(name.to_owned()))?;
        let validated = tool.schema.validate(arguments).map_err(|violation| {
            BridgeError::Validation {
                tool: name.to_owned(),
                field: violation.field,
                constraint: violation.constraint,
            }
        })?;
        (tool.handler)(Arc::clone(&self.client), validated).await
    }
}

/// Decodes a validated argument map into a typed request bundle.
///
/// Validation has already checked every field, so a decode failure here
/// indicates a contract/bundle mismatch; it is still reported as a
/// validation error rather than panicking.
pub(crate) fn decode_args<T: DeserializeOwned>(
    tool: &'static str,
    args: Map<String, Value>,
) -> Result<T> {
    serde_json::from_value(Value::Object(args)).map_err(|e| BridgeError::Validation {
        tool: tool.to_owned(),
        field: "arguments".to_owned(),
        constraint: e.to_string(),
    })
}

/// String argument accessor for validated maps.
pub(crate) fn str_arg<'a>(args: &'a Map<String, Value>, name: &str) -> &'a str {
    args.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Integer argument accessor for validated maps.
pub(crate) fn i64_arg(args: &Map<String, Value>, name: &str) -> i64 {
    args.get(name).and_then(Value::as_i64).unwrap_or_default()
}

/// Numeric argument accessor for validated maps.
pub(crate) fn f64_arg(args: &Map<String, Value>, name: &str) -> f64 {
    args.get(name).and_then(Value::as_f64).unwrap_or_default()
}

/// Replaces a no-content success with a synthesized confirmation payload.
///
/// Used by the delete/void tools so the caller always receives a
/// human-readable acknowledgment.
pub(crate) fn confirm_no_content(outcome: ApiResponse, message: String) -> ApiResponse {
    match outcome {
        ApiResponse::NoContent => {
            ApiResponse::Json(json!({"success": true, "message": message}))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(TebexClient::new("test-secret").unwrap())
    }

    #[test]
    fn test_registry_contains_every_operation() {
        let registry = registry();
        let expected = [
            "get-store-info",
            "list-payments",
            "get-payment",
            "create-manual-payment",
            "update-payment",
            "add-payment-note",
            "list-coupons",
            "get-coupon",
            "create-coupon",
            "delete-coupon",
            "list-sales",
            "list-bans",
            "create-ban",
            "list-gift-cards",
            "get-gift-card",
            "create-gift-card",
            "topup-gift-card",
            "void-gift-card",
            "get-player-packages",
            "list-packages",
        ];
        assert_eq!(registry.len(), expected.len());
        for name in expected {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }

    #[test]
    fn test_every_tool_has_description_and_object_schema() {
        for tool in registry().tools() {
            assert!(!tool.description().is_empty(), "{} has no description", tool.name());
            assert_eq!(tool.input_schema()["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_yields_error_envelope() {
        let response = registry().invoke("reticulate-splines", None).await;
        assert!(response.is_error);
        let detail: Value = serde_json::from_str(response.text().unwrap()).unwrap();
        assert_eq!(detail["error"], "unknown_tool");
        assert_eq!(detail["tool"], "reticulate-splines");
    }

    #[test]
    fn test_confirm_no_content_passes_payloads_through() {
        let payload = ApiResponse::Json(json!({"id": 3}));
        let confirmed = confirm_no_content(payload.clone(), "Coupon 3 deleted".to_owned());
        assert_eq!(confirmed, payload);

        let synthesized =
            confirm_no_content(ApiResponse::NoContent, "Coupon 3 deleted".to_owned());
        assert_eq!(
            synthesized,
            ApiResponse::Json(json!({"success": true, "message": "Coupon 3 deleted"}))
        );
    }
}
