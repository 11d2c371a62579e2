//! Error types for the Tebex MCP bridge.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`] and fall into four categories:
//!
//! - **Configuration** ([`BridgeError::MissingSecret`]): the store secret is
//!   not available; fatal, raised before any network I/O.
//! - **Validation** ([`BridgeError::Validation`], [`BridgeError::UnknownTool`]):
//!   the caller's arguments violate a tool's parameter contract; raised
//!   locally, never reaches the Tebex API.
//! - **Gateway** ([`BridgeError::Api`], [`BridgeError::Http`],
//!   [`BridgeError::InvalidResponse`]): the remote call failed, either with a
//!   non-success status, a transport error, or a success body that is not
//!   valid JSON.
//!
//! Every error renders to a structured JSON detail via
//! [`BridgeError::detail`], which the response envelope embeds verbatim so a
//! calling agent can distinguish a rejected argument from a rejected request.

use serde_json::{Value, json};
use thiserror::Error;

/// Result type alias for bridge operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in the Tebex MCP bridge.
///
/// Error messages are user-facing and actionable; raw Tebex diagnostics are
/// carried verbatim rather than reinterpreted.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The store secret is not configured.
    ///
    /// Raised before any request is attempted. The secret is read from the
    /// `TEBEX_SECRET` environment variable at client construction.
    #[error(
        "TEBEX_SECRET environment variable is not set. Get your secret key from https://server.tebex.io/settings/servers"
    )]
    MissingSecret,

    /// A caller-supplied argument violates the tool's parameter contract.
    ///
    /// Identifies the offending field and the violated constraint. This is a
    /// local, synchronous check; no request has been sent when it is raised.
    #[error("invalid arguments for {tool}: {field}: {constraint}")]
    Validation {
        /// Name of the tool being invoked.
        tool: String,
        /// Offending parameter (nested fields use `parent[index].child` form).
        field: String,
        /// Human-readable description of the violated constraint.
        constraint: String,
    },

    /// The Tebex API returned a non-success HTTP status.
    ///
    /// Carries the status code, status text, and raw response body verbatim
    /// so platform-specific diagnostics survive the round trip.
    #[error("Tebex API error {status} {status_text}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Canonical status text (e.g. "Not Found").
        status_text: String,
        /// Raw response body, unmodified.
        body: String,
    },

    /// The HTTP request itself failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and TLS
    /// failures. No retry is attempted.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Tebex API returned a success status with an undecodable body.
    ///
    /// Kept distinct from [`BridgeError::Api`]: a malformed payload on an
    /// accepted request is a different failure than a rejected request.
    #[error("unparseable Tebex API response: {0}")]
    InvalidResponse(String),

    /// No tool is registered under the requested name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl BridgeError {
    /// Structured JSON detail for the response envelope.
    ///
    /// The `error` tag identifies the error class; remaining fields carry the
    /// class-specific diagnostics. Deserializing the envelope's text payload
    /// yields exactly this value.
    pub fn detail(&self) -> Value {
        match self {
            Self::MissingSecret => json!({
                "error": "configuration",
                "message": self.to_string(),
            }),
            Self::Validation { tool, field, constraint } => json!({
                "error": "validation",
                "tool": tool,
                "field": field,
                "constraint": constraint,
            }),
            Self::Api { status, status_text, body } => json!({
                "error": "api",
                "status": status,
                "status_text": status_text,
                "body": body,
            }),
            Self::Http(source) => json!({
                "error": "transport",
                "message": source.to_string(),
            }),
            Self::InvalidResponse(message) => json!({
                "error": "invalid_response",
                "message": message,
            }),
            Self::UnknownTool(name) => json!({
                "error": "unknown_tool",
                "tool": name,
            }),
        }
    }
}
