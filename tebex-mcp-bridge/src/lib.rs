//! Tebex MCP Bridge: store administration as schema-validated MCP tools.
//!
//! This library exposes the Tebex plugin API — store info, payments,
//! coupons, sales, bans, gift cards, player entitlements, packages — as a
//! registry of named tools an MCP host can discover and invoke. The bridge
//! is a pass-through gateway: it validates and normalizes caller arguments
//! against each tool's declared contract, forwards the validated request
//! over an authenticated transport, classifies failures into a uniform
//! error shape, and renders every outcome into a uniform response envelope.
//! It does not cache, retry, rate-limit, or reinterpret commerce data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   AI Agent      │  Claude or other MCP-compatible agent
//! └────────┬────────┘
//!          │ MCP protocol (JSON-RPC 2.0)
//! ┌────────▼────────────────────────────────────┐
//! │        Tebex MCP Bridge (this crate)        │
//! │  ┌─────────────┐       ┌────────────────┐   │
//! │  │ ToolRegistry│───────│  TebexClient   │   │
//! │  │ (contracts, │       │  (authenticated│   │
//! │  │  dispatch)  │       │   HTTP calls)  │   │
//! │  └─────────────┘       └────────────────┘   │
//! └────────┬────────────────────────────────────┘
//!          │ HTTPS + X-Tebex-Secret
//! ┌────────▼────────┐
//! │ Tebex plugin API│  https://plugin.tebex.io
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::{Map, Value};
//! use tebex_mcp_bridge::{TebexClient, ToolRegistry};
//!
//! # async fn example() -> tebex_mcp_bridge::Result<()> {
//! // Reads TEBEX_SECRET; fails fast with guidance when it is unset.
//! let client = TebexClient::from_env()?;
//! let registry = ToolRegistry::new(client);
//!
//! let mut args = Map::new();
//! args.insert("limit".to_owned(), Value::from(10));
//! let response = registry.invoke("list-payments", Some(&args)).await;
//! println!("{}", response.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! Invocations are independent: no tool holds a lock or mutates shared
//! state, so arbitrarily many calls may be in flight concurrently.

pub mod error;
pub mod mcp;
pub mod schema;
pub mod tebex;

pub use error::{BridgeError, Result};
pub use mcp::{Content, Tool, ToolRegistry, ToolResponse};
pub use tebex::{ApiResponse, TebexClient};
