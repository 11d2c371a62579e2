//! Model Context Protocol (MCP) integration.
//!
//! This module declares the bridge's tool surface and the machinery that
//! serves it: one file per Tebex resource family declaring that family's
//! tools, a [`ToolRegistry`] aggregating every family into a single
//! namespace, and the [`ToolResponse`] envelope returned for every
//! invocation.
//!
//! # Available Tools
//!
//! - **Store**: `get-store-info`
//! - **Payments**: `list-payments`, `get-payment`, `create-manual-payment`,
//!   `update-payment`, `add-payment-note`
//! - **Coupons**: `list-coupons`, `get-coupon`, `create-coupon`,
//!   `delete-coupon`
//! - **Sales**: `list-sales`
//! - **Bans**: `list-bans`, `create-ban`
//! - **Gift cards**: `list-gift-cards`, `get-gift-card`, `create-gift-card`,
//!   `topup-gift-card`, `void-gift-card`
//! - **Players**: `get-player-packages`
//! - **Packages**: `list-packages`
//!
//! # Architecture
//!
//! ```text
//! AI Agent (Claude)
//!     │
//!     │ MCP protocol (JSON-RPC 2.0)
//!     ▼
//! ToolRegistry (this module)
//!     │
//!     │ parameter contract validation
//!     ▼
//! TebexClient (tebex module)
//!     │
//!     │ HTTPS + X-Tebex-Secret
//!     ▼
//! Tebex plugin API
//! ```
//!
//! Tool names are stable identifiers: a name is never reused for a
//! different contract.

pub mod envelope;
pub mod registry;

mod bans;
mod coupons;
mod gift_cards;
mod packages;
mod payments;
mod players;
mod sales;
mod store;

pub use envelope::{Content, ToolResponse};
pub use registry::{Tool, ToolRegistry};
