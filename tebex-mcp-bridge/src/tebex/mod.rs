//! Tebex plugin API integration.
//!
//! This module is the only place in the crate that performs network I/O.
//! [`TebexClient`] builds authenticated requests against the Tebex plugin
//! API and maps transport and API failures to [`crate::error::BridgeError`];
//! the per-resource methods (payments, coupons, bans, gift cards, players,
//! packages) are thin adapters fixing the method and path and reshaping
//! typed argument bundles into the wire format Tebex expects.
//!
//! Response payloads are deliberately kept opaque: the bridge passes Tebex
//! data through faithfully rather than modeling commerce semantics.

pub mod client;
pub mod models;

pub use client::{ApiResponse, BASE_URL, SECRET_ENV, TebexClient};
pub use models::{BanRequest, CouponDraft, GiftCardDraft, ManualPayment, PackageSelection, PaymentUpdate};
