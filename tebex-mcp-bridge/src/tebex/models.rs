//! Request body types for the Tebex plugin API.
//!
//! These bundles carry the wire-reshaping rules in their serde attributes:
//! optional fields stay off the wire entirely when absent (Tebex treats an
//! explicit `null` differently from a missing key), and caller-facing field
//! names are renamed where the API expects something else.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One package line in a manual payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageSelection {
    /// Package to purchase. The API expects this field as `id` on the wire.
    #[serde(rename(serialize = "id"))]
    pub package_id: i64,
    /// Package variable options.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualPayment {
    /// In-game name of the buyer.
    pub ign: String,
    /// Price of the payment. Zero is a valid (free) payment.
    pub price: f64,
    /// Packages included in the payment.
    pub packages: Vec<PackageSelection>,
}

/// Sparse body of `PUT /payments/{id}`.
///
/// Only the fields actually supplied appear in the outgoing body; an absent
/// field must not be sent as `null` or an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    /// New username for the payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// New status for the payment (e.g. "complete", "chargeback").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `POST /coupons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponDraft {
    /// Coupon code (e.g. "SUMMER20").
    pub code: String,
    /// What the coupon applies to: "cart", "package", or "category".
    pub effective_on: String,
    /// Package IDs the coupon applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<i64>>,
    /// Category IDs the coupon applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<i64>>,
    /// "value" or "percentage".
    pub discount_type: String,
    /// Fixed discount amount.
    pub discount_amount: f64,
    /// Percentage discount.
    pub discount_percentage: f64,
    /// Whether the coupon can be redeemed without limit.
    pub redeem_unlimited: bool,
    /// Whether the coupon never expires.
    pub expire_never: bool,
    /// Maximum number of redemptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_limit: Option<i64>,
    /// Expiry date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<String>,
    /// Start date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// "single", "subscription", or "both".
    pub basket_type: String,
    /// Minimum basket value for the coupon to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Restrict the coupon to a specific username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Internal note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `POST /bans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanRequest {
    /// Username or UUID of the user to ban.
    pub user: String,
    /// IP address to ban.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Reason for the ban.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `POST /gift-cards`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCardDraft {
    /// Gift card value. Must be strictly positive.
    pub amount: f64,
    /// Expiry date in ISO 8601 format.
    pub expires_at: String,
    /// Internal note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_selection_renames_id_on_the_wire() {
        let selection = PackageSelection { package_id: 5, options: BTreeMap::new() };
        let wire = serde_json::to_value(&selection).unwrap();
        assert_eq!(wire, json!({"id": 5, "options": {}}));
        assert!(wire.get("package_id").is_none());
    }

    #[test]
    fn test_package_selection_deserializes_caller_facing_name() {
        let selection: PackageSelection =
            serde_json::from_value(json!({"package_id": 9, "options": {"color": "red"}})).unwrap();
        assert_eq!(selection.package_id, 9);
        assert_eq!(selection.options["color"], "red");
    }

    #[test]
    fn test_payment_update_omits_absent_fields() {
        let update = PaymentUpdate { username: None, status: Some("complete".to_owned()) };
        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire, json!({"status": "complete"}));
    }

    #[test]
    fn test_ban_request_omits_absent_fields() {
        let ban = BanRequest { user: "Notch".to_owned(), ip: None, reason: None };
        assert_eq!(serde_json::to_value(&ban).unwrap(), json!({"user": "Notch"}));
    }

    #[test]
    fn test_coupon_draft_round_trip() {
        let draft: CouponDraft = serde_json::from_value(json!({
            "code": "SUMMER20",
            "effective_on": "cart",
            "discount_type": "percentage",
            "discount_amount": 0,
            "discount_percentage": 20,
            "redeem_unlimited": true,
            "expire_never": true,
            "basket_type": "both"
        }))
        .unwrap();
        assert_eq!(draft.code, "SUMMER20");

        let wire = serde_json::to_value(&draft).unwrap();
        assert!(wire.get("expire_limit").is_none());
        assert_eq!(wire["discount_percentage"], json!(20.0));
    }
}
