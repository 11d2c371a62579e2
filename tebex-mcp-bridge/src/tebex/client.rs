//! HTTP client for the Tebex plugin API.
//!
//! [`TebexClient`] is the sole component permitted to perform network I/O.
//! Every request carries the store secret in the `X-Tebex-Secret` header and
//! an `Accept: application/json` header; bodies are JSON-serialized only
//! when present, so bodiless calls carry no content type at all.
//!
//! There are no retries, no caching, and no timeout handling beyond the
//! fixed request timeout: each operation is a single stateless round trip
//! against a low-volume administrative API.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::instrument;
use url::Url;

use crate::error::{BridgeError, Result};
use crate::tebex::models::{BanRequest, CouponDraft, GiftCardDraft, ManualPayment, PaymentUpdate};

/// Production origin of the Tebex plugin API.
pub const BASE_URL: &str = "https://plugin.tebex.io";

/// Environment variable holding the store's secret key.
pub const SECRET_ENV: &str = "TEBEX_SECRET";

/// Header carrying the store secret on every request.
const SECRET_HEADER: &str = "X-Tebex-Secret";

/// Timeout for HTTP requests to the Tebex API in seconds.
///
/// Applies to the entire request-response cycle, including connection
/// establishment and response reception. Administrative calls are
/// human-triggered, so 30 seconds leaves ample headroom without leaving an
/// agent hanging indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Decoded outcome of one successful Tebex API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Decoded JSON payload.
    Json(Value),
    /// 204 No Content success.
    ///
    /// Kept distinct from `null` so callers can render a success
    /// acknowledgment instead of a placeholder value.
    NoContent,
}

impl ApiResponse {
    /// Returns the payload, or `fallback` for a no-content response.
    #[must_use]
    pub fn into_json_or(self, fallback: Value) -> Value {
        match self {
            Self::Json(value) => value,
            Self::NoContent => fallback,
        }
    }
}

/// Authenticated client for the Tebex plugin API.
///
/// Holds the store secret for its whole lifetime; the secret is never
/// exposed through `Debug` output.
pub struct TebexClient {
    http: Client,
    base_url: Url,
    secret: String,
}

impl fmt::Debug for TebexClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TebexClient")
            .field("base_url", &self.base_url.as_str())
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TebexClient {
    /// Creates a client from the `TEBEX_SECRET` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MissingSecret`] when the variable is unset or
    /// empty, before any network I/O is attempted.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(SECRET_ENV)
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(BridgeError::MissingSecret)?;
        Self::new(secret)
    }

    /// Creates a client for the production Tebex API.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(BASE_URL).expect("BASE_URL is a valid URL");
        Self::with_base_url(secret, base_url)
    }

    /// Creates a client against an alternate origin.
    ///
    /// This is the substitution seam for tests; production code uses
    /// [`TebexClient::new`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn with_base_url(secret: impl Into<String>, base_url: Url) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url, secret: secret.into() })
    }

    /// Builds an endpoint URL from percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL is always a valid base")
            .pop_if_empty()
            .extend(segments);
        url
    }

    /// Executes one authenticated call against the Tebex API.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Http`] when the transport fails.
    /// - [`BridgeError::Api`] for any non-success status, carrying the status
    ///   code, status text, and raw body verbatim.
    /// - [`BridgeError::InvalidResponse`] for a success status whose body is
    ///   not valid JSON (204 is mapped to [`ApiResponse::NoContent`] and
    ///   never parsed).
    #[instrument(skip(self, url, body), fields(method = %method, path = url.path()))]
    async fn execute<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&T>,
    ) -> Result<ApiResponse> {
        let mut request = self
            .http
            .request(method, url)
            .header(SECRET_HEADER, &self.secret)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiResponse::NoContent);
        }

        let bytes = response.bytes().await?;
        let payload = serde_json::from_slice(&bytes)
            .map_err(|e| BridgeError::InvalidResponse(format!("expected a JSON body: {e}")))?;
        Ok(ApiResponse::Json(payload))
    }

    // --- Store ---

    /// `GET /information`: store name, domain, currency, and game type.
    pub async fn store_info(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["information"]), None::<&()>).await
    }

    // --- Payments ---

    /// `GET /payments`, optionally limited via `pager.limit`.
    pub async fn list_payments(&self, limit: Option<u64>) -> Result<ApiResponse> {
        let mut url = self.endpoint(&["payments"]);
        if let Some(limit) = limit {
            url.query_pairs_mut().append_pair("pager.limit", &limit.to_string());
        }
        self.execute(Method::GET, url, None::<&()>).await
    }

    /// `GET /payments/{id}`.
    pub async fn payment(&self, transaction_id: &str) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["payments", transaction_id]), None::<&()>).await
    }

    /// `POST /payments`: create a manual payment.
    pub async fn create_manual_payment(&self, payment: &ManualPayment) -> Result<ApiResponse> {
        self.execute(Method::POST, self.endpoint(&["payments"]), Some(payment)).await
    }

    /// `PUT /payments/{id}`: update username and/or status.
    pub async fn update_payment(
        &self,
        transaction_id: &str,
        update: &PaymentUpdate,
    ) -> Result<ApiResponse> {
        self.execute(Method::PUT, self.endpoint(&["payments", transaction_id]), Some(update)).await
    }

    /// `POST /payments/{id}/note`.
    pub async fn add_payment_note(&self, transaction_id: &str, note: &str) -> Result<ApiResponse> {
        self.execute(
            Method::POST,
            self.endpoint(&["payments", transaction_id, "note"]),
            Some(&json!({"note": note})),
        )
        .await
    }

    // --- Coupons ---

    /// `GET /coupons`.
    pub async fn list_coupons(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["coupons"]), None::<&()>).await
    }

    /// `GET /coupons/{id}`.
    pub async fn coupon(&self, coupon_id: i64) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["coupons", &coupon_id.to_string()]), None::<&()>)
            .await
    }

    /// `POST /coupons`.
    pub async fn create_coupon(&self, draft: &CouponDraft) -> Result<ApiResponse> {
        self.execute(Method::POST, self.endpoint(&["coupons"]), Some(draft)).await
    }

    /// `DELETE /coupons/{id}`. Tebex answers 204 on success.
    pub async fn delete_coupon(&self, coupon_id: i64) -> Result<ApiResponse> {
        self.execute(
            Method::DELETE,
            self.endpoint(&["coupons", &coupon_id.to_string()]),
            None::<&()>,
        )
        .await
    }

    // --- Sales ---

    /// `GET /sales`.
    pub async fn list_sales(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["sales"]), None::<&()>).await
    }

    // --- Bans ---

    /// `GET /bans`.
    pub async fn list_bans(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["bans"]), None::<&()>).await
    }

    /// `POST /bans`.
    pub async fn create_ban(&self, ban: &BanRequest) -> Result<ApiResponse> {
        self.execute(Method::POST, self.endpoint(&["bans"]), Some(ban)).await
    }

    // --- Gift cards ---

    /// `GET /gift-cards`.
    pub async fn list_gift_cards(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["gift-cards"]), None::<&()>).await
    }

    /// `GET /gift-cards/{id}`.
    pub async fn gift_card(&self, gift_card_id: i64) -> Result<ApiResponse> {
        self.execute(
            Method::GET,
            self.endpoint(&["gift-cards", &gift_card_id.to_string()]),
            None::<&()>,
        )
        .await
    }

    /// `POST /gift-cards`.
    pub async fn create_gift_card(&self, draft: &GiftCardDraft) -> Result<ApiResponse> {
        self.execute(Method::POST, self.endpoint(&["gift-cards"]), Some(draft)).await
    }

    /// `PUT /gift-cards/{id}`: add balance to an existing card.
    pub async fn topup_gift_card(&self, gift_card_id: i64, amount: f64) -> Result<ApiResponse> {
        self.execute(
            Method::PUT,
            self.endpoint(&["gift-cards", &gift_card_id.to_string()]),
            Some(&json!({"amount": amount})),
        )
        .await
    }

    /// `DELETE /gift-cards/{id}`: void a card. Tebex answers 204 on success.
    pub async fn void_gift_card(&self, gift_card_id: i64) -> Result<ApiResponse> {
        self.execute(
            Method::DELETE,
            self.endpoint(&["gift-cards", &gift_card_id.to_string()]),
            None::<&()>,
        )
        .await
    }

    // --- Players ---

    /// `GET /player/{id}/packages`: active packages for a player.
    pub async fn player_packages(&self, player_identifier: &str) -> Result<ApiResponse> {
        self.execute(
            Method::GET,
            self.endpoint(&["player", player_identifier, "packages"]),
            None::<&()>,
        )
        .await
    }

    // --- Packages ---

    /// `GET /listing`: all packages, grouped by category.
    pub async fn list_packages(&self) -> Result<ApiResponse> {
        self.execute(Method::GET, self.endpoint(&["listing"]), None::<&()>).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> TebexClient {
        let base = Url::parse(&server.base_url()).unwrap();
        TebexClient::with_base_url("test-secret", base).unwrap()
    }

    #[test]
    fn test_debug_redacts_secret() {
        let client = TebexClient::new("super-secret-key").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_env_fails_fast_without_secret() {
        // This test owns the TEBEX_SECRET variable; no other test reads it.
        unsafe { std::env::remove_var(SECRET_ENV) };
        let error = TebexClient::from_env().unwrap_err();
        assert!(matches!(error, BridgeError::MissingSecret));
    }

    #[test]
    fn test_endpoint_percent_encodes_path_segments() {
        let client = TebexClient::new("secret").unwrap();
        let url = client.endpoint(&["payments", "tbx/123 456"]);
        assert_eq!(url.as_str(), "https://plugin.tebex.io/payments/tbx%2F123%20456");
    }

    #[tokio::test]
    async fn test_execute_sends_secret_and_accept_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/information")
                .header("x-tebex-secret", "test-secret")
                .header("accept", "application/json");
            then.status(200).json_body(serde_json::json!({"account": {"id": 1}}));
        });

        let response = client_for(&server).store_info().await.unwrap();
        mock.assert_calls(1);
        assert_eq!(
            response,
            ApiResponse::Json(serde_json::json!({"account": {"id": 1}}))
        );
    }

    #[tokio::test]
    async fn test_bodiless_requests_have_no_content_type() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/sales").header_missing("content-type");
            then.status(200).json_body(serde_json::json!([]));
        });

        client_for(&server).list_sales().await.unwrap();
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn test_no_content_status_maps_to_marker() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/coupons/42");
            then.status(204);
        });

        let response = client_for(&server).delete_coupon(42).await.unwrap();
        assert_eq!(response, ApiResponse::NoContent);
    }

    #[tokio::test]
    async fn test_error_status_carries_raw_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/payments/tbx-404");
            then.status(404).body(r#"{"error":"not found"}"#);
        });

        let error = client_for(&server).payment("tbx-404").await.unwrap_err();
        match error {
            BridgeError::Api { status, status_text, body } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
                assert_eq!(body, r#"{"error":"not found"}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_success_body_is_invalid_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/information");
            then.status(200).body("<html>maintenance</html>");
        });

        let error = client_for(&server).store_info().await.unwrap_err();
        assert!(matches!(error, BridgeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_payments_limit_becomes_pager_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/payments").query_param("pager.limit", "25");
            then.status(200).json_body(serde_json::json!([]));
        });

        client_for(&server).list_payments(Some(25)).await.unwrap();
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn test_topup_gift_card_sends_amount_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/gift-cards/7")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({"amount": 12.5}));
            then.status(200).json_body(serde_json::json!({"success": true}));
        });

        client_for(&server).topup_gift_card(7, 12.5).await.unwrap();
        mock.assert_calls(1);
    }
}
