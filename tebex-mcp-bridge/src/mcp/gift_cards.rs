//! Gift card tools.
//!
//! Amounts must be strictly positive (minimum 0.01) — a zero-value card or
//! top-up is rejected locally, unlike a zero-price manual payment which the
//! API accepts. `void-gift-card` synthesizes a confirmation when the API
//! answers with no content.

use crate::mcp::registry::{Tool, confirm_no_content, decode_args, f64_arg, i64_arg};
use crate::schema::{ParamSpec, ToolSchema};
use crate::tebex::GiftCardDraft;

pub(crate) fn tools() -> Vec<Tool> {
    vec![list_gift_cards(), get_gift_card(), create_gift_card(), topup_gift_card(), void_gift_card()]
}

fn list_gift_cards() -> Tool {
    Tool::new(
        "list-gift-cards",
        "List all gift cards in the store",
        ToolSchema::new(),
        |client, _args| Box::pin(async move { client.list_gift_cards().await }),
    )
}

fn get_gift_card() -> Tool {
    Tool::new(
        "get-gift-card",
        "Get details of a specific gift card",
        ToolSchema::new().field("gift_card_id", ParamSpec::integer("The gift card ID")),
        |client, args| {
            Box::pin(async move { client.gift_card(i64_arg(&args, "gift_card_id")).await })
        },
    )
}

fn create_gift_card() -> Tool {
    Tool::new(
        "create-gift-card",
        "Create a new gift card with an amount and expiry date",
        ToolSchema::new()
            .field("amount", ParamSpec::number("Gift card value amount").min(0.01))
            .field(
                "expires_at",
                ParamSpec::string("Expiry date in ISO 8601 format (e.g. '2025-12-31')"),
            )
            .field("note", ParamSpec::string("Internal note about the gift card").optional()),
        |client, args| {
            Box::pin(async move {
                let draft: GiftCardDraft = decode_args("create-gift-card", args)?;
                client.create_gift_card(&draft).await
            })
        },
    )
}

fn topup_gift_card() -> Tool {
    Tool::new(
        "topup-gift-card",
        "Add balance to an existing gift card",
        ToolSchema::new()
            .field("gift_card_id", ParamSpec::integer("The gift card ID to top up"))
            .field("amount", ParamSpec::number("Amount to add to the gift card").min(0.01)),
        |client, args| {
            Box::pin(async move {
                client
                    .topup_gift_card(i64_arg(&args, "gift_card_id"), f64_arg(&args, "amount"))
                    .await
            })
        },
    )
}

fn void_gift_card() -> Tool {
    Tool::new(
        "void-gift-card",
        "Void/cancel a gift card, making it unusable",
        ToolSchema::new().field("gift_card_id", ParamSpec::integer("The gift card ID to void")),
        |client, args| {
            Box::pin(async move {
                let gift_card_id = i64_arg(&args, "gift_card_id");
                let outcome = client.void_gift_card(gift_card_id).await?;
                Ok(confirm_no_content(outcome, format!("Gift card {gift_card_id} voided")))
            })
        },
    )
}
