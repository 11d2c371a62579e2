//! Coupon tools.
//!
//! `create-coupon` carries the largest contract in the bridge: discount
//! settings, usage limits, and targeting all validate locally before the
//! draft goes to the API. `delete-coupon` synthesizes a confirmation when
//! the API answers with no content.

use serde_json::json;

use crate::mcp::registry::{Tool, confirm_no_content, decode_args, i64_arg};
use crate::schema::{ParamKind, ParamSpec, ToolSchema};
use crate::tebex::CouponDraft;

pub(crate) fn tools() -> Vec<Tool> {
    vec![list_coupons(), get_coupon(), create_coupon(), delete_coupon()]
}

fn list_coupons() -> Tool {
    Tool::new(
        "list-coupons",
        "List all coupons in the store",
        ToolSchema::new(),
        |client, _args| Box::pin(async move { client.list_coupons().await }),
    )
}

fn get_coupon() -> Tool {
    Tool::new(
        "get-coupon",
        "Get details of a specific coupon by ID",
        ToolSchema::new().field("coupon_id", ParamSpec::integer("The coupon ID")),
        |client, args| {
            Box::pin(async move { client.coupon(i64_arg(&args, "coupon_id")).await })
        },
    )
}

fn create_coupon() -> Tool {
    Tool::new(
        "create-coupon",
        "Create a new coupon with discount settings, usage limits, and targeting",
        ToolSchema::new()
            .field("code", ParamSpec::string("Coupon code (e.g. 'SUMMER20')").min_len(1))
            .field(
                "effective_on",
                ParamSpec::string("What the coupon applies to")
                    .one_of(&["cart", "package", "category"]),
            )
            .field(
                "packages",
                ParamSpec::array_of(
                    ParamKind::Integer,
                    "Package IDs the coupon applies to (when effective_on is 'package')",
                )
                .optional(),
            )
            .field(
                "categories",
                ParamSpec::array_of(
                    ParamKind::Integer,
                    "Category IDs the coupon applies to (when effective_on is 'category')",
                )
                .optional(),
            )
            .field(
                "discount_type",
                ParamSpec::string("Type of discount").one_of(&["value", "percentage"]),
            )
            .field(
                "discount_amount",
                ParamSpec::number("Fixed discount amount (when discount_type is 'value')")
                    .min(0.0)
                    .default_value(json!(0)),
            )
            .field(
                "discount_percentage",
                ParamSpec::number("Percentage discount (when discount_type is 'percentage')")
                    .min(0.0)
                    .max(100.0)
                    .default_value(json!(0)),
            )
            .field(
                "redeem_unlimited",
                ParamSpec::boolean("Whether the coupon can be used unlimited times")
                    .default_value(json!(true)),
            )
            .field(
                "expire_never",
                ParamSpec::boolean("Whether the coupon never expires").default_value(json!(true)),
            )
            .field(
                "expire_limit",
                ParamSpec::integer("Maximum number of redemptions").optional(),
            )
            .field(
                "expire_date",
                ParamSpec::string("Expiry date (YYYY-MM-DD format)").optional(),
            )
            .field(
                "start_date",
                ParamSpec::string("Start date (YYYY-MM-DD format)").optional(),
            )
            .field(
                "basket_type",
                ParamSpec::string("Type of basket the coupon applies to")
                    .one_of(&["single", "subscription", "both"])
                    .default_value(json!("both")),
            )
            .field(
                "minimum",
                ParamSpec::number("Minimum basket value for coupon to apply").min(0.0).optional(),
            )
            .field(
                "username",
                ParamSpec::string("Restrict coupon to a specific username").optional(),
            )
            .field("note", ParamSpec::string("Internal note about the coupon").optional()),
        |client, args| {
            Box::pin(async move {
                let draft: CouponDraft = decode_args("create-coupon", args)?;
                client.create_coupon(&draft).await
            })
        },
    )
}

fn delete_coupon() -> Tool {
    Tool::new(
        "delete-coupon",
        "Delete a coupon by ID",
        ToolSchema::new().field("coupon_id", ParamSpec::integer("The coupon ID to delete")),
        |client, args| {
            Box::pin(async move {
                let coupon_id = i64_arg(&args, "coupon_id");
                let outcome = client.delete_coupon(coupon_id).await?;
                Ok(confirm_no_content(outcome, format!("Coupon {coupon_id} deleted")))
            })
        },
    )
}
