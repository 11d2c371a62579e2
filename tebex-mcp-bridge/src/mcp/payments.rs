//! Payment tools.
//!
//! Covers listing, lookup, manual creation, updates, and notes. Manual
//! payment creation is the one place the caller-facing argument shape and
//! the wire shape diverge: callers supply `package_id` per package, the API
//! expects `id` (the rename lives in
//! [`PackageSelection`](crate::tebex::PackageSelection)).

use serde_json::{Value, json};

use crate::mcp::registry::{Tool, decode_args, str_arg};
use crate::schema::{ParamKind, ParamSpec, ToolSchema};
use crate::tebex::{ManualPayment, PaymentUpdate};

pub(crate) fn tools() -> Vec<Tool> {
    vec![list_payments(), get_payment(), create_manual_payment(), update_payment(), add_payment_note()]
}

fn list_payments() -> Tool {
    Tool::new(
        "list-payments",
        "List recent payments with optional limit",
        ToolSchema::new().field(
            "limit",
            ParamSpec::integer("Maximum number of payments to return (1-100)")
                .optional()
                .min(1.0)
                .max(100.0),
        ),
        |client, args| {
            Box::pin(async move {
                let limit = args.get("limit").and_then(Value::as_u64);
                client.list_payments(limit).await
            })
        },
    )
}

fn get_payment() -> Tool {
    Tool::new(
        "get-payment",
        "Get details of a specific payment by transaction ID",
        ToolSchema::new().field(
            "transaction_id",
            ParamSpec::string("The transaction ID of the payment").min_len(1),
        ),
        |client, args| {
            Box::pin(async move { client.payment(str_arg(&args, "transaction_id")).await })
        },
    )
}

fn create_manual_payment() -> Tool {
    let package = ToolSchema::new()
        .field("package_id", ParamSpec::integer("Package ID to purchase"))
        .field(
            "options",
            ParamSpec::map_of(ParamKind::String, "Package variable options")
                .default_value(json!({})),
        );
    Tool::new(
        "create-manual-payment",
        "Create a manual payment for a user and package",
        ToolSchema::new()
            .field("ign", ParamSpec::string("In-game name / username of the buyer").min_len(1))
            .field("price", ParamSpec::number("Price of the payment").min(0.0))
            .field(
                "packages",
                ParamSpec::array_of_objects(package, "Packages to include in the payment")
                    .min_items(1),
            ),
        |client, args| {
            Box::pin(async move {
                let payment: ManualPayment = decode_args("create-manual-payment", args)?;
                client.create_manual_payment(&payment).await
            })
        },
    )
}

fn update_payment() -> Tool {
    Tool::new(
        "update-payment",
        "Update a payment's username or status",
        ToolSchema::new()
            .field(
                "transaction_id",
                ParamSpec::string("The transaction ID of the payment").min_len(1),
            )
            .field("username", ParamSpec::string("New username for the payment").optional())
            .field(
                "status",
                ParamSpec::string("New status for the payment (e.g. 'complete', 'chargeback')")
                    .optional(),
            ),
        |client, args| {
            Box::pin(async move {
                let transaction_id = str_arg(&args, "transaction_id").to_owned();
                let mut update: PaymentUpdate = decode_args("update-payment", args)?;
                // Empty strings are treated as not supplied.
                if update.username.as_deref() == Some("") {
                    update.username = None;
                }
                if update.status.as_deref() == Some("") {
                    update.status = None;
                }
                client.update_payment(&transaction_id, &update).await
            })
        },
    )
}

fn add_payment_note() -> Tool {
    Tool::new(
        "add-payment-note",
        "Add a note to a payment",
        ToolSchema::new()
            .field(
                "transaction_id",
                ParamSpec::string("The transaction ID of the payment").min_len(1),
            )
            .field("note", ParamSpec::string("Note text to add to the payment").min_len(1)),
        |client, args| {
            Box::pin(async move {
                client.add_payment_note(str_arg(&args, "transaction_id"), str_arg(&args, "note")).await
            })
        },
    )
}
