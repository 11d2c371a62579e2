//! Ban tools.

use crate::mcp::registry::{Tool, decode_args};
use crate::schema::{ParamSpec, ToolSchema};
use crate::tebex::BanRequest;

pub(crate) fn tools() -> Vec<Tool> {
    vec![
        Tool::new(
            "list-bans",
            "List all banned users",
            ToolSchema::new(),
            |client, _args| Box::pin(async move { client.list_bans().await }),
        ),
        Tool::new(
            "create-ban",
            "Ban a user from the store, optionally by IP address",
            ToolSchema::new()
                .field("user", ParamSpec::string("Username or UUID of the user to ban").min_len(1))
                .field("ip", ParamSpec::string("IP address to ban").optional())
                .field("reason", ParamSpec::string("Reason for the ban").optional()),
            |client, args| {
                Box::pin(async move {
                    let ban: BanRequest = decode_args("create-ban", args)?;
                    client.create_ban(&ban).await
                })
            },
        ),
    ]
}
