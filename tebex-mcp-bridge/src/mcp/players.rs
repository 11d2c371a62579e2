//! Player entitlement tools.

use crate::mcp::registry::{Tool, str_arg};
use crate::schema::{ParamSpec, ToolSchema};

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        "get-player-packages",
        "Get the active packages for a specific player by their username or UUID",
        ToolSchema::new()
            .field("player_identifier", ParamSpec::string("Player username or UUID").min_len(1)),
        |client, args| {
            Box::pin(async move { client.player_packages(str_arg(&args, "player_identifier")).await })
        },
    )]
}
