//! Store information tools.

use crate::mcp::registry::Tool;
use crate::schema::ToolSchema;

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        "get-store-info",
        "Get store information including name, domain, currency, and game type",
        ToolSchema::new(),
        |client, _args| Box::pin(async move { client.store_info().await }),
    )]
}
