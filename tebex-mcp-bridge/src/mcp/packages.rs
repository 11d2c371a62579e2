//! Package listing tools.

use crate::mcp::registry::Tool;
use crate::schema::ToolSchema;

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        "list-packages",
        "List all packages available in the store, grouped by category",
        ToolSchema::new(),
        |client, _args| Box::pin(async move { client.list_packages().await }),
    )]
}
