//! Sale tools.

use crate::mcp::registry::Tool;
use crate::schema::ToolSchema;

pub(crate) fn tools() -> Vec<Tool> {
    vec![Tool::new(
        "list-sales",
        "List all active sales/discounts in the store",
        ToolSchema::new(),
        |client, _args| Box::pin(async move { client.list_sales().await }),
    )]
}
