//! Inventory report rows
//!
//! Inventories with sources drain `inventories/{id}/inventory_sources`,
//! and every source additionally resolves its own credential names, so
//! the Inventory Sources cell holds `(source, [credential, ...])` tuples.

use serde_json::Value;

use crate::controller::ControllerClient;
use crate::error::Result;
use crate::report::pair_list_repr;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str =
    "Inventory ID;Organization;Inventory Name;Kind;Host Filter;Total Hosts;Total Groups;Has Inventory Source;Inventory Sources";

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "inventories")?;
    let name = fields::req_str(record, "name", "inventories")?;
    let org = fields::linked_name_or_null(record, "organization", "inventories")?;
    let total_hosts = fields::req_u64(record, "total_hosts", "inventories")?;
    let total_groups = fields::req_u64(record, "total_groups", "inventories")?;
    let has_sources = fields::req_bool(record, "has_inventory_sources", "inventories")?;

    let kind = record
        .get("kind")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    // host_filter only carries meaning on smart inventories
    let host_filter = if kind == "smart" {
        fields::text_or_null(record, "host_filter")
    } else {
        fields::NULL_CELL.to_string()
    };

    let sources = if has_sources {
        resolve_sources(client, id, ctx).await?
    } else {
        Vec::new()
    };

    Ok(vec![
        id.to_string(),
        org,
        name,
        kind,
        host_filter,
        total_hosts.to_string(),
        total_groups.to_string(),
        fields::bool_cell(record, "has_inventory_sources"),
        pair_list_repr(&sources),
    ])
}

async fn resolve_sources(
    client: &ControllerClient,
    inventory_id: u64,
    ctx: &ExtractContext,
) -> Result<Vec<(String, Vec<String>)>> {
    let context = format!("inventory sources of inventory {}", inventory_id);
    let sources = client
        .resolve_relation(
            &format!("inventories/{}/inventory_sources", inventory_id),
            ctx.page_size,
            &context,
            |item| {
                let name = item.get("name").and_then(Value::as_str)?;
                let id = item.get("id").and_then(Value::as_u64)?;
                Some((name.to_string(), id))
            },
        )
        .await?;

    let mut resolved = Vec::with_capacity(sources.len());
    for (source_name, source_id) in sources {
        let credentials = client
            .resolve_related_names(
                &format!("inventory_sources/{}/credentials", source_id),
                "name",
                ctx.page_size,
                &format!("credentials of inventory source {}", source_id),
            )
            .await?;
        resolved.push((source_name, credentials));
    }
    Ok(resolved)
}
