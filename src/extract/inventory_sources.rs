//! Inventory source report rows

use serde_json::Value;

use crate::controller::ControllerClient;
use crate::error::{AuditError, Result};
use crate::report::pair_list_repr;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str =
    "Inventory Source ID;Inventory Source Name;Source;Inventory;Source Project;Credentials";

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "inventory_sources")?;
    let name = fields::req_str(record, "name", "inventory_sources")?;
    let source = fields::req_str(record, "source", "inventory_sources")?;
    let inventory = fields::summary_str(record, "inventory", "name")
        .unwrap_or_else(|| fields::NULL_CELL.to_string());

    // Only scm-backed sources carry a source project
    let source_project = if source == "scm" {
        fields::summary_str(record, "source_project", "name").ok_or_else(|| {
            AuditError::Malformed(format!(
                "inventory_sources: scm source {} missing 'summary_fields.source_project.name'",
                id
            ))
        })?
    } else {
        fields::NULL_CELL.to_string()
    };

    let credentials = client
        .resolve_related_pairs(
            &format!("inventory_sources/{}/credentials", id),
            ("name", "kind"),
            ctx.page_size,
            &format!("credentials of inventory source {}", id),
        )
        .await?;

    Ok(vec![
        id.to_string(),
        name,
        source,
        inventory,
        source_project,
        pair_list_repr(&credentials),
    ])
}
