//! Role report rows
//!
//! Roles come in two shapes: the two system-level roles (no target
//! resource, reported with a wildcard `*` target) and resource-scoped
//! roles (target taken from the summary fields). Each page is walked in
//! two passes, system roles first. A role with no resolved users and no
//! resolved teams is suppressed entirely.

use serde_json::Value;

use crate::controller::ControllerClient;
use crate::error::Result;
use crate::report::list_repr;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str = "Role ID;Object Type;Object Name;Role;Users;Teams";

const SYSTEM_ROLES: [&str; 2] = ["System Administrator", "System Auditor"];

fn is_system_role(record: &Value) -> bool {
    record
        .get("name")
        .and_then(Value::as_str)
        .map(|name| SYSTEM_ROLES.contains(&name))
        .unwrap_or(false)
        && scoped_target(record).is_none()
}

fn scoped_target(record: &Value) -> Option<&str> {
    record
        .pointer("/summary_fields/resource_name")
        .and_then(Value::as_str)
}

/// Page-walk order: system-level roles first, then resource-scoped roles
pub(crate) fn system_roles_first(results: &[Value]) -> Vec<&Value> {
    let mut ordered: Vec<&Value> = results.iter().filter(|r| is_system_role(r)).collect();
    ordered.extend(results.iter().filter(|r| !is_system_role(r)));
    ordered
}

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Option<Vec<String>>> {
    let id = fields::req_u64(record, "id", "roles")?;
    let role_name = fields::req_str(record, "name", "roles")?;

    let (target_type, target_name) = if let Some(resource_name) = scoped_target(record) {
        // resource_name and the display type travel together on scoped roles
        let target_type = record
            .pointer("/summary_fields/resource_type_display_name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                crate::error::AuditError::Malformed(format!(
                    "roles: role {} missing 'summary_fields.resource_type_display_name'",
                    id
                ))
            })?;
        (target_type.to_string(), resource_name.to_string())
    } else if SYSTEM_ROLES.contains(&role_name.as_str()) {
        ("*".to_string(), "*".to_string())
    } else {
        // Orphan role without a target resource, nothing to report
        return Ok(None);
    };

    let users = client
        .resolve_related_names(
            &format!("roles/{}/users", id),
            "username",
            ctx.page_size,
            &format!("users of role {}", id),
        )
        .await?;
    let teams = client
        .resolve_related_names(
            &format!("roles/{}/teams", id),
            "name",
            ctx.page_size,
            &format!("teams of role {}", id),
        )
        .await?;

    if users.is_empty() && teams.is_empty() {
        return Ok(None);
    }

    Ok(Some(vec![
        id.to_string(),
        target_type,
        target_name,
        role_name,
        list_repr(&users),
        list_repr(&teams),
    ]))
}
