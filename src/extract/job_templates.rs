//! Job template report rows
//!
//! Credential names come straight from the record's summary fields; job
//! templates are the one relation-bearing resource that needs no
//! sub-request.

use serde_json::Value;

use crate::error::{AuditError, Result};
use crate::report::list_repr;

use super::fields;

pub(crate) const HEADER: &str =
    "Job Template ID;Organization;Job Template Name;Project;Credentials;Inventory;Created By;Modified By";

pub(crate) fn flatten(record: &Value) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "job_templates")?;
    let name = fields::req_str(record, "name", "job_templates")?;
    let org = fields::linked_name_or_null(record, "organization", "job_templates")?;
    let project = fields::linked_name_or_null(record, "project", "job_templates")?;
    let inventory = fields::linked_name_or_null(record, "inventory", "job_templates")?;

    let credentials = summary_credential_names(record)?;
    let created_by = fields::summary_str(record, "created_by", "username")
        .unwrap_or_else(|| fields::NULL_CELL.to_string());
    let modified_by = fields::summary_str(record, "modified_by", "username")
        .unwrap_or_else(|| fields::NULL_CELL.to_string());

    Ok(vec![
        id.to_string(),
        org,
        name,
        project,
        list_repr(&credentials),
        inventory,
        created_by,
        modified_by,
    ])
}

fn summary_credential_names(record: &Value) -> Result<Vec<String>> {
    let Some(credentials) = record
        .pointer("/summary_fields/credentials")
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    credentials
        .iter()
        .map(|c| {
            c.get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    AuditError::Malformed(
                        "job_templates: summary credential missing 'name'".to_string(),
                    )
                })
        })
        .collect()
}
