//! Project report rows

use serde_json::Value;

use crate::error::Result;

use super::fields;

pub(crate) const HEADER: &str = "Project ID;Organization;Project Name;Credential";

pub(crate) fn flatten(record: &Value) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "projects")?;
    let name = fields::req_str(record, "name", "projects")?;
    let org = fields::linked_name_or_null(record, "organization", "projects")?;
    let credential = fields::linked_name_or_null(record, "credential", "projects")?;

    Ok(vec![id.to_string(), org, name, credential])
}
