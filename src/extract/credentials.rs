//! Credential report rows

use serde_json::Value;

use crate::error::Result;

use super::fields;

pub(crate) const HEADER: &str = "Credential ID;Organization;Credential Name;Kind";

pub(crate) fn flatten(record: &Value) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "credentials")?;
    let name = fields::req_str(record, "name", "credentials")?;
    let org = fields::linked_name_or_null(record, "organization", "credentials")?;
    // The credential type is the one summary field this report cannot do without
    let kind = fields::req_summary_str(record, "credential_type", "name", "credentials")?;

    Ok(vec![id.to_string(), org, name, kind])
}
