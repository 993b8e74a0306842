//! Workflow job template report rows

use serde_json::Value;

use crate::error::Result;

use super::fields;

pub(crate) const HEADER: &str =
    "Workflow Job Template ID;Organization;Workflow Job Template Name;Inventory;Limit";

pub(crate) fn flatten(record: &Value) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "workflow_job_templates")?;
    let name = fields::req_str(record, "name", "workflow_job_templates")?;
    let org = fields::linked_name_or_null(record, "organization", "workflow_job_templates")?;
    let inventory = fields::linked_name_or_null(record, "inventory", "workflow_job_templates")?;
    let limit = fields::text_or_null(record, "limit");

    Ok(vec![id.to_string(), org, name, inventory, limit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_full_record() {
        let record = json!({
            "id": 31,
            "name": "Release",
            "organization": 1,
            "inventory": 2,
            "limit": "web*",
            "summary_fields": {
                "organization": {"name": "Default"},
                "inventory": {"name": "prod"}
            }
        });
        assert_eq!(
            flatten(&record).unwrap(),
            vec!["31", "Default", "Release", "prod", "web*"]
        );
    }

    #[test]
    fn test_flatten_absent_optionals() {
        let record = json!({
            "id": 32,
            "name": "Nightly",
            "organization": null,
            "inventory": null,
            "limit": ""
        });
        assert_eq!(
            flatten(&record).unwrap(),
            vec!["32", "Null", "Nightly", "Null", "Null"]
        );
    }
}
