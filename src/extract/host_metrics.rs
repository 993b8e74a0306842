//! Host metric report rows

use serde_json::Value;

use crate::error::Result;

use super::fields;

pub(crate) const HEADER: &str =
    "Hostname;First Automation;Last Automation;Last Deleted;Automated Counter;Deleted Counter;Used In Inventories;Deleted";

pub(crate) fn flatten(record: &Value) -> Result<Vec<String>> {
    let hostname = fields::req_str(record, "hostname", "host_metrics")?;

    Ok(vec![
        hostname,
        fields::text_or_null(record, "first_automation"),
        fields::text_or_null(record, "last_automation"),
        fields::text_or_null(record, "last_deleted"),
        fields::count_cell(record, "automated_counter"),
        fields::count_cell(record, "deleted_counter"),
        fields::int_or_null(record, "used_in_inventories_counter"),
        fields::bool_cell(record, "deleted"),
    ])
}
