//! Team report rows

use serde_json::Value;

use crate::controller::ControllerClient;
use crate::error::Result;
use crate::report::list_repr;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str = "Team ID;Team Name;Organization;Users";

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "teams")?;
    let name = fields::req_str(record, "name", "teams")?;
    let org = fields::req_summary_str(record, "organization", "name", "teams")?;

    let users = client
        .resolve_related_names(
            &format!("teams/{}/users", id),
            "username",
            ctx.page_size,
            &format!("users of team {}", id),
        )
        .await?;

    Ok(vec![id.to_string(), name, org, list_repr(&users)])
}
