//! User report rows

use serde_json::Value;

use crate::controller::ControllerClient;
use crate::error::Result;
use crate::report::list_repr;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str =
    "User ID;Username;First Name;Last Name;Teams;Orgs;LDAP DN;Superuser";

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "users")?;
    let username = fields::req_str(record, "username", "users")?;
    let first_name = fields::text_or_null(record, "first_name");
    let last_name = fields::text_or_null(record, "last_name");
    let ldap_dn = fields::text_or_null(record, "ldap_dn");
    let superuser = fields::bool_cell(record, "is_superuser");

    let teams = client
        .resolve_related_names(
            &format!("users/{}/teams", id),
            "name",
            ctx.page_size,
            &format!("teams of user {}", id),
        )
        .await?;
    let orgs = client
        .resolve_related_names(
            &format!("users/{}/organizations", id),
            "name",
            ctx.page_size,
            &format!("organizations of user {}", id),
        )
        .await?;

    Ok(vec![
        id.to_string(),
        username,
        first_name,
        last_name,
        list_repr(&teams),
        list_repr(&orgs),
        ldap_dn,
        superuser,
    ])
}
