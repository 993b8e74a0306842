//! Host report rows
//!
//! The `variables` blob on a host is free text: either YAML-ish
//! `key: value` lines or a JSON document embedded as an escaped string.
//! Both encodings of `ansible_host`/`ansible_ssh_host` are recognized;
//! the first match wins and an absent variable yields an empty cell.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::config::api;
use crate::controller::ControllerClient;
use crate::error::Result;

use super::{fields, ExtractContext};

pub(crate) const HEADER: &str =
    "Host ID;Organization;Inventory;Hostname;ansible_host;ansible_ssh_host";

static ANSIBLE_HOST_RE: OnceLock<Regex> = OnceLock::new();
static ANSIBLE_SSH_HOST_RE: OnceLock<Regex> = OnceLock::new();

fn ansible_host_re() -> &'static Regex {
    ANSIBLE_HOST_RE.get_or_init(|| {
        Regex::new(r#"ansible_host: (\S+)|\\"ansible_host\\": \\"(.*?)\\""#)
            .expect("valid ansible_host regex")
    })
}

fn ansible_ssh_host_re() -> &'static Regex {
    ANSIBLE_SSH_HOST_RE.get_or_init(|| {
        Regex::new(r#"ansible_ssh_host: (\S+)|\\"ansible_ssh_host\\": \\"(.*?)\\""#)
            .expect("valid ansible_ssh_host regex")
    })
}

/// First match of either encoding, or empty when the variable is absent
fn variable_value(variables: &str, re: &Regex) -> String {
    re.captures(variables)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub(crate) async fn flatten(
    client: &ControllerClient,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Vec<String>> {
    let id = fields::req_u64(record, "id", "hosts")?;
    let hostname = fields::req_str(record, "name", "hosts")?;
    let variables = fields::req_str(record, "variables", "hosts")?;
    let inventory = fields::req_summary_str(record, "inventory", "name", "hosts")?;

    let ansible_host = variable_value(&variables, ansible_host_re());
    let ansible_ssh_host = variable_value(&variables, ansible_ssh_host_re());

    let org_id = fields::req_summary_u64(record, "inventory", "organization_id", "hosts")?;
    let org = if ctx.resolve_org_names {
        let path = format!("{}/{}", api::ORGANIZATIONS, org_id);
        let context = format!("organization {}", org_id);
        let org = client.get_object(&path, &context).await?;
        fields::req_str(&org, "name", &context)?
    } else {
        org_id.to_string()
    };

    Ok(vec![
        id.to_string(),
        org,
        inventory,
        hostname,
        ansible_host,
        ansible_ssh_host,
    ])
}
