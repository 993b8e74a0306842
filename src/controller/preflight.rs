//! Connectivity and authorization checks run before extraction
//!
//! Both checks are fatal for the whole run when they fail; the privilege
//! check on the resolved identity only produces a warning, since a
//! non-admin account can still read a subset of the collections.

use std::time::Duration;

use log::debug;
use serde_json::Value;
use tokio::net::TcpStream;

use crate::config::api;
use crate::error::{AuditError, Result};

use super::ControllerClient;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// The identity the controller resolved for our credentials
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub is_superuser: bool,
    pub is_system_auditor: bool,
}

impl Identity {
    /// Whether the account has elevated read scope over all collections
    pub fn is_privileged(&self) -> bool {
        self.is_superuser || self.is_system_auditor
    }
}

/// Check that a TCP connection to `host:port` can be established
pub async fn check_reachable(host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    debug!("Preflight: connecting to {}", addr);

    match tokio::time::timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(AuditError::Unreachable(format!("{}: {}", addr, e))),
        Err(_) => Err(AuditError::Unreachable(format!(
            "{}: connection timed out",
            addr
        ))),
    }
}

/// Check that the configured credentials authenticate against the API
///
/// Returns the resolved identity so the caller can surface a warning for
/// accounts without elevated read scope.
pub async fn check_auth(client: &ControllerClient) -> Result<Identity> {
    let response = client.get_raw(api::ME).await?;

    match response.status().as_u16() {
        200 => {
            let body: Value = response.json().await?;
            parse_identity(&body)
        }
        401 | 403 => Err(AuditError::Auth(
            "controller rejected the configured credentials".to_string(),
        )),
        status => Err(AuditError::Api {
            status,
            message: "Failed to fetch identity during preflight".to_string(),
        }),
    }
}

fn parse_identity(body: &Value) -> Result<Identity> {
    let me = body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| {
            AuditError::Malformed("identity endpoint returned no results".to_string())
        })?;

    let username = me
        .get("username")
        .and_then(Value::as_str)
        .ok_or_else(|| AuditError::Malformed("identity record has no username".to_string()))?
        .to_string();

    Ok(Identity {
        username,
        is_superuser: me
            .get("is_superuser")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        is_system_auditor: me
            .get("is_system_auditor")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}
