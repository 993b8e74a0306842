//! Controller password resolution from multiple sources

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::config::credentials;
use crate::error::{AuditError, Result};

/// Credentials file structure (`~/.config/aapaudit/credentials.json`)
#[derive(Deserialize, Debug)]
struct CredentialsFile {
    hosts: HashMap<String, HostCredential>,
}

/// Single per-host credential entry
#[derive(Deserialize, Debug)]
struct HostCredential {
    password: String,
}

/// Password resolution with fallback logic
pub struct PasswordResolver {
    host: String,
}

impl PasswordResolver {
    /// Create a new password resolver for the given controller host
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
        }
    }

    /// Resolve the password from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. Environment variables (AAP_PASSWORD, TOWER_PASSWORD, CONTROLLER_PASSWORD)
    /// 3. Credentials file (~/.config/aapaudit/credentials.json)
    /// 4. Interactive prompt
    pub fn resolve(&self, cli_password: Option<&str>) -> Result<String> {
        if let Some(password) = cli_password {
            debug!("Using password from CLI argument");
            return Ok(password.to_string());
        }

        for env_var in credentials::PASSWORD_ENV_VARS {
            if let Ok(password) = std::env::var(env_var) {
                debug!("Using password from {} environment variable", env_var);
                return Ok(password);
            }
        }

        if let Some(password) = self.read_from_credentials_file()? {
            return Ok(password);
        }

        self.prompt()
    }

    /// Read the per-host password from the credentials file, if present
    fn read_from_credentials_file(&self) -> Result<Option<String>> {
        let Some(path) = Self::credentials_path() else {
            return Ok(None);
        };

        debug!("Looking for credentials file at: {}", path.display());

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Ok(None),
        };

        let creds: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            AuditError::Credentials(format!(
                "Could not parse credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(creds.hosts.get(&self.host).map(|c| {
            debug!(
                "Using password from credentials file {} for host: {}",
                path.display(),
                self.host
            );
            c.password.clone()
        }))
    }

    /// Interactive prompt, used only when every other source came up empty
    fn prompt(&self) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(format!("Password for {}", self.host))
            .interact()
            .map_err(|_| AuditError::Credentials(self.not_found_message()))
    }

    /// Generate helpful error message when no password source worked
    fn not_found_message(&self) -> String {
        let env_vars = credentials::PASSWORD_ENV_VARS.join(", ");
        format!(
            "No password found for host '{}'. Please provide one using one of:\n\
             \n\
             1. CLI argument:      aapaudit --password <PASSWORD>\n\
             2. Environment var:   export AAP_PASSWORD=<PASSWORD>  (also: TOWER_PASSWORD, CONTROLLER_PASSWORD)\n\
             3. Credentials file:  ~/.config/{}\n\
             \n\
             Checked: env vars [{}]",
            self.host,
            credentials::FILE_PATH,
            env_vars
        )
    }

    /// Path to the per-user credentials file
    fn credentials_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|p| p.join(credentials::FILE_PATH))
    }
}
