//! Controller API client module
//!
//! Everything that talks HTTP to the AWX/AAP controller lives here: the
//! basic-auth client, page-count arithmetic, relation draining and the
//! preflight checks that run before any extraction starts.

mod client;
mod credentials;
pub mod paging;
pub mod preflight;
pub mod relations;

use serde::Deserialize;

use crate::error::{AuditError, Result};

pub use client::ControllerClient;
pub use credentials::PasswordResolver;
pub use preflight::Identity;

/// One page of a paginated controller listing
///
/// Records stay as raw JSON values: each resource's flattener decides what
/// is required and what falls back to a placeholder.
#[derive(Deserialize, Debug)]
pub struct ResourcePage {
    /// Total item count across all pages; authoritative on page 1 only
    pub count: Option<i64>,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl ResourcePage {
    /// Validated total count, rejecting absent or negative values
    pub fn total_count(&self, context: &str) -> Result<u64> {
        match self.count {
            Some(c) if c >= 0 => Ok(c as u64),
            Some(c) => Err(AuditError::Malformed(format!(
                "{}: negative item count {}",
                context, c
            ))),
            None => Err(AuditError::Malformed(format!(
                "{}: response has no 'count' field",
                context
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserialization() {
        let page: ResourcePage = serde_json::from_value(serde_json::json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(page.total_count("projects").unwrap(), 2);
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_total_count_missing_is_malformed() {
        let page: ResourcePage =
            serde_json::from_value(serde_json::json!({ "results": [] })).unwrap();
        let err = page.total_count("projects").unwrap_err();
        assert!(err.to_string().contains("no 'count'"));
    }

    #[test]
    fn test_total_count_negative_is_malformed() {
        let page: ResourcePage =
            serde_json::from_value(serde_json::json!({ "count": -1, "results": [] })).unwrap();
        let err = page.total_count("hosts").unwrap_err();
        assert!(err.to_string().contains("negative"));
        assert!(err.to_string().contains("hosts"));
    }

    #[test]
    fn test_results_default_to_empty() {
        let page: ResourcePage =
            serde_json::from_value(serde_json::json!({ "count": 0 })).unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_count("teams").unwrap(), 0);
    }
}
