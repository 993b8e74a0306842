//! aapaudit - Audit report extractor for automation controllers
//!
//! A CLI tool that pulls inventory, access, and usage data out of an
//! AWX / automation controller REST API and writes one semicolon-delimited
//! report file per resource kind.
//!
//! # Features
//!
//! - Extracts credentials, projects, hosts, job templates, workflow job
//!   templates, roles, inventories, inventory sources, users, teams, and
//!   host metrics
//! - Full pagination of collections and of every nested relation
//! - Preflight reachability and authentication checks with distinct exit
//!   codes per failure class
//! - Password fallback chain: flag, environment, credentials file, prompt
//!
//! # Example
//!
//! ```bash
//! # Extract everything
//! aapaudit -H awx.example.com -u admin
//!
//! # Only projects and teams, into a custom directory
//! aapaudit -H awx.example.com -u admin -r projects,teams -o /tmp/audit
//!
//! # Lab controller with a self-signed certificate
//! aapaudit -H awx.lab -u admin --insecure
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod report;

pub use cli::Cli;
pub use controller::{ControllerClient, Identity, PasswordResolver};
pub use error::{AuditError, Result};
pub use extract::{run_extraction, ExtractContext, ResourceKind};
pub use report::{ReportWriter, RunLog};
