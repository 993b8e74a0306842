//! Resource extraction: kinds, per-resource state machine, run driver
//!
//! One extractor run per resource kind: probe page 1 for the total count,
//! derive the page count, then walk pages sequentially, fully resolving
//! each record's relations before its row is written. A fatal condition
//! aborts only the current resource; the run driver carries on with the
//! next configured kind.

mod credentials;
mod fields;
mod host_metrics;
mod hosts;
mod inventories;
mod inventory_sources;
mod job_templates;
mod projects;
mod roles;
mod teams;
mod users;
mod workflow_job_templates;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde_json::Value;

use crate::controller::paging::pages_needed;
use crate::controller::ControllerClient;
use crate::error::{AuditError, Result};
use crate::report::{ReportWriter, RunLog};

/// The fixed set of extractable resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Credentials,
    Projects,
    Hosts,
    JobTemplates,
    WorkflowJobTemplates,
    Roles,
    Inventories,
    InventorySources,
    Users,
    Teams,
    HostMetrics,
}

impl ResourceKind {
    /// Every known kind, in default extraction order
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Credentials,
        ResourceKind::Projects,
        ResourceKind::Hosts,
        ResourceKind::JobTemplates,
        ResourceKind::WorkflowJobTemplates,
        ResourceKind::Roles,
        ResourceKind::Inventories,
        ResourceKind::InventorySources,
        ResourceKind::Users,
        ResourceKind::Teams,
        ResourceKind::HostMetrics,
    ];

    /// API collection path; doubles as the report file stem and CLI name
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Credentials => "credentials",
            ResourceKind::Projects => "projects",
            ResourceKind::Hosts => "hosts",
            ResourceKind::JobTemplates => "job_templates",
            ResourceKind::WorkflowJobTemplates => "workflow_job_templates",
            ResourceKind::Roles => "roles",
            ResourceKind::Inventories => "inventories",
            ResourceKind::InventorySources => "inventory_sources",
            ResourceKind::Users => "users",
            ResourceKind::Teams => "teams",
            ResourceKind::HostMetrics => "host_metrics",
        }
    }

    /// Fixed header row of this kind's report file
    pub fn header(&self) -> &'static str {
        match self {
            ResourceKind::Credentials => credentials::HEADER,
            ResourceKind::Projects => projects::HEADER,
            ResourceKind::Hosts => hosts::HEADER,
            ResourceKind::JobTemplates => job_templates::HEADER,
            ResourceKind::WorkflowJobTemplates => workflow_job_templates::HEADER,
            ResourceKind::Roles => roles::HEADER,
            ResourceKind::Inventories => inventories::HEADER,
            ResourceKind::InventorySources => inventory_sources::HEADER,
            ResourceKind::Users => users::HEADER,
            ResourceKind::Teams => teams::HEADER,
            ResourceKind::HostMetrics => host_metrics::HEADER,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.path()).collect();
                AuditError::UnknownResource(format!("'{}' (known: {})", s, known.join(", ")))
            })
    }
}

/// Read-only per-run settings shared by all extractors
#[derive(Debug, Clone)]
pub struct ExtractContext {
    pub page_size: u32,
    /// Host rows resolve organization names (one extra request per host)
    /// instead of organization ids
    pub resolve_org_names: bool,
}

/// Flatten one record, resolving its relations first
///
/// `None` means the record is suppressed (roles without any assignment).
async fn flatten_record(
    client: &ControllerClient,
    kind: ResourceKind,
    record: &Value,
    ctx: &ExtractContext,
) -> Result<Option<Vec<String>>> {
    match kind {
        ResourceKind::Credentials => credentials::flatten(record).map(Some),
        ResourceKind::Projects => projects::flatten(record).map(Some),
        ResourceKind::Hosts => hosts::flatten(client, record, ctx).await.map(Some),
        ResourceKind::JobTemplates => job_templates::flatten(record).map(Some),
        ResourceKind::WorkflowJobTemplates => workflow_job_templates::flatten(record).map(Some),
        ResourceKind::Roles => roles::flatten(client, record, ctx).await,
        ResourceKind::Inventories => inventories::flatten(client, record, ctx).await.map(Some),
        ResourceKind::InventorySources => {
            inventory_sources::flatten(client, record, ctx).await.map(Some)
        }
        ResourceKind::Users => users::flatten(client, record, ctx).await.map(Some),
        ResourceKind::Teams => teams::flatten(client, record, ctx).await.map(Some),
        ResourceKind::HostMetrics => host_metrics::flatten(record).map(Some),
    }
}

/// Drive one resource from first page to flushed report file
///
/// Returns the number of rows written. Any error aborts this resource
/// only; the partially written file is left behind with whatever rows
/// completed.
pub async fn extract_resource(
    client: &ControllerClient,
    kind: ResourceKind,
    ctx: &ExtractContext,
    writer: &mut ReportWriter,
    log: &mut RunLog,
) -> Result<u64> {
    let first = client.get_page(kind.path(), 1, ctx.page_size, kind.path()).await?;
    let total = first.total_count(kind.path())?;
    let pages = pages_needed(total, ctx.page_size);

    log.line(&format!(
        "There is a total of {} {} in {} page(s). Extracting it all...",
        total, kind, pages
    ));

    let mut rows = 0u64;
    let mut first_page = Some(first);
    for page_no in 1..=pages {
        log.line(&format!("Page {} / {}...", page_no, pages));
        let page = match first_page.take() {
            Some(page) => page,
            None => {
                client
                    .get_page(kind.path(), page_no, ctx.page_size, kind.path())
                    .await?
            }
        };

        let records: Vec<&Value> = match kind {
            ResourceKind::Roles => roles::system_roles_first(&page.results),
            _ => page.results.iter().collect(),
        };

        for record in records {
            if let Some(row) = flatten_record(client, kind, record, ctx).await? {
                writer.write_row(&row)?;
                rows += 1;
            } else {
                debug!("{}: record suppressed", kind);
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Drive the whole run across the configured kinds, in order
///
/// Returns `true` when every resource completed; per-resource failures
/// are logged and do not stop the run.
pub async fn run_extraction(
    client: &ControllerClient,
    kinds: &[ResourceKind],
    ctx: &ExtractContext,
    results_dir: &Path,
    log: &mut RunLog,
) -> Result<bool> {
    std::fs::create_dir_all(results_dir)?;

    let mut all_ok = true;
    for kind in kinds {
        log.line(
            "______________________________________________________________________________________________",
        );
        log.line(&format!("Extracting {}....", kind));

        let mut writer = match ReportWriter::create(results_dir, kind.path(), kind.header()) {
            Ok(writer) => writer,
            Err(e) => {
                log.line(&format!("Cannot open report file for {}: {}", kind, e));
                all_ok = false;
                continue;
            }
        };

        match extract_resource(client, *kind, ctx, &mut writer, log).await {
            Ok(rows) => log.line(&format!(
                "{} extraction complete ({} row(s)). Results stored in: {}",
                kind,
                rows,
                writer.path().display()
            )),
            Err(e) => {
                all_ok = false;
                log.line(&format!("{} extraction failed: {}", kind, e));
            }
        }
    }

    log.flush()?;
    Ok(all_ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_ctx() -> ExtractContext {
        ExtractContext {
            page_size: 200,
            resolve_org_names: false,
        }
    }

    fn test_log(dir: &Path) -> RunLog {
        RunLog::create_quiet(&dir.join("run.log")).unwrap()
    }

    fn project(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "organization": 1,
            "credential": null,
            "summary_fields": {"organization": {"name": "Default"}}
        })
    }

    #[test]
    fn test_resource_kind_from_str() {
        assert_eq!(
            ResourceKind::from_str("projects").unwrap(),
            ResourceKind::Projects
        );
        assert_eq!(
            ResourceKind::from_str("workflow_job_templates").unwrap(),
            ResourceKind::WorkflowJobTemplates
        );
    }

    #[test]
    fn test_resource_kind_from_str_unknown() {
        let err = ResourceKind::from_str("widgets").unwrap_err();
        match err {
            AuditError::UnknownResource(msg) => {
                assert!(msg.contains("'widgets'"));
                assert!(msg.contains("host_metrics"));
            }
            other => panic!("Expected AuditError::UnknownResource, got {:?}", other),
        }
    }

    #[test]
    fn test_all_kinds_roundtrip_and_headers() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_str(kind.path()).unwrap(), kind);
            assert!(kind.header().contains(';'));
        }
    }

    #[tokio::test]
    async fn test_extract_projects_two_pages() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/projects"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "results": [project(1, "alpha"), project(2, "beta")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "results": [project(3, "gamma")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ControllerClient::test_client(&mock_server.uri());
        let ctx = ExtractContext {
            page_size: 2,
            resolve_org_names: false,
        };
        let mut log = test_log(dir.path());
        let mut writer = ReportWriter::create(
            dir.path(),
            ResourceKind::Projects.path(),
            ResourceKind::Projects.header(),
        )
        .unwrap();

        let rows = extract_resource(&client, ResourceKind::Projects, &ctx, &mut writer, &mut log)
            .await
            .unwrap();
        assert_eq!(rows, 3);

        let content = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();
        assert_eq!(
            content,
            "Project ID;Organization;Project Name;Credential\n\
             1;Default;alpha;Null\n\
             2;Default;beta;Null\n\
             3;Default;gamma;Null\n"
        );
    }

    #[tokio::test]
    async fn test_extract_empty_resource_writes_header_only() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/projects"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 0,
                "results": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ControllerClient::test_client(&mock_server.uri());
        let mut log = test_log(dir.path());
        let mut writer = ReportWriter::create(
            dir.path(),
            ResourceKind::Projects.path(),
            ResourceKind::Projects.header(),
        )
        .unwrap();

        let rows = extract_resource(
            &client,
            ResourceKind::Projects,
            &test_ctx(),
            &mut writer,
            &mut log,
        )
        .await
        .unwrap();
        assert_eq!(rows, 0);

        let content = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();
        assert_eq!(content, "Project ID;Organization;Project Name;Credential\n");
    }

    #[tokio::test]
    async fn test_extract_missing_count_is_fatal_for_resource() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/hosts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&mock_server)
            .await;

        let client = ControllerClient::test_client(&mock_server.uri());
        let mut log = test_log(dir.path());
        let mut writer = ReportWriter::create(
            dir.path(),
            ResourceKind::Hosts.path(),
            ResourceKind::Hosts.header(),
        )
        .unwrap();

        let result = extract_resource(
            &client,
            ResourceKind::Hosts,
            &test_ctx(),
            &mut writer,
            &mut log,
        )
        .await;
        assert!(matches!(result.unwrap_err(), AuditError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_extract_roles_suppression_and_order() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        // Scoped role listed before the system role upstream; system role
        // must still be reported first
        Mock::given(method("GET"))
            .and(path("/api/v2/roles"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 3,
                "results": [
                    {
                        "id": 10,
                        "name": "Admin",
                        "summary_fields": {
                            "resource_name": "demo",
                            "resource_type_display_name": "Project"
                        }
                    },
                    {"id": 1, "name": "System Administrator", "summary_fields": {}},
                    {
                        "id": 11,
                        "name": "Read",
                        "summary_fields": {
                            "resource_name": "demo",
                            "resource_type_display_name": "Project"
                        }
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        for (id, users, teams) in [
            (1u64, vec!["root"], vec![]),
            (10, vec!["alice"], vec!["ops"]),
            (11, vec![], vec![]), // unassigned, must be suppressed
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v2/roles/{}/users", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "count": users.len(),
                    "results": users.iter().map(|u| json!({"id": 1, "username": u})).collect::<Vec<_>>()
                })))
                .mount(&mock_server)
                .await;
            Mock::given(method("GET"))
                .and(path(format!("/api/v2/roles/{}/teams", id)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "count": teams.len(),
                    "results": teams.iter().map(|t| json!({"id": 1, "name": t})).collect::<Vec<_>>()
                })))
                .mount(&mock_server)
                .await;
        }

        let client = ControllerClient::test_client(&mock_server.uri());
        let mut log = test_log(dir.path());
        let mut writer = ReportWriter::create(
            dir.path(),
            ResourceKind::Roles.path(),
            ResourceKind::Roles.header(),
        )
        .unwrap();

        let rows = extract_resource(
            &client,
            ResourceKind::Roles,
            &test_ctx(),
            &mut writer,
            &mut log,
        )
        .await
        .unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(dir.path().join("roles.csv")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1;*;*;System Administrator"));
        assert!(lines[2].starts_with("10;Project;demo;Admin"));
        // Unassigned role 11 never appears
        assert!(!content.contains("\n11;"));
    }

    #[tokio::test]
    async fn test_run_extraction_isolates_resource_failure() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/hosts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [project(1, "alpha")]
            })))
            .mount(&mock_server)
            .await;

        let client = ControllerClient::test_client(&mock_server.uri());
        let mut log = test_log(dir.path());

        let all_ok = run_extraction(
            &client,
            &[ResourceKind::Hosts, ResourceKind::Projects],
            &test_ctx(),
            dir.path(),
            &mut log,
        )
        .await
        .unwrap();

        // Hosts failed, projects still extracted
        assert!(!all_ok);
        let projects = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();
        assert!(projects.contains("1;Default;alpha;Null"));
        // Failed resource still leaves its header-only file behind
        let hosts = std::fs::read_to_string(dir.path().join("hosts.csv")).unwrap();
        assert_eq!(hosts.lines().count(), 1);

        let log_content = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
        assert!(log_content.contains("hosts extraction failed"));
        assert!(log_content.contains("projects extraction complete"));
    }

    #[tokio::test]
    async fn test_rerun_produces_identical_output() {
        let mock_server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        Mock::given(method("GET"))
            .and(path("/api/v2/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 2,
                "results": [project(1, "alpha"), project(2, "beta")]
            })))
            .mount(&mock_server)
            .await;

        let client = ControllerClient::test_client(&mock_server.uri());
        let mut log = test_log(dir.path());
        let kinds = [ResourceKind::Projects];

        run_extraction(&client, &kinds, &test_ctx(), dir.path(), &mut log)
            .await
            .unwrap();
        let first = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();

        run_extraction(&client, &kinds, &test_ctx(), dir.path(), &mut log)
            .await
            .unwrap();
        let second = std::fs::read_to_string(dir.path().join("projects.csv")).unwrap();

        assert_eq!(first, second);
    }
}
