//! End-to-end command handling against a scripted service.

use assetscan_api::{ApiRequest, ApiResponse, HttpTransport};
use assetscan_auth::{FileSessionStore, MemorySessionStore, Session, SessionStore};
use assetscan_cli::state::AppState;
use assetscan_cli::{dispatch, error, AssetsCommand, Cli, Command, ScanCommand};
use assetscan_core::AppConfig;
use async_trait::async_trait;
use clap::Parser;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
struct ScriptedService {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedService {
    fn with(responses: &[(u16, &str)]) -> Arc<Self> {
        let service = Self::default();
        service.responses.lock().unwrap().extend(
            responses
                .iter()
                .map(|(status, body)| ApiResponse::new(*status, *body)),
        );
        Arc::new(service)
    }

    fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedService {
    async fn execute(&self, request: ApiRequest) -> assetscan_api::Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: no scripted response left"))
    }
}

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.session.persist = false;
    config.tracking.poll_interval_ms = 1000;
    config
}

fn logged_in_store() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(Session::new(
        "tok",
        "u-1",
        "operator",
        "operator@example.com",
        vec!["ROLE_USER".to_string()],
    )))
}

async fn run(state: &AppState, args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("assetscan").chain(args.iter().copied()))
        .expect("valid arguments");
    let mut out = Vec::new();
    dispatch(state, cli.command, &mut out).await?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[tokio::test]
async fn test_login_whoami_logout_with_file_store() {
    let tmp = TempDir::new().expect("create temp dir");
    let store = Arc::new(FileSessionStore::new(tmp.path().join("session.json")));
    let service = ScriptedService::with(&[(
        200,
        r#"{"token":"jwt","type":"Bearer","id":"u-7","username":"operator","email":"op@example.com","roles":["ROLE_USER"]}"#,
    )]);
    let state = AppState::with_parts(config(), service.clone(), store.clone());

    let out = run(&state, &["whoami"]).await.unwrap();
    assert_eq!(out.trim(), "Not logged in");

    let out = run(&state, &["login", "operator", "--password", "s3cret"])
        .await
        .unwrap();
    assert_eq!(out.trim(), "Logged in as operator");
    assert_eq!(store.load().unwrap().unwrap().token(), "jwt");

    let out = run(&state, &["whoami"]).await.unwrap();
    assert!(out.contains("Logged in as operator (u-7)"));

    let out = run(&state, &["logout"]).await.unwrap();
    assert_eq!(out.trim(), "Logged out");
    assert!(store.load().unwrap().is_none());
    assert_eq!(service.requests(), vec!["POST auth/signin"]);
}

#[tokio::test]
async fn test_expired_session_clears_store() {
    let store = logged_in_store();
    let service = ScriptedService::with(&[(401, ""), (401, "")]);
    let state = AppState::with_parts(config(), service.clone(), store.clone());

    let err = run(&state, &["assets", "list"]).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to list assets"));
    assert!(store.load().unwrap().is_none());

    let err = run(&state, &["scan", "list"]).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to list scan jobs"));
    assert_eq!(service.requests().len(), 2);
    assert!(error::hint(&err).is_none());
}

#[tokio::test]
async fn test_assets_listing() {
    let service = ScriptedService::with(&[
        (
            200,
            r#"[{"id":"a-1","ipAddress":"10.0.0.5","hostname":"printer","assetType":"PRINTER","online":true}]"#,
        ),
        (200, "[]"),
    ]);
    let state = AppState::with_parts(config(), service.clone(), logged_in_store());

    let out = run(&state, &["assets", "type", "PRINTER"]).await.unwrap();
    assert!(out.contains("10.0.0.5"));
    assert!(out.contains("printer"));
    assert!(out.contains("online"));

    let out = run(&state, &["assets", "online", "false"]).await.unwrap();
    assert_eq!(out.trim(), "No assets found");

    assert_eq!(
        service.requests(),
        vec!["GET assets/type/PRINTER", "GET assets/online/false"]
    );
}

#[tokio::test]
async fn test_submit_without_targets_sends_nothing() {
    let service = ScriptedService::with(&[]);
    let state = AppState::with_parts(config(), service.clone(), logged_in_store());

    let err = run(&state, &["scan", "submit", "--name", "Empty"])
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("at least one IP address or IP segment is required"));
    assert!(service.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_submit_and_watch_to_completion() {
    let service = ScriptedService::with(&[
        (200, r#"{"id":"job-5","name":"Lab","status":"CREATED"}"#),
        (200, ""),
        (
            200,
            r#"{"id":"job-5","name":"Lab","status":"RUNNING","totalTargets":10,"completedTargets":5,"successfulTargets":5}"#,
        ),
        (
            200,
            r#"{"id":"job-5","name":"Lab","status":"COMPLETED","totalTargets":10,"completedTargets":10,"successfulTargets":9,"failedTargets":1}"#,
        ),
    ]);
    let state = AppState::with_parts(config(), service.clone(), logged_in_store());

    let out = run(
        &state,
        &[
            "scan",
            "submit",
            "--name",
            "Lab",
            "--segments",
            "10.0.0.1-10",
            "--watch",
        ],
    )
    .await
    .expect("submit and watch");

    assert!(out.contains("Estimated duration: ~36 seconds (10 targets, Medium resource usage)"));
    assert!(out.contains("Started scan job job-5 (Lab)"));
    assert!(out.contains("Scan job job-5 finished: COMPLETED (9 ok, 1 failed of 10)"));

    assert_eq!(
        service.requests(),
        vec![
            "POST scan/create",
            "POST scan/run/job-5",
            "GET scan/jobs/job-5",
            "GET scan/jobs/job-5",
        ]
    );
}

#[tokio::test]
async fn test_run_accepts_empty_acknowledgement() {
    let service = ScriptedService::with(&[(200, "")]);
    let state = AppState::with_parts(config(), service.clone(), logged_in_store());

    let out = run(&state, &["scan", "run", "job-5"]).await.expect("run job");
    assert_eq!(out.trim(), "Started scan job job-5");
    assert_eq!(service.requests(), vec!["POST scan/run/job-5"]);
}

#[tokio::test]
async fn test_show_results_and_delete() {
    let service = ScriptedService::with(&[
        (
            200,
            r#"{"id":"job-5","name":"Lab","status":"COMPLETED","totalTargets":1,"completedTargets":1,"lastRunAt":"2024-05-02T08:00:00"}"#,
        ),
        (
            200,
            r#"[{"ipAddress":"10.0.0.1","successful":false,"errorMessage":"Host unreachable"}]"#,
        ),
        (200, ""),
    ]);
    let state = AppState::with_parts(config(), service.clone(), logged_in_store());

    let out = run(&state, &["scan", "show", "job-5"]).await.unwrap();
    assert!(out.contains("Status:      COMPLETED"));
    assert!(out.contains("Last run:    2024-05-02 08:00:00"));

    let out = run(&state, &["scan", "results", "job-5"]).await.unwrap();
    assert!(out.contains("failed: Host unreachable"));

    let out = run(&state, &["scan", "delete", "job-5"]).await.unwrap();
    assert_eq!(out.trim(), "Deleted scan job job-5");
}

#[test]
fn test_subcommand_parsing() {
    let cli = Cli::try_parse_from(["assetscan", "scan", "list"]).unwrap();
    assert!(matches!(cli.command, Command::Scan(ScanCommand::List)));
    let cli = Cli::try_parse_from(["assetscan", "assets", "get", "a-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Assets(AssetsCommand::Get { .. })
    ));
}
