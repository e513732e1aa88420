//! End-to-end command tests: envelopes produced from fake backends and executors.

use async_trait::async_trait;
use footprint_app::commands::probe::run_probe;
use footprint_app::commands::search::run_search;
use footprint_app::{load_config, probe_exit_status, search_exit_status, to_json};
use footprint_core::{ErrorPolicy, ProbeConfig, ProbeEnvelope, SearchConfig};
use footprint_probe::{ExecError, ExecOutput, Executor, ProbeOrchestrator};
use footprint_search::{
    OrganicResult, PlatformRegistry, SearchBackend, SearchEngine, SearchError, SearchRequest,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// Answers Google page 0 with two hits, fails every Bing query.
struct FlakyBackend;

#[async_trait]
impl SearchBackend for FlakyBackend {
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> footprint_search::Result<Vec<OrganicResult>> {
        match (request.engine, request.page) {
            (SearchEngine::Bing, _) => Err(SearchError::Api {
                engine: SearchEngine::Bing,
                status: 500,
                message: "upstream failure".to_string(),
            }),
            (SearchEngine::Google, 0) => Ok(vec![
                OrganicResult {
                    title: Some("Alice on GitHub".to_string()),
                    link: Some("https://github.com/alice".to_string()),
                    snippet: Some("alice@example.com".to_string()),
                    displayed_link: Some("github.com › alice".to_string()),
                    position: Some(1),
                },
                OrganicResult {
                    title: Some("Alice".to_string()),
                    link: Some("https://blog.example.net/alice".to_string()),
                    ..OrganicResult::default()
                },
            ]),
            _ => Ok(Vec::new()),
        }
    }
}

fn registry() -> Arc<PlatformRegistry> {
    Arc::new(PlatformRegistry::new([("github.com", "GitHub")]))
}

fn search_config(on_error: ErrorPolicy) -> SearchConfig {
    SearchConfig {
        engines: vec!["google".to_string(), "bing".to_string()],
        on_error,
        ..SearchConfig::default()
    }
}

#[tokio::test]
async fn test_search_envelope_collects_partial_results() {
    let envelope = run_search(
        " alice@example.com ",
        Arc::new(FlakyBackend),
        registry(),
        &search_config(ErrorPolicy::Continue),
    )
    .await;

    assert!(envelope.is_success());
    let value: Value = serde_json::from_str(&to_json(&envelope, true).unwrap()).unwrap();
    assert_eq!(value["email"], "alice@example.com");
    assert_eq!(value["result_count"], 2);
    // One chunk, two pages for Bing
    assert_eq!(value["failed_queries"], 2);
    assert_eq!(
        value["results"][0],
        json!({
            "title": "Alice on GitHub",
            "link": "https://github.com/alice",
            "platform": "GitHub",
            "snippet": "alice@example.com",
            "source": "github.com › alice",
            "position": 1,
            "engine": "google"
        })
    );
    assert_eq!(value["results"][1]["platform"], "Other");
    assert_eq!(value["results"][1]["snippet"], "");
    assert_eq!(value["results"][1]["position"], Value::Null);
}

#[tokio::test]
async fn test_search_envelope_abort_discards_results() {
    let envelope = run_search(
        "alice@example.com",
        Arc::new(FlakyBackend),
        registry(),
        &search_config(ErrorPolicy::Abort),
    )
    .await;

    assert!(!envelope.is_success());
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["results"], json!([]));
    assert!(value["error"]
        .as_str()
        .unwrap()
        .contains("upstream failure"));
    assert!(value.get("result_count").is_none());
    assert_eq!(search_exit_status(&envelope), 0);
}

#[tokio::test]
async fn test_search_rejects_blank_identifier() {
    let envelope = run_search(
        "   ",
        Arc::new(FlakyBackend),
        registry(),
        &SearchConfig::default(),
    )
    .await;

    assert!(!envelope.is_success());
}

#[tokio::test]
async fn test_search_unknown_engine_in_config() {
    let config = SearchConfig {
        engines: vec!["altavista".to_string()],
        ..SearchConfig::default()
    };
    let envelope = run_search("alice", Arc::new(FlakyBackend), registry(), &config).await;

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["email"], "alice");
    assert!(value["error"].as_str().unwrap().contains("altavista"));
}

struct FixedExecutor(ExecOutput);

#[async_trait]
impl Executor for FixedExecutor {
    async fn run(
        &self,
        _program: &str,
        _args: &[String],
        _timeout: Duration,
    ) -> Result<ExecOutput, ExecError> {
        Ok(self.0.clone())
    }
}

fn probe_orchestrator(stdout: &str, stderr: &str, exit_code: i32) -> ProbeOrchestrator {
    let executor = Arc::new(FixedExecutor(ExecOutput {
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        exit_code: Some(exit_code),
    }));
    ProbeOrchestrator::from_config(executor, &ProbeConfig::default())
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_probe_success_envelope() {
    let orchestrator = probe_orchestrator("[+] Twitter\n[+] Spotify\n[x] Github\n", "", 0);
    let envelope = run_probe(&args(&["Alice@Example.com"]), &orchestrator).await;

    assert!(envelope.is_success());
    assert_eq!(probe_exit_status(&envelope), 0);
    let value: Value = serde_json::from_str(&to_json(&envelope, false).unwrap()).unwrap();
    assert_eq!(value["email"], "alice@example.com");
    assert_eq!(value["used_on"], json!(["Twitter", "Spotify"]));
    assert_eq!(value["rate_limited"], json!(["Github"]));
    assert_eq!(value["count"], 2);
    assert_eq!(value["total_checked"], 3);
    assert_eq!(value["success"], true);
    assert!(value["scan_time"].is_f64());
    assert!(value.get("warning").is_none());
}

#[tokio::test]
async fn test_probe_argument_count() {
    let orchestrator = probe_orchestrator("[+] Twitter\n", "", 0);

    let missing = serde_json::to_value(run_probe(&[], &orchestrator).await).unwrap();
    assert_eq!(
        missing,
        json!({ "error": "Missing email parameter", "code": "MISSING_EMAIL", "success": false })
    );

    let extra = run_probe(&args(&["a@b.co", "c@d.co"]), &orchestrator).await;
    let extra = serde_json::to_value(extra).unwrap();
    assert_eq!(extra["code"], "TOO_MANY_PARAMS");
    assert_eq!(extra["error"], "Too many parameters");
}

#[tokio::test]
async fn test_probe_failure_envelopes() {
    let orchestrator = probe_orchestrator("", "sh: holehe: command not found", 127);
    let envelope = run_probe(&args(&["alice@example.com"]), &orchestrator).await;
    assert_eq!(probe_exit_status(&envelope), 1);
    match envelope {
        ProbeEnvelope::Failure(failure) => {
            assert_eq!(failure.code.as_str(), "RUNTIME_ERROR");
            assert!(!failure.success);
        }
        ProbeEnvelope::Success(report) => panic!("unexpected success: {report:?}"),
    }

    let envelope = run_probe(&args(&["bad;@example.com"]), &orchestrator).await;
    let value = serde_json::to_value(envelope).unwrap();
    assert_eq!(value["code"], "VALIDATION_ERROR");
    assert_eq!(value["error"], "Invalid input: Email contains dangerous characters");
}

#[tokio::test]
async fn test_probe_envelope_never_carries_tool_stderr() {
    let traceback = "Traceback (most recent call last):\n  \
        File \"/home/deploy/.venv/lib/python3.11/site-packages/holehe/core.py\", line 7\n\
        KeyError: 'modules'\n";

    let failed = probe_orchestrator("", traceback, 1);
    let envelope = run_probe(&args(&["alice@example.com"]), &failed).await;
    assert_eq!(probe_exit_status(&envelope), 1);
    let json = to_json(&envelope, false).unwrap();
    assert!(!json.contains("Traceback"), "{json}");
    assert!(!json.contains(".venv"), "{json}");
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["error"], "Enumeration scan failed");
    assert_eq!(value["code"], "RUNTIME_ERROR");

    let partial = probe_orchestrator("[+] Twitter\n", traceback, 1);
    let envelope = run_probe(&args(&["alice@example.com"]), &partial).await;
    assert_eq!(probe_exit_status(&envelope), 0);
    let json = to_json(&envelope, false).unwrap();
    assert!(!json.contains("Traceback"), "{json}");
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[search]
engines = ["google"]
chunk_size = 4

[probe]
timeout_secs = 30
"#
    )
    .unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.search.engines, vec!["google"]);
    assert_eq!(config.search.chunk_size, 4);
    assert_eq!(config.search.max_pages, 2);
    assert_eq!(config.probe.tool, "holehe");
}

#[test]
fn test_load_config_missing_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load configuration"));
}
