//! End-to-end tool calls against a fake `jj`
//!
//! The server runs a real subprocess for every call; [`FakeJj`] stands in
//! for the `jj` binary and reports what it was given.

#![cfg(unix)]

use std::time::Instant;

use jj_mcp::{JjMcpServer, ServerConfig};
use jj_test_utils::{FakeJj, echoed_args};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn server_for(fake: &FakeJj) -> JjMcpServer {
    JjMcpServer::new(ServerConfig {
        jj: fake.program(),
        ..ServerConfig::default()
    })
}

async fn call_tool(server: &JjMcpServer, name: &str, arguments: Value) -> Value {
    let message = json!({
        "jsonrpc": "2.0",
        "id": "call",
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments},
    });
    let response: Value =
        serde_json::from_str(&server.handle_message(&message.to_string()).await.unwrap()).unwrap();
    assert!(response.get("error").is_none(), "unexpected error: {response}");
    response["result"].clone()
}

fn text(result: &Value) -> &str {
    assert_eq!(result["content"][0]["type"], "text");
    result["content"][0]["text"].as_str().unwrap()
}

fn is_error(result: &Value) -> bool {
    result["isError"].as_bool().unwrap_or(false)
}

#[tokio::test]
async fn test_bookmark_create_runs_expected_command() {
    let fake = FakeJj::echo_args();
    let server = server_for(&fake);

    let result = call_tool(&server, "jj_bookmark_create", json!({"name": "feature-x"})).await;

    assert!(!is_error(&result));
    assert_eq!(echoed_args(text(&result)), vec!["bookmark", "create", "feature-x"]);
}

#[tokio::test]
async fn test_rebase_runs_expected_command() {
    let fake = FakeJj::echo_args();
    let server = server_for(&fake);

    let result = call_tool(
        &server,
        "jj_rebase",
        json!({"source": "@-", "destination": "main"}),
    )
    .await;

    assert_eq!(
        echoed_args(text(&result)),
        vec!["rebase", "--source", "@-", "--destination", "main"]
    );
}

#[tokio::test]
async fn test_repository_becomes_flag() {
    let fake = FakeJj::echo_args();
    let server = server_for(&fake);

    let result = call_tool(
        &server,
        "jj_log",
        json!({"repository": "/work/repo", "limit": 3, "no_graph": true}),
    )
    .await;

    let args = echoed_args(text(&result));
    assert_eq!(args[0], "log");
    assert!(args.windows(2).any(|w| w == ["-R", "/work/repo"]), "{args:?}");
    assert!(args.windows(2).any(|w| w == ["-n", "3"]), "{args:?}");
    assert!(args.contains(&"--no-graph".to_string()), "{args:?}");
}

#[tokio::test]
async fn test_message_with_spaces_is_one_argument() {
    let fake = FakeJj::echo_args();
    let server = server_for(&fake);

    let result = call_tool(
        &server,
        "jj_describe",
        json!({"message": "fix: handle empty diff"}),
    )
    .await;

    assert_eq!(
        echoed_args(text(&result)),
        vec!["describe", "-m", "fix: handle empty diff"]
    );
}

#[tokio::test]
async fn test_output_is_trimmed() {
    let fake = FakeJj::with_script(r#"printf '\n  Working copy changes:\nM a.txt\n\n\n'"#);
    let server = server_for(&fake);

    let result = call_tool(&server, "jj_status", json!({})).await;

    assert!(!is_error(&result));
    assert_eq!(text(&result), "Working copy changes:\nM a.txt");
}

#[tokio::test]
async fn test_failure_reports_stderr() {
    let fake = FakeJj::failing("Error: Revision `nope` doesn't exist", 1);
    let server = server_for(&fake);

    let result = call_tool(&server, "jj_edit", json!({"revision": "nope"})).await;

    assert!(is_error(&result));
    assert_eq!(text(&result), "Error: Revision `nope` doesn't exist");
}

#[tokio::test]
async fn test_failure_without_stderr_reports_status() {
    let fake = FakeJj::with_script("exit 3");
    let server = server_for(&fake);

    let result = call_tool(&server, "jj_undo", json!({})).await;

    assert!(is_error(&result));
    assert!(text(&result).contains("exited with status 3"), "{}", text(&result));
}

#[tokio::test]
async fn test_missing_program_is_tool_error() {
    let server = JjMcpServer::new(ServerConfig {
        jj: "/nonexistent/bin/jj".to_string(),
        ..ServerConfig::default()
    });

    let result = call_tool(&server, "jj_status", json!({})).await;

    assert!(is_error(&result));
    assert!(
        text(&result).starts_with("Error: failed to run `/nonexistent/bin/jj`"),
        "{}",
        text(&result)
    );
}

#[tokio::test]
async fn test_cwd_argument_sets_working_directory() {
    let fake = FakeJj::print_cwd();
    let server = server_for(&fake);
    let work = TempDir::new().unwrap();
    let expected = work.path().canonicalize().unwrap();

    let result = call_tool(
        &server,
        "jj_status",
        json!({"cwd": work.path().to_string_lossy()}),
    )
    .await;

    assert_eq!(text(&result), expected.to_string_lossy());
}

#[tokio::test]
async fn test_configured_cwd_is_default() {
    let fake = FakeJj::print_cwd();
    let work = TempDir::new().unwrap();
    std::fs::create_dir(work.path().join("nested")).unwrap();
    let server = JjMcpServer::new(ServerConfig {
        jj: fake.program(),
        cwd: Some(work.path().to_path_buf()),
        ..ServerConfig::default()
    });

    let default = call_tool(&server, "jj_status", json!({})).await;
    assert_eq!(text(&default), work.path().canonicalize().unwrap().to_string_lossy());

    let relative = call_tool(&server, "jj_status", json!({"cwd": "nested"})).await;
    assert_eq!(
        text(&relative),
        work.path().join("nested").canonicalize().unwrap().to_string_lossy()
    );
}

#[tokio::test]
async fn test_timeout_kills_slow_jj() {
    let fake = FakeJj::with_script("sleep 10");
    let server = JjMcpServer::new(ServerConfig {
        jj: fake.program(),
        timeout_secs: Some(1),
        ..ServerConfig::default()
    });

    let started = Instant::now();
    let result = call_tool(&server, "jj_git_fetch", json!({})).await;

    assert!(is_error(&result));
    assert!(text(&result).contains("did not finish within"), "{}", text(&result));
    assert!(started.elapsed().as_secs() < 10);
}
