#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::time::Duration;

use scout_mcp_gateway::infra::boot;
use scout_mcp_gateway::infra::config::Config;
use scout_mcp_gateway::tools::args::ToolArgs;
use scout_mcp_gateway::tools::executor::ToolExecutor;
use scout_mcp_gateway::tools::registry::ToolRegistry;
use serde_json::{json, Value as J};

const FAKE_DOCKER: &str = r#"#!/bin/sh
if [ "$1" = "scout" ] && [ "$2" = "version" ]; then
  echo "version: v1.13.0 (go1.22.1 - linux/amd64)"
  exit 0
fi
if [ "$2" = "policy" ]; then
  echo "policy report"
  exit 2
fi
if [ "$2" = "cache" ]; then
  echo "cache failure" >&2
  exit 1
fi
if [ "$2" = "sbom" ]; then
  sleep 5
fi
echo "$@"
"#;

fn install_fake_docker() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("scout-mcp-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("docker");
    std::fs::write(&path, FAKE_DOCKER).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn args(v: J) -> ToolArgs {
    match v {
        J::Object(map) => ToolArgs::new(map),
        _ => unreachable!(),
    }
}

fn text(result: &scout_mcp_gateway::core::content::ToolResult) -> &str {
    &result.content[0].text
}

#[tokio::test]
async fn real_process_pipeline_against_fake_docker() {
    let docker = install_fake_docker();
    let cfg = Config {
        docker: docker.to_string_lossy().into_owned(),
        command_timeout: Some(Duration::from_secs(1)),
        skip_probe: false,
    };
    let client = boot::connect(&cfg).await.expect("probe against fake docker");
    let executor = ToolExecutor::new(Arc::new(ToolRegistry::builtin()), client);

    // argv tokens arrive intact, including ones with spaces
    let out = executor
        .call("scout_recommendations", &args(json!({"image": "my app:1", "only_refresh": true})))
        .await
        .unwrap();
    assert!(!out.is_error);
    let body: J = serde_json::from_str(text(&out)).unwrap();
    assert_eq!(body["raw_output"], "scout recommendations my app:1 --only-refresh\n");

    // version output is trimmed
    let out = executor.call("scout_version", &ToolArgs::default()).await.unwrap();
    let body: J = serde_json::from_str(text(&out)).unwrap();
    assert_eq!(body["version"], "version: v1.13.0 (go1.22.1 - linux/amd64)");

    // policy keeps its output on non-zero exit and reports failure
    let out = executor.call("scout_policy", &args(json!({"image": "alpine"}))).await.unwrap();
    assert!(!out.is_error);
    let body: J = serde_json::from_str(text(&out)).unwrap();
    assert_eq!(body["passed"], false);
    assert_eq!(body["raw_output"], "policy report\n");

    // strict tools surface stderr
    let out = executor.call("scout_cache", &args(json!({"action": "df"}))).await.unwrap();
    assert!(out.is_error);
    assert!(text(&out).contains("cache failure"));

    // the configured bound kills slow commands
    let out = executor.call("scout_sbom", &args(json!({"image": "alpine"}))).await.unwrap();
    assert!(out.is_error);
    assert!(text(&out).contains("timed out"));

    let _ = std::fs::remove_dir_all(docker.parent().unwrap());
}
