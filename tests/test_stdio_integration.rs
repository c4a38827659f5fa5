use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scout_mcp_gateway::api::stdio::Dispatcher;
use scout_mcp_gateway::clients::scout::ScoutClient;
use scout_mcp_gateway::core::mcp::ServerInfo;
use scout_mcp_gateway::infra::runtime::process::{CommandOutput, CommandRunner, RunnerError};
use scout_mcp_gateway::tools::executor::ToolExecutor;
use scout_mcp_gateway::tools::registry::ToolRegistry;
use serde_json::Value as J;

#[derive(Default)]
struct ScriptedRunner {
    calls: Mutex<Vec<Vec<String>>>,
    replies: Mutex<VecDeque<CommandOutput>>,
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, RunnerError> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
    }
}

fn output(stdout: &str, code: i32) -> CommandOutput {
    CommandOutput {
        stdout: stdout.into(),
        stderr: String::new(),
        success: code == 0,
        code: Some(code),
    }
}

async fn session(runner: Arc<ScriptedRunner>, input: impl AsRef<[u8]>) -> Vec<J> {
    let client = ScoutClient::new(runner as Arc<dyn CommandRunner>);
    let executor = ToolExecutor::new(Arc::new(ToolRegistry::builtin()), client);
    let server = ServerInfo { name: "scout-mcp-gateway".into(), version: "test".into() };
    let mut dispatcher = Dispatcher::new(executor, server);
    let mut out = Vec::new();
    dispatcher.serve(input.as_ref(), &mut out).await.unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn stdio_handshake_list_and_errors() {
    let input = [
        concat!(
            r#"{"jsonrpc":"2.0","id":0,"method":"initialize","#,
            r#""params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"it"}}}"#,
        ),
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
        concat!(
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","#,
            r#""params":{"name":"scout_cves","arguments":{}}}"#,
        ),
        r#"{"jsonrpc":"2.0","id":3,"method":"unknown/method"}"#,
    ]
    .join("\n");

    let runner = Arc::new(ScriptedRunner::default());
    let lines = session(runner.clone(), &input).await;

    // the notification produces nothing
    assert_eq!(lines.len(), 4);
    let ids: Vec<&J> = lines.iter().map(|l| &l["id"]).collect();
    assert_eq!(ids, [&J::from(0), &J::from(1), &J::from(2), &J::from(3)]);

    assert_eq!(lines[0]["result"]["serverInfo"]["name"], "scout-mcp-gateway");

    let names: Vec<&str> = lines[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 14);
    assert_eq!(&names[..3], ["scout_cves", "scout_quickview", "scout_compare"]);
    assert_eq!(names[13], "scout_version");
    assert_eq!(lines[1]["result"]["tools"][0]["inputSchema"]["required"][0], "image");

    assert_eq!(lines[2]["result"]["isError"], true);
    assert_eq!(lines[2]["result"]["content"][0]["text"], "Error: image is required");

    assert_eq!(lines[3]["error"]["code"], -32601);

    // argument validation never reaches the process layer
    assert!(runner.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn stdio_cves_lenient_exit_code_and_argv() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.replies.lock().unwrap().push_back(output("2C 1H 0M 0L\n", 2));

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"scout_cves","#,
        r#""arguments":{"image":"alpine:3.19","only_severity":"critical,high","exit_code":true}}}"#,
    );
    let lines = session(runner.clone(), input).await;

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], "a");
    assert!(lines[0]["result"].get("isError").is_none());
    let text = lines[0]["result"]["content"][0]["text"].as_str().unwrap();
    let body: J = serde_json::from_str(text).unwrap();
    assert_eq!(body["image"], "alpine:3.19");
    assert_eq!(body["raw_output"], "2C 1H 0M 0L\n");

    let calls = runner.calls.lock().unwrap();
    assert_eq!(
        calls[0],
        ["scout", "cves", "alpine:3.19", "--only-severity", "critical,high", "--exit-code"]
    );
}

#[tokio::test]
async fn stdio_strict_failure_becomes_envelope_error() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.replies.lock().unwrap().push_back(CommandOutput {
        stdout: String::new(),
        stderr: "image not found\n".into(),
        success: false,
        code: Some(1),
    });

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","#,
        r#""params":{"name":"scout_quickview","arguments":{"image":"nope:latest"}}}"#,
    );
    let lines = session(runner, input).await;

    assert_eq!(lines[0]["id"], 7);
    assert_eq!(lines[0]["result"]["isError"], true);
    let text = lines[0]["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error: "));
    assert!(text.contains("image not found"));
}

#[tokio::test]
async fn stdio_keeps_serving_after_bad_lines() {
    let input = [
        "{ not-json",
        "",
        concat!(
            r#"{"jsonrpc":"2.0","id":11,"method":"tools/call","#,
            r#""params":{"name":"scout_nope","arguments":{}}}"#,
        ),
        r#"{"jsonrpc":"2.0","id":12,"method":"ping"}"#,
    ]
    .join("\n");
    let lines = session(Arc::new(ScriptedRunner::default()), &input).await;

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[0]["id"], J::Null);
    assert_eq!(lines[1]["id"], 11);
    assert_eq!(lines[1]["result"]["isError"], true);
    assert_eq!(lines[1]["result"]["content"][0]["text"], "Error: unknown tool: scout_nope");
    assert_eq!(lines[2]["id"], 12);
}

#[tokio::test]
async fn stdio_survives_non_utf8_and_method_less_requests() {
    let mut input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"\xff\xfe\"}\n".to_vec();
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":5}\n");
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");
    let lines = session(Arc::new(ScriptedRunner::default()), input).await;

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], J::Null);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], 5);
    assert_eq!(lines[1]["error"]["code"], -32601);
    assert_eq!(lines[2]["id"], 2);
    assert!(lines[2]["result"].is_object());
}
