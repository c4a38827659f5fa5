//! Line-delimited JSON-RPC dispatcher for the stdio transport.
//!
//! One request line in, at most one response line out, strictly in order.
//! The next line is not read until the current one is fully handled.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as J};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::core::content::ToolResult;
use crate::core::error::ServeError;
use crate::core::mcp::{fail, ok, ErrorCode, InitializeResult, RpcReq, RpcResp, ServerInfo};
use crate::core::tool::ToolDescriptor;
use crate::tools::args::ToolArgs;
use crate::tools::executor::ToolExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHandshake,
    Ready,
    Closed,
}

#[derive(Deserialize, Debug)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, J>>,
}

#[derive(Serialize, Debug)]
struct ToolsList<'a> {
    tools: Vec<&'a ToolDescriptor>,
}

pub struct Dispatcher {
    executor: ToolExecutor,
    server: ServerInfo,
    state: SessionState,
}

impl Dispatcher {
    pub fn new(executor: ToolExecutor, server: ServerInfo) -> Self {
        Self { executor, server, state: SessionState::AwaitingHandshake }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Decode and handle one raw input line. `None` means nothing is written.
    /// Bytes that are not UTF-8 JSON are a parse error, not a stream failure.
    pub async fn handle_line(&mut self, line: impl AsRef<[u8]>) -> Option<RpcResp> {
        let line = line.as_ref();
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match serde_json::from_slice::<RpcReq>(line) {
            Ok(req) => self.handle(req).await,
            Err(e) => {
                tracing::warn!(error = %e, "undecodable request line");
                Some(fail(J::Null, ErrorCode::ParseError, e.to_string()))
            }
        }
    }

    pub async fn handle(&mut self, req: RpcReq) -> Option<RpcResp> {
        tracing::debug!(method = %req.method, id = ?req.id, state = ?self.state, "dispatch");
        let id = req.reply_id();
        let resp = match req.method.as_str() {
            "initialize" => {
                let result = InitializeResult::new(&self.server.name, &self.server.version);
                self.state = SessionState::Ready;
                tracing::info!(client = %req.params["clientInfo"]["name"], "handshake complete");
                encode(id, &result)
            }
            "initialized" | "notifications/initialized" => {
                tracing::debug!("client acknowledged handshake");
                if req.is_notification() {
                    return None;
                }
                ok(id, json!({}))
            }
            "ping" => ok(id, json!({})),
            "tools/list" => encode(id, &ToolsList { tools: self.executor.registry().list() }),
            "tools/call" => self.tools_call(id, req.params).await,
            other => {
                tracing::debug!(method = other, "method not found");
                fail(id, ErrorCode::MethodNotFound, other)
            }
        };
        Some(resp)
    }

    async fn tools_call(&self, id: J, params: J) -> RpcResp {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return fail(id, ErrorCode::InvalidParams, e.to_string()),
        };
        let args = ToolArgs::new(params.arguments.unwrap_or_default());
        match self.executor.call(&params.name, &args).await {
            Ok(result) => encode::<ToolResult>(id, &result),
            Err(e) => fail(id, ErrorCode::InternalError, e.to_string()),
        }
    }

    /// Serve until end of input. A read failure ends the session with an error.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServeError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();
        let result = loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(ServeError::Read(e)),
            }
            let Some(resp) = self.handle_line(&line).await else {
                continue;
            };
            if let Err(e) = write_response(&mut writer, &resp).await {
                break Err(e);
            }
        };
        self.state = SessionState::Closed;
        tracing::info!(clean = result.is_ok(), "stdio session closed");
        result
    }
}

fn encode<T: Serialize>(id: J, value: &T) -> RpcResp {
    match serde_json::to_value(value) {
        Ok(v) => ok(id, v),
        Err(e) => fail(id, ErrorCode::InternalError, e.to_string()),
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    resp: &RpcResp,
) -> Result<(), ServeError> {
    let mut bytes = serde_json::to_vec(resp)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await.map_err(ServeError::Write)?;
    writer.flush().await.map_err(ServeError::Write)
}
