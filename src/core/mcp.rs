//! Shared MCP protocol surface: JSON-RPC envelopes and the handshake payload.

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

// --- JSON-RPC structures ---

#[derive(Deserialize, Debug, Clone)]
pub struct RpcReq {
    #[serde(default)]
    pub jsonrpc: String,
    /// Absent (or null) for notifications.
    #[serde(default)]
    pub id: Option<J>,
    /// Missing reads as empty, which is answered as an unknown method.
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: J,
}

impl RpcReq {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// The id to echo back; notifications that still get answered carry `null`.
    pub fn reply_id(&self) -> J {
        self.id.clone().unwrap_or(J::Null)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcResp {
    pub jsonrpc: String,
    pub id: J,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

/// Reserved JSON-RPC error codes used by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
}

pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp {
        jsonrpc: JSONRPC_VERSION.into(),
        id,
        result: None,
        error: Some(RpcErr { code, message: msg.into(), data }),
    }
}

/// Build an error response carrying the standard message for `code`.
pub fn fail(id: J, code: ErrorCode, data: impl Into<J>) -> RpcResp {
    err(id, code.code(), code.message(), Some(data.into()))
}

// --- Handshake ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub server_info: ServerInfo,
    pub capabilities: Capabilities,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub list_changed: bool,
}

impl InitializeResult {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION.into(),
            server_info: ServerInfo { name: name.into(), version: version.into() },
            capabilities: Capabilities { tools: Some(ToolsCapability::default()) },
        }
    }
}
