//! MCP server exposing Docker Scout as tools over line-delimited JSON-RPC on stdio.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
