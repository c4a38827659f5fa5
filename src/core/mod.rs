//! Core types: domain-agnostic contracts for the protocol and tools.

pub mod content;
pub mod error;
pub mod mcp;
pub mod tool;
