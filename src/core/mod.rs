//! Core types & traits: domain-agnostic contracts for tools, resources and protocol.

pub mod error;
pub mod mcp;
pub mod tool;
