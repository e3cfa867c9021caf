//! MCP (Model Context Protocol) server implementation
//!
//! This module provides a stdio-based MCP server using the official `rmcp` SDK.
//! It exposes the `hello_world` and `extract_json` tools to AI clients.

mod server;

pub use server::{ExtractJsonParams, HelloWorldParams, SimpleMcpService};
