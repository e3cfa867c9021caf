//! MCP Server implementation using the official rmcp SDK
//!
//! Exposes the greeting tool and the structured-output extractor via the
//! Model Context Protocol.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AppError;
use crate::extract::extract_and_decode;
use crate::ids::TrIdGenerator;
use crate::policy::{BraceScan, ExtractionPolicy};

// ============================================================================
// Request Types
// ============================================================================

/// Parameters for the hello_world tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelloWorldParams {
    /// Name of the person to greet
    #[schemars(description = "Name of the person to greet")]
    pub name: String,
}

/// Parameters for the extract_json tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractJsonParams {
    /// Raw model output that should contain a JSON object
    #[schemars(description = "Raw model output that should contain a JSON object")]
    pub text: String,
    /// Require a balanced {...} span when no fenced block is present (default: true)
    #[serde(default)]
    #[schemars(
        description = "Require a balanced {...} span when no fenced block is present (default: true)"
    )]
    pub require_object: Option<bool>,
    /// Count braces inside string literals too (default: false)
    #[serde(default)]
    #[schemars(description = "Count braces inside string literals (default: false)")]
    pub naive_braces: Option<bool>,
}

impl ExtractJsonParams {
    fn policy(&self) -> ExtractionPolicy {
        let scan = if self.naive_braces.unwrap_or(false) {
            BraceScan::Naive
        } else {
            BraceScan::StringAware
        };
        ExtractionPolicy::default()
            .with_require_object(self.require_object.unwrap_or(true))
            .with_brace_scan(scan)
    }
}

fn tool_error(err: AppError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.coded_message())])
}

// ============================================================================
// MCP Service
// ============================================================================

/// Simple MCP Service
#[derive(Clone)]
pub struct SimpleMcpService {
    /// Name advertised in the handshake
    server_name: String,
    /// Transaction IDs for tool calls
    trids: TrIdGenerator,
    /// Tool router for rmcp
    tool_router: ToolRouter<Self>,
}

impl SimpleMcpService {
    pub fn new(config: &Config) -> Self {
        Self {
            server_name: config.server_name.clone(),
            trids: TrIdGenerator::new(),
            tool_router: Self::tool_router(),
        }
    }

    fn call_span(&self, tool: &'static str) -> tracing::Span {
        let trid = self.trids.next_id();
        tracing::info_span!("tool_call", tool, trid = %trid)
    }
}

#[tool_router]
impl SimpleMcpService {
    /// Greet someone by name
    #[tool(description = "Say hello to someone")]
    async fn hello_world(
        &self,
        Parameters(params): Parameters<HelloWorldParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_span("hello_world").in_scope(|| {
            let name = params.name.as_str();
            if name.trim().is_empty() {
                tracing::warn!("hello_world called without a name");
                return Ok(tool_error(AppError::invalid_parameter("name is required")));
            }

            tracing::info!(name, "greeting");
            Ok(CallToolResult::success(vec![Content::text(format!(
                "Hello, {name}!"
            ))]))
        })
    }

    /// Extract the JSON object embedded in model output
    ///
    /// Accepts fenced blocks (```json ... ```) or prose around a bare object and
    /// returns the decoded JSON, pretty-printed.
    #[tool(description = "Extract and decode the JSON object embedded in LLM output")]
    async fn extract_json(
        &self,
        Parameters(params): Parameters<ExtractJsonParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call_span("extract_json").in_scope(|| {
            let policy = params.policy();
            match extract_and_decode::<serde_json::Value>(&params.text, &policy) {
                Ok(value) => {
                    tracing::info!(input_len = params.text.len(), "extracted JSON");
                    let json =
                        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                    Ok(CallToolResult::success(vec![Content::text(json)]))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "extraction failed");
                    Ok(tool_error(AppError::from(e)))
                }
            }
        })
    }
}

impl Default for SimpleMcpService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[tool_handler]
impl ServerHandler for SimpleMcpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.server_name.clone(),
                title: Some("Simple MCP".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Simple MCP Server - greet people and extract JSON from LLM output".to_string(),
            ),
        }
    }
}
