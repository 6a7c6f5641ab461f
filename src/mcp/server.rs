//! MCP server loop.
//!
//! Newline-delimited JSON-RPC 2.0 over stdio. Each non-empty input line is
//! one request; each request carrying an `id` produces exactly one response
//! line. Notifications (no `id`) are processed but never answered.
//!
//! stdout carries protocol traffic only; all logging goes through `tracing`.

use crate::mcp::{PromptRegistry, ResourceHandler, ToolRegistry, ToolResult};
use crate::mcp::dispatch::McpMethod;
use crate::services::BranchService;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::info_span;

/// Maximum request line size (1 MiB).
const MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024;

/// MCP protocol version advertised in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name advertised in `initialize`.
pub const SERVER_NAME: &str = "branchctx";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// MCP server for branchctx.
pub struct McpServer {
    /// Tool registry.
    tools: ToolRegistry,
    /// Resource handler.
    resources: ResourceHandler,
    /// Prompt registry.
    prompts: PromptRegistry,
}

impl McpServer {
    /// Creates a server whose tools, resources and prompts share `service`.
    #[must_use]
    pub fn new(service: BranchService) -> Self {
        Self {
            tools: ToolRegistry::new(service.clone()),
            resources: ResourceHandler::new(service.clone()),
            prompts: PromptRegistry::new(service),
        }
    }

    /// Runs the server on the process's stdin and stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or stdout cannot be written.
    pub fn run_stdio(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serves requests read line by line from `reader`, writing responses to
    /// `writer`.
    ///
    /// A line that is not valid UTF-8 is answered with a parse error and the
    /// loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        tracing::info!(protocol = PROTOCOL_VERSION, "MCP server listening on stdio");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| Error::OperationFailed {
                    operation: "read_stdin".to_string(),
                    cause: e.to_string(),
                })?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_request(line.trim()),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding non UTF-8 request line");
                    metrics::counter!("mcp_requests_total", "method" => "unparsed", "status" => "error")
                        .increment(1);
                    Some(format_error(
                        Value::Null,
                        PARSE_ERROR,
                        &format!("Parse error: invalid UTF-8: {e}"),
                    ))
                },
            };

            if let Some(response) = response {
                write_line(&mut writer, &response)?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handles one JSON-RPC message.
    ///
    /// Returns `None` for notifications.
    #[must_use]
    pub fn handle_request(&self, request: &str) -> Option<String> {
        if request.len() > MAX_REQUEST_BODY_SIZE {
            tracing::warn!(
                request_size = request.len(),
                max_size = MAX_REQUEST_BODY_SIZE,
                "Request exceeds maximum size limit"
            );
            metrics::counter!("mcp_requests_total", "method" => "oversize", "status" => "error")
                .increment(1);
            return Some(format_error(
                Value::Null,
                INVALID_REQUEST,
                &format!(
                    "Request too large: {} bytes (max: {MAX_REQUEST_BODY_SIZE} bytes)",
                    request.len()
                ),
            ));
        }

        let start = Instant::now();
        let span = info_span!(
            "mcp.request",
            rpc.method = tracing::field::Empty,
            rpc.id = tracing::field::Empty,
            status = tracing::field::Empty
        );
        let _guard = span.enter();

        let (req, method) = match parse_request(request) {
            Ok(req) => {
                let method = McpMethod::from(req.method.as_str());
                (req, method)
            },
            Err((code, message)) => {
                span.record("status", "parse_error");
                metrics::counter!(
                    "mcp_requests_total",
                    "method" => "parse_error",
                    "status" => "error"
                )
                .increment(1);
                return Some(format_error(Value::Null, code, &message));
            },
        };

        span.record("rpc.method", method.as_str());
        if let Some(id) = &req.id {
            span.record("rpc.id", id.to_string().as_str());
        }
        tracing::debug!(method = %method, "Processing MCP request");

        let result = self.dispatch_method(&method, req.params);
        let status_label = if result.is_ok() { "success" } else { "error" };
        span.record("status", status_label);

        let method_label = method.metric_label().to_string();
        metrics::counter!(
            "mcp_requests_total",
            "method" => method_label.clone(),
            "status" => status_label
        )
        .increment(1);
        metrics::histogram!("mcp_request_duration_ms", "method" => method_label)
            .record(start.elapsed().as_secs_f64() * 1000.0);

        match req.id {
            Some(id) => Some(format_response(id, result)),
            None => {
                if let Err((code, message)) = result {
                    tracing::debug!(method = %method, code, %message, "Notification failed");
                }
                None
            },
        }
    }

    /// Routes a parsed method to its handler.
    fn dispatch_method(&self, method: &McpMethod, params: Option<Value>) -> DispatchResult {
        match method {
            McpMethod::Initialize => Ok(Self::handle_initialize()),
            McpMethod::ListTools => Ok(self.handle_list_tools()),
            McpMethod::CallTool => self.handle_call_tool(params),
            McpMethod::ListResources => Ok(self.handle_list_resources()),
            McpMethod::ReadResource => self.handle_read_resource(params),
            McpMethod::ListPrompts => Ok(self.handle_list_prompts()),
            McpMethod::GetPrompt => self.handle_get_prompt(params),
            McpMethod::Ping | McpMethod::Notification(_) => Ok(serde_json::json!({})),
            McpMethod::Unknown(name) => {
                Err((METHOD_NOT_FOUND, format!("Method not found: {name}")))
            },
        }
    }

    /// Handles the initialize method.
    fn handle_initialize() -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// Handles tools/list.
    fn handle_list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .list_tools()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        serde_json::json!({ "tools": tools })
    }

    /// Handles tools/call.
    ///
    /// Tool failures are reported in-band with `isError: true`.
    fn handle_call_tool(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((INVALID_PARAMS, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;
        let span = info_span!("mcp.tool.call", tool.name = name);
        let _guard = span.enter();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let result = self.tools.execute(name, arguments).unwrap_or_else(|e| {
            tracing::warn!(tool = name, error = %e, "Tool call failed");
            ToolResult::error(e.to_string())
        });
        let status_label = if result.is_error { "error" } else { "success" };

        let tool_label = if self.tools.get_tool(name).is_some() {
            name.to_string()
        } else {
            "unknown".to_string()
        };
        metrics::counter!(
            "mcp_tool_calls_total",
            "tool" => tool_label,
            "status" => status_label
        )
        .increment(1);

        serde_json::to_value(&result).map_err(|e| (INTERNAL_ERROR, e.to_string()))
    }

    /// Handles resources/list.
    fn handle_list_resources(&self) -> Value {
        serde_json::json!({ "resources": self.resources.list_resources() })
    }

    /// Handles resources/read.
    fn handle_read_resource(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((INVALID_PARAMS, "Missing params".to_string()))?;

        let uri = params
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "Missing resource URI".to_string()))?;

        let span = info_span!(
            "mcp.resource.read",
            resource.uri = uri,
            status = tracing::field::Empty
        );
        let _guard = span.enter();

        let result = match self.resources.get_resource(uri) {
            Ok(content) => Ok(serde_json::json!({ "contents": [content] })),
            Err(e) => Err((INTERNAL_ERROR, e.to_string())),
        };

        let status_label = if result.is_ok() { "success" } else { "error" };
        span.record("status", status_label);
        metrics::counter!(
            "mcp_resource_reads_total",
            "resource" => classify_resource(uri),
            "status" => status_label
        )
        .increment(1);

        result
    }

    /// Handles prompts/list.
    fn handle_list_prompts(&self) -> Value {
        let prompts: Vec<Value> = self
            .prompts
            .list_prompts()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments.iter().map(|a| {
                        serde_json::json!({
                            "name": a.name,
                            "description": a.description,
                            "required": a.required
                        })
                    }).collect::<Vec<Value>>()
                })
            })
            .collect();

        serde_json::json!({ "prompts": prompts })
    }

    /// Handles prompts/get.
    fn handle_get_prompt(&self, params: Option<Value>) -> DispatchResult {
        let params = params.ok_or((INVALID_PARAMS, "Missing params".to_string()))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or((INVALID_PARAMS, "Missing prompt name".to_string()))?;
        let span = info_span!("mcp.prompt.get", prompt.name = name);
        let _guard = span.enter();

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        let messages = self
            .prompts
            .get_prompt_messages(name, &arguments)
            .ok_or_else(|| (INVALID_PARAMS, format!("Unknown prompt: {name}")))?;

        let description = self
            .prompts
            .get_prompt(name)
            .and_then(|p| p.description.clone());

        Ok(serde_json::json!({
            "description": description,
            "messages": messages
        }))
    }
}

/// Writes one response line and flushes it.
fn write_line<W: Write>(writer: &mut W, response: &str) -> Result<()> {
    writeln!(writer, "{response}").map_err(|e| Error::OperationFailed {
        operation: "write_stdout".to_string(),
        cause: e.to_string(),
    })?;
    writer.flush().map_err(|e| Error::OperationFailed {
        operation: "flush_stdout".to_string(),
        cause: e.to_string(),
    })
}

/// Parses a line into a request, distinguishing malformed JSON from
/// well-formed JSON that is not a request.
fn parse_request(request: &str) -> std::result::Result<JsonRpcRequest, (i32, String)> {
    let value: Value = serde_json::from_str(request)
        .map_err(|e| (PARSE_ERROR, format!("Parse error: {e}")))?;
    serde_json::from_value(value).map_err(|e| (INVALID_REQUEST, format!("Invalid request: {e}")))
}

/// Formats a dispatch result as a response line.
fn format_response(id: Value, result: DispatchResult) -> String {
    match result {
        Ok(value) => {
            let response = JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: Some(value),
                error: None,
            };
            serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
        },
        Err((code, message)) => format_error(id, code, &message),
    }
}

/// Formats an error response line.
fn format_error(id: Value, code: i32, message: &str) -> String {
    let response = JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string())
}

/// Bounded metric label for a resource URI.
fn classify_resource(uri: &str) -> &'static str {
    match uri.trim() {
        "branch://current" => "current",
        "branch://context" => "context",
        "branch://notes" => "notes",
        "branch://list" => "list",
        _ => "other",
    }
}

/// Result type for method dispatch.
type DispatchResult = std::result::Result<Value, (i32, String)>;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC version (required by protocol but not used in code).
    #[serde(rename = "jsonrpc")]
    _jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}
