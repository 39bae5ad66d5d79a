//! MCP Server implementation
//!
//! The main server struct that speaks JSON-RPC over stdio and hands tool
//! calls to the [`Dispatcher`].

use std::sync::Arc;

use jj_exec::{CommandRunner, ProcessRunner};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinSet};

use crate::config::ServerConfig;
use crate::handlers::Dispatcher;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, codes,
};
use crate::tools::{ToolRegistry, ToolSpec};
use crate::{Error, Result};

/// MCP Server for Jujutsu
///
/// Each incoming request is handled on its own task, so a slow `jj` run
/// does not hold up other requests. Responses are written one line at a
/// time in completion order.
///
/// # Example
///
/// ```ignore
/// use jj_mcp::{JjMcpServer, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let server = JjMcpServer::new(ServerConfig::default());
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct JjMcpServer {
    config: ServerConfig,
    dispatcher: Dispatcher,
}

impl JjMcpServer {
    /// Create a server that runs `jj` as a real subprocess
    pub fn new(config: ServerConfig) -> Self {
        let runner = ProcessRunner::new().with_timeout(config.timeout());
        Self::with_runner(config, Arc::new(runner))
    }

    /// Create a server with a custom command runner
    pub fn with_runner(config: ServerConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let dispatcher = Dispatcher::new(
            ToolRegistry::builtin(),
            runner,
            config.jj.clone(),
            config.cwd.clone(),
        );
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Available MCP tools
    pub fn tools(&self) -> &[ToolSpec] {
        self.dispatcher.registry().tools()
    }

    /// Run the server over stdin/stdout until stdin is closed
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            jj = %self.config.jj,
            cwd = ?self.config.cwd,
            tools = self.tools().len(),
            "MCP server ready, listening on stdio"
        );
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing responses to
    /// `writer`
    ///
    /// Returns once `reader` is exhausted and every in-flight request has
    /// been answered. A line that is not UTF-8 gets a parse error; a read
    /// failure stops intake but still lets in-flight requests finish.
    pub async fn serve<R, W>(self, mut reader: R, writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let writer = Arc::new(Mutex::new(writer));
        let mut tasks = JoinSet::new();
        let mut buf = Vec::new();

        let intake = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break Ok(()),
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break Err(Error::from(e));
                }
            }
            while let Some(joined) = tasks.try_join_next() {
                log_task_failure(joined);
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim().to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "Input line is not valid UTF-8");
                    let response =
                        error_line(codes::PARSE_ERROR, &format!("Parse error: {}", e));
                    if let Err(e) = write_line(&writer, &response).await {
                        tracing::error!(error = %e, "Failed to write response");
                    }
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            let server = Arc::clone(&server);
            let writer = Arc::clone(&writer);
            tasks.spawn(async move {
                let response = match server.handle_message(&line).await {
                    Ok(response) => response,
                    Err(e) => error_line(codes::INTERNAL_ERROR, &format!("Internal error: {}", e)),
                };
                if response.is_empty() {
                    return;
                }
                if let Err(e) = write_line(&writer, &response).await {
                    tracing::error!(error = %e, "Failed to write response");
                }
            });
        };

        tracing::debug!(in_flight = tasks.len(), "Input closed, draining requests");
        while let Some(joined) = tasks.join_next().await {
            log_task_failure(joined);
        }

        tracing::info!("MCP server shutting down");
        intake
    }

    /// Handle a single MCP message
    ///
    /// Parses the JSON-RPC request and dispatches to the appropriate handler.
    ///
    /// # Returns
    ///
    /// The JSON-RPC response as a string, or empty string for notifications.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Unparseable message");
                let response =
                    JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {}", e));
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                let response = JsonRpcResponse::error(
                    id,
                    codes::INVALID_REQUEST,
                    format!("Invalid Request: {}", e),
                );
                return serde_json::to_string(&response).map_err(Error::from);
            }
        };

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification");
            return Ok(String::new());
        }

        let response = if request.jsonrpc != "2.0" {
            JsonRpcResponse::error(
                request.id,
                codes::INVALID_REQUEST,
                format!("Invalid Request: unsupported jsonrpc version {}", request.jsonrpc),
            )
        } else {
            match request.method.as_str() {
                "initialize" => self.handle_initialize(request.id, request.params)?,
                "ping" => JsonRpcResponse::success(request.id, json!({})),
                "tools/list" => self.handle_tools_list(request.id),
                "tools/call" => self.handle_tools_call(request.id, request.params).await?,
                _ => JsonRpcResponse::error(
                    request.id,
                    codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", request.method),
                ),
            }
        };

        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Handle the initialize request
    ///
    /// Returns server capabilities and info.
    fn handle_initialize(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let params: InitializeParams = serde_json::from_value(params).unwrap_or_default();
        tracing::info!(
            client = ?params.client_info.as_ref().map(|c| c.name.as_str()),
            protocol = ?params.protocol_version,
            "Client initializing"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.config.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let tools = self.dispatcher.registry().definitions();
        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    ///
    /// Caller mistakes become JSON-RPC errors; the outcome of running `jj`,
    /// failed or not, is a regular tool result.
    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> Result<JsonRpcResponse> {
        let call: ToolCallParams = match serde_json::from_value(params) {
            Ok(call) => call,
            Err(e) => {
                let err = Error::InvalidParams(e.to_string());
                return Ok(JsonRpcResponse::error(id, err.code(), err.to_string()));
            }
        };

        match self.dispatcher.call(&call.name, &call.arguments).await {
            Ok(result) => Ok(JsonRpcResponse::success(id, serde_json::to_value(result)?)),
            Err(e) => {
                tracing::debug!(tool = %call.name, error = %e, "Rejected tool call");
                Ok(JsonRpcResponse::error(id, e.code(), e.to_string()))
            }
        }
    }
}

async fn write_line<W>(writer: &Mutex<W>, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut writer = writer.lock().await;
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

fn log_task_failure(joined: std::result::Result<(), JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Request task failed");
    }
}

/// A JSON-RPC error response for a message whose id is unknown
fn error_line(code: i32, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {
            "code": code,
            "message": message,
        }
    })
    .to_string()
}
