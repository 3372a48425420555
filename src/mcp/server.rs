/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Runs tool calls against the todo repository
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use std::future::Future;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{ServerError, TodoTrackerServer};

/// MCP server that handles communication with the client
pub struct McpServer {
    /// The underlying todo server
    todo_tracker: TodoTrackerServer,
    /// Whether the client has finished initialization
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(todo_tracker: TodoTrackerServer) -> Self {
        Self {
            todo_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification: {}", other),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Todo Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = vec![
            tool_definition::<tools::CreateTodoParams>(
                "todo_create",
                "Create a new todo. New todos start as PENDING.",
            ),
            tool_definition::<tools::GetTodoParams>(
                "todo_get",
                "Get a single todo by id, including the statuses it can move to",
            ),
            tool_definition::<tools::ListTodosParams>(
                "todo_list",
                "List todos newest first, with paging and optional status/title filters",
            ),
            tool_definition::<tools::UpdateTodoParams>(
                "todo_update",
                "Change the title, description or status of a todo",
            ),
            tool_definition::<tools::DeleteTodoParams>(
                "todo_delete",
                "Delete a todo permanently",
            ),
            tool_definition::<tools::ToggleTodoParams>(
                "todo_toggle",
                "Mark a todo completed, or reopen it if it is already completed",
            ),
        ];

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = self.call_tool(&tool_params.name, tool_params.arguments).await;
        to_response(id, &result)
    }

    /// Run a named tool against the repository
    async fn call_tool(&self, name: &str, arguments: HashMap<String, Value>) -> ToolCallResult {
        let repository = self.todo_tracker.repository();
        let arguments = Value::Object(arguments.into_iter().collect());

        match name {
            "todo_create" => {
                run_tool(arguments, |p: tools::CreateTodoParams| tools::create_todo(repository, p)).await
            }
            "todo_get" => {
                run_tool(arguments, |p: tools::GetTodoParams| tools::get_todo(repository, p)).await
            }
            "todo_list" => {
                run_tool(arguments, |p: tools::ListTodosParams| tools::list_todos(repository, p)).await
            }
            "todo_update" => {
                run_tool(arguments, |p: tools::UpdateTodoParams| tools::update_todo(repository, p)).await
            }
            "todo_delete" => {
                run_tool(arguments, |p: tools::DeleteTodoParams| tools::delete_todo(repository, p)).await
            }
            "todo_toggle" => {
                run_tool(arguments, |p: tools::ToggleTodoParams| tools::toggle_todo(repository, p)).await
            }
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        }
    }
}

/// Describe a tool, deriving its input schema from the parameter type
fn tool_definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = schemars::schema_for!(P);
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

/// Decode the arguments, run the tool and render its outcome as text
async fn run_tool<P, T, F, Fut>(arguments: Value, tool: F) -> ToolCallResult
where
    P: DeserializeOwned,
    T: Serialize,
    F: FnOnce(P) -> Fut,
    Fut: Future<Output = Result<T, ToolError>>,
{
    let params: P = match serde_json::from_value(arguments) {
        Ok(params) => params,
        Err(e) => return tool_error(&ToolError::InvalidInput(e.to_string())),
    };

    match tool(params).await {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => tool_error(&ToolError::InvalidInput(format!("Failed to encode response: {}", e))),
        },
        Err(err) => {
            debug!("Tool call failed: {}", err);
            tool_error(&err)
        }
    }
}

fn tool_error(err: &ToolError) -> ToolCallResult {
    let payload = err.to_payload();
    ToolCallResult::error(
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| err.to_string()),
    )
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to encode result: {}", e),
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> McpServer {
        McpServer::new(TodoTrackerServer::in_memory().unwrap())
    }

    async fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        let response = server.process_line(&request.to_string()).await.unwrap();
        serde_json::to_value(response).unwrap()["result"].clone()
    }

    fn text_of(result: &Value) -> Value {
        serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_notification() {
        let mut server = server();

        let response = server
            .process_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["result"]["protocolVersion"], MCP_VERSION);
        assert_eq!(json["result"]["serverInfo"]["name"], "Todo Tracker MCP");

        let none = server
            .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(none.is_none());
        assert!(server.initialized);
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let mut server = server();

        let response = server
            .process_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        let json = serde_json::to_value(response).unwrap();
        assert!(json.as_object().unwrap().contains_key("id"));
        assert_eq!(json["id"], Value::Null);
        assert_eq!(json["result"], json!({}));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let mut server = server();
        let response = server
            .process_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let json = serde_json::to_value(response).unwrap();

        let tools = json["result"]["tools"].as_array().unwrap();
        let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec!["todo_create", "todo_get", "todo_list", "todo_update", "todo_delete", "todo_toggle"]
        );
        assert!(tools[0]["inputSchema"]["properties"]["title"].is_object());
    }

    #[tokio::test]
    async fn test_tool_call_lifecycle() {
        let mut server = server();

        let created = call(&mut server, 1, "todo_create", json!({"title": "장보기"})).await;
        assert_eq!(created["isError"], false);
        let body = text_of(&created);
        assert_eq!(body["todo"]["status"], "PENDING");
        let id = body["todo"]["id"].as_i64().unwrap();

        let toggled = call(&mut server, 2, "todo_toggle", json!({"id": id})).await;
        assert_eq!(text_of(&toggled)["todo"]["status"], "COMPLETED");

        let conflict = call(&mut server, 3, "todo_update", json!({"id": id, "status": "IN_PROGRESS"})).await;
        assert_eq!(conflict["isError"], true);
        assert_eq!(text_of(&conflict)["error"]["status"], 409);

        let listed = call(&mut server, 4, "todo_list", json!({})).await;
        assert_eq!(text_of(&listed)["total"], 1);

        let deleted = call(&mut server, 5, "todo_delete", json!({"id": id})).await;
        assert_eq!(deleted["isError"], false);

        let missing = call(&mut server, 6, "todo_get", json!({"id": id})).await;
        assert_eq!(text_of(&missing)["error"]["code"], "TODO_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_bad_arguments_are_tool_errors() {
        let mut server = server();
        let result = call(&mut server, 1, "todo_get", json!({"id": "abc"})).await;
        assert_eq!(result["isError"], true);
        assert_eq!(text_of(&result)["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let mut server = server();

        let response = server.process_line("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);

        let response = server
            .process_line(r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

        let response = server
            .process_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);

        assert!(server.process_line("   ").await.is_none());
    }
}
