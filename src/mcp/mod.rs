//! HR Enterprise API Model Context Protocol implementation.
//!
//! This crate provides MCP tools for interacting with the HR Enterprise
//! REST API. The implementation is organized into:
//!
//! - `error`: Error types for upstream and invocation failures
//! - `http`: HTTP client and API communication
//! - `tools`: Tool descriptors, handlers, and response formatting
//!
//! The main entry point is `HrMcpServer`, which owns the tool registry and
//! dispatches invocations to the per-tool handlers.

pub mod error;
pub mod http;
pub mod tools;

use axum::http::request;
use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, InitializeRequestParam,
        InitializeResult, JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use tracing::info;

use crate::mcp::error::HrError;
use crate::mcp::http::HrApiClient;
use crate::mcp::tools::{employees, jobs, performance, vacations};

/// Which tool surface a server instance exposes.
///
/// `Simplified` registers only the two vacation tools; everything else about
/// the dispatcher is identical, so adding or removing a tool touches one
/// descriptor and one dispatch arm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Toolset {
    #[default]
    Full,
    Simplified,
}

impl Toolset {
    pub fn from_env() -> Self {
        match std::env::var("MCP_TOOLSET").as_deref() {
            Ok("simplified") => Self::Simplified,
            _ => Self::Full,
        }
    }
}

#[derive(Clone)]
pub struct HrMcpServer {
    client: HrApiClient,
    toolset: Toolset,
}

impl HrMcpServer {
    pub fn new(client: HrApiClient, toolset: Toolset) -> Self {
        Self { client, toolset }
    }

    /// Tool descriptors in registration order.
    ///
    /// This list is the contract the agent runtime plans against; every name
    /// here must have exactly one arm in `dispatch`, and vice versa.
    pub fn tools(&self) -> Vec<Tool> {
        match self.toolset {
            Toolset::Full => vec![
                employees::get_employees_tool(),
                employees::get_employee_tool(),
                vacations::get_vacation_requests_tool(),
                vacations::get_vacation_balance_tool(),
                vacations::submit_vacation_request_tool(),
                jobs::get_job_postings_tool(),
                jobs::get_job_details_tool(),
                performance::get_performance_reviews_tool(),
                performance::get_performance_analytics_tool(),
            ],
            Toolset::Simplified => vec![
                vacations::get_vacation_balance_tool(),
                vacations::create_vacation_request_tool(),
            ],
        }
    }

    async fn dispatch(&self, name: &str, args: &JsonObject) -> Result<String, HrError> {
        let client = &self.client;
        match self.toolset {
            Toolset::Full => match name {
                "get_employees" => employees::get_employees(client, args).await,
                "get_employee" => employees::get_employee(client, args).await,
                "get_vacation_requests" => vacations::get_vacation_requests(client, args).await,
                "get_vacation_balance" => vacations::get_vacation_balance(client, args).await,
                "submit_vacation_request" => vacations::submit_vacation_request(client, args).await,
                "get_job_postings" => jobs::get_job_postings(client, args).await,
                "get_job_details" => jobs::get_job_details(client, args).await,
                "get_performance_reviews" => performance::get_performance_reviews(client, args).await,
                "get_performance_analytics" => {
                    performance::get_performance_analytics(client, args).await
                }
                _ => Err(HrError::UnknownTool(name.to_string())),
            },
            Toolset::Simplified => match name {
                "get_vacation_balance" => vacations::get_vacation_balance(client, args).await,
                "create_vacation_request" => vacations::submit_vacation_request(client, args).await,
                _ => Err(HrError::UnknownTool(name.to_string())),
            },
        }
    }

    /// Single entry point for tool invocation.
    ///
    /// Never fails past this boundary: any `HrError` becomes an error result
    /// whose text the calling model can read, so a failed call never aborts
    /// the session.
    pub async fn invoke(&self, name: &str, args: &JsonObject) -> CallToolResult {
        match self.dispatch(name, args).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(err) => {
                tracing::error!("Tool {name} failed: {err}");
                CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
            }
        }
    }
}

impl ServerHandler for HrMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "HR Enterprise API MCP server with tools for employee lookup, vacation \
                 management, job postings, and performance reviews"
                    .to_string(),
            ),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, ErrorData> {
        if let Some(http_request_part) = context.extensions.get::<request::Parts>() {
            let initialize_headers = &http_request_part.headers;
            let initialize_uri = &http_request_part.uri;
            info!(?initialize_headers, %initialize_uri, "initialize from http server");
        }
        Ok(self.get_info())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tools(),
            ..ListToolsResult::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        Ok(self.invoke(&request.name, &args).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Points at a closed port so any accidental upstream call fails fast.
    fn test_server(toolset: Toolset) -> HrMcpServer {
        HrMcpServer::new(HrApiClient::new("http://127.0.0.1:9", "test-key"), toolset)
    }

    fn result_text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|content| content.raw.as_text())
            .map(|text| text.text.clone())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_as_text() {
        let server = test_server(Toolset::Full);
        let result = server.invoke("fire_everyone", &JsonObject::new()).await;
        let text = result_text(&result);
        assert!(text.starts_with("Error: Unknown tool: fire_everyone"), "{text}");
    }

    #[tokio::test]
    async fn missing_argument_is_reported_as_text() {
        let server = test_server(Toolset::Full);
        let text = result_text(&server.invoke("get_vacation_balance", &JsonObject::new()).await);
        assert_eq!(text, "Error: employee_id is required");
    }

    #[tokio::test]
    async fn every_registered_tool_has_a_dispatch_arm() {
        for toolset in [Toolset::Full, Toolset::Simplified] {
            let server = test_server(toolset);
            for tool in server.tools() {
                let err = server.dispatch(&tool.name, &JsonObject::new()).await.err();
                assert!(
                    !matches!(err, Some(HrError::UnknownTool(_))),
                    "tool {} is registered but not dispatched",
                    tool.name
                );
            }
        }
    }

    #[test]
    fn tool_names_are_unique_and_schemas_are_objects() {
        let server = test_server(Toolset::Full);
        let tools = server.tools();
        assert_eq!(tools.len(), 9);
        let mut seen = std::collections::HashSet::new();
        for tool in &tools {
            assert!(seen.insert(tool.name.clone()), "duplicate tool name: {}", tool.name);
            assert!(!tool.name.is_empty());
            assert_eq!(
                tool.input_schema.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "tool {} input schema must be an object",
                tool.name
            );
        }
    }

    #[test]
    fn simplified_toolset_registers_two_tools() {
        let server = test_server(Toolset::Simplified);
        let names: Vec<String> = server.tools().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, ["get_vacation_balance", "create_vacation_request"]);
    }

    #[tokio::test]
    async fn simplified_toolset_rejects_full_only_tools() {
        let server = test_server(Toolset::Simplified);
        let text = result_text(&server.invoke("get_employees", &JsonObject::new()).await);
        assert!(text.starts_with("Error: Unknown tool: get_employees"), "{text}");
    }
}
