use anyhow::Result;
use axum::{Json, routing::get, serve};
use dotenv::dotenv;
use rmcp::{
    ServiceExt,
    transport::{
        sse_server::{SseServer, SseServerConfig},
        stdio,
    },
};
use serde::Serialize;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod mcp;
use mcp::{HrMcpServer, Toolset, http::HrApiClient};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    server: &'static str,
    hr_api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load variables from .env file if it exists into the environment
    dotenv().ok();

    // Initialize tracing. Logs go to stderr only: in stdio mode stdout
    // carries the protocol frames.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = HrApiClient::from_env();
    let toolset = Toolset::from_env();
    let server = HrMcpServer::new(client.clone(), toolset);
    info!(hr_api_url = client.base_url(), ?toolset, "Starting HR API MCP server");

    match std::env::var("MCP_TRANSPORT").as_deref() {
        Ok("sse") => run_sse(server, &client).await,
        _ => run_stdio(server).await,
    }
}

/// Stream transport: framed messages on stdin/stdout, one process per
/// session, spawned and owned by the agent runtime.
async fn run_stdio(server: HrMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// HTTP transport: `GET /sse` upgrades to an event stream, `POST /messages/`
/// carries client-to-server messages correlated to the SSE session, and
/// `GET /health` answers liveness checks.
async fn run_sse(server: HrMcpServer, client: &HrApiClient) -> Result<()> {
    let bind =
        std::env::var("MCP_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

    let config = SseServerConfig {
        bind: bind.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/messages/".to_string(),
        ct: CancellationToken::new(),
        sse_keep_alive: None,
    };
    let (sse_server, router) = SseServer::new(config);

    let hr_api_url = client.base_url().to_string();
    let router = router.route(
        "/health",
        get(move || {
            let hr_api_url = hr_api_url.clone();
            async move {
                Json(HealthStatus {
                    status: "healthy",
                    server: "hr-api-mcp",
                    hr_api_url,
                })
            }
        }),
    );

    info!("Starting SSE server on {bind}");
    let tcp_listener = TcpListener::bind(sse_server.config.bind).await?;

    let shutdown = sse_server.config.ct.child_token();
    let http_server = serve(tcp_listener, router).with_graceful_shutdown(async move {
        shutdown.cancelled().await;
    });
    tokio::spawn(async move {
        if let Err(e) = http_server.await {
            tracing::error!("SSE HTTP server terminated with error: {e}");
        }
    });

    let ct = sse_server.with_service(move || server.clone());

    // Graceful shutdown on CTRL+C
    signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}
