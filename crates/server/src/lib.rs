//! HTTP front end for the live memory chart.
//!
//! Wires together the background tasks and the long-poll endpoints:
//! - Sampler task filling the shared [`SampleStore`]
//! - `GET /graph`      — initial page
//! - `GET /update.js`  — paced redraw script, re-polled by the page
//! - `GET /setscale`   — time window change

pub mod context;
pub mod handlers;

pub use context::DashboardContext;
pub use handlers::SharedContext;

use axum::{routing::get, Router};
use graph_config::GraphConfig;
use graph_core::{GraphError, Result, SampleStore};
use graph_system::{memory::SERIES_NAMES, Sampler};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Build the router over an already constructed context.
pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/graph", get(handlers::graph_page))
        .route("/update.js", get(handlers::update_script))
        .route("/setscale", get(handlers::set_scale))
        .with_state(ctx)
}

/// Start sampling and serve the dashboard until Ctrl-C.
pub async fn run(config: GraphConfig) -> Result<()> {
    config.validate()?;

    let store = SampleStore::new(SERIES_NAMES, config.sampler.capacity);
    let sampler = Sampler::from_config(store.clone(), &config.sampler).spawn();
    let ctx = Arc::new(DashboardContext::from_config(store, &config));

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| GraphError::Server(format!("cannot bind {addr}: {e}")))?;
    info!("Dashboard listening on http://{addr}/graph");

    let served = axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sampler.abort();
    info!("Dashboard stopped");
    served.map_err(Into::into)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn spawn_server(ctx: SharedContext) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(ctx)).await.unwrap();
        });
        addr
    }

    async fn get_raw(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    fn context() -> SharedContext {
        let mut config = GraphConfig::default();
        config.server.poll_delay_ms = 0;
        let store = SampleStore::new(SERIES_NAMES, 100);
        Arc::new(DashboardContext::from_config(store, &config))
    }

    #[tokio::test]
    async fn routes_serve_the_protocol() {
        let ctx = context();
        let addr = spawn_server(ctx.clone()).await;

        let page = get_raw(addr, "/graph").await;
        assert!(page.starts_with("HTTP/1.1 200"));
        assert!(page.contains("text/html"));

        let update = get_raw(addr, "/update.js").await;
        assert!(update.contains("text/javascript"));
        assert!(update.contains("poll();"));

        let set = get_raw(addr, "/setscale?SCALE=100").await;
        assert!(set.starts_with("HTTP/1.1 200"));
        assert_eq!(ctx.scale(), 100.0);

        let ignored = get_raw(addr, "/setscale?SCALE=0").await;
        assert!(ignored.starts_with("HTTP/1.1 200"));
        assert_eq!(ctx.scale(), 100.0);

        let root = get_raw(addr, "/").await;
        assert!(root.starts_with("HTTP/1.1 307"));
        assert!(root.to_lowercase().contains("location: /graph"));
    }

    #[tokio::test]
    async fn run_rejects_invalid_config() {
        let mut config = GraphConfig::default();
        config.chart.width = 0;
        assert!(matches!(run(config).await, Err(GraphError::Config(_))));
    }
}
