//! Static file server for rendered pages.
//!
//! Serves the output directory read-only and logs every request with its
//! remote address, method and URI.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::{self, Next},
    response::Response,
    Router,
};
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

/// Router serving `html_dir` at `/`
pub fn router(html_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(html_dir))
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    log::info!("{} {} {}", remote, request.method(), request.uri());
    next.run(request).await
}

/// Serve `html_dir` on `bind` until the process is terminated
pub async fn serve(html_dir: PathBuf, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .wrap_err_with(|| format!("Failed to bind server to {}", bind))?;

    log::info!("running server at http://{}", bind);
    log::info!("Static files served from: {}", html_dir.display());

    axum::serve(
        listener,
        router(&html_dir).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .wrap_err("Server error")?;

    Ok(())
}
