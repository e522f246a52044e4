//! Web layer
//!
//! Thin lookup surface over the asset store. The lookup route is a
//! root-level catch-all, so this router carries no other routes: any
//! added path would shadow a legal item name.

pub mod handlers;
pub mod responses;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;

use crate::config::WebConfig;
use crate::storage::AssetStorage;

/// Build the lookup router over the given store.
pub fn router(storage: AssetStorage) -> Router {
    Router::new()
        .route("/{item_id}", get(handlers::lookup_item))
        .fallback(handlers::fallback)
        .layer(CorsLayer::permissive())
        .with_state(storage)
}

pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &WebConfig, storage: AssetStorage) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
        Ok(Self {
            app: router(storage),
            addr,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until the process exits.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        tracing::info!("Lookup server listening on {}", self.addr);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
