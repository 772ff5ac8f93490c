// API server implementation using actix-web

use crate::api::{middleware, routes};
use crate::config::ServerConfig;
use crate::store::MediaStore;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ApiServer {
    pub host: String,
    pub port: u16,
}

impl ApiServer {
    pub fn from_config(cfg: &ServerConfig) -> Self {
        Self {
            host: cfg.host.clone(),
            port: cfg.port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Start the HTTP server and serve until shutdown.
    pub async fn run(self, store: Arc<dyn MediaStore>) -> Result<()> {
        let bind_addr = self.bind_addr();

        tracing::info!(
            host = %self.host,
            port = %self.port,
            "Starting provider-update API server"
        );

        let store_data: web::Data<dyn MediaStore> = web::Data::from(store);

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();

            App::new()
                .app_data(store_data.clone())
                .wrap(logger)
                .wrap(compress)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
