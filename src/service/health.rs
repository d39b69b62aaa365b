//! Liveness endpoint for process supervisors

use crate::io::configuration::HEALTH_RESPONSE_BODY;
use crate::io::error::{ConverterError, Result};
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::thread::JoinHandle;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// Background HTTP server that only answers "am I alive"
///
/// Runs on its own thread with a current-thread runtime, so request
/// processing stays synchronous and shares nothing with it. The thread lives
/// until the process exits.
pub struct HealthServer {
    local_addr: SocketAddr,
    _worker: JoinHandle<()>,
}

impl HealthServer {
    /// Bind `addr` and start serving on a background thread
    ///
    /// Any path answers `GET` with the fixed body; other methods get 405.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be built, the address cannot be
    /// bound, or the thread cannot be spawned
    pub fn spawn(addr: &str) -> Result<Self> {
        let network_error = |operation: &'static str| {
            move |source: std::io::Error| ConverterError::Network {
                addr: addr.to_string(),
                operation,
                source,
            }
        };

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
            .map_err(network_error("start runtime"))?;

        let listener = runtime
            .block_on(TcpListener::bind(addr))
            .map_err(network_error("bind"))?;
        let local_addr = listener
            .local_addr()
            .map_err(network_error("resolve local address"))?;

        let worker = std::thread::Builder::new()
            .name("health".to_string())
            .spawn(move || serve(&runtime, listener))
            .map_err(network_error("spawn server"))?;

        info!(%local_addr, "Liveness endpoint listening");
        Ok(Self {
            local_addr,
            _worker: worker,
        })
    }

    /// Address actually bound, useful when port 0 was requested
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

/// Routes answering every path
pub fn router() -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/*path", get(alive))
}

async fn alive() -> &'static str {
    HEALTH_RESPONSE_BODY
}

fn serve(runtime: &Runtime, listener: TcpListener) {
    if let Err(e) = runtime.block_on(async move { axum::serve(listener, router()).await }) {
        warn!(error = %e, "Liveness endpoint stopped");
    }
}
