use crate::routes::{self, AppState};
use crate::{Error, Result};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use linkey_browser::ProfileService;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Localhost HTTP server for listing, toggling and opening
pub struct LinkeyServer {
    port: u16,
    state: AppState,
}

impl LinkeyServer {
    pub fn new(port: u16, service: Arc<ProfileService>) -> Self {
        Self {
            port,
            state: AppState::new(service),
        }
    }

    /// Serve static files from `dir` for unmatched GET requests
    pub fn with_public_dir(mut self, dir: PathBuf) -> Self {
        self.state = self.state.with_public_dir(dir);
        self
    }

    /// Bind to 127.0.0.1 and serve until Ctrl+C
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = ([127, 0, 0, 1], self.port).into();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!("Server running on http://localhost:{}", self.port);
        println!("✓ Server running on http://localhost:{}", self.port);
        println!("Press Ctrl+C to stop...");

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down...");
        };

        serve(listener, self.state, shutdown).await?;

        println!("✅ Server stopped");
        Ok(())
    }
}

/// Accept connections on `listener` until `shutdown` completes
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(shutdown);
    let app = routes::app::<Incoming>(state);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                tracing::trace!("Connection from {}", peer);
                let service = TowerToHyperService::new(app.clone());

                tokio::spawn(async move {
                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        tracing::debug!("Connection from {} closed with error: {}", peer, e);
                    }
                });
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
