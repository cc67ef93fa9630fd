use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::protocol::{Handler, Parser, Response};

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    handler: Arc<dyn Handler>,
}

impl Server {
    /// Create and bind HTTP server to specified address
    pub async fn bind(addr: SocketAddr, handler: Arc<dyn Handler>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            handler,
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve a single request on the connection, then close it
    async fn handle_connection(
        self: Arc<Self>,
        mut stream: TcpStream,
        peer_addr: SocketAddr,
    ) -> std::io::Result<()> {
        let mut buffer = vec![0u8; 8192]; // 8KB buffer
        let mut pending = Vec::new(); // Bytes of the request received so far

        let response = loop {
            match Parser::parse(&pending) {
                Ok(Some((request, _))) => {
                    debug!("Received {} {} from {}", request.method, request.path, peer_addr);
                    break self.handler.handle(request).await;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Malformed request from {}: {}", peer_addr, e);
                    break Response::from(e);
                }
            }

            let n = stream.read(&mut buffer).await?;
            if n == 0 {
                debug!("Connection closed by client before a full request: {}", peer_addr);
                return Ok(());
            }
            pending.extend_from_slice(&buffer[..n]);
        };

        stream.write_all(&response.encode()).await?;
        stream.shutdown().await?;

        debug!("Connection handler ended for {}", peer_addr);
        Ok(())
    }

    /// Start server, accept and process connections until `shutdown` resolves
    pub async fn run_until<F>(self: Arc<Self>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!("Server started, listening on {}", self.local_addr);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting connections");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        debug!("New connection accepted from {}", peer_addr);

                        // Clone the Arc<Server> for the new connection
                        let server = Arc::clone(&self);

                        // Spawn an independent task for each connection
                        tokio::spawn(async move {
                            if let Err(e) = server.handle_connection(stream, peer_addr).await {
                                error!("Error handling connection from {}: {}", peer_addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                },
            }
        }
    }
}
