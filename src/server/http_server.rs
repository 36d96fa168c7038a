//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

use crate::parser::parse_request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::router::Router;

/// An HTTP server.
///
/// Every accepted connection is served by its own task: one read, one
/// response, then the connection is closed.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The router shared by all connection tasks.
    pub router: Arc<Router>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = Arc::new(Router::from_config(&config));
        Self { config, router }
    }

    /// Log the effective configuration.
    fn display_server_info(&self) {
        match self.router.directory() {
            Some(directory) => info!("Serving files from {directory:?}"),
            None => info!("No directory configured, /files/ routes are disabled"),
        }
        match self.config.max_connections {
            Some(limit) => info!("Serving at most {limit} connections at a time"),
            None => debug!("Connection count is unbounded"),
        }
    }

    /// Set up the TCP listener.
    pub async fn setup_listener(&self) -> Result<TcpListener, Error> {
        self.config.validate()?;
        let addr = self.config.resolve().await?;
        let listener = TcpListener::bind(addr).await?;
        info!(
            "Listening at {protocol}://{addr}",
            protocol = self.config.protocol,
            addr = listener.local_addr()?
        );
        Ok(listener)
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;
        self.serve(listener, Self::ctrl_c()).await
    }

    /// Resolves when Ctrl+C is received; never resolves if the handler
    /// cannot be installed.
    async fn ctrl_c() {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                error!("Error setting up Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    }

    /// Accept connections on `listener` until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        self.config.validate()?;
        self.display_server_info();

        let semaphore = self.config.max_connections.map(|limit| Arc::new(Semaphore::new(limit)));

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            // With a connection limit, wait for a free slot before accepting
            // so excess clients queue in the listen backlog.
            let permit = match &semaphore {
                Some(semaphore) => tokio::select! {
                    _ = &mut shutdown => break,
                    permit = semaphore.clone().acquire_owned() => permit.ok(),
                },
                None => None,
            };

            tokio::select! {
                // Check for shutdown signal
                _ = &mut shutdown => {
                    info!("Shutting down server...");
                    break;
                }

                // Reap finished connection tasks
                Some(res) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = res {
                        error!("Connection task failed: {e}");
                    }
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                permit,
                                self.router.clone(),
                                self.config.read_buffer_size,
                                &mut tasks,
                            );
                        }
                        Err(e) => Self::handle_connection_error(e).await,
                    }
                }
            }
        }

        // Perform graceful shutdown
        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Spawn the task serving a freshly accepted connection.
    fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        permit: Option<OwnedSemaphorePermit>,
        router: Arc<Router>,
        read_buffer_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;
            debug!("Connection from {addr}");

            match Self::handle_connection(&mut socket, &router, read_buffer_size).await {
                Ok(()) => {}
                Err(Error::ParseError(e)) => warn!("Dropping malformed request from {addr}: {e}"),
                Err(e) => error!("Error handling connection from {addr}: {e}"),
            }
            // The socket is closed when dropped here, on every path.
        });
    }

    /// Log an accept error and back off before retrying.
    async fn handle_connection_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        // Wait for all tasks to complete (with timeout)
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timed out, aborting {len} connections", len = tasks.len());
            tasks.abort_all();
        }

        info!("Server shutdown complete");
    }

    /// Serve a single request on `socket`.
    ///
    /// The request must arrive in one read of at most `read_buffer_size`
    /// bytes. A request that does not parse is answered with nothing; the
    /// error is returned and the caller closes the connection.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let mut buf = vec![0; read_buffer_size];

        // Read data from the socket
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            debug!("Connection closed before a request was sent");
            return Ok(());
        }

        // Parse the HTTP request
        let request = parse_request(&buf[..n])?;

        let response = router.dispatch(&request).await;
        info!(
            "{method} {path} {version} -> {status}",
            method = request.method,
            path = request.path,
            version = request.version,
            status = response.status
        );

        // Send the response
        response.write_to(&mut *socket).await?;

        if let Err(e) = socket.shutdown().await {
            debug!("Error shutting down connection: {e}");
        }

        Ok(())
    }
}
