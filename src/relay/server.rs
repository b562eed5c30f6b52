// Relay server: TCP and UDP listeners around one shared queue

use crate::relay::config::{ServerConfig, Transport, MAX_MESSAGE_LENGTH};
use crate::relay::error::{RelayError, Result};
use crate::relay::handler;
use crate::relay::queue::MessageQueue;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A bound socket of either transport
enum Listener {
    Tcp(TcpListener),
    Udp(Arc<UdpSocket>),
}

/// A running relay server
pub struct ServerInstance {
    config: ServerConfig,
    local_addr: SocketAddr,
    queue: Arc<MessageQueue>,
    shutdown_tx: mpsc::UnboundedSender<()>,
    listener_task: JoinHandle<()>,
}

impl ServerInstance {
    /// Bind the configured socket and start serving requests against `queue`.
    ///
    /// Returns once the socket is bound; requests are handled on background
    /// tasks until [`ServerInstance::shutdown`] is called or the instance is
    /// dropped.
    pub async fn start(config: ServerConfig, queue: Arc<MessageQueue>) -> Result<Self> {
        let bind_error = |source: std::io::Error| RelayError::Bind {
            transport: config.transport.to_string(),
            addr: config.bind_addr(),
            source,
        };

        let target = (config.host.as_str(), config.port);
        let listener = match config.transport {
            Transport::Tcp => Listener::Tcp(TcpListener::bind(target).await.map_err(bind_error)?),
            Transport::Udp => {
                Listener::Udp(Arc::new(UdpSocket::bind(target).await.map_err(bind_error)?))
            }
        };

        let local_addr = match &listener {
            Listener::Tcp(listener) => listener.local_addr()?,
            Listener::Udp(socket) => socket.local_addr()?,
        };

        tracing::info!("Server started on {} [{}]", local_addr, config.transport);

        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();

        let listener_queue = queue.clone();
        let listener_task = tokio::spawn(async move {
            match listener {
                Listener::Tcp(listener) => {
                    Self::run_tcp_listener(listener, listener_queue, shutdown_rx).await
                }
                Listener::Udp(socket) => {
                    Self::run_udp_listener(socket, listener_queue, shutdown_rx).await
                }
            }
        });

        Ok(Self {
            config,
            local_addr,
            queue,
            shutdown_tx,
            listener_task,
        })
    }

    /// Accept connections until told to stop, one task per connection
    async fn run_tcp_listener(
        listener: TcpListener,
        queue: Arc<MessageQueue>,
        mut shutdown_rx: mpsc::UnboundedReceiver<()>,
    ) {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let queue = queue.clone();
                            tokio::spawn(async move {
                                if let Err(e) = Self::handle_tcp_connection(stream, peer, queue).await {
                                    tracing::error!("Request from {} failed: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("Accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("TCP listener shutting down");
                    break;
                }
            }
        }
    }

    /// Serve exactly one request on a fresh connection, then drop it
    async fn handle_tcp_connection(
        mut stream: TcpStream,
        peer: SocketAddr,
        queue: Arc<MessageQueue>,
    ) -> Result<()> {
        tracing::info!("Handling incoming request [TCP] from {}", peer);

        let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];
        let n = stream.read(&mut buffer).await?;
        tracing::info!("Received {} bytes from {}", n, peer);

        if let Some(response) = handler::process(&buffer[..n], &queue, Transport::Tcp).await? {
            stream.write_all(&response).await?;
            tracing::info!("Sent {} bytes to {}", response.len(), peer);
        }

        Ok(())
    }

    /// Receive datagrams until told to stop, one task per datagram
    async fn run_udp_listener(
        socket: Arc<UdpSocket>,
        queue: Arc<MessageQueue>,
        mut shutdown_rx: mpsc::UnboundedReceiver<()>,
    ) {
        let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];

        loop {
            tokio::select! {
                result = socket.recv_from(&mut buffer) => {
                    match result {
                        Ok((len, peer)) => {
                            let payload = buffer[..len].to_vec();
                            let socket = socket.clone();
                            let queue = queue.clone();
                            tokio::spawn(async move {
                                if let Err(e) = Self::handle_datagram(socket, payload, peer, queue).await {
                                    tracing::error!("Request from {} failed: {}", peer, e);
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("Receive error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("UDP listener shutting down");
                    break;
                }
            }
        }
    }

    /// Serve one datagram; a reply goes only to the address it came from
    async fn handle_datagram(
        socket: Arc<UdpSocket>,
        payload: Vec<u8>,
        peer: SocketAddr,
        queue: Arc<MessageQueue>,
    ) -> Result<()> {
        tracing::info!("Handling incoming request [UDP] from {}", peer);
        tracing::info!("Received {} bytes from {}", payload.len(), peer);

        if let Some(response) = handler::process(&payload, &queue, Transport::Udp).await? {
            let sent = socket
                .send_to(&response, peer)
                .await
                .map_err(|source| RelayError::Reply { peer, source })?;
            tracing::info!("Sent {} bytes to {}", sent, peer);
        }

        Ok(())
    }

    /// Address the socket is actually bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Queue this server reads from and writes to
    pub fn queue(&self) -> &Arc<MessageQueue> {
        &self.queue
    }

    /// Stop accepting work and release the bound socket.
    ///
    /// Handlers that are already running are left to finish on their own.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());

        if let Err(e) = self.listener_task.await {
            tracing::error!("Listener task ended abnormally: {}", e);
        }
    }
}
