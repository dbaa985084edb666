use std::convert::Infallible;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use listenfd::ListenFd;
use tokio::net::TcpListener;
use tracing::{error, info, info_span, Instrument};

use crate::application::handler::ConnectionHandler;
use crate::application::ServerData;
use crate::domain::errors::DispatchError;
use crate::infrastructure::server_impl::pool::WorkerPool;

/// Owns the listening socket and the worker pool. Accepting happens on the
/// caller's task; every connection is handed to the pool as soon as it is
/// accepted.
#[derive(Debug)]
pub struct Dispatcher {
    listener: TcpListener,
    pool: WorkerPool,
    data: ServerData,
}

impl Dispatcher {
    /// Listens on all interfaces on the configured port, unless the process
    /// was handed a socket through `LISTEN_FDS`.
    pub async fn bind(data: ServerData) -> Result<Self, DispatchError> {
        let port = data.config.port;
        let listener = match inherited_listener() {
            Ok(Some(listener)) => listener,
            Ok(None) => TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
                .await
                .map_err(|source| DispatchError::Bind { port, source })?,
            Err(source) => return Err(DispatchError::Bind { port, source }),
        };

        Self::from_listener(listener, data)
    }

    pub fn from_listener(listener: TcpListener, data: ServerData) -> Result<Self, DispatchError> {
        let pool = WorkerPool::new(data.config.pool_size, data.config.queue_bound)?;

        Ok(Self {
            listener,
            pool,
            data,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts until the process is stopped. Only returns if the pool stops
    /// taking jobs.
    pub async fn run(self) -> Result<Infallible, DispatchError> {
        match self.local_addr() {
            Ok(addr) => info!("server started ... listening on {addr}"),
            Err(_) => info!("server started"),
        }

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("failed to accept connection: {e}");
                    continue;
                }
            };
            info!(%peer, "new connection request");

            let handler = ConnectionHandler::new(stream, self.data.clone());
            self.pool
                .execute(handler.run().instrument(info_span!("connection", %peer)))
                .await?;
        }
    }
}

fn inherited_listener() -> io::Result<Option<TcpListener>> {
    let Some(listener) = ListenFd::from_env().take_tcp_listener(0)? else {
        return Ok(None);
    };
    listener.set_nonblocking(true)?;
    TcpListener::from_std(listener).map(Some)
}

/// Binds and serves forever. A bind failure is returned before any
/// connection is accepted.
pub async fn serve(data: ServerData) -> Result<Infallible, DispatchError> {
    Dispatcher::bind(data).await?.run().await
}
