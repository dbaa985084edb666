use compact_str::CompactString;
use memchr::memchr2;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::api::{route, Outcome};
use crate::application::ServerData;
use crate::domain::errors::ConnectionError;
use crate::domain::log_entry::LogEntry;
use crate::domain::request::Request;
use crate::domain::resource::ResolvedResource;

/// Longest request line read before the connection is dropped.
pub const MAX_REQUEST_LINE: usize = 8192;

/// Serves exactly one request on one connection, then closes it.
///
/// The timestamp written to the request log is taken when the handler is
/// built, which is when the connection was accepted, not when a worker got to
/// it.
#[derive(Debug)]
pub struct ConnectionHandler<S> {
    stream: S,
    accepted_at: CompactString,
    data: ServerData,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, data: ServerData) -> Self {
        debug!("new connection handler constructed");
        Self {
            stream,
            accepted_at: data.clock.now(),
            data,
        }
    }

    #[cfg(test)]
    fn accepted_at(&self) -> &str {
        &self.accepted_at
    }

    /// Never fails: every error is reported here and the connection is
    /// closed on all paths.
    pub async fn run(mut self) {
        if let Err(e) = self.handle().await {
            match e {
                ConnectionError::MalformedRequest { .. }
                | ConnectionError::RequestLineTooLong { .. } => warn!("dropping connection: {e}"),
                _ => error!("dropping connection: {e}"),
            }
        }

        debug!("cleaning up and exiting");
        if let Err(e) = self.stream.shutdown().await {
            debug!("connection shutdown failed: {e}");
        }
    }

    async fn handle(&mut self) -> Result<(), ConnectionError> {
        let line = self.read_request_line().await?;
        let request = Request::parse(&line)?;

        let resource =
            ResolvedResource::resolve(&self.data.config.document_root, &request.target).await;

        match route(&request, resource).await? {
            Outcome::Delete(path) => {
                tokio::fs::remove_file(&path).await?;
                info!(path = %path.display(), "resource deleted");
            }
            Outcome::Respond(response) => {
                response
                    .write_to(&self.data.config.server_name, &mut self.stream)
                    .await?;

                let entry = LogEntry {
                    timestamp: &self.accepted_at,
                    request_line: &request.line,
                    status: response.status_code,
                };
                if let Err(e) = self.data.log.append(&entry).await {
                    error!(log = %self.data.log.path().display(), "could not write request log: {e}");
                }
            }
        }

        Ok(())
    }

    /// One line, without its terminator. `\n`, `\r\n` and a lone `\r` all end
    /// it. Bytes that are not UTF-8 are replaced rather than rejected, and
    /// anything the client sent after the line is never looked at.
    async fn read_request_line(&mut self) -> Result<String, ConnectionError> {
        let mut reader = BufReader::new(&mut self.stream);
        let mut line = Vec::new();

        loop {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Err(ConnectionError::PeerClosed);
            }

            let terminator = memchr2(b'\n', b'\r', available);
            let taken = terminator.unwrap_or(available.len());
            if line.len() + taken > MAX_REQUEST_LINE {
                return Err(ConnectionError::RequestLineTooLong {
                    limit: MAX_REQUEST_LINE,
                });
            }
            line.extend_from_slice(&available[..taken]);

            if terminator.is_some() {
                break;
            }
            reader.consume(taken);
        }

        Ok(String::from_utf8_lossy(&line).into_owned())
    }
}
