use std::fmt::Write as _;
use std::io;

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::resource::{ContentType, ResolvedResource};
use crate::domain::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: StatusCode,
    pub content_type: ContentType,
    pub content_length: u64,
    pub body: Option<Bytes>,
}

impl Response {
    /// Headers describe `resource` even when no body follows (HEAD, 501).
    pub fn header_only(status_code: StatusCode, resource: &ResolvedResource) -> Self {
        Self {
            status_code,
            content_type: resource.content_type(),
            content_length: resource.content_length(),
            body: None,
        }
    }

    pub fn with_body(status_code: StatusCode, resource: &ResolvedResource, body: Bytes) -> Self {
        Self {
            body: Some(body),
            ..Self::header_only(status_code, resource)
        }
    }

    pub fn head(&self, server_name: &str) -> Bytes {
        let mut buf = String::with_capacity(96 + server_name.len());
        let content_type = self.content_type.as_str();
        let content_length = self.content_length;

        write!(
            buf,
            "HTTP/1.1 {}\r\n\
             Server: {server_name}\r\n\
             Content-Type: {content_type}\r\n\
             Content-Length: {content_length}\r\n\r\n",
            self.status_code
        )
        .expect("No reason to fail.");

        buf.into()
    }

    /// Head and body go out as two writes; the body is never chunked.
    pub async fn write_to<W>(&self, server_name: &str, stream: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head(server_name)).await?;
        if let Some(body) = &self.body {
            stream.write_all(body).await?;
        }
        stream.flush().await
    }
}
