//! Line transport over tokio byte streams.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use super::{Inbound, LineTransport};
use crate::error::Result;

/// [`LineTransport`] over a buffered reader and a writer.
///
/// # Example
///
/// ```rust,no_run
/// use pass_persist::transport::StreamTransport;
///
/// // What snmpd connects to
/// let transport = StreamTransport::stdio();
/// ```
#[derive(Debug)]
pub struct StreamTransport<R, W> {
    reader: R,
    writer: W,
    buf: Vec<u8>,
}

impl<R, W> StreamTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Create a transport from a reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            buf: Vec::new(),
        }
    }
}

impl StreamTransport<BufReader<Stdin>, Stdout> {
    /// Transport over the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport for StreamTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn recv_line(&mut self, timeout: Duration) -> Result<Inbound> {
        self.buf.clear();
        // Bytes, not `read_line`: one invalid UTF-8 byte must not end the session
        let read = match tokio::time::timeout(timeout, self.reader.read_until(b'\n', &mut self.buf)).await {
            Ok(read) => read?,
            Err(_) => return Ok(Inbound::TimedOut),
        };

        if read == 0 {
            tracing::trace!(target: "pass_persist::transport", "> <eof>");
            return Ok(Inbound::Eof);
        }

        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end_matches(['\r', '\n']);
        tracing::trace!(target: "pass_persist::transport", "> {}", line);
        Ok(Inbound::Line(line.to_string()))
    }

    async fn send_lines(&mut self, lines: &[String]) -> Result<()> {
        let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            tracing::trace!(target: "pass_persist::transport", "< {}", line);
            out.push_str(line);
            out.push('\n');
        }
        self.writer.write_all(out.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
