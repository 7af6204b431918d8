//! Drives an agent over in-memory pipes, playing the part of snmpd.

use std::time::Duration;

use pass_persist::transport::StreamTransport;
use pass_persist::{Agent, Exit, Result};
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};
use tokio::task::JoinHandle;

/// How long a test waits for any single reply line.
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// An agent running on its own task, with the daemon's ends of its pipes.
pub struct TestAgent {
    writer: WriteHalf<DuplexStream>,
    reader: Lines<BufReader<ReadHalf<DuplexStream>>>,
    handle: JoinHandle<Result<Exit>>,
}

impl TestAgent {
    /// Start `agent` on a new task.
    pub fn spawn(agent: Agent) -> Self {
        let (daemon, helper) = tokio::io::duplex(64 * 1024);

        let (helper_read, helper_write) = tokio::io::split(helper);
        let transport = StreamTransport::new(BufReader::new(helper_read), helper_write);
        let handle = tokio::spawn(async move { agent.run(transport).await });

        let (daemon_read, daemon_write) = tokio::io::split(daemon);
        Self {
            writer: daemon_write,
            reader: BufReader::new(daemon_read).lines(),
            handle,
        }
    }

    /// Send lines to the agent.
    pub async fn send(&mut self, lines: &[&str]) {
        for line in lines {
            self.writer
                .write_all(format!("{}\n", line).as_bytes())
                .await
                .expect("write to agent");
        }
        self.writer.flush().await.expect("flush to agent");
    }

    /// Send raw bytes, for input that is not valid text.
    pub async fn send_bytes(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.expect("write to agent");
        self.writer.flush().await.expect("flush to agent");
    }

    /// Next reply line, or `None` once the agent has closed its output.
    pub async fn recv(&mut self) -> Option<String> {
        tokio::time::timeout(REPLY_TIMEOUT, self.reader.next_line())
            .await
            .expect("agent reply timed out")
            .expect("read from agent")
    }

    /// Read exactly `n` reply lines.
    pub async fn recv_n(&mut self, n: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(n);
        for _ in 0..n {
            lines.push(self.recv().await.expect("agent closed early"));
        }
        lines
    }

    /// Read a `dump` listing up to and excluding the `.` terminator.
    pub async fn recv_dump(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await.expect("agent closed during dump");
            if line == "." {
                return lines;
            }
            lines.push(line);
        }
    }

    /// Send a request and read `n` reply lines.
    pub async fn request(&mut self, lines: &[&str], n: usize) -> Vec<String> {
        self.send(lines).await;
        self.recv_n(n).await
    }

    /// Wait for the agent to stop on its own and collect any trailing output.
    pub async fn wait(mut self) -> (Result<Exit>, Vec<String>) {
        let mut rest = Vec::new();
        while let Some(line) = self.recv().await {
            rest.push(line);
        }
        let exit = self.handle.await.expect("agent task panicked");
        (exit, rest)
    }

    /// Close the agent's input (end of input) and wait for it to stop.
    pub async fn close(mut self) -> (Result<Exit>, Vec<String>) {
        self.writer.shutdown().await.expect("shutdown agent input");
        self.wait().await
    }
}
