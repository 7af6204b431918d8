//! pass_persist agent.
//!
//! The agent answers snmpd's pass_persist commands over a line transport
//! (stdin/stdout when spawned by snmpd) from an active [`TripleSet`] built by
//! a [`Producer`].
//!
//! # Example
//!
//! ```rust,no_run
//! use pass_persist::{Agent, RefreshPolicy, Triple, TripleSetBuilder};
//! use std::time::Duration;
//!
//! # async fn example() -> pass_persist::Result<()> {
//! let agent = Agent::builder(|set: &mut TripleSetBuilder| -> pass_persist::Result<()> {
//!     set.push(Triple::new("1.3.6.1.4.1.8072.9999.1.0", "string", "up")?)?;
//!     Ok(())
//! })
//! .idle_timeout(Duration::from_secs(120))
//! .refresh(RefreshPolicy::Every(Duration::from_secs(30)))
//! .build()?;
//!
//! let exit = agent.run_stdio().await?;
//! # let _ = exit;
//! # Ok(())
//! # }
//! ```
//!
//! # Lookup hooks
//!
//! [`AgentBuilder::get_hook`] and [`AgentBuilder::getnext_hook`] answer
//! `get`/`getnext` directly from a function of the requested OID, bypassing
//! the triple set. Useful for large or sparse trees that are cheap to compute
//! per OID but expensive to enumerate.
//!
//! # Concurrency
//!
//! Commands are handled one at a time. A background refresh (if configured)
//! builds a complete new set and swaps it into a `tokio::sync::watch` slot in
//! a single store. Each command clones the slot's `Arc` once before looking
//! anything up, so it sees either the old set or the new one, never a mix.

mod command;
mod refresh;

pub use command::Command;

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::oid::OidKey;
use crate::producer::Producer;
use crate::transport::{Inbound, LineTransport, StreamTransport};
use crate::triple::Triple;
use crate::triple_set::TripleSet;

use refresh::ActiveSet;

/// Default time to wait for a line before shutting down.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// When the active set is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Populate once at startup only.
    #[default]
    Never,
    /// Rebuild in the background at this interval.
    Every(Duration),
    /// Rebuild before each `get`, `getnext` and `dump`, blocking that command.
    ///
    /// Suits producers that are cheap and must always be current.
    OnDemand,
}

/// Direct answer to a `get` or `getnext`, see [`AgentBuilder::get_hook`].
pub type LookupHook = Arc<dyn Fn(&OidKey) -> Option<Triple> + Send + Sync>;

/// Why [`Agent::run`] returned. Every variant is a normal shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `exit` or `quit` received.
    Quit,
    /// The transport reached end of input.
    EndOfInput,
    /// No line arrived within the idle timeout.
    IdleTimeout,
    /// The agent's cancellation token fired.
    Cancelled,
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "quit"),
            Self::EndOfInput => write!(f, "end of input"),
            Self::IdleTimeout => write!(f, "idle timeout"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder {
    producer: Arc<dyn Producer>,
    idle_timeout: Duration,
    refresh: RefreshPolicy,
    base: Option<OidKey>,
    cancel: Option<CancellationToken>,
    get_hook: Option<LookupHook>,
    getnext_hook: Option<LookupHook>,
}

impl AgentBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Idle timeout: 60 seconds
    /// - Refresh: [`RefreshPolicy::Never`]
    /// - No base subtree enforcement
    pub fn new(producer: impl Producer) -> Self {
        Self {
            producer: Arc::new(producer),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            refresh: RefreshPolicy::Never,
            base: None,
            cancel: None,
            get_hook: None,
            getnext_hook: None,
        }
    }

    /// Set how long to wait for each line before shutting down.
    ///
    /// A helper that hangs silently would stall snmpd's poll cycle, so the
    /// agent exits instead; snmpd respawns it on the next request.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the refresh policy.
    pub fn refresh(mut self, policy: RefreshPolicy) -> Self {
        self.refresh = policy;
        self
    }

    /// Restrict producers to the subtree rooted at `base`.
    ///
    /// Pushing a triple outside it fails the population cycle with
    /// [`Error::SubtreePrefixViolation`].
    pub fn base(mut self, base: impl Into<OidKey>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Set a cancellation token for graceful shutdown.
    ///
    /// If not set, the agent creates its own token accessible via `Agent::cancel()`.
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Answer `get` with `hook` instead of the active set.
    ///
    /// The hook gets the OID as sent by the daemon; `None` replies `NONE`.
    /// It runs on the agent's task between reading the request and writing
    /// the reply, so it should return quickly. No rebuild happens for hooked
    /// commands under [`RefreshPolicy::OnDemand`].
    ///
    /// ```rust
    /// use pass_persist::{Agent, Triple, TripleSetBuilder, ValueType};
    ///
    /// let agent = Agent::builder(|_: &mut TripleSetBuilder| -> pass_persist::Result<()> { Ok(()) })
    ///     .get_hook(|oid| {
    ///         oid.starts_with(&"1.3.6.1.4.1.8072.9999".into())
    ///             .then(|| Triple::typed(oid, ValueType::String, "dynamic"))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # let _ = agent;
    /// ```
    pub fn get_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OidKey) -> Option<Triple> + Send + Sync + 'static,
    {
        self.get_hook = Some(Arc::new(hook));
        self
    }

    /// Answer `getnext` with `hook` instead of the active set.
    ///
    /// Same contract as [`get_hook`](Self::get_hook); the hook must return
    /// an OID strictly greater than the one it is given, or `None` past the end.
    pub fn getnext_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&OidKey) -> Option<Triple> + Send + Sync + 'static,
    {
        self.getnext_hook = Some(Arc::new(hook));
        self
    }

    /// Build the agent.
    pub fn build(self) -> Result<Agent> {
        if self.idle_timeout.is_zero() {
            return Err(Error::config("idle timeout must be non-zero"));
        }
        if let RefreshPolicy::Every(interval) = self.refresh
            && interval.is_zero()
        {
            return Err(Error::config("refresh interval must be non-zero"));
        }

        Ok(Agent {
            producer: self.producer,
            idle_timeout: self.idle_timeout,
            refresh: self.refresh,
            base: self.base,
            cancel: self.cancel.unwrap_or_default(),
            get_hook: self.get_hook,
            getnext_hook: self.getnext_hook,
        })
    }
}

/// pass_persist agent.
///
/// Holds configuration only; each call to [`run`](Agent::run) populates a
/// fresh active set and serves one transport until it stops.
pub struct Agent {
    producer: Arc<dyn Producer>,
    idle_timeout: Duration,
    refresh: RefreshPolicy,
    base: Option<OidKey>,
    cancel: CancellationToken,
    get_hook: Option<LookupHook>,
    getnext_hook: Option<LookupHook>,
}

impl Agent {
    /// Create a builder for configuring the agent.
    pub fn builder(producer: impl Producer) -> AgentBuilder {
        AgentBuilder::new(producer)
    }

    /// Get the configured idle timeout.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Get the refresh policy.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.refresh
    }

    /// Get the enforced base subtree, if any.
    pub fn base(&self) -> Option<&OidKey> {
        self.base.as_ref()
    }

    /// Get the cancellation token for this agent.
    ///
    /// Call `token.cancel()` to stop a running agent between commands.
    pub fn cancel(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Serve the process's stdin/stdout.
    pub async fn run_stdio(&self) -> Result<Exit> {
        self.run(StreamTransport::stdio()).await
    }

    /// Populate the initial set, then serve commands until shutdown.
    ///
    /// Returns the shutdown reason. Errors are fatal: a failed initial
    /// population or a transport I/O failure.
    #[instrument(name = "pass_persist", skip_all, err)]
    pub async fn run<T: LineTransport>(&self, transport: T) -> Result<Exit> {
        tracing::info!(
            target: "pass_persist::agent",
            {
                idle_timeout = ?self.idle_timeout,
                refresh = ?self.refresh,
                base = ?self.base,
                get_hook = self.get_hook.is_some(),
                getnext_hook = self.getnext_hook.is_some(),
            },
            "agent starting"
        );

        let initial = refresh::populate(self.producer.clone(), self.base.clone()).await?;
        tracing::debug!(target: "pass_persist::agent", { triples = initial.len() }, "initial population complete");

        let (tx, rx) = watch::channel(Arc::new(initial));

        // Stops the refresh task however this function returns
        let stop = self.cancel.child_token();
        let _stop_guard = stop.clone().drop_guard();

        let rebuild = match self.refresh {
            RefreshPolicy::Every(interval) => {
                refresh::spawn(self.producer.clone(), self.base.clone(), interval, tx, stop);
                None
            }
            RefreshPolicy::OnDemand => Some(tx),
            RefreshPolicy::Never => None,
        };

        let mut session = Session {
            agent: self,
            transport,
            active: rx,
            rebuild,
        };
        let exit = session.serve().await?;

        tracing::info!(target: "pass_persist::agent", { reason = %exit }, "agent exiting");
        Ok(exit)
    }
}

/// State for one run of the command loop.
struct Session<'a, T> {
    agent: &'a Agent,
    transport: T,
    active: watch::Receiver<ActiveSet>,
    /// Present only for [`RefreshPolicy::OnDemand`].
    rebuild: Option<watch::Sender<ActiveSet>>,
}

impl<T: LineTransport> Session<'_, T> {
    async fn serve(&mut self) -> Result<Exit> {
        loop {
            let line = match self.read_line().await? {
                ControlFlow::Continue(line) => line,
                ControlFlow::Break(exit) => return Ok(exit),
            };

            let command = Command::parse(&line);
            tracing::debug!(target: "pass_persist::agent", { command = ?command }, "dispatching");

            if let Some(exit) = self.dispatch(command).await? {
                return Ok(exit);
            }
        }
    }

    /// Handle one command, reading its argument lines. Returns `Some` to stop.
    async fn dispatch(&mut self, command: Command) -> Result<Option<Exit>> {
        match command {
            Command::Ping => self.reply(command::PONG).await?,
            Command::Get | Command::GetNext => {
                let oid = match self.read_line().await? {
                    ControlFlow::Continue(line) => OidKey::new(line),
                    ControlFlow::Break(exit) => return Ok(Some(exit)),
                };

                let agent = self.agent;
                let hook = if command == Command::Get {
                    &agent.get_hook
                } else {
                    &agent.getnext_hook
                };

                let found = match hook {
                    Some(hook) => hook(&oid).map(|t| t.render()),
                    None => {
                        let set = self.snapshot().await;
                        let found = if command == Command::Get {
                            set.get(&oid)
                        } else {
                            set.get_next(&oid)
                        };
                        found.map(Triple::render)
                    }
                };

                match found {
                    Some(lines) => self.transport.send_lines(&lines).await?,
                    None => self.reply(command::NONE).await?,
                }
            }
            Command::Set => {
                // Answer as soon as the OID is in, then drop the "TYPE VALUE" line
                if let ControlFlow::Break(exit) = self.read_line().await? {
                    return Ok(Some(exit));
                }
                self.reply(command::NOT_WRITABLE).await?;
                if let ControlFlow::Break(exit) = self.read_line().await? {
                    return Ok(Some(exit));
                }
            }
            Command::Dump => {
                let set = self.snapshot().await;
                let mut lines: Vec<String> = set.iter().map(|t| t.to_string()).collect();
                lines.push(command::END_OF_DUMP.to_string());
                self.transport.send_lines(&lines).await?;
            }
            Command::Quit => {
                self.reply(command::BYE).await?;
                return Ok(Some(Exit::Quit));
            }
            Command::Unknown => self.reply(command::UNKNOWN_COMMAND).await?,
        }
        Ok(None)
    }

    /// Wait for the next line, bounded by the idle timeout and the cancel token.
    async fn read_line(&mut self) -> Result<ControlFlow<Exit, String>> {
        let Self {
            agent, transport, ..
        } = self;

        let inbound = tokio::select! {
            biased;
            _ = agent.cancel.cancelled() => return Ok(ControlFlow::Break(Exit::Cancelled)),
            inbound = transport.recv_line(agent.idle_timeout) => inbound?,
        };

        Ok(match inbound {
            Inbound::Line(line) => ControlFlow::Continue(line.trim().to_string()),
            Inbound::Eof => ControlFlow::Break(Exit::EndOfInput),
            Inbound::TimedOut => {
                tracing::warn!(target: "pass_persist::agent", { idle_timeout = ?agent.idle_timeout }, "idle timeout, shutting down");
                ControlFlow::Break(Exit::IdleTimeout)
            }
        })
    }

    /// The set this command reads from, taken once.
    async fn snapshot(&mut self) -> Arc<TripleSet> {
        if let Some(tx) = &self.rebuild {
            let agent = self.agent;
            match refresh::populate(agent.producer.clone(), agent.base.clone()).await {
                Ok(set) => {
                    tx.send_replace(Arc::new(set));
                }
                Err(e) => {
                    tracing::warn!(target: "pass_persist::agent", { error = %e }, "on-demand rebuild failed, using previous set");
                }
            }
        }
        Arc::clone(&self.active.borrow())
    }

    async fn reply(&mut self, line: &str) -> Result<()> {
        self.transport.send_lines(&[line.to_string()]).await
    }
}
