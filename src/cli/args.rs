//! Command-line argument structures for pass_persist helpers.
//!
//! Reusable clap argument groups; a helper binary flattens them into its own
//! `Parser` next to whatever its producer needs.

use clap::Parser;
use std::time::Duration;

use crate::agent::RefreshPolicy;
use crate::error::{Error, Result};
use crate::oid::OidKey;

/// Default base subtree (NET-SNMP-PASS-MIB example space).
pub const DEFAULT_BASE_OID: &str = ".1.3.6.1.4.1.8072.9999";

/// Agent behaviour arguments.
#[derive(Debug, Parser)]
pub struct AgentArgs {
    /// Seconds to wait for a command before exiting.
    #[arg(long = "idle-timeout", default_value = "60", value_name = "SECS")]
    pub idle_timeout: u64,

    /// Rebuild the data set in the background every SECS seconds.
    #[arg(long = "refresh", value_name = "SECS", conflicts_with = "on_demand")]
    pub refresh: Option<u64>,

    /// Rebuild the data set before every get, getnext and dump.
    #[arg(long = "on-demand")]
    pub on_demand: bool,

    /// Base OID of the subtree delegated by snmpd.
    #[arg(long = "base", default_value = DEFAULT_BASE_OID, value_name = "OID")]
    pub base: String,
}

impl AgentArgs {
    /// Get the idle timeout as a Duration.
    pub fn idle_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }

    /// Refresh policy selected by `--refresh` / `--on-demand`.
    pub fn refresh_policy(&self) -> RefreshPolicy {
        match (self.refresh, self.on_demand) {
            (Some(secs), _) => RefreshPolicy::Every(Duration::from_secs(secs)),
            (None, true) => RefreshPolicy::OnDemand,
            (None, false) => RefreshPolicy::Never,
        }
    }

    /// Parse and check `--base`.
    ///
    /// Unlike OIDs arriving on the protocol, the base must be strictly
    /// numeric: it decides which triples a producer may emit. The result
    /// always carries a leading dot, the form snmpd uses, so OIDs a producer
    /// derives from it read back the same way in snmpd's logs.
    pub fn base_oid(&self) -> Result<OidKey> {
        let text = self.base.trim();
        let base = if text.starts_with('.') {
            OidKey::new(text)
        } else {
            OidKey::new(format!(".{}", text))
        };
        let mut segments = base.segments().peekable();
        if segments.peek().is_none() {
            return Err(Error::config("base OID is empty"));
        }
        if let Some(bad) = segments.find(|s| s.parse::<u32>().is_err()) {
            return Err(Error::config(format!(
                "base OID {} has non-numeric arc '{}'",
                self.base, bad
            )));
        }
        drop(segments);
        Ok(base)
    }
}

/// Logging arguments.
#[derive(Debug, Parser)]
pub struct LogArgs {
    /// Enable debug logging to stderr.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable trace-level logging (every protocol line).
    #[arg(long = "trace")]
    pub trace: bool,
}

impl LogArgs {
    /// Initialize tracing based on flags.
    ///
    /// Always writes to stderr: stdout carries the protocol.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let filter = if self.trace {
            "pass_persist=trace"
        } else if self.debug {
            "pass_persist=debug"
        } else {
            "pass_persist=warn"
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .try_init();
    }
}
