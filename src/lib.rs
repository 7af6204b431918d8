//! # pass-persist
//!
//! Async agent side of net-snmp's `pass_persist` protocol.
//!
//! snmpd spawns a pass_persist helper once and talks to it over stdin/stdout
//! with a small line protocol (`PING`, `get`, `getnext`, `set`). This crate
//! implements that helper: you supply a [`Producer`] that fills a set of
//! OID/type/value triples, and the [`Agent`] answers snmpd from it, walking
//! OIDs in numeric order and optionally refreshing the data in the background.
//!
//! ## Features
//!
//! - Numeric OID ordering (`1.2.9 < 1.2.10`) without requiring strict parsing
//! - Literal or computed values, evaluated at read time
//! - Background refresh with atomic set replacement
//! - Idle timeout so a stalled helper never hangs snmpd
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pass_persist::{Agent, Triple, TripleSetBuilder, Value};
//! use std::time::Instant;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), pass_persist::Error> {
//!     let started = Instant::now();
//!
//!     let agent = Agent::builder(move |set: &mut TripleSetBuilder| -> pass_persist::Result<()> {
//!         set.push(Triple::new("1.3.6.1.4.1.8072.9999.1.0", "string", "demo")?)?;
//!         set.push(Triple::new(
//!             "1.3.6.1.4.1.8072.9999.2.0",
//!             "timeticks",
//!             Value::computed(move || started.elapsed().as_millis() / 10),
//!         )?)?;
//!         Ok(())
//!     })
//!     .base("1.3.6.1.4.1.8072.9999")
//!     .build()?;
//!
//!     agent.run_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
pub mod oid;
pub mod prelude;
pub mod producer;
pub mod transport;
pub mod triple;
pub mod triple_set;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use agent::{Agent, AgentBuilder, Exit, LookupHook, RefreshPolicy};
pub use error::{Error, Result};
pub use oid::OidKey;
pub use producer::Producer;
pub use triple::Triple;
pub use triple_set::{TripleSet, TripleSetBuilder};
pub use value::{Value, ValueType};
