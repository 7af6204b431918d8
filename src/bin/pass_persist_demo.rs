//! pass-persist-demo: example pass_persist helper.
//!
//! Serves a few objects about itself under the configured base OID. Hook it
//! into snmpd with:
//!
//! ```text
//! pass_persist .1.3.6.1.4.1.8072.9999 /usr/local/bin/pass-persist-demo --refresh 30
//! ```

use pass_persist::cli::args::{AgentArgs, LogArgs};
use pass_persist::{Agent, OidKey, Producer, Triple, TripleSetBuilder, Value, ValueType};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Example pass_persist helper for snmpd.
#[derive(Debug, Parser)]
#[command(name = "pass-persist-demo", version, about)]
struct Args {
    #[command(flatten)]
    agent: AgentArgs,

    #[command(flatten)]
    log: LogArgs,
}

/// Objects under `<base>`:
///
/// - `.1.0` string: program name and version
/// - `.2.0` timeticks: uptime, computed on every read
/// - `.3.0` integer: process id
/// - `.4.0` counter: completed population cycles
/// - `.5.0` gauge: seconds since this set was built, computed on every read
struct DemoProducer {
    base: OidKey,
    started: Instant,
    cycles: Arc<AtomicU64>,
}

impl DemoProducer {
    fn oid(&self, suffix: &str) -> String {
        format!("{}.{}", self.base, suffix)
    }
}

impl DemoProducer {
    fn new(base: OidKey) -> Self {
        Self {
            base,
            started: Instant::now(),
            cycles: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Producer for DemoProducer {
    fn populate(&self, set: &mut TripleSetBuilder) -> pass_persist::Result<()> {
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let started = self.started;
        let built = Instant::now();

        set.push(Triple::typed(
            self.oid("1.0"),
            ValueType::String,
            concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")),
        ))?;
        set.push(Triple::typed(
            self.oid("2.0"),
            ValueType::TimeTicks,
            Value::computed(move || started.elapsed().as_millis() / 10),
        ))?;
        set.push(Triple::typed(self.oid("3.0"), ValueType::Integer, std::process::id()))?;
        set.push(Triple::typed(self.oid("4.0"), ValueType::Counter, cycle))?;
        set.push(Triple::typed(
            self.oid("5.0"),
            ValueType::Gauge,
            Value::computed(move || built.elapsed().as_secs()),
        ))?;
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    args.log.init_tracing();

    let base = match args.agent.base_oid() {
        Ok(base) => base,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let producer = DemoProducer::new(base.clone());

    let agent = match Agent::builder(producer)
        .idle_timeout(args.agent.idle_timeout_duration())
        .refresh(args.agent.refresh_policy())
        .base(base)
        .build()
    {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match agent.run_stdio().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
