//! Population cycles and the background refresh task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::oid::OidKey;
use crate::producer::Producer;
use crate::triple_set::TripleSet;

/// Slot holding the active set. Readers clone the `Arc` once per command.
pub(crate) type ActiveSet = Arc<TripleSet>;

/// Run one population cycle on the blocking pool.
pub(crate) async fn populate(
    producer: Arc<dyn Producer>,
    base: Option<OidKey>,
) -> Result<TripleSet> {
    tokio::task::spawn_blocking(move || producer.build(base.as_ref()))
        .await
        .map_err(|_| Error::ProducerPanicked)?
}

/// Spawn the periodic refresh task.
///
/// Every `interval` the producer builds a fresh set off to the side; on
/// success it replaces the active set in one store. A failed cycle is logged
/// and the previous set stays active. The task ends when `stop` is cancelled.
pub(crate) fn spawn(
    producer: Arc<dyn Producer>,
    base: Option<OidKey>,
    interval: Duration,
    active: watch::Sender<ActiveSet>,
    stop: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let cycle = populate(producer.clone(), base.clone());
            let result = tokio::select! {
                _ = stop.cancelled() => break,
                result = cycle => result,
            };

            match result {
                Ok(set) => {
                    let count = set.len();
                    active.send_replace(Arc::new(set));
                    tracing::info!(target: "pass_persist::agent", { triples = count }, "refresh completed");
                }
                Err(e) => {
                    tracing::warn!(target: "pass_persist::agent", { error = %e }, "refresh failed, keeping previous set");
                }
            }
        }
        tracing::debug!(target: "pass_persist::agent", "refresh task stopped");
    })
}
