//! Producer trait: the business logic that fills a triple set.

use crate::error::Result;
use crate::oid::OidKey;
use crate::triple_set::{TripleSet, TripleSetBuilder};

/// Populates a triple set for the agent's subtree.
///
/// Called once at startup and again on every refresh cycle. Refresh calls run
/// on tokio's blocking pool, concurrently with command processing, so a
/// producer may do blocking I/O.
///
/// Any error aborts the current population cycle: at startup the agent fails,
/// during a refresh the previously active set stays in place.
///
/// Closures with the matching signature implement this trait:
///
/// ```rust
/// use pass_persist::{Producer, Triple, TripleSetBuilder};
///
/// let producer = |set: &mut TripleSetBuilder| -> pass_persist::Result<()> {
///     set.push(Triple::new("1.3.6.1.4.1.8072.9999.1.0", "string", "hello")?)?;
///     Ok(())
/// };
///
/// let set = producer.build(None).unwrap();
/// assert_eq!(set.len(), 1);
/// ```
///
/// # Bounds
///
/// The `'static` bound is required because the agent shares the producer with
/// its refresh task via `Arc<dyn Producer>`.
pub trait Producer: Send + Sync + 'static {
    /// Push this cycle's triples into `set`.
    fn populate(&self, set: &mut TripleSetBuilder) -> Result<()>;

    /// Run one population cycle and finalize the result.
    fn build(&self, base: Option<&OidKey>) -> Result<TripleSet> {
        let mut builder = match base {
            Some(base) => TripleSetBuilder::with_base(base.clone()),
            None => TripleSetBuilder::new(),
        };
        self.populate(&mut builder)?;
        Ok(builder.finalize())
    }
}

impl<F> Producer for F
where
    F: Fn(&mut TripleSetBuilder) -> Result<()> + Send + Sync + 'static,
{
    fn populate(&self, set: &mut TripleSetBuilder) -> Result<()> {
        self(set)
    }
}
