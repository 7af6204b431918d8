//! Sorted triple storage for GET and GETNEXT.
//!
//! A population cycle fills a [`TripleSetBuilder`] in any order, then
//! [`finalize`](TripleSetBuilder::finalize) sorts it into an immutable
//! [`TripleSet`]. Finalized sets are never modified; a refresh builds a new
//! one and replaces the old one wholesale.

use crate::error::{Error, Result};
use crate::oid::OidKey;
use crate::triple::Triple;

/// Unsorted working set filled by a producer.
///
/// # Example
///
/// ```rust
/// use pass_persist::{OidKey, Triple, TripleSetBuilder};
///
/// let mut builder = TripleSetBuilder::with_base(OidKey::new("1.3.6.1.4.1.8072.9999"));
/// builder.push(Triple::new("1.3.6.1.4.1.8072.9999.2", "integer", 2)?)?;
/// builder.push(Triple::new("1.3.6.1.4.1.8072.9999.1", "integer", 1)?)?;
///
/// // Outside the base subtree
/// assert!(builder.push(Triple::new("1.3.6.1.4.1.8072.99990", "integer", 3)?).is_err());
///
/// let set = builder.finalize();
/// let first = set.first().unwrap();
/// assert_eq!(first.oid().as_str(), "1.3.6.1.4.1.8072.9999.1");
/// # Ok::<(), pass_persist::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TripleSetBuilder {
    base: Option<OidKey>,
    entries: Vec<Triple>,
}

impl TripleSetBuilder {
    /// Create a builder that accepts any OID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that only accepts OIDs in the subtree rooted at `base`.
    pub fn with_base(base: OidKey) -> Self {
        Self {
            base: Some(base),
            entries: Vec::new(),
        }
    }

    /// The base subtree, if one is enforced.
    pub fn base(&self) -> Option<&OidKey> {
        self.base.as_ref()
    }

    /// Append a triple.
    ///
    /// Returns [`Error::SubtreePrefixViolation`] if a base is set and the
    /// triple's OID is not in that subtree.
    pub fn push(&mut self, triple: Triple) -> Result<()> {
        if let Some(base) = &self.base
            && !triple.oid().starts_with(base)
        {
            return Err(Error::SubtreePrefixViolation {
                oid: triple.oid().clone(),
                base: base.clone(),
            });
        }
        self.entries.push(triple);
        Ok(())
    }

    /// Number of triples pushed so far, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort by OID and freeze.
    ///
    /// When several triples share an OID, the one pushed last wins.
    pub fn finalize(self) -> TripleSet {
        let mut sorted = self.entries;
        // Stable, so equal OIDs keep push order and the last one is kept below
        sorted.sort_by(|a, b| a.oid().cmp(b.oid()));

        let mut entries: Vec<Triple> = Vec::with_capacity(sorted.len());
        for triple in sorted {
            match entries.last_mut() {
                Some(last) if last.oid() == triple.oid() => *last = triple,
                _ => entries.push(triple),
            }
        }

        TripleSet { entries }
    }
}

/// Immutable, sorted set of triples for one subtree.
///
/// Entries are unique by OID and sorted ascending, so both exact lookup and
/// "next greater" are binary searches.
#[derive(Debug, Clone, Default)]
pub struct TripleSet {
    entries: Vec<Triple>,
}

impl TripleSet {
    /// Get the triple for an exact OID match.
    ///
    /// Matches on the OID text, so `.1.3.6.1` does not find `1.3.6.1`.
    pub fn get(&self, oid: &OidKey) -> Option<&Triple> {
        self.entries
            .binary_search_by(|t| t.oid().cmp(oid))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Get the triple with the smallest OID strictly greater than `oid`.
    ///
    /// "Greater" is by tree position: `getnext .1.3.6.1.1` never returns
    /// `1.3.6.1.1`. Returns `None` if `oid` is at or past the last entry.
    pub fn get_next(&self, oid: &OidKey) -> Option<&Triple> {
        let idx = self.entries.partition_point(|t| t.oid().cmp_arcs(oid).is_le());
        self.entries.get(idx)
    }

    /// The triple with the smallest OID.
    pub fn first(&self) -> Option<&Triple> {
        self.entries.first()
    }

    /// Get the number of entries in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all triples in ascending OID order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TripleSet {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
