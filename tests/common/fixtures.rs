//! Common test fixtures.

use pass_persist::{Result, Triple, TripleSetBuilder};

/// Base subtree used by the fixtures.
pub const BASE: &str = "1.3.6.1.4.1.8072.9999";

/// Producer with two objects at `1.3.6.1.1` and `1.3.6.1.3`.
pub fn sparse_pair(set: &mut TripleSetBuilder) -> Result<()> {
    set.push(Triple::new("1.3.6.1.3", "string", "three")?)?;
    set.push(Triple::new("1.3.6.1.1", "integer", 1)?)?;
    Ok(())
}

/// One object under BASE, written with a leading dot the way snmpd does.
pub fn dotted_base(set: &mut TripleSetBuilder) -> Result<()> {
    set.push(Triple::new(format!(".{}.1.0", BASE), "string", "dotted")?)
}

/// Producer whose arcs only sort correctly when compared numerically.
pub fn numeric_arcs(set: &mut TripleSetBuilder) -> Result<()> {
    for arc in [10, 9, 2, 100, 1] {
        set.push(Triple::new(format!("{}.{}.0", BASE, arc), "gauge", arc)?)?;
    }
    Ok(())
}
