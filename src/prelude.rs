//! Prelude module for convenient imports.
//!
//! ```rust
//! use pass_persist::prelude::*;
//! ```
//!
//! This imports:
//! - Agent types: [`Agent`], [`Exit`], [`RefreshPolicy`]
//! - Data types: [`OidKey`], [`Triple`], [`TripleSetBuilder`], [`Value`], [`ValueType`]
//! - The [`Producer`] trait
//! - Error handling: [`Error`], [`Result`]

pub use crate::agent::{Agent, Exit, LookupHook, RefreshPolicy};
pub use crate::error::{Error, Result};
pub use crate::oid::OidKey;
pub use crate::producer::Producer;
pub use crate::triple::Triple;
pub use crate::triple_set::{TripleSet, TripleSetBuilder};
pub use crate::value::{Value, ValueType};
