//! CLI utilities for pass-persist.
//!
//! This module provides command-line argument parsing and tracing setup for
//! the `pass-persist-demo` helper.
//!
//! This module is only available with the `cli` feature.

pub mod args;
