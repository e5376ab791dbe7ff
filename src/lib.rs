#![forbid(unsafe_code)]
//! stepwrap: wrap Java API test methods in named Allure steps
//!
//! Scans `src/test/java/api/*Test.java`, finds `public void test*` methods by pattern matching and
//! rewrites each body as `Step("<description>", () -> { ... });`, with the description chosen from
//! the method name.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (for example a malformed built-in regex), use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod cli;
pub mod steps;
pub mod version;

pub use steps::{StepConfig, describe, extract, rewrite, rewrite_source};
