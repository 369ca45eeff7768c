//! Purpose: Library crate backing the `examplecode` CLI and tests.
//! Exports: `core` (arithmetic, file access, errors) and `api` (stable re-exports).
//! Role: Three independent operations; no shared state between them.
//! Invariants: Every operation is synchronous and side-effect free except `open_file`.
pub mod api;
pub mod core;
