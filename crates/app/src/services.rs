//! Application services — use-case implementations.
//!
//! Services own the in-memory state they orchestrate and are driven by a
//! single caller; nothing here is shared across threads.

pub mod dashboard;
