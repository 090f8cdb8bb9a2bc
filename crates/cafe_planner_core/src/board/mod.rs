//! Order-board rules: lane partitioning, stale-ticket hiding, drag-and-drop,
//! history archive and dashboard statistics.
//!
//! # Invariants
//! - Every rule here is pure: inputs in, values out, no storage access.
//! - "Today" always means the UTC+8 reference day (see `crate::time`).

pub mod drag;
pub mod history;
pub mod lanes;
pub mod stats;
pub mod visibility;
