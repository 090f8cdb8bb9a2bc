//! FFI entry crate for the planner UI shell.
//!
//! Only `api` is exposed; storage and board rules live in
//! `cafe_planner_core`.

pub mod api;
