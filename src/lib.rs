//! Purpose: Library crate backing the `jsonshape` CLI and its tests.
//! Exports: `args`, `core`, `dispatch`, `json`, `logging`, `pipeline`, `process`.
//! Role: Holds all behavior so the binary stays a thin process wrapper.
//! Invariants: No module exits the process; exit codes are returned by `dispatch`.
//! Invariants: Modules prefer explicit inputs/outputs (writers, clocks) over hidden state.
pub mod args;
pub mod core;
pub mod dispatch;
pub mod json;
pub mod logging;
pub mod pipeline;
pub mod process;
