//! Miscellaneous items related to [logging](log).
//!
//! Calls to the `log` macros are made throughout the encoder and solver to
//! help diagnose a particular grounding or search without reaching for a
//! debugger. No log implementation is provided by this crate; the binary
//! consuming it picks one (the CLI uses `env_logger`).

/// Targets to use within a [`log`] macro, so a consumer can filter by
/// subsystem (e.g. `RUST_LOG=satplan_core::encode=trace`).
pub mod targets {
    pub const PARSE: &str = "parse";
    pub const GROUND: &str = "ground";
    pub const ENCODE: &str = "encode";
    pub const SOLVE: &str = "solve";
    pub const BACKTRACK: &str = "backtrack";
    pub const PLAN: &str = "plan";
}
