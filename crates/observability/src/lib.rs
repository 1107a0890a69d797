//! `photomart-observability` — shared tracing/logging setup.
//!
//! The runtime crates emit `tracing` events (session transitions at `info`,
//! guard decisions at `debug`, degraded collaborators at `warn`/`error`);
//! the host application calls [`init`] once at startup to make them visible.

pub mod tracing;

pub use self::tracing::{init, init_with};
