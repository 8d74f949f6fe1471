//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, tests and
//! benches can use `blockfall::{core, engine, input, store, term, types}`.
//! Binary-only concerns (environment config, file logging) live here too.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_store as store;
pub use blockfall_term as term;
pub use blockfall_types as types;
