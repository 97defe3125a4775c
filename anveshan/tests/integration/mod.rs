//! Integration tests for the exploration engine.
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! RUST_LOG=anveshan=debug cargo test --test integration seeded_run
//! ```

mod common;
mod config;
mod exploration;
mod properties;
mod scenarios;
