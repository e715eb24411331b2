//! Weatherdeck CLI library
//!
//! The dashboard renderer lives here so it can be unit tested; the binary
//! in `main.rs` handles argument parsing and wiring.

pub mod render;
