//! Weatherstack integration
//!
//! HTTP client for the Weatherstack wire shape, normally pointed at the
//! key-injecting proxy rather than at Weatherstack directly. Normalizes the
//! service's error envelopes into [`WeatherstackError`].

pub mod client;

pub use client::{WeatherstackClient, WeatherstackConfig, WeatherstackError};
