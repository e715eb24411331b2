//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod weather_gateway;

pub use weather_gateway::WeatherGateway;
