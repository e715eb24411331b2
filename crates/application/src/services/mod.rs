//! Application services

pub mod display;
pub mod location_service;
pub mod synthesizer;
pub mod weather_service;
