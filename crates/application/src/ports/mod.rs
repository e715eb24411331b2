//! Ports (interfaces) implemented by infrastructure adapters

pub mod location_state;
pub mod weather_port;

pub use location_state::{LocationStatePort, PersistedLocationState, PersistenceError};
pub use weather_port::{UpstreamError, WeatherEndpoint, WeatherPort};

#[cfg(test)]
pub use location_state::MockLocationStatePort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
