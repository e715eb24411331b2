//! Weatherdeck HTTP presentation layer
//!
//! The key-injecting weather proxy. Forwards `/api/weather` requests to
//! Weatherstack with the server-side access key attached, so the key never
//! reaches the dashboard.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
