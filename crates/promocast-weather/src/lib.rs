//! HTTP clients for the external weather collaborators: geocoding,
//! historical climate archive, and short-term hourly forecast.
//!
//! All three speak the Open-Meteo API family. The client takes explicit
//! base URLs so tests can point it at a wiremock server.

mod client;
mod error;
mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::{Coordinates, DailySeries, HourlyForecast};
