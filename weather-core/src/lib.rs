//! Core library for the `weather` display.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather fetcher seam and its providers
//! - The condition-to-background mapping
//! - The view state machine driving the screen
//!
//! It is used by `weather-cli`, but holds no terminal code of its own.

pub mod background;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod view;

pub use background::Background;
pub use config::{Config, ProviderConfig};
pub use error::FetchError;
pub use model::WeatherReading;
pub use provider::{ProviderId, WeatherFetcher};
pub use view::{DisplayState, FetchTicket, WeatherView};
