//! Offline fetcher that invents a reading after a short pause.
//!
//! Handy for demos and for running the screen without an API key.

use async_trait::async_trait;
use rand::{Rng, seq::SliceRandom};
use std::{ops::RangeInclusive, time::Duration};
use tracing::debug;

use crate::{error::FetchError, model::WeatherReading};

use super::WeatherFetcher;

pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

pub const CONDITIONS: &[&str] = &[
    "Light Cloud",
    "Sunny",
    "Heavy Rain",
    "Thunderstorm",
    "Partly Cloudy",
    "Clear",
    "Foggy",
];

pub const TEMPERATURE_RANGE: RangeInclusive<i32> = 5..=39;

#[derive(Debug, Clone)]
pub struct SimulatedFetcher {
    delay: Duration,
}

impl SimulatedFetcher {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl WeatherFetcher for SimulatedFetcher {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
        tokio::time::sleep(self.delay).await;

        let (condition, temperature) = {
            let mut rng = rand::thread_rng();
            let condition = CONDITIONS.choose(&mut rng).copied().unwrap_or("Clear");
            (condition, rng.gen_range(TEMPERATURE_RANGE))
        };

        debug!(%city, condition, temperature, "simulated reading");
        Ok(WeatherReading::new(city, condition, temperature))
    }
}
