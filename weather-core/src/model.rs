use serde::{Deserialize, Serialize};

/// Current weather for a city, as produced by a [`crate::WeatherFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    city: String,
    condition: String,
    temperature: i32,
}

impl WeatherReading {
    pub fn new(city: impl Into<String>, condition: impl Into<String>, temperature: i32) -> Self {
        Self {
            city: city.into(),
            condition: condition.into(),
            temperature,
        }
    }

    /// City name as resolved by the provider.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Provider condition label, e.g. "Rain".
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// Temperature in whole degrees Celsius.
    pub fn temperature(&self) -> i32 {
        self.temperature
    }
}
