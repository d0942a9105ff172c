use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{error::FetchError, model::WeatherReading};

use super::WeatherFetcher;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Current-weather fetcher backed by the OpenWeather `/data/2.5/weather` endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherFetcherBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenWeatherFetcherBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<OpenWeatherFetcher> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(OpenWeatherFetcher {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http: http.build().context("Failed to build HTTP client")?,
        })
    }
}

impl OpenWeatherFetcher {
    pub fn builder(api_key: String) -> OpenWeatherFetcherBuilder {
        OpenWeatherFetcherBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .unwrap_or_else(|| "Unknown".to_string());

        WeatherReading::new(parsed.name, condition, parsed.main.temp.round() as i32)
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
        debug!(%city, "requesting current weather from OpenWeather");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(%city, %status, "OpenWeather rejected the request");
            return Err(FetchError::NotFound { status });
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::Network(format!(
                "Failed to parse OpenWeather response: {e} (body: {})",
                truncate_body(&body)
            ))
        })?;

        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
