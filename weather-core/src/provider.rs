use crate::{
    Config, FetchError, WeatherReading,
    provider::{openweather::OpenWeatherFetcher, simulated::SimulatedFetcher},
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;
pub mod simulated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    Simulated,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::Simulated => "simulated",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::Simulated]
    }

    pub fn needs_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "simulated" => Ok(ProviderId::Simulated),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, simulated."
            )),
        }
    }
}

/// Turns a city name into a [`WeatherReading`] with a single request.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError>;
}

/// Construct a fetcher from config and explicit ProviderId.
pub fn fetcher_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let boxed: Box<dyn WeatherFetcher> = match id {
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `weather configure {id}` and enter your API key."
                )
            })?;

            let mut fetcher = OpenWeatherFetcher::builder(api_key.to_owned());
            if let Some(settings) = config.provider_config(id) {
                if let Some(url) = &settings.base_url {
                    fetcher = fetcher.base_url(url.clone());
                }
                if let Some(secs) = settings.timeout_secs {
                    fetcher = fetcher.timeout(Duration::from_secs(secs));
                }
            }
            Box::new(fetcher.build()?)
        }
        ProviderId::Simulated => {
            let delay = config
                .simulated_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(simulated::DEFAULT_DELAY);
            Box::new(SimulatedFetcher::new(delay))
        }
    };

    Ok(boxed)
}

/// Construct the default fetcher from config, using `default_provider` field.
pub fn default_fetcher_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherFetcher>> {
    let id = config.default_provider_id()?;
    fetcher_from_config(id, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn provider_id_is_case_insensitive() {
        assert_eq!(
            ProviderId::try_from("OpenWeather").expect("parse"),
            ProviderId::OpenWeather
        );
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn fetcher_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = fetcher_from_config(ProviderId::OpenWeather, &cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn simulated_fetcher_needs_no_config() {
        let cfg = Config::default();
        assert!(fetcher_from_config(ProviderId::Simulated, &cfg).is_ok());
    }

    #[test]
    fn default_fetcher_from_config_errors_when_not_set() {
        let cfg = Config::default();
        let err = default_fetcher_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No default provider configured"));
        assert!(msg.contains("Hint: run `weather configure"));
    }

    #[test]
    fn default_fetcher_from_config_works_when_set_and_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "KEY".to_string());

        assert!(default_fetcher_from_config(&cfg).is_ok());
    }

    #[test]
    fn env_key_alone_builds_openweather_fetcher() {
        let mut cfg = Config::default();
        cfg.apply_overrides(|_| Some("ENV_KEY".to_string()));

        assert!(default_fetcher_from_config(&cfg).is_ok());
        assert!(fetcher_from_config(ProviderId::OpenWeather, &cfg).is_ok());
    }
}
