//! Weather view controller.
//!
//! `WeatherView` owns the [`DisplayState`] and is the only thing that
//! changes it. Every transition builds a fresh state and swaps it in;
//! callers only ever see `&DisplayState`.
//!
//! Fetching is not done here. `start` and `submit` hand out a
//! [`FetchTicket`]; the caller runs the fetch and reports back through
//! `resolve`. Tickets are numbered, and only the most recently issued one
//! may update the state, so an older search finishing late cannot
//! overwrite a newer one.

use tracing::debug;

use crate::{background::Background, error::FetchError, model::WeatherReading};

pub const DEFAULT_CITY: &str = "Gazipur";

/// Everything the screen needs to draw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub city: String,
    pub condition: String,
    pub temperature: i32,
    pub search_text: String,
    pub loading: bool,
    pub error: Option<String>,
    pub background: Background,
    pub input_focused: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            condition: "Light Cloud".to_string(),
            temperature: 24,
            search_text: String::new(),
            loading: false,
            error: None,
            background: Background::Default,
            input_focused: false,
        }
    }
}

/// A fetch the caller must perform and later report via [`WeatherView::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct WeatherView {
    state: DisplayState,
    latest_request: u64,
}

impl WeatherView {
    /// Build the view in the Loading state with a fetch for `default_city` already issued.
    pub fn start(default_city: &str) -> (Self, FetchTicket) {
        let mut view = Self {
            state: DisplayState::default(),
            latest_request: 0,
        };
        let city = match default_city.trim() {
            "" => DEFAULT_CITY,
            city => city,
        };
        let ticket = view.issue(city.to_string());
        view.state = DisplayState {
            loading: true,
            ..view.state.clone()
        };
        (view, ticket)
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state = DisplayState {
            search_text: text.into(),
            input_focused: true,
            ..self.state.clone()
        };
    }

    pub fn focus_input(&mut self) {
        if !self.state.input_focused {
            self.state = DisplayState {
                input_focused: true,
                ..self.state.clone()
            };
        }
    }

    /// Start a search for the current search text.
    ///
    /// Blank text is ignored and leaves the state untouched.
    pub fn submit(&mut self) -> Option<FetchTicket> {
        let city = self.state.search_text.trim().to_string();
        if city.is_empty() {
            return None;
        }

        let ticket = self.issue(city);
        self.state = DisplayState {
            loading: true,
            error: None,
            search_text: String::new(),
            input_focused: false,
            ..self.state.clone()
        };
        Some(ticket)
    }

    /// Apply the outcome of the fetch identified by `request`.
    ///
    /// Returns `true` if the state changed. Outcomes for anything other
    /// than the latest ticket are dropped.
    pub fn resolve(&mut self, request: u64, outcome: Result<WeatherReading, FetchError>) -> bool {
        if request != self.latest_request || !self.state.loading {
            debug!(request, latest = self.latest_request, "dropping stale fetch result");
            return false;
        }

        self.state = match outcome {
            Ok(reading) => DisplayState {
                background: Background::for_condition(reading.condition()),
                city: reading.city().to_string(),
                condition: reading.condition().to_string(),
                temperature: reading.temperature(),
                loading: false,
                error: None,
                ..self.state.clone()
            },
            Err(err) => DisplayState {
                loading: false,
                error: Some(err.user_message()),
                ..self.state.clone()
            },
        };
        true
    }

    fn issue(&mut self, city: String) -> FetchTicket {
        self.latest_request += 1;
        debug!(request = self.latest_request, %city, "issuing fetch");
        FetchTicket {
            id: self.latest_request,
            city,
        }
    }
}
