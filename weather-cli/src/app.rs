//! The interactive screen: draw, prompt, fetch, redraw.

use anyhow::{Context, Result};
use inquire::{InquireError, Text};
use std::io::Write;
use tracing::info;
use weather_core::{FetchTicket, WeatherFetcher, WeatherView};

use crate::render::render;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct App<'a, W: Write> {
    view: WeatherView,
    fetcher: &'a dyn WeatherFetcher,
    out: W,
    clear_screen: bool,
}

impl<'a, W: Write> App<'a, W> {
    /// Create the app in its Loading state; the returned ticket is the
    /// initial fetch for `default_city` and should be passed to [`App::perform`].
    pub fn new(
        fetcher: &'a dyn WeatherFetcher,
        default_city: &str,
        out: W,
    ) -> (Self, FetchTicket) {
        let (view, ticket) = WeatherView::start(default_city);
        let app = Self {
            view,
            fetcher,
            out,
            clear_screen: false,
        };
        (app, ticket)
    }

    pub fn clear_between_frames(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    /// Run the fetch for `ticket` and apply its outcome.
    pub async fn perform(&mut self, ticket: FetchTicket) -> Result<()> {
        self.draw()?;
        let outcome = self.fetcher.fetch(&ticket.city).await;
        if let Err(err) = &outcome {
            info!(city = %ticket.city, error = %err, "fetch failed");
        }
        if self.view.resolve(ticket.id, outcome) {
            self.draw()?;
        }
        Ok(())
    }

    /// Feed a line from the search field. Blank lines change nothing.
    pub async fn search(&mut self, text: String) -> Result<()> {
        self.view.set_search_text(text);
        match self.view.submit() {
            Some(ticket) => self.perform(ticket).await,
            None => Ok(()),
        }
    }

    pub fn draw(&mut self) -> Result<()> {
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out
            .write_all(render(self.view.state()).as_bytes())
            .context("Failed to draw screen")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Run the screen on stdout until the user cancels the prompt (Esc / Ctrl-C).
pub async fn run_interactive(fetcher: &dyn WeatherFetcher, default_city: &str) -> Result<()> {
    let (mut app, ticket) = App::new(fetcher, default_city, std::io::stdout());
    app = app.clear_between_frames(true);
    app.perform(ticket).await?;

    loop {
        app.view.focus_input();
        let answer = tokio::task::spawn_blocking(|| {
            Text::new("Search any city:")
                .with_help_message("Enter to search, Esc to quit")
                .prompt()
        })
        .await
        .context("Search prompt task failed")?;

        match answer {
            Ok(text) => app.search(text).await?,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use weather_core::{Background, FetchError, WeatherReading, error::StatusCode};

    /// Answers from a fixed table; unknown cities fail like a 404 would.
    #[derive(Debug, Default)]
    struct TableFetcher {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherFetcher for TableFetcher {
        async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
            self.calls.lock().expect("lock").push(city.to_string());
            match city {
                "Gazipur" => Ok(WeatherReading::new("Gazipur", "Clouds", 29)),
                "London" => Ok(WeatherReading::new("London", "Rain", 16)),
                _ => Err(FetchError::NotFound {
                    status: StatusCode::NOT_FOUND,
                }),
            }
        }
    }

    #[tokio::test]
    async fn initial_fetch_populates_screen() {
        let fetcher = TableFetcher::default();
        let (mut app, ticket) = App::new(&fetcher, "Gazipur", Vec::new());

        app.perform(ticket).await.expect("perform");

        let state = app.view().state();
        assert_eq!(state.city, "Gazipur");
        assert_eq!(state.background, Background::Clouds);
        assert!(!state.loading);
        let screen = String::from_utf8(app.out.clone()).expect("utf8");
        assert!(screen.contains("Loading..."));
        assert!(screen.contains("29°C"));
    }

    #[tokio::test]
    async fn search_fetches_trimmed_city() {
        let fetcher = TableFetcher::default();
        let (mut app, ticket) = App::new(&fetcher, "Gazipur", Vec::new());
        app.perform(ticket).await.expect("perform");

        app.search("  London  ".into()).await.expect("search");

        assert_eq!(app.view().state().city, "London");
        assert_eq!(app.view().state().temperature, 16);
        let calls = fetcher.calls.lock().expect("lock");
        assert_eq!(*calls, vec!["Gazipur", "London"]);
    }

    #[tokio::test]
    async fn blank_search_does_not_fetch() {
        let fetcher = TableFetcher::default();
        let (mut app, ticket) = App::new(&fetcher, "Gazipur", Vec::new());
        app.perform(ticket).await.expect("perform");
        let before = app.view().state().clone();

        app.search("   ".into()).await.expect("search");

        assert_eq!(fetcher.calls.lock().expect("lock").len(), 1);
        assert_eq!(app.view().state().city, before.city);
        assert_eq!(app.view().state().error, None);
    }

    #[tokio::test]
    async fn failed_search_keeps_reading_and_shows_error() {
        let fetcher = TableFetcher::default();
        let (mut app, ticket) = App::new(&fetcher, "Gazipur", Vec::new());
        app.perform(ticket).await.expect("perform");

        app.search("Zzqx".into())
            .await
            .expect("search never fails on fetch errors");

        let state = app.view().state();
        assert_eq!(state.city, "Gazipur");
        assert_eq!(
            state.error.as_deref(),
            Some("City not found. Please try again.")
        );
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn clear_screen_is_emitted_when_enabled() {
        let fetcher = TableFetcher::default();
        let (app, _) = App::new(&fetcher, "Gazipur", Vec::new());
        let mut app = app.clear_between_frames(true);

        app.draw().expect("draw");

        assert!(app.out.starts_with(CLEAR_SCREEN.as_bytes()));
    }
}
