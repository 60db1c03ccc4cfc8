use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use widget_core::{
    Config, FetchOutcome, FileCityStore, PopupState, SourceId, UiEvent, Widget,
    provider::{default_source_from_config, source_from_config},
};

use crate::page::{PageUi, write_page};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials and endpoint for a weather source.
    Configure {
        /// Source short name, "proxy" or "weatherstack".
        source: String,
    },

    /// Render the widget for the remembered (or default) city.
    Show {
        #[command(flatten)]
        target: Target,
    },

    /// Search a city through the popup and remember it.
    Search {
        /// City name.
        city: String,

        #[command(flatten)]
        target: Target,
    },

    /// Prompt for cities until cancelled, re-rendering after each search.
    Interactive {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Debug, Args)]
pub struct Target {
    /// Weather source to use instead of the configured default.
    #[arg(long)]
    source: Option<String>,

    /// Write the page here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Target {
    fn build_widget(&self, config: &Config) -> anyhow::Result<Widget<PageUi>> {
        let source = match self.source.as_deref() {
            Some(name) => source_from_config(SourceId::try_from(name)?, config)?,
            None => default_source_from_config(config)?,
        };
        let store = FileCityStore::default_location()?;
        tracing::debug!("Remembered city lives in {}", store.path().display());

        Ok(Widget::new(source, Box::new(store), PageUi::default(), config.default_city()))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure { source } => configure(config, &source)?,
            Command::Show { target } => {
                let mut widget = target.build_widget(&config)?;
                let outcome = widget.start().await;
                report(&widget, outcome);
                write_page(widget.ui(), target.out.as_deref())?;
            }
            Command::Search { city, target } => {
                let mut widget = target.build_widget(&config)?;
                widget.start().await;
                let outcome = search(&mut widget, city).await;
                report(&widget, outcome);
                write_page(widget.ui(), target.out.as_deref())?;
            }
            Command::Interactive { target } => {
                let mut widget = target.build_widget(&config)?;
                let outcome = widget.start().await;
                report(&widget, outcome);
                if target.out.is_some() {
                    write_page(widget.ui(), target.out.as_deref())?;
                }
                interactive(&mut widget, target.out.as_deref()).await?;
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config, source: &str) -> anyhow::Result<()> {
    let id = SourceId::try_from(source)?;
    println!("Configuring source: {id}");

    if id.requires_api_key() {
        let key = Password::new("Access key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read access key")?;
        config.upsert_source_api_key(id, key.trim().to_string());
    }

    let base_url = Text::new("Base URL (leave empty for the public endpoint):")
        .prompt()
        .context("Failed to read base URL")?;
    if !base_url.trim().is_empty() {
        config.set_source_base_url(id, base_url.trim().to_string());
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string());

    config.set_default_source(id);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Click the label, type, submit: the same path a user takes in the page.
async fn search(widget: &mut Widget<PageUi>, city: String) -> Option<FetchOutcome> {
    if !widget.ui().has_fragment() {
        // Startup failed; show the empty widget so its label can be clicked.
        widget.render();
    }
    if widget.popup_state() == PopupState::Closed {
        widget.handle(UiEvent::CityLabelClicked).await;
    }
    widget.handle(UiEvent::InputChanged(city)).await;
    widget.handle(UiEvent::FormSubmitted).await
}

async fn interactive(
    widget: &mut Widget<PageUi>,
    out: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    loop {
        let city = match Text::new("City:").with_help_message("Esc to quit").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        match search(widget, city).await {
            Some(outcome) => {
                report(widget, outcome);
                if out.is_some() {
                    write_page(widget.ui(), out)?;
                }
            }
            None => println!("Type a city name to search."),
        }
    }

    Ok(())
}

fn report(widget: &Widget<PageUi>, outcome: impl Into<Option<FetchOutcome>>) {
    match outcome.into() {
        Some(FetchOutcome::Applied) => {
            let state = widget.state();
            eprintln!(
                "{}: {}°, {} (as of {})",
                state.city.as_deref().unwrap_or_default(),
                state.temperature,
                state.current_description().unwrap_or("no description"),
                state.observation_time,
            );
        }
        Some(FetchOutcome::Failed) => {
            if let Some(notice) = widget.ui().notice() {
                eprintln!("{notice}");
            }
        }
        Some(FetchOutcome::Stale) | None => {}
    }
}
