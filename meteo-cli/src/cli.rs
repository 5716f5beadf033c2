use clap::Parser;
use inquire::{InquireError, Text};

use meteo_core::{EnvLocator, OpenMeteoClient, WeatherApp};

use crate::output::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Open-Meteo weather lookup")]
pub struct Cli {
    /// Place name or literal "lat, lon" coordinates. Omit for an
    /// interactive session.
    pub query: Option<String>,

    /// Look up the device's current location (reads the METEO_LOCATION
    /// environment variable, "lat, lon").
    #[arg(long, conflicts_with = "query")]
    pub here: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = OpenMeteoClient::new();
        let locator = Box::new(EnvLocator::default());
        let mut app = WeatherApp::new(client, locator, TerminalView::new());

        if self.here {
            app.use_device_location().await;
            return Ok(());
        }

        if let Some(query) = self.query {
            app.handle_search(&query).await;
            return Ok(());
        }

        // Interactive session: the widget's search box and "my location"
        // button, as a prompt loop. Starts on the default location.
        app.load_default().await;

        loop {
            let prompt = Text::new("Ubicación:")
                .with_help_message("ciudad, \"lat, lon\" o \"aquí\" — Esc para salir")
                .prompt();

            match prompt {
                Ok(input) => {
                    if matches!(input.trim(), "aquí" | "aqui") {
                        app.use_device_location().await;
                    } else {
                        // Empty input is a no-op inside handle_search.
                        app.handle_search(&input).await;
                    }
                }
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }
}
