use std::{fmt, sync::Arc};

use anyhow::Result;
use clap::{Parser, Subcommand};
use cityweather_core::{
    CardView, ChannelNavigator, CityId, Config, Route, WeatherPage, model::join_ids,
    provider_from_config,
};
use inquire::{InquireError, Select, Text};

use crate::{render, search};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather around the world")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the list of cities.
    Configure,

    /// Show the weather page.
    Show {
        /// Use this API key instead of the configured one.
        #[arg(long)]
        api_key: Option<String>,

        /// Print the page once and exit instead of offering a menu.
        #[arg(long)]
        once: bool,
    },

    /// Look up the current weather for one city.
    Search {
        /// City name, optionally with a country code ("Lisbon,PT").
        city: String,

        /// Use this API key instead of the configured one.
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    Globe,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 3] = [MenuItem::Search, MenuItem::Globe, MenuItem::Quit];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search for a city",
            MenuItem::Globe => "Globe",
            MenuItem::Quit => "Quit",
        })
    }
}

fn load_config(api_key: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(key) = api_key {
        config.set_api_key(key);
    }
    Ok(config)
}

fn parse_city_ids(input: &str) -> Result<Vec<CityId>> {
    input
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { api_key, once } => show(load_config(api_key)?, once).await,
            Command::Search { city, api_key } => {
                let loader = load_config(api_key)?.loader_config()?;
                let provider = provider_from_config(&loader);
                let snapshot = search::lookup(provider.as_ref(), &city).await?;
                println!("{}", render::card(&CardView::from(&snapshot)));
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Text::new("OpenWeather API key:");
    if config.api_key.is_some() {
        key_prompt = key_prompt.with_help_message("leave empty to keep the current key");
    }
    config.set_api_key(key_prompt.prompt()?);

    let current_ids = join_ids(&config.city_ids);
    let ids = Text::new("City ids (comma separated):")
        .with_default(&current_ids)
        .prompt()?;
    config.city_ids = parse_city_ids(&ids)?;

    // Validate before writing so a broken file is never saved.
    config.loader_config()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(config: Config, once: bool) -> Result<()> {
    let loader = config.loader_config()?;
    let provider = provider_from_config(&loader);
    let (navigator, mut routes) = ChannelNavigator::channel();

    let mut page = WeatherPage::mount(provider.clone(), loader, Arc::new(navigator));

    println!("{}", render::page(&page.render()));
    if page.changed().await {
        println!("\n{}", render::page(&page.render()));
    }
    page.settled().await;

    if once {
        return Ok(());
    }

    loop {
        let choice = match Select::new("What next?", MenuItem::ALL.to_vec()).prompt() {
            Ok(choice) => choice,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e.into()),
        };

        match choice {
            MenuItem::Search => page.press_search(),
            MenuItem::Globe => page.press_globe(),
            MenuItem::Quit => break,
        }

        while let Ok(route) = routes.try_recv() {
            match route {
                Route::Search => match search::prompt(provider.as_ref()).await {
                    Err(e) if e.downcast_ref::<InquireError>().is_some_and(is_cancel) => {}
                    other => other?,
                },
                Route::Weather => println!("{}", render::page(&page.render())),
            }
        }
    }

    page.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_ids_parse_from_comma_list() {
        let ids = parse_city_ids("3451190, 5128581,,1850147").unwrap();
        assert_eq!(ids, vec![CityId(3451190), CityId(5128581), CityId(1850147)]);
    }

    #[test]
    fn city_ids_reject_names() {
        assert!(parse_city_ids("3451190,Lisbon").is_err());
    }

    #[test]
    fn show_parses_flags() {
        let cli = Cli::try_parse_from(["cityweather", "show", "--once", "--api-key", "K"]).unwrap();
        match cli.command {
            Command::Show { api_key, once } => {
                assert_eq!(api_key.as_deref(), Some("K"));
                assert!(once);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_takes_a_city() {
        let cli = Cli::try_parse_from(["cityweather", "search", "Lisbon,PT"]).unwrap();
        assert!(matches!(cli.command, Command::Search { ref city, .. } if city == "Lisbon,PT"));
    }
}
