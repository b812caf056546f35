use clap::{CommandFactory, FromArgMatches, ValueHint};

mod action;
mod api;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod errors;
mod logging;
mod models;
mod tui;
mod utils;
mod widgets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    errors::init()?;

    // Enhance the help message for the config argument
    let help = match config::default_config_path() {
        Ok(path) => format!("Path to config file (default: {})", path.display()),
        Err(_) => "Path to config file".to_string(),
    };
    let cmd = cli::Args::command()
        .mut_arg("config", |a| a.help(help).value_hint(ValueHint::FilePath).next_line_help(true));
    let args = cli::Args::from_arg_matches(&cmd.get_matches())?;

    let config = config::Config::new(args.config)?;
    logging::init(&config)?;

    let api = api::Api::new(&config)?;
    let mut app = app::App::new(config, api, args.tick_rate, args.frame_rate)?;
    app.run().await?;

    Ok(())
}
