use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config;
use crate::config::Config;

pub fn init(config: &Config) -> Result<()> {
    let log_level = config.log_level.clone().unwrap_or(tracing::Level::INFO.to_string());
    let log_file = match &config.log_file {
        Some(path) => PathBuf::from(path),
        None => config::data_dir()?.join(concat!(env!("CARGO_PKG_NAME"), ".log")),
    };
    let log_file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let env_filter = EnvFilter::try_new(&log_level)?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
