//! Minsit - a minimal sitemap feed generator.
//!
//! Reads operator settings from a TOML file and publishable content records
//! from a JSON export, then renders a sitemap.xml document to a file or
//! stdout.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod feed;
mod logger;
mod utils;
mod xml;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::Config;
use content::JsonContentSource;
use feed::FeedModel;
use std::{
    fs,
    io::{Write, stdout},
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;

    if !config.sitemap.enabled {
        log!("sitemap"; "disabled in {}, nothing to do", cli.config.display());
        return Ok(());
    }

    let source = JsonContentSource::new(&cli.content);
    let mut feed = FeedModel::new(&config.site.url);
    feed.load_urls(&source)?;
    feed.apply_settings(&config.sitemap);

    let url_count = feed.len();
    let document = feed.render();

    match &cli.output {
        Some(path) => {
            fs::write(path, &document)
                .with_context(|| format!("failed to write sitemap to {}", path.display()))?;
            log!("sitemap"; "{} URLs written to {}", url_count, path.display());
        }
        None => {
            let mut stdout = stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
