// ABOUTME: Entry point for the imgstash CLI application.
// ABOUTME: Parses arguments and dispatches to digest and cache handlers.

mod cli;

use clap::Parser;
use cli::{CacheCommands, Cli, Commands};
use imgstash::cache::{ImageCache, cache_identifier};
use imgstash::config::Config;
use imgstash::digest::{
    default_sources_with, digest_by_local_daemon_with_timeout, digest_by_retrieve_with,
};
use imgstash::error::{Error, Result};
use imgstash::runtime::BollardRuntime;
use imgstash::types::ImageRef;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::discover_or_default(&cwd)?;

    match cli.command {
        Commands::Digest { image, local_only } => digest(&config, &image, local_only).await,
        Commands::Cache { command } => {
            let cache = ImageCache::new(config.cache_dir()?);
            match command {
                CacheCommands::Delete { images } => {
                    cache.delete(&images)?;
                    println!("Deleted {} image(s) from {}", images.len(), cache.root().display());
                    Ok(())
                }
                CacheCommands::List => {
                    for identifier in cache.list()? {
                        println!("{identifier}");
                    }
                    Ok(())
                }
                CacheCommands::Path { image } => {
                    let image = ImageRef::parse(&image)?;
                    println!("{}", cache.path_for(&cache_identifier(&image)).display());
                    Ok(())
                }
            }
        }
    }
}

/// Print the local runtime ID if the runtime has the image, else the
/// retrieved config digest.
async fn digest(config: &Config, image: &str, local_only: bool) -> Result<()> {
    match BollardRuntime::connect_local(Some(&config.runtime)) {
        Ok(runtime) => {
            tracing::debug!(runtime = %runtime.runtime_type(), image, "asking local runtime");
            if let Some(id) =
                digest_by_local_daemon_with_timeout(&runtime, image, config.lookup_timeout).await
            {
                println!("{id}");
                return Ok(());
            }
        }
        Err(e) => tracing::debug!(error = %e, "no local runtime"),
    }

    if local_only {
        return Err(Error::DigestNotFound(image.to_string()));
    }

    let sources = default_sources_with(Some(&config.runtime), config.keychain());
    match digest_by_retrieve_with(&sources, image).await {
        Some(hex) => {
            println!("{hex}");
            Ok(())
        }
        None => Err(Error::DigestNotFound(image.to_string())),
    }
}
