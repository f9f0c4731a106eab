//! tabouret CLI
//!
//! Inspects an application's routes: lists them, resolves request URIs
//! and generates URLs.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use tabouret::{App, Params, Request};

/// Route inspection for tabouret applications.
#[derive(Parser)]
#[command(name = "tabouret")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Application config file.
    #[arg(short, long, env = "TABOURET_CONFIG", default_value = "app/config/app.json")]
    config: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order.
    Routes,

    /// Resolve a request URI to its route.
    Match {
        /// Request URI, e.g. `/posts/hello?page=2`.
        uri: String,

        /// Path of the front script.
        #[arg(long, default_value = "/index.php")]
        script_name: String,

        /// Print the match as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate the URL of a named route.
    Url {
        /// Route name.
        name: String,

        /// Parameters as `key=value`.
        #[arg(value_parser = parse_key_val)]
        params: Vec<(String, String)>,

        /// Include scheme and host.
        #[arg(long)]
        absolute: bool,

        /// Use https for absolute URLs.
        #[arg(long)]
        https: bool,

        /// Host for absolute URLs.
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Path of the front script.
        #[arg(long, default_value = "/index.php")]
        script_name: String,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = App::from_file(&cli.config)?;
    debug!(routes = app.routes().len(), "application loaded");

    match cli.command {
        Commands::Routes => {
            let width = app.routes().iter().map(|r| r.name().len()).max().unwrap_or(0);
            for route in app.routes() {
                let reversible = if route.template().is_ok() { "" } else { "  (not reversible)" };
                println!(
                    "{:width$}  {}  {}{reversible}",
                    route.name(),
                    route.pattern(),
                    route.target(),
                );
            }
        }

        Commands::Match {
            uri,
            script_name,
            json,
        } => {
            let request = Request::new(uri).script_name(script_name);
            let urn = request.urn();
            let Some(matched) = app.routes().match_urn(&urn) else {
                bail!("no route matched {urn:?}");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&matched)?);
            } else {
                println!("{} -> {}", matched.name, matched.target);
                for (key, value) in matched.params.iter() {
                    println!("  {key} = {value}");
                }
            }
        }

        Commands::Url {
            name,
            params,
            absolute,
            https,
            host,
            script_name,
        } => {
            let request = Request::new("/")
                .script_name(script_name)
                .host(host)
                .https(https);
            let params: Params = params.into_iter().collect();
            println!("{}", app.url(&request, &name, &params, absolute, https)?);
        }
    }

    Ok(())
}
