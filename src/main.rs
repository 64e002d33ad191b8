mod config;
mod display;
mod lookup;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::display::Zone;
use crate::lookup::{
    Coordinates, GeoLookup, HttpFetcher, IpAddress, IpLookup, LookupError, PassLookup, Pipeline,
};

#[derive(Parser)]
#[command(name = "iss-spotter")]
#[command(about = "Upcoming ISS passes over wherever your IP says you are")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Geolocation API key, overrides the config file
    #[arg(long, env = "ISS_SPOTTER_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// Print pass times in UTC instead of local time
    #[arg(long, global = true)]
    utc: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve IP, location and upcoming passes (default)
    Run,
    /// Print the public IP address
    Ip,
    /// Print the coordinates of an IP address (defaults to your own)
    Locate {
        #[arg(long, value_parser = parse_ip_arg)]
        ip: Option<IpAddress>,
    },
    /// Print upcoming passes for explicit coordinates
    Passes {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = match build_pipeline(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let zone = if cli.utc { Zone::Utc } else { Zone::Local };

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => pipeline.run().await.map(|passes| print_passes(&passes, zone)),
        Commands::Ip => pipeline.own_ip().await.map(|ip| println!("{}", ip)),
        Commands::Locate { ip } => pipeline.locate(ip).await.map(|c| println!("{}", c)),
        Commands::Passes { lat, lon } => pipeline
            .passes_for(Coordinates::new(lat, lon))
            .await
            .map(|passes| print_passes(&passes, zone)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn parse_ip_arg(s: &str) -> Result<IpAddress, String> {
    IpAddress::new(s).ok_or_else(|| "IP address must not be blank".to_string())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_config(cli: &Cli) -> Result<Config, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(key) = &cli.api_key {
        config.geo_api_key = key.clone();
    }
    if config.geo_api_key.is_empty() {
        log::warn!("No geolocation API key configured; the geolocation service will likely refuse the request");
    }
    Ok(config)
}

fn build_pipeline(config: &Config) -> Result<Pipeline<HttpFetcher>, String> {
    let endpoints = config.endpoints().map_err(|e| format!("Config error: {}", e))?;
    let fetcher =
        HttpFetcher::new(config.timeout).map_err(|e| format!("HTTP client error: {}", e))?;

    Ok(Pipeline::new(
        fetcher,
        IpLookup::new(endpoints.ip),
        GeoLookup::new(endpoints.geolocation, config.geo_api_key.clone()),
        PassLookup::new(endpoints.passes, config.pass_query()),
    ))
}

fn print_passes(passes: &[lookup::PassWindow], zone: Zone) {
    if passes.is_empty() {
        log::info!("No upcoming passes reported");
    }
    if let Err(e) = display::write_passes(&mut io::stdout().lock(), passes, zone) {
        log::error!("Failed to write passes: {}", e);
    }
}

fn report(err: &LookupError) {
    if let Err(e) = display::write_failure(&mut io::stdout().lock(), err) {
        log::error!("Failed to write diagnostic: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_accepts_explicit_ip() {
        let cli = Cli::try_parse_from(["iss-spotter", "locate", "--ip", " 8.8.8.8 "]).unwrap();
        match cli.command {
            Some(Commands::Locate { ip: Some(ip) }) => assert_eq!(ip.as_str(), "8.8.8.8"),
            _ => panic!("expected locate with an IP"),
        }
    }

    #[test]
    fn locate_rejects_blank_ip() {
        for blank in ["", "   "] {
            assert!(Cli::try_parse_from(["iss-spotter", "locate", "--ip", blank]).is_err());
        }
    }

    #[test]
    fn locate_without_ip_uses_own() {
        let cli = Cli::try_parse_from(["iss-spotter", "locate"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Locate { ip: None })));
    }

    #[test]
    fn passes_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["iss-spotter", "passes", "--lat", "-33.9", "--lon", "-70.6"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Passes { lat, lon }) if lat == -33.9 && lon == -70.6
        ));
    }
}
