//! This example CLI tool validates the config of a simple uptime probe with
//! `field-parser`.
//!
//! The YAML file is read into an untyped [`serde_json::Value`] and then parsed
//! into the typed config. All problems of the file are reported at once.
//!
//! Run it with `--config demos/broken.yaml` to see every error of the broken
//! config. Set `RUST_LOG=debug` to see which records were rejected.

use std::{fs::File, path::PathBuf, time::Duration};

use clap::Parser;
use field_parser::{FieldParser, FieldParserExt, fields, json};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Check the config of an uptime probe and print it.
#[derive(Debug, Parser)]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = "./demos/config.yaml")]
    config: PathBuf,
}

#[derive(Debug)]
struct Host {
    url: Url,
    expected_status: StatusCode,
}

#[derive(Debug)]
struct Config {
    name: String,
    interval: Duration,
    retries: u8,
    hosts: Vec<Host>,
}

const DEFAULT_RETRIES: u8 = 3;

fn config_parser() -> impl FieldParser<Raw = Value, Output = Config> {
    let host = fields((
        json::string()
            .try_map(|url: String| url.parse::<Url>())
            .field("url")
            .mandatory(),
        json::unsigned()
            .try_map(u16::try_from)
            .try_map(StatusCode::from_u16)
            .field("expected_status")
            .mandatory(),
    ))
    .map_to(|url, expected_status| Host {
        url,
        expected_status,
    });

    let config = fields((
        json::string()
            .filter(|name: &String| !name.is_empty(), "must not be empty")
            .field("name")
            .mandatory(),
        json::string()
            .try_map(|interval: String| humantime::parse_duration(&interval))
            .field("interval")
            .mandatory(),
        json::unsigned().try_map(u8::try_from).field("retries"),
        json::list_of(json::object(host.nested()))
            .filter(|hosts: &Vec<Host>| !hosts.is_empty(), "must name at least one host")
            .field("hosts")
            .mandatory(),
    ))
    .map_to(|name, interval, retries: Option<u8>, hosts| Config {
        name,
        interval,
        retries: retries.unwrap_or(DEFAULT_RETRIES),
        hosts,
    });

    json::object(config.nested())
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let file = File::open(&cli.config)?;
    let raw_config = serde_yml::from_reader::<_, Value>(file)?;
    tracing::info!(config = %cli.config.display(), "read config");

    let config = config_parser().parse(&raw_config)?;

    println!("Config '{}' is valid", config.name);
    println!("  check every {}", humantime::format_duration(config.interval));
    println!("  retry {} times", config.retries);
    for host in &config.hosts {
        println!("  expect {} from {}", host.expected_status, host.url);
    }

    Ok(())
}
