//! `ics` CLI - generate downloadable calendar files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Render a property file (JSON) to an .ics file
//! ics generate -i event.json -o event.ics
//!
//! # Properties on stdin, document on stdout
//! cat event.json | ics generate
//!
//! # Dates without a zone token, read in the document timezone
//! ics generate -i event.json --timestamp-format 'Y-m-d H:i:s'
//!
//! # Resolve a relative "url" property against the serving host
//! ics generate -i event.json --scheme https --host https://localhost:8081
//!
//! # Earliest and latest entry of a JSON array of dates
//! echo '["1970-01-01 00:00:01 America/Caracas","1970-01-01 00:00:00 Europe/Paris"]' | ics bounds
//!
//! # Canonical base URL of a request
//! ics normalize-url --scheme https --host HTTPS://LocalHost:443/
//! ```

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use ics_core::{
    request_url, CalendarDocument, CalendarProperties, DstPolicy, RequestContext, TimestampSet,
    UidStrategy, DEFAULT_TIMESTAMP_FORMAT,
};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "ics", version, about = "Downloadable iCalendar (ICS) generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log generation details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON property file to an ICS document
    Generate {
        /// Input JSON properties (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Layout of the entries in "dates_list"
        #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
        timestamp_format: String,
        /// How event UIDs are derived
        #[arg(long, value_enum, default_value_t = UidArg::SeedIndex)]
        uid_strategy: UidArg,
        /// Fail on local times that fall in a DST gap instead of shifting them
        #[arg(long)]
        reject_dst_gaps: bool,
        /// Request scheme used to resolve a relative "url" property
        #[arg(long, requires = "host")]
        scheme: Option<String>,
        /// Request host (optionally with scheme and port)
        #[arg(long, requires = "scheme")]
        host: Option<String>,
    },
    /// Print the earliest and latest entry of a JSON array of dates
    Bounds {
        /// Input JSON array of date strings (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Layout of the entries
        #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
        timestamp_format: String,
        /// Zone for layouts without a zone token
        #[arg(long, default_value = "UTC")]
        default_zone: String,
    },
    /// Print the canonical base URL for a request scheme and host
    NormalizeUrl {
        #[arg(long)]
        scheme: String,
        #[arg(long)]
        host: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UidArg {
    /// MD5 of the uuid seed and the entry position
    SeedIndex,
    /// MD5 of the raw date string
    ContentHash,
}

impl From<UidArg> for UidStrategy {
    fn from(arg: UidArg) -> Self {
        match arg {
            UidArg::SeedIndex => UidStrategy::SeedIndex,
            UidArg::ContentHash => UidStrategy::ContentHash,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            timestamp_format,
            uid_strategy,
            reject_dst_gaps,
            scheme,
            host,
        } => {
            let json = read_input(input.as_deref())?;
            let properties: CalendarProperties =
                serde_json::from_str(&json).context("Failed to parse calendar properties")?;

            let dst_policy = if reject_dst_gaps {
                DstPolicy::Reject
            } else {
                DstPolicy::ShiftForward
            };
            let mut document = CalendarDocument::new(properties)
                .with_timestamp_format(timestamp_format)
                .with_uid_strategy(uid_strategy.into())
                .with_dst_policy(dst_policy);
            if let (Some(scheme), Some(host)) = (scheme, host) {
                document = document.with_request(RequestContext::new(scheme, host));
            }

            let ics = document
                .generate()
                .context("Failed to generate calendar")?;
            write_output(output.as_deref(), &ics)?;
        }
        Commands::Bounds {
            input,
            timestamp_format,
            default_zone,
        } => {
            let json = read_input(input.as_deref())?;
            let dates: Vec<String> =
                serde_json::from_str(&json).context("Expected a JSON array of date strings")?;
            let zone: Tz = default_zone
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", default_zone))?;

            let set = TimestampSet::new()
                .with_timestamp_format(timestamp_format)
                .with_default_zone(zone);
            let (min, max) = set
                .min_max(&dates)
                .context("Failed to compute timestamp bounds")?;
            println!("min: {} {}", min.to_ics_local(), min.tzid());
            println!("max: {} {}", max.to_ics_local(), max.tzid());
        }
        Commands::NormalizeUrl { scheme, host } => {
            let base = request_url::normalize(&scheme, &host)
                .with_context(|| format!("Failed to normalize '{}'", host))?;
            println!("{}", base);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays the document.
fn init_tracing(verbose: bool) {
    let default = if verbose { "ics_core=debug,ics=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
            tracing::debug!(path, bytes = content.len(), "wrote calendar");
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
