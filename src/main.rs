//! certring - A rotating certificate carousel for the terminal.
//!
//! Usage:
//!   cring [FILE]             Launch interactive carousel
//!   cring list [FILE]        Print the ring around a focus position
//!   cring check FILE         Validate a certificate file
//!   cring --help             Show help

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use certring_core::{
    BuiltinSource, Carousel, CarouselConfig, CarouselConfigBuilder, ConfigError, ContentSource,
    FileSource, Role, load_certificates,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CERTRING_LOG";

#[derive(Parser)]
#[command(
    name = "certring",
    version,
    about = "A rotating certificate carousel for the terminal",
    long_about = "certring shows a ring of certificates as a front card with one \
                  neighbor on each side, advancing on a timer.\n\n\
                  Launch the interactive carousel by running `cring [FILE]`, or use \
                  subcommands to inspect a certificate file."
)]
struct Cli {
    /// Certificate file (.json or .toml). Built-in certificates when omitted
    file: Option<PathBuf>,

    /// Autoplay interval in milliseconds
    #[arg(short, long, value_name = "MS")]
    interval: Option<u64>,

    /// Start with autoplay paused
    #[arg(long)]
    no_autoplay: bool,

    /// Use the light theme
    #[arg(long)]
    light: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print every position with its offset and role
    List {
        /// Certificate file (.json or .toml)
        file: Option<PathBuf>,

        /// Focus position (wraps around the ring)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        focus: i64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate a certificate file
    Check {
        /// Certificate file (.json or .toml)
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::List {
            file,
            focus,
            format,
        }) => {
            init_logging(LogTarget::Stderr);
            run_list(file.as_deref(), focus, format)?;
        }
        Some(Command::Check { file }) => {
            init_logging(LogTarget::Stderr);
            run_check(&file)?;
        }
        None => {
            // The terminal belongs to the TUI, log to a file instead
            init_logging(LogTarget::File);

            let mut config = certring_tui::TuiConfig::new().with_light_theme(cli.light);
            if let Some(file) = cli.file {
                config = config.with_content(file);
            }
            if let Some(interval) = cli.interval {
                config = config.with_autoplay_period_ms(interval);
            }
            if cli.no_autoplay {
                config = config.with_autoplay(false);
            }
            certring_tui::run_with_config(config)?;
        }
    }

    Ok(())
}

enum LogTarget {
    Stderr,
    File,
}

/// Install the tracing subscriber. Defaults to warnings only.
fn init_logging(target: LogTarget) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        LogTarget::File => {
            let Some(file) = log_file_path().and_then(|path| {
                std::fs::create_dir_all(path.parent()?).ok()?;
                OpenOptions::new().create(true).append(true).open(path).ok()
            }) else {
                return;
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
    }
}

fn log_file_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("certring").join("certring.log"))
}

fn source_for(file: Option<&Path>) -> Result<Box<dyn ContentSource>> {
    Ok(match file {
        Some(path) => Box::new(FileSource::new(path)?),
        None => Box::new(BuiltinSource),
    })
}

/// Print the ring as seen from `focus`.
fn run_list(file: Option<&Path>, focus: i64, format: OutputFormat) -> Result<()> {
    let source = source_for(file)?;
    let certificates = load_certificates(source.as_ref(), &CarouselConfig::default())
        .with_context(|| format!("Failed to load {}", source.describe()))?;

    let mut carousel = Carousel::with_items(certificates);
    carousel.jump_to(focus);
    let slots = carousel.slots();

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" {} - {} certificate(s)", source.describe(), carousel.len());
            println!("{}", "─".repeat(70));
            println!();

            if slots.is_empty() {
                println!(" No certificates.");
            }
            for slot in &slots {
                let cert = &carousel.items()[slot.position];
                let marker = if slot.role == Role::Front { "▶" } else { " " };
                println!(
                    " {} {:>3}  {:>+4}  {:<14} {}",
                    marker,
                    slot.position + 1,
                    slot.offset,
                    slot.role.as_ref(),
                    cert.title
                );
            }
            println!();
        }
        OutputFormat::Json => {
            let entries: Vec<_> = slots
                .iter()
                .map(|slot| {
                    serde_json::json!({
                        "position": slot.position,
                        "offset": slot.offset,
                        "role": slot.role,
                        "visible": slot.role.is_visible(),
                        "certificate": carousel.items()[slot.position],
                    })
                })
                .collect();
            let report = serde_json::json!({
                "source": source.describe(),
                "focus": carousel.focus_index(),
                "slots": entries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Validate a certificate file without falling back to the built-in list.
fn run_check(file: &Path) -> Result<()> {
    let source = FileSource::new(file)?;
    let config = CarouselConfigBuilder::default()
        .fallback_to_builtin(false)
        .build()
        .map_err(ConfigError::from)?;

    let certificates = load_certificates(&source, &config)
        .with_context(|| format!("{} is not a valid certificate file", file.display()))?;

    println!(
        "{}: {} certificate(s) OK",
        file.display(),
        certificates.len()
    );
    for cert in &certificates {
        println!("   {:<12} {}", cert.id.as_str(), cert.title);
    }

    Ok(())
}
