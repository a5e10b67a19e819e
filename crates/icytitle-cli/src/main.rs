//! icy-title — print the current StreamTitle of an internet radio stream
//!
//! Prints exactly one line on stdout: the title, or an empty line when the
//! stream has none or cannot be reached. Diagnostics go to stderr. The only
//! non-zero exit is a missing URL.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use icytitle::config::network::DEFAULT_TIMEOUT_SECS;
use icytitle::stream::StreamMetadata;

#[derive(Parser)]
#[command(
    name = "icy-title",
    about = "Print the current StreamTitle of an Icecast/Shoutcast stream",
    version
)]
struct Cli {
    /// Stream URL to query
    url: Option<String>,

    /// Give up after this many seconds (connect and read)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Part of the title to print
    #[arg(short, long, value_enum, default_value_t = Field::Raw)]
    field: Field,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Field {
    /// The StreamTitle as sent
    Raw,
    /// Text before the first " - "
    Artist,
    /// Text after the first " - ", or the whole title
    Song,
}

impl Field {
    fn select(self, title: &str) -> String {
        match self {
            Field::Raw => title.to_string(),
            Field::Artist => StreamMetadata::from_icy_title(title)
                .artist
                .unwrap_or_default(),
            Field::Song => StreamMetadata::from_icy_title(title)
                .title
                .unwrap_or_default(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(url) = cli.url else {
        eprintln!("Usage: icy-title <STREAM_URL>");
        std::process::exit(1);
    };

    let title = icytitle::fetch_title(&url, Duration::from_secs(cli.timeout));
    let line = title.map(|t| cli.field.select(&t)).unwrap_or_default();

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}").and_then(|_| stdout.flush()) {
        tracing::debug!("Could not write title: {e}");
    }
}

/// Diagnostic sink for the whole process: stderr, filtered by `RUST_LOG`
/// or the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "icytitle=debug,icy_title=debug,warn",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
