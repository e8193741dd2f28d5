use std::io::{self, BufWriter, Read, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use lrc2srt::{converter, parser, serialiser};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_logging();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr, stdout may be carrying the subtitles.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lrc2srt=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[derive(ClapParser)]
#[command(about = "Convert LRC lyric timings to SRT subtitles")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to read from. If not supplied, the lyrics will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the subtitles will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "MS",
        help = "How long the last line stays on screen, in milliseconds.",
        default_value_t = 3000
    )]
    trailing_ms: u64,
    #[arg(long, help = "Fail instead of warning when a timestamp goes backwards.")]
    strict: bool,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Write a backup of the original input to the specified file."
    )]
    backup: Option<String>,
}

impl Cli {
    fn convert_opts(&self) -> converter::ConvertOpts {
        converter::ConvertOpts {
            trailing: Duration::from_millis(self.trailing_ms),
            strict: self.strict,
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    if let Some(backup_path) = &cli.backup {
        std::fs::write(backup_path, &data)
            .context(format!("Failed to write backup file: '{}'", backup_path))?;
    }

    let subs = converter::convert_with(parser::split_records(&data), &cli.convert_opts())
        .context(format!("Failed to convert lyrics: '{}'", cli.input))?;
    if subs.is_empty() {
        warn!("No timed lyric lines found, the output will be empty");
    }

    if cli.output == "-" {
        let mut dst = BufWriter::new(io::stdout().lock());
        serialiser::write_intervals(&mut dst, &subs)?;
        dst.flush().context("Failed to write to stdout")?;
    } else {
        serialiser::serialise(&subs, &cli.output)
            .context(format!("Failed to write output file: '{}'", cli.output))?;
        info!(count = subs.len(), output = %cli.output, "Wrote subtitles");
    }

    Ok(())
}
