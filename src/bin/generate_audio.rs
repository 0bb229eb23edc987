use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use door_audio::lines::{self, TableError};
use door_audio::speech::{self, EngineConfig};

/// Synthesize one WAV file per row of a CSV line table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to csv of input lines to generate
    #[arg(short = 'l', long)]
    lines: PathBuf,

    /// Path to output generated audio
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Engine voice to speak with
    #[arg(long, default_value = "Fiona")]
    voice: String,

    /// Speaking rate in words per minute
    #[arg(long, default_value_t = 250)]
    rate: u32,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = 22050)]
    sample_rate: u32,

    /// Text-to-speech engine executable
    #[arg(long, default_value = "say")]
    engine: String,
}

// Exit codes beyond clap's own usage error (2).
const EXIT_SYNTHESIS_FAILED: u8 = 1;
const EXIT_TABLE_UNREADABLE: u8 = 3;
const EXIT_MISSING_COLUMN: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let records = match lines::read_lines(&args.lines) {
        Ok(records) => records,
        Err(err @ TableError::MissingColumn(_)) => {
            error!("{err}");
            return ExitCode::from(EXIT_MISSING_COLUMN);
        }
        Err(err) => {
            error!("{err}");
            return ExitCode::from(EXIT_TABLE_UNREADABLE);
        }
    };

    let config = EngineConfig {
        program: args.engine,
        voice: args.voice,
        rate: args.rate,
        sample_rate: args.sample_rate,
    };

    match speech::generate_all(&records, &args.output, &config) {
        Ok(summary) if summary.failed > 0 => {
            error!(
                "{} of {} lines failed to synthesize",
                summary.failed, summary.attempted
            );
            ExitCode::from(EXIT_SYNTHESIS_FAILED)
        }
        Ok(summary) => {
            info!(
                "synthesized {} lines into {}",
                summary.attempted,
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
