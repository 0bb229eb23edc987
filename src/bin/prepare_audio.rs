use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use door_audio::discover::DiscoverError;
use door_audio::renumber;

/// Flatten a tree of WAV files into a renumbered copy with a manifest.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of source audio files
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Path to output processed audio files
    #[arg(short = 'o', long)]
    output: PathBuf,
}

// Exit codes beyond clap's own usage error (2).
const EXIT_BAD_INPUT: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    match renumber::renumber(&args.input, &args.output) {
        Ok(summary) => {
            info!(
                "copied {} files, manifest at {}",
                summary.copied,
                summary.manifest.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            match err.downcast_ref::<DiscoverError>() {
                Some(DiscoverError::NotADirectory(_)) => ExitCode::from(EXIT_BAD_INPUT),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
