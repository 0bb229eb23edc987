//! Speech synthesis over an external text-to-speech engine.
//!
//! Each line is rendered by one blocking engine invocation, strictly in
//! row order. The argument list is built as data and handed straight to
//! the subprocess; the spoken text never passes through a shell, so
//! quotes and metacharacters in it are inert.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::lines::{sanitize_name, LineRecord};

/// Settings for the external engine, one set per run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine executable, resolved via PATH.
    pub program: String,
    /// Voice the engine speaks with.
    pub voice: String,
    /// Speaking rate in words per minute.
    pub rate: u32,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "say".to_string(),
            voice: "Fiona".to_string(),
            rate: 250,
            sample_rate: 22050,
        }
    }
}

/// Outcome of a generation run. `failed` rows were logged and skipped;
/// the caller decides whether a partial run counts as success.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub attempted: usize,
    pub failed: usize,
}

/// Output encoding request: raw linear PCM float-32 at the configured rate.
fn data_format(sample_rate: u32) -> String {
    format!("LEF32@{sample_rate}")
}

/// Output location for a record: sanitized name plus the `.wav` suffix.
pub fn output_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{}.wav", sanitize_name(name)))
}

/// Build the complete engine argument list for one line.
/// Returns a `Vec<String>` ready for `Command::new(&config.program).args(...)`.
pub fn synthesis_args(output: &Path, text: &str, config: &EngineConfig) -> Vec<String> {
    vec![
        "-o".into(),
        output.to_string_lossy().into_owned(),
        format!("--data-format={}", data_format(config.sample_rate)),
        "-v".into(),
        config.voice.clone(),
        "-r".into(),
        config.rate.to_string(),
        text.to_string(),
    ]
}

/// Synthesize one WAV per record into `output_dir`.
///
/// The output directory is created if absent, but intermediate parents
/// are not. A failed invocation (non-zero exit or failure to launch) is
/// logged with the offending row and counted; the run continues.
pub fn generate_all(
    records: &[LineRecord],
    output_dir: &Path,
    config: &EngineConfig,
) -> Result<GenerateSummary> {
    if !output_dir.exists() {
        fs::create_dir(output_dir).with_context(|| {
            format!("failed creating output directory {}", output_dir.display())
        })?;
    }

    let mut summary = GenerateSummary::default();
    let mut seen = HashSet::new();

    for record in records {
        let base = sanitize_name(&record.name);
        if !seen.insert(base) {
            warn!(
                "duplicate name '{}' overwrites an earlier file",
                record.name
            );
        }
        let output = output_path(output_dir, &record.name);
        let args = synthesis_args(&output, &record.line, config);

        info!("{} {}", config.program, args.join(" "));
        summary.attempted += 1;

        match Command::new(&config.program).args(&args).status() {
            Ok(status) if status.success() => {}
            Ok(status) => {
                error!("engine exited with {} for '{}'", status, record.name);
                summary.failed += 1;
            }
            Err(err) => {
                error!(
                    "failed to launch {} for '{}': {}",
                    config.program, record.name, err
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
