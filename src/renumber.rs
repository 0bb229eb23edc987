//! Flatten a tree of WAV files into a sequential renumbered copy plus a
//! manifest mapping original names to assigned indices.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::discover::discover_wav_files;

/// Manifest file written alongside the renumbered copies. A pre-existing
/// manifest at this name is overwritten.
pub const MANIFEST_NAME: &str = "audio.csv";

/// One manifest row: original relative path and assigned index filename.
#[derive(Debug, Serialize)]
pub struct ManifestRecord {
    pub name: String,
    pub index: String,
}

#[derive(Debug)]
pub struct RenumberSummary {
    pub copied: usize,
    pub manifest: PathBuf,
}

/// Assigned output filename for the `index`-th discovered file: 4-digit
/// zero-padded index plus the original extension.
pub fn indexed_name(index: usize, original: &Path) -> String {
    match original.extension() {
        Some(ext) => format!("{:04}.{}", index, ext.to_string_lossy()),
        None => format!("{index:04}"),
    }
}

/// Copy every WAV nested under `input` to a flat renumbered layout in
/// `output` and write the manifest.
///
/// Indices start at 0 and follow discovery order. The output directory is
/// created if absent (intermediate parents are not). Any filesystem
/// failure aborts the run with an error naming the offending path.
pub fn renumber(input: &Path, output: &Path) -> Result<RenumberSummary> {
    let files = discover_wav_files(input)?;

    if !output.exists() {
        fs::create_dir(output).with_context(|| {
            format!("failed creating output directory {}", output.display())
        })?;
    }

    let manifest_path = output.join(MANIFEST_NAME);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&manifest_path)
        .with_context(|| format!("failed creating manifest {}", manifest_path.display()))?;
    writer
        .write_record(["name", "index"])
        .with_context(|| format!("failed writing manifest {}", manifest_path.display()))?;

    for (index, relative) in files.iter().enumerate() {
        let indexed = indexed_name(index, relative);
        let source = input.join(relative);
        let destination = output.join(&indexed);

        writer.serialize(ManifestRecord {
            name: relative.display().to_string(),
            index: indexed.clone(),
        })?;
        fs::copy(&source, &destination).with_context(|| {
            format!(
                "failed copying {} to {}",
                source.display(),
                destination.display()
            )
        })?;
        info!("{} -> {}", relative.display(), indexed);
    }

    writer
        .flush()
        .with_context(|| format!("failed writing manifest {}", manifest_path.display()))?;

    Ok(RenumberSummary {
        copied: files.len(),
        manifest: manifest_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::DiscoverError;
    use hound::{SampleFormat, WavSpec, WavWriter};

    fn write_tone(path: &Path, frequency: f32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..64 {
            let t = i as f32 / 22050.0;
            writer
                .write_sample((2.0 * std::f32::consts::PI * frequency * t).sin())
                .unwrap();
        }
        writer.finalize().unwrap();
    }

    fn populated_input() -> tempfile::TempDir {
        let input = tempfile::tempdir().unwrap();
        write_tone(&input.path().join("a/one.wav"), 220.0);
        write_tone(&input.path().join("a/b/two.wav"), 440.0);
        write_tone(&input.path().join("zed.wav"), 880.0);
        input
    }

    #[test]
    fn indexed_name_pads_to_four_digits() {
        assert_eq!(indexed_name(0, Path::new("a/one.wav")), "0000.wav");
        assert_eq!(indexed_name(42, Path::new("x.wav")), "0042.wav");
    }

    #[test]
    fn renumbers_into_flat_zero_padded_copies() {
        let input = populated_input();
        let output = tempfile::tempdir().unwrap();

        let summary = renumber(input.path(), output.path()).unwrap();
        assert_eq!(summary.copied, 3);
        assert!(output.path().join("0000.wav").exists());
        assert!(output.path().join("0001.wav").exists());
        assert!(output.path().join("0002.wav").exists());
        assert!(!output.path().join("0003.wav").exists());
    }

    #[test]
    fn manifest_maps_relative_names_to_indices() {
        let input = populated_input();
        let output = tempfile::tempdir().unwrap();

        renumber(input.path(), output.path()).unwrap();
        let manifest = fs::read_to_string(output.path().join(MANIFEST_NAME)).unwrap();
        let rows: Vec<&str> = manifest.lines().collect();
        assert_eq!(
            rows,
            vec![
                "name,index",
                "a/b/two.wav,0000.wav",
                "a/one.wav,0001.wav",
                "zed.wav,0002.wav",
            ]
        );
    }

    #[test]
    fn copies_are_byte_identical() {
        let input = populated_input();
        let output = tempfile::tempdir().unwrap();

        renumber(input.path(), output.path()).unwrap();
        assert_eq!(
            fs::read(input.path().join("a/b/two.wav")).unwrap(),
            fs::read(output.path().join("0000.wav")).unwrap()
        );
        assert_eq!(
            fs::read(input.path().join("zed.wav")).unwrap(),
            fs::read(output.path().join("0002.wav")).unwrap()
        );
    }

    #[test]
    fn uppercase_wavs_are_left_behind() {
        let input = tempfile::tempdir().unwrap();
        write_tone(&input.path().join("one.wav"), 220.0);
        write_tone(&input.path().join("three.WAV"), 440.0);
        let output = tempfile::tempdir().unwrap();

        let summary = renumber(input.path(), output.path()).unwrap();
        assert_eq!(summary.copied, 1);
        assert!(output.path().join("0000.wav").exists());
        assert!(!output.path().join("0001.wav").exists());
        assert!(!output.path().join("0000.WAV").exists());
    }

    #[test]
    fn existing_manifest_is_overwritten() {
        let input = populated_input();
        let output = tempfile::tempdir().unwrap();
        fs::write(output.path().join(MANIFEST_NAME), "stale contents\n").unwrap();

        renumber(input.path(), output.path()).unwrap();
        let manifest = fs::read_to_string(output.path().join(MANIFEST_NAME)).unwrap();
        assert!(manifest.starts_with("name,index"));
        assert!(!manifest.contains("stale"));
    }

    #[test]
    fn empty_input_produces_header_only_manifest() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let summary = renumber(input.path(), output.path()).unwrap();
        assert_eq!(summary.copied, 0);
        let manifest = fs::read_to_string(output.path().join(MANIFEST_NAME)).unwrap();
        assert_eq!(manifest, "name,index\n");
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let output = tempfile::tempdir().unwrap();
        let err = renumber(Path::new("/no/such/dir"), output.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoverError>(),
            Some(DiscoverError::NotADirectory(_))
        ));
    }

    #[test]
    fn creates_missing_output_directory() {
        let input = populated_input();
        let parent = tempfile::tempdir().unwrap();
        let output = parent.path().join("renumbered");

        renumber(input.path(), &output).unwrap();
        assert!(output.is_dir());
        assert!(output.join("0000.wav").exists());
    }

    #[test]
    fn does_not_create_missing_parent_directories() {
        let input = populated_input();
        let parent = tempfile::tempdir().unwrap();
        let output = parent.path().join("missing").join("renumbered");

        let err = renumber(input.path(), &output).unwrap_err();
        assert!(err.to_string().contains("output directory"));
    }
}
