use crate::config::FingerprintConfig;
use crate::errors::FingerprintError;
use crate::fingerprint::Fingerprint;
use crate::pipeline;
use crate::verify;
use std::fs;
use std::path::Path;
use stopwatch::Stopwatch;

/// Outcome of one directory run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Fingerprint every regular file in `input_dir`, writing a `<name>.raw`
/// file into `output_dir` for each one. Subdirectories are ignored.
///
/// No single file is fatal to the batch: failures are logged and counted
/// and the scan carries on with the next entry. When `reference` is
/// given, every computed fingerprint is checked against it.
pub fn process_dir(
    input_dir: &Path,
    output_dir: &Path,
    config: &FingerprintConfig,
    reference: Option<&Fingerprint>,
) -> Result<BatchSummary, FingerprintError> {
    config.validate()?;
    fs::create_dir_all(output_dir).map_err(|cause| FingerprintError::FileOpen {
        path: output_dir.display().to_string(),
        cause,
    })?;

    let entries = fs::read_dir(input_dir).map_err(|cause| FingerprintError::FileOpen {
        path: input_dir.display().to_string(),
        cause,
    })?;

    let mut summary = BatchSummary::default();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(cause) => {
                warn!("skipping unreadable directory entry: {}", cause);
                summary.failed += 1;
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            debug!("skipping {}: not a regular file", path.display());
            continue;
        }
        let mut output_name = entry.file_name();
        output_name.push(".raw");
        let output_path = output_dir.join(output_name);

        let watch = Stopwatch::start_new();
        match pipeline::process_file(&path, &output_path, config) {
            Ok(fingerprint) => {
                info!(
                    "{} -> {} ({} words, {}ms)",
                    path.display(),
                    output_path.display(),
                    fingerprint.len(),
                    watch.elapsed_ms()
                );
                if let Some(reference) = reference {
                    verify::report(&fingerprint, reference);
                }
                summary.processed += 1;
            }
            Err(error) => {
                warn!("failed to fingerprint {}: {}", path.display(), error);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
