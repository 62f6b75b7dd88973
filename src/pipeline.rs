use crate::config::FingerprintConfig;
use crate::dwt::dwt1;
use crate::errors::FingerprintError;
use crate::fingerprint::Fingerprint;
use crate::sample_reader::SampleReader;
use crate::wav::WaveHeader;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Run the whole pipeline over one PCM WAV stream: parse the header,
/// extract `num_dwt_eco` downsampled windows, transform each into an
/// echo value and pack the echo sequence into a fingerprint.
pub fn compute_fingerprint<R: Read>(
    reader: &mut R,
    config: &FingerprintConfig,
) -> Result<Fingerprint, FingerprintError> {
    config.validate()?;
    let header = WaveHeader::read_from(reader, config.validation)?;
    debug!(
        "header: {} channel(s), {} Hz, {} bits per sample, {} data bytes",
        header.channels, header.sample_rate, header.bits_per_sample, header.data_size
    );

    let mut samples = SampleReader::new(reader, header.channels, config.short_read);
    let mut echoes = vec![0i32; config.num_dwt_eco];
    for echo in echoes.iter_mut() {
        let window = samples.read_window()?;
        *echo = dwt1(&window);
    }

    Ok(Fingerprint::from_echoes(&echoes, config.num_frame))
}

/// Fingerprint the WAV file at `input` and write the result to `output`.
///
/// The output file is only created once a fingerprint has been computed,
/// so a rejected input leaves nothing on disk.
pub fn process_file(
    input: &Path,
    output: &Path,
    config: &FingerprintConfig,
) -> Result<Fingerprint, FingerprintError> {
    let file = File::open(input).map_err(|cause| FingerprintError::FileOpen {
        path: input.display().to_string(),
        cause,
    })?;
    let mut reader = BufReader::new(file);
    let fingerprint = compute_fingerprint(&mut reader, config)?;

    let out = File::create(output).map_err(|cause| FingerprintError::FileOpen {
        path: output.display().to_string(),
        cause,
    })?;
    let mut writer = BufWriter::new(out);
    fingerprint.write_to(&mut writer)?;
    writer
        .flush()
        .map_err(|cause| FingerprintError::WriteFailed { cause })?;
    Ok(fingerprint)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sample_reader::ShortReadPolicy;
    use crate::test_utils::assert_words_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_stereo_wav<F>(dir: &TempDir, name: &str, frames: usize, mut left: F) -> PathBuf
    where
        F: FnMut(usize) -> i16,
    {
        let path = dir.path().join(name);
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for frame in 0..frames {
            writer.write_sample(left(frame)).unwrap();
            writer.write_sample(9999i16).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_stereo_descending_levels_set_every_bit() {
        let dir = TempDir::new().unwrap();
        let config = FingerprintConfig::with_frames(1);
        // 32 windows of 32 stereo frames each; the 8 kept frames of
        // window w hold a level that strictly decreases with w, so every
        // adjacent echo comparison packs a 1. The constant right channel
        // would flatten the sequence if it leaked into the windows.
        let path = write_stereo_wav(&dir, "descending.wav", 32 * 32, |frame| {
            let window = (frame / 32) as i16;
            3200 - window * 100
        });

        let file = fs::File::open(&path).unwrap();
        let fingerprint =
            compute_fingerprint(&mut BufReader::new(file), &config).unwrap();
        assert_words_eq(fingerprint.words(), &[0xFFFF_FFFE]);
    }

    #[test]
    fn test_silence_packs_all_zero_words() {
        let dir = TempDir::new().unwrap();
        let config = FingerprintConfig::with_frames(2);
        let path = write_stereo_wav(&dir, "silence.wav", 64 * 32, |_| 0);

        let file = fs::File::open(&path).unwrap();
        let fingerprint =
            compute_fingerprint(&mut BufReader::new(file), &config).unwrap();
        assert_words_eq(fingerprint.words(), &[0, 0]);
    }

    #[test]
    fn test_short_file_zero_fills_by_default() {
        let dir = TempDir::new().unwrap();
        let config = FingerprintConfig::with_frames(1);
        // far fewer frames than the 1024 the config calls for
        let path = write_stereo_wav(&dir, "short.wav", 40, |_| 1000);

        let file = fs::File::open(&path).unwrap();
        let fingerprint =
            compute_fingerprint(&mut BufReader::new(file), &config).unwrap();
        assert_eq!(fingerprint.len(), 1);
    }

    #[test]
    fn test_short_file_fails_under_fail_fast() {
        let dir = TempDir::new().unwrap();
        let mut config = FingerprintConfig::with_frames(1);
        config.short_read = ShortReadPolicy::FailFast;
        let path = write_stereo_wav(&dir, "short.wav", 40, |_| 1000);

        let file = fs::File::open(&path).unwrap();
        let result = compute_fingerprint(&mut BufReader::new(file), &config);
        assert!(matches!(
            result,
            Err(FingerprintError::IncompleteWindow { .. })
        ));
    }

    #[test]
    fn test_process_file_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let config = FingerprintConfig::with_frames(1);
        let input = write_stereo_wav(&dir, "clip.wav", 32 * 32, |frame| {
            let window = (frame / 32) as i16;
            3200 - window * 100
        });
        let output = dir.path().join("clip.wav.raw");

        let fingerprint = process_file(&input, &output, &config).unwrap();
        assert_eq!(fs::metadata(&output).unwrap().len(), 4);
        let file = fs::File::open(&output).unwrap();
        let restored =
            Fingerprint::read_from(&mut BufReader::new(file), config.num_frame).unwrap();
        assert_eq!(restored, fingerprint);
    }

    #[test]
    fn test_rejected_input_leaves_no_output_file() {
        let dir = TempDir::new().unwrap();
        let config = FingerprintConfig::with_frames(1);
        let input = dir.path().join("junk.wav");
        fs::write(&input, b"this is not a wav file").unwrap();
        let output = dir.path().join("junk.wav.raw");

        let result = process_file(&input, &output, &config);
        assert!(matches!(
            result,
            Err(FingerprintError::MalformedHeader { .. })
        ));
        assert!(!output.exists());
    }
}
