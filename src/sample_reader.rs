use crate::errors::FingerprintError;
use byteorder::{ByteOrder, LittleEndian};
use custom_error::custom_error;
use std::io::{self, Read};

/// Samples per window handed to the averaging transform.
pub const WINDOW_LEN: usize = 8;

/// Mono sample slots each window accounts for (8 kept + 24 skipped).
pub const WINDOW_STRIDE: usize = MONO_READ + MONO_SKIP;

// Read-and-skip counts, in 16-bit samples. Stereo keeps the left channel
// of 8 interleaved frames then jumps over the next 24 frames; mono keeps
// 8 samples then jumps over the next 24. Skipped samples decimate the
// signal and are never interpreted.
const STEREO_READ: usize = 16;
const STEREO_SKIP: usize = 48;
const MONO_READ: usize = 8;
const MONO_SKIP: usize = 24;

/// What to do when the stream runs out before a read step is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortReadPolicy {
    /// Abort the file with an error
    FailFast,
    /// Keep the zeroed remainder of the window and carry on
    ZeroFill,
}

custom_error! {pub ParsePolicyError{message: String} = "{message}"}

pub fn parse_short_read_policy(s: &str) -> Result<ShortReadPolicy, ParsePolicyError> {
    match s {
        "fail" => Ok(ShortReadPolicy::FailFast),
        "zero-fill" => Ok(ShortReadPolicy::ZeroFill),
        _ => Err(ParsePolicyError {
            message: format!(
                "unknown short-read policy '{}'; expected 'fail' or 'zero-fill'",
                s
            ),
        }),
    }
}

/// Pulls fixed 8-sample mono windows out of an interleaved 16-bit PCM
/// stream, decimating as it goes.
pub struct SampleReader<R> {
    inner: R,
    channels: u16,
    policy: ShortReadPolicy,
}

impl<R: Read> SampleReader<R> {
    pub fn new(inner: R, channels: u16, policy: ShortReadPolicy) -> SampleReader<R> {
        SampleReader {
            inner,
            channels,
            policy,
        }
    }

    /// Read the next window and advance past the skipped samples.
    pub fn read_window(&mut self) -> Result<[i16; WINDOW_LEN], FingerprintError> {
        let mut window = [0i16; WINDOW_LEN];
        if self.channels == 2 {
            let mut frames = [0i16; STEREO_READ];
            let got = self.read_samples(&mut frames)?;
            self.check_short(STEREO_READ, got)?;
            for (i, slot) in window.iter_mut().enumerate() {
                *slot = frames[2 * i];
            }
            self.skip_samples(STEREO_SKIP)?;
        } else {
            let got = self.read_samples(&mut window)?;
            self.check_short(MONO_READ, got)?;
            self.skip_samples(MONO_SKIP)?;
        }
        Ok(window)
    }

    /// Decode as many whole little-endian samples into `out` as the
    /// stream still holds, returning the count. Missing samples leave
    /// their slots untouched.
    fn read_samples(&mut self, out: &mut [i16]) -> Result<usize, FingerprintError> {
        let mut bytes = [0u8; STEREO_READ * 2];
        let buf = &mut bytes[..out.len() * 2];
        let filled = read_until_eof(&mut self.inner, buf)
            .map_err(|cause| FingerprintError::ReadFailed { cause })?;
        let whole = filled / 2;
        LittleEndian::read_i16_into(&buf[..whole * 2], &mut out[..whole]);
        Ok(whole)
    }

    fn skip_samples(&mut self, count: usize) -> Result<(), FingerprintError> {
        let mut discard = [0u8; STEREO_SKIP * 2];
        let wanted = count * 2;
        let got = read_until_eof(&mut self.inner, &mut discard[..wanted])
            .map_err(|cause| FingerprintError::ReadFailed { cause })?;
        if got < wanted && self.policy == ShortReadPolicy::FailFast {
            return Err(FingerprintError::IncompleteWindow {
                expected: count,
                actual: got / 2,
            });
        }
        Ok(())
    }

    fn check_short(&self, expected: usize, actual: usize) -> Result<(), FingerprintError> {
        if actual < expected && self.policy == ShortReadPolicy::FailFast {
            return Err(FingerprintError::IncompleteWindow { expected, actual });
        }
        Ok(())
    }
}

/// Fill as much of `buf` as the stream can provide, returning the number
/// of bytes read. Unlike `read_exact`, hitting EOF early is not an error.
pub(crate) fn read_until_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
