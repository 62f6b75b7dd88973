use crate::errors::FingerprintError;
use crate::sample_reader::read_until_eof;
use byteorder::{ByteOrder, LittleEndian};
use std::io::Read;

/// Size of the canonical header of an uncompressed PCM WAV file.
pub const WAV_HEADER_LEN: usize = 44;

pub const EXPECTED_SAMPLE_RATE: u32 = 44100;
pub const EXPECTED_BITS_PER_SAMPLE: u16 = 16;

/// How strictly WAV headers are checked before fingerprinting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderValidation {
    /// Reject the file on any header problem
    Strict,
    /// Log header problems and fingerprint the stream anyway
    Lenient,
}

/// The 44-byte header at the front of an uncompressed PCM WAV stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    pub riff: [u8; 4],
    pub file_size: u32,
    pub wave: [u8; 4],
    pub fmt: [u8; 4],
    pub fmt_size: u32,
    pub format_id: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data: [u8; 4],
    pub data_size: u32,
}

impl WaveHeader {
    /// Consume the header bytes at the front of `reader` and decode them.
    ///
    /// Advances the cursor by up to 44 bytes; on failure the stream
    /// position is unusable and the caller must not keep reading. In
    /// lenient mode any missing bytes decode as zero.
    pub fn read_from<R: Read>(
        reader: &mut R,
        validation: HeaderValidation,
    ) -> Result<WaveHeader, FingerprintError> {
        let mut raw = [0u8; WAV_HEADER_LEN];
        let filled = read_until_eof(reader, &mut raw)
            .map_err(|cause| FingerprintError::ReadFailed { cause })?;
        if filled < WAV_HEADER_LEN {
            let detail = format!(
                "truncated header: expected {} bytes, got {}",
                WAV_HEADER_LEN, filled
            );
            match validation {
                HeaderValidation::Strict => {
                    return Err(FingerprintError::MalformedHeader { detail })
                }
                HeaderValidation::Lenient => warn!("{}", detail),
            }
        }

        let header = WaveHeader::decode(&raw);
        for problem in header.check() {
            match validation {
                HeaderValidation::Strict => {
                    return Err(FingerprintError::MalformedHeader { detail: problem })
                }
                HeaderValidation::Lenient => warn!("ignoring header problem: {}", problem),
            }
        }
        Ok(header)
    }

    fn decode(raw: &[u8; WAV_HEADER_LEN]) -> WaveHeader {
        let mut riff = [0u8; 4];
        let mut wave = [0u8; 4];
        let mut fmt = [0u8; 4];
        let mut data = [0u8; 4];
        riff.copy_from_slice(&raw[0..4]);
        wave.copy_from_slice(&raw[8..12]);
        fmt.copy_from_slice(&raw[12..16]);
        data.copy_from_slice(&raw[36..40]);
        WaveHeader {
            riff,
            file_size: LittleEndian::read_u32(&raw[4..8]),
            wave,
            fmt,
            fmt_size: LittleEndian::read_u32(&raw[16..20]),
            format_id: LittleEndian::read_u16(&raw[20..22]),
            channels: LittleEndian::read_u16(&raw[22..24]),
            sample_rate: LittleEndian::read_u32(&raw[24..28]),
            byte_rate: LittleEndian::read_u32(&raw[28..32]),
            block_align: LittleEndian::read_u16(&raw[32..34]),
            bits_per_sample: LittleEndian::read_u16(&raw[34..36]),
            data,
            data_size: LittleEndian::read_u32(&raw[40..44]),
        }
    }

    fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if &self.riff != b"RIFF" {
            problems.push(format!("bad RIFF magic: {:?}", self.riff));
        }
        if &self.wave != b"WAVE" {
            problems.push(format!("bad WAVE magic: {:?}", self.wave));
        }
        if &self.fmt != b"fmt " {
            problems.push(format!("bad fmt magic: {:?}", self.fmt));
        }
        if &self.data != b"data" {
            problems.push(format!("bad data magic: {:?}", self.data));
        }
        if self.bits_per_sample != EXPECTED_BITS_PER_SAMPLE {
            problems.push(format!(
                "unsupported bits per sample: {}",
                self.bits_per_sample
            ));
        }
        if self.sample_rate != EXPECTED_SAMPLE_RATE {
            problems.push(format!("unsupported sample rate: {}", self.sample_rate));
        }
        problems
    }
}
