use crate::errors::FingerprintError;
use crate::fingerprint::BITS_PER_WORD;
use crate::sample_reader::{ShortReadPolicy, WINDOW_STRIDE};
use crate::wav::HeaderValidation;

pub const DEFAULT_NUM_FRAME: usize = 128;

/// Pipeline dimensions and policies for a fingerprinting run.
///
/// The three dimension fields must satisfy
/// `num_dwt_eco == num_frame * 32` and `num_wave == num_dwt_eco * 32`,
/// or the packer's word-boundary arithmetic falls apart; prefer
/// [`FingerprintConfig::with_frames`], which derives them.
#[derive(Debug, Clone)]
pub struct FingerprintConfig {
    /// Raw PCM sample slots considered per file
    pub num_wave: usize,
    /// Echo values computed per file, one per 8-sample window
    pub num_dwt_eco: usize,
    /// Fingerprint length in 32-bit words
    pub num_frame: usize,
    pub validation: HeaderValidation,
    pub short_read: ShortReadPolicy,
}

impl Default for FingerprintConfig {
    fn default() -> FingerprintConfig {
        FingerprintConfig::with_frames(DEFAULT_NUM_FRAME)
    }
}

impl FingerprintConfig {
    /// Build a config for a fingerprint of `num_frame` words, deriving
    /// the echo and sample counts.
    pub fn with_frames(num_frame: usize) -> FingerprintConfig {
        let num_dwt_eco = num_frame * BITS_PER_WORD;
        FingerprintConfig {
            num_wave: num_dwt_eco * WINDOW_STRIDE,
            num_dwt_eco,
            num_frame,
            validation: HeaderValidation::Strict,
            short_read: ShortReadPolicy::ZeroFill,
        }
    }

    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.num_frame == 0 {
            return Err(FingerprintError::BadConfig {
                detail: "num_frame must be at least 1".to_string(),
            });
        }
        if self.num_dwt_eco != self.num_frame * BITS_PER_WORD {
            return Err(FingerprintError::BadConfig {
                detail: format!(
                    "num_dwt_eco must be num_frame * {}: got {} for {} frames",
                    BITS_PER_WORD, self.num_dwt_eco, self.num_frame
                ),
            });
        }
        if self.num_wave != self.num_dwt_eco * WINDOW_STRIDE {
            return Err(FingerprintError::BadConfig {
                detail: format!(
                    "num_wave must be num_dwt_eco * {}: got {} for {} echoes",
                    WINDOW_STRIDE, self.num_wave, self.num_dwt_eco
                ),
            });
        }
        Ok(())
    }
}
