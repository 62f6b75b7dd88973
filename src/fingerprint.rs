use crate::errors::FingerprintError;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Comparison bits packed into each fingerprint word.
pub const BITS_PER_WORD: usize = 32;

/// A packed audio fingerprint: one bit per adjacent pair of echo values,
/// 32 bits per word, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    words: Vec<u32>,
}

impl Fingerprint {
    /// Pack an echo sequence into `num_frame` words.
    ///
    /// Bit `j` records whether `echoes[j] > echoes[j + 1]` (strictly
    /// greater; equal values pack a zero). The word array is shifted one
    /// final time after the loop, so the last word carries 31 comparison
    /// bits and a trailing zero. Fingerprints already on disk encode
    /// this, so the arithmetic here must stay exactly as it is.
    pub fn from_echoes(echoes: &[i32], num_frame: usize) -> Fingerprint {
        debug_assert_eq!(echoes.len(), num_frame * BITS_PER_WORD);
        let mut words = vec![0u32; num_frame];
        let mut k = 0;
        for j in 0..echoes.len() - 1 {
            words[k] <<= 1;
            if echoes[j] > echoes[j + 1] {
                words[k] |= 1;
            }
            if j % BITS_PER_WORD == BITS_PER_WORD - 1 {
                k += 1;
            }
        }
        words[num_frame - 1] <<= 1;
        Fingerprint { words }
    }

    pub fn from_words(words: Vec<u32>) -> Fingerprint {
        Fingerprint { words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Serialize as consecutive little-endian 32-bit words, 4 bytes each.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), FingerprintError> {
        for &word in &self.words {
            writer
                .write_u32::<LittleEndian>(word)
                .map_err(|cause| FingerprintError::WriteFailed { cause })?;
        }
        Ok(())
    }

    /// Read back `num_frame` little-endian words, e.g. a fingerprint
    /// written by an earlier run.
    pub fn read_from<R: Read>(
        reader: &mut R,
        num_frame: usize,
    ) -> Result<Fingerprint, FingerprintError> {
        let mut words = vec![0u32; num_frame];
        reader
            .read_u32_into::<LittleEndian>(&mut words)
            .map_err(|cause| FingerprintError::ReadFailed { cause })?;
        Ok(Fingerprint { words })
    }
}
