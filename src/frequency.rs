//! Byte frequency counting and the 32-bit saturation shared by the encoder
//! and the decoder.

/// Number of distinct byte values
pub const ALPHABET_SIZE: usize = 256;

/// Clip a 64-bit tally to the 32-bit field stored in the container.
///
/// Both the encoder and the decoder build their tree from these clipped
/// values, so a saturated count still yields identical codes on both sides.
pub fn saturate(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    pub fn count(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        data.iter().for_each(|&byte| {
            counts[byte as usize] += 1;
        });
        FrequencyTable { counts }
    }

    /// Rebuild a table from the counts persisted in a container.
    pub fn from_persisted(persisted: &[u32; ALPHABET_SIZE]) -> Self {
        FrequencyTable {
            counts: persisted.map(u64::from),
        }
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of byte values that occur at least once
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count != 0).count()
    }

    /// The counts as they are written to the container.
    pub fn persisted(&self) -> [u32; ALPHABET_SIZE] {
        self.counts.map(saturate)
    }

    /// Tree weights for this table: the persisted values widened back to u64.
    pub fn weights(&self) -> [u64; ALPHABET_SIZE] {
        self.persisted().map(u64::from)
    }
}
