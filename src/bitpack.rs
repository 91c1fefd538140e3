//! MSB-first bit packing over byte buffers.

use bitvec::prelude::*;

/// Accumulates variable-length codes into a byte buffer, most significant
/// bit first.
#[derive(Debug, Default)]
pub struct BitPacker {
    bits: BitVec<u8, Msb0>,
}

impl BitPacker {
    pub fn with_capacity(bits: usize) -> Self {
        BitPacker {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Append the low `len` bits of `pattern`, highest of them first.
    pub fn push(&mut self, pattern: u64, len: u8) {
        let len = len as usize;
        debug_assert!(len <= 64);
        if len == 0 {
            return;
        }
        let view = pattern.view_bits::<Msb0>();
        self.bits.extend_from_bitslice(&view[64 - len..]);
    }

    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Zero-pad the trailing partial byte and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        while self.bits.len() % 8 != 0 {
            self.bits.push(false);
        }
        self.bits.into_vec()
    }
}

/// Reads a packed buffer one bit at a time, MSB-first per byte.
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            bits: bytes.view_bits::<Msb0>(),
            position: 0,
        }
    }

    /// Next bit, or `None` once the buffer is exhausted.
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.position).map(|bit| *bit)?;
        self.position += 1;
        Some(bit)
    }

    /// Number of bits consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }
}
