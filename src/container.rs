//! The HF2 container: a fixed 1036-byte header followed by the packed
//! bitstream.
//!
//! ```text
//! [3]    'H' 'F' '2'
//! [1]    method (1 = Huffman)
//! [8]    original length, u64 LE
//! [1024] 256 x u32 LE saturated byte counts
//! [..]   bitstream, MSB-first, zero-padded
//! ```

use std::io::{Cursor, Read};

use crate::error::{FormatError, Result};
use crate::frequency::ALPHABET_SIZE;

pub const MAGIC: [u8; 3] = *b"HF2";

/// Size of the fixed header, and of the smallest valid container
pub const HEADER_LEN: usize = MAGIC.len() + 1 + 8 + ALPHABET_SIZE * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Method {
    Huffman = 1,
}

impl TryFrom<u8> for Method {
    type Error = FormatError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Method::Huffman),
            other => Err(FormatError::UnsupportedMethod(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub method: Method,
    pub original_len: u64,
    pub frequencies: [u32; ALPHABET_SIZE],
    pub bitstream: Vec<u8>,
}

impl Container {
    pub fn huffman(original_len: u64, frequencies: [u32; ALPHABET_SIZE], bitstream: Vec<u8>) -> Self {
        Container {
            method: Method::Huffman,
            original_len,
            frequencies,
            bitstream,
        }
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.bitstream.len()
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(&MAGIC);
        bytes.push(self.method as u8);
        bytes.extend_from_slice(&self.original_len.to_le_bytes());
        for count in &self.frequencies {
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes.extend_from_slice(&self.bitstream);
        bytes
    }

    /// Validate the header and split off the bitstream.
    pub fn parse(data: &[u8]) -> Result<Container> {
        if data.len() < HEADER_LEN {
            return Err(FormatError::TruncatedHeader { len: data.len() }.into());
        }
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 3];
        cursor.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(FormatError::BadMagic.into());
        }

        let mut method = [0u8; 1];
        cursor.read_exact(&mut method)?;
        let method = Method::try_from(method[0])?;

        let mut original_len_bytes = [0u8; 8];
        cursor.read_exact(&mut original_len_bytes)?;
        let original_len = u64::from_le_bytes(original_len_bytes);

        let mut frequencies = [0u32; ALPHABET_SIZE];
        for count in frequencies.iter_mut() {
            let mut count_bytes = [0u8; 4];
            cursor.read_exact(&mut count_bytes)?;
            *count = u32::from_le_bytes(count_bytes);
        }

        Ok(Container {
            method,
            original_len,
            frequencies,
            bitstream: data[HEADER_LEN..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> Container {
        let mut frequencies = [0u32; ALPHABET_SIZE];
        frequencies[b'a' as usize] = 3;
        frequencies[0xFF] = u32::MAX;
        Container::huffman(0x0102_0304_0506_0708, frequencies, vec![0xAB, 0xC0])
    }

    #[test]
    fn header_layout_is_little_endian() {
        let bytes = sample().serialize();
        assert_eq!(HEADER_LEN, 1036);
        assert_eq!(bytes.len(), HEADER_LEN + 2);
        assert_eq!(&bytes[..4], b"HF2\x01");
        assert_eq!(&bytes[4..12], &[8u8, 7, 6, 5, 4, 3, 2, 1]);
        let a = 12 + 4 * b'a' as usize;
        assert_eq!(&bytes[a..a + 4], &[3u8, 0, 0, 0]);
        assert_eq!(&bytes[HEADER_LEN - 4..HEADER_LEN], &[0xFFu8; 4]);
        assert_eq!(&bytes[HEADER_LEN..], &[0xABu8, 0xC0]);
    }

    #[test]
    fn parse_reads_back_every_field() {
        let container = sample();
        assert_eq!(Container::parse(&container.serialize()).unwrap(), container);
    }

    #[test]
    fn short_buffer_is_truncated_header() {
        let bytes = sample().serialize();
        let err = Container::parse(&bytes[..HEADER_LEN - 1]).unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::TruncatedHeader { len: HEADER_LEN - 1 }));
    }

    #[test]
    fn bad_tag_and_method_are_rejected() {
        let mut bytes = sample().serialize();
        bytes[1] = b'X';
        assert!(matches!(Container::parse(&bytes), Err(Error::Format(FormatError::BadMagic))));

        let mut bytes = sample().serialize();
        bytes[3] = 2;
        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::Format(FormatError::UnsupportedMethod(2)))
        ));
    }
}
