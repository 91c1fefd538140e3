//! In-memory compression and decompression of whole buffers.

use tracing::{debug, trace};

use crate::bitpack::BitReader;
use crate::container::Container;
use crate::error::{PolicyError, Result, StreamError};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// What to do when the container would not be smaller than its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoSafe {
    /// Fail with `NotReducible` unless the container is strictly smaller.
    #[default]
    Reject,
    /// Always return the container.
    Emit,
}

/// Encode `data` as an HF2 container.
///
/// Empty input always yields the header-only container, whatever the policy.
pub fn compress(data: &[u8], autosafe: AutoSafe) -> Result<Vec<u8>> {
    let table = FrequencyTable::count(data);
    let persisted = table.persisted();

    let bitstream = match HuffmanTree::build(&table.weights()) {
        Some(tree) => {
            let codes = tree.code_table()?;
            trace!(nodes = tree.node_count(), max_code_len = codes.max_len(), "built code table");
            codes.pack(data)?
        }
        None => Vec::new(),
    };

    let container = Container::huffman(data.len() as u64, persisted, bitstream).serialize();
    debug!(
        input = data.len(),
        output = container.len(),
        symbols = table.distinct(),
        "compressed buffer"
    );

    if autosafe == AutoSafe::Reject && !data.is_empty() && container.len() >= data.len() {
        return Err(PolicyError::NotReducible {
            input: data.len() as u64,
            output: container.len() as u64,
        }
        .into());
    }
    Ok(container)
}

/// Decode an HF2 container back to the original bytes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let container = Container::parse(data)?;
    if container.original_len == 0 {
        return Ok(Vec::new());
    }

    let table = FrequencyTable::from_persisted(&container.frequencies);
    let Some(tree) = HuffmanTree::build(&table.weights()) else {
        return Err(StreamError::CorruptStream { position: 0 }.into());
    };

    let mut reader = BitReader::new(&container.bitstream);
    let out = tree.decode(&mut reader, container.original_len)?;
    debug!(
        input = data.len(),
        output = out.len(),
        bits = reader.position(),
        "decompressed buffer"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HEADER_LEN;
    use crate::error::{Error, FormatError};

    #[test]
    fn empty_input_is_header_only() {
        for policy in [AutoSafe::Reject, AutoSafe::Emit] {
            let container = compress(&[], policy).unwrap();
            assert_eq!(container.len(), HEADER_LEN);
            assert!(decompress(&container).unwrap().is_empty());
        }
    }

    #[test]
    fn repetitive_text_shrinks_under_reject() {
        let data = "abcabcabd ".repeat(400);
        let container = compress(data.as_bytes(), AutoSafe::Reject).unwrap();
        assert!(container.len() < data.len());
        assert_eq!(decompress(&container).unwrap(), data.as_bytes());
    }

    #[test]
    fn small_input_is_not_reducible() {
        let data = b"tiny";
        let err = compress(data, AutoSafe::Reject).unwrap_err();
        assert!(matches!(
            err,
            Error::Policy(PolicyError::NotReducible { input: 4, output: 1037 })
        ));

        let container = compress(data, AutoSafe::Emit).unwrap();
        assert_eq!(decompress(&container).unwrap(), data);
    }

    #[test]
    fn zero_counts_with_nonzero_length_are_corrupt() {
        let mut container = compress(&[], AutoSafe::Emit).unwrap();
        container[4] = 1;
        let err = decompress(&container).unwrap_err();
        assert_eq!(err.as_stream(), Some(&StreamError::CorruptStream { position: 0 }));
    }

    #[test]
    fn decompress_checks_header_first() {
        let err = decompress(b"HF2").unwrap_err();
        assert_eq!(err.as_format(), Some(&FormatError::TruncatedHeader { len: 3 }));
    }
}
