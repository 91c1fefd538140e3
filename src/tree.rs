//! Huffman tree construction, code generation and the decoding tree walk.
//!
//! Nodes live in a single arena (`Vec<HuffmanNode>`) and refer to their
//! children by index, so a tree is released in one go when it is dropped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::bitpack::{BitPacker, BitReader};
use crate::error::{Error, Result, StreamError};
use crate::frequency::ALPHABET_SIZE;

/// Longest code the packer can represent
pub const MAX_CODE_LEN: usize = 64;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    /// Stand-in sibling for the only leaf of a single-symbol tree.
    Placeholder,
    Internal {
        weight: u64,
        l_child: NodeId,
        r_child: NodeId,
    },
}

impl HuffmanNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
            HuffmanNode::Placeholder => 0,
        }
    }
}

// Min-heap entry: lowest weight first, then lowest arena index. Arena
// indices follow insertion order, which keeps the merge order reproducible.
#[derive(Debug, PartialEq, Eq)]
struct HeapEntry {
    weight: u64,
    id: NodeId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.weight.cmp(&self.weight) {
            Ordering::Equal => other.id.cmp(&self.id),
            ord => ord,
        }
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A symbol's bit pattern, stored in the low `len` bits of `bits`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    pub fn max_len(&self) -> u8 {
        self.codes.iter().flatten().map(|code| code.len).max().unwrap_or(0)
    }

    /// Pack `data` into a zero-padded bitstream, one code per input byte.
    pub fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        // every byte costs at least one bit
        let mut packer = BitPacker::with_capacity(data.len());
        for &byte in data {
            let code = self.get(byte).ok_or(Error::MissingCode(byte))?;
            packer.push(code.bits, code.len);
        }
        trace!(bits = packer.bit_len(), "packed bitstream");
        Ok(packer.finish())
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for a weight per byte value. Returns `None` when every
    /// weight is zero.
    pub fn build(weights: &[u64; ALPHABET_SIZE]) -> Option<Self> {
        let mut nodes: Vec<HuffmanNode> = weights
            .iter()
            .enumerate()
            .filter(|&(_, &weight)| weight != 0)
            .map(|(byte, &weight)| HuffmanNode::Leaf {
                byte: byte as u8,
                weight,
            })
            .collect();

        if nodes.len() == 1 {
            let weight = nodes[0].weight();
            nodes.push(HuffmanNode::Placeholder);
            nodes.push(HuffmanNode::Internal {
                weight,
                l_child: 0,
                r_child: 1,
            });
            return Some(HuffmanTree { nodes, root: 2 });
        }

        let mut heap: BinaryHeap<HeapEntry> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| HeapEntry {
                weight: node.weight(),
                id,
            })
            .collect();

        let root = loop {
            let first = heap.pop()?;
            let Some(second) = heap.pop() else {
                break first.id;
            };

            let id = nodes.len();
            let weight = first.weight + second.weight;
            nodes.push(HuffmanNode::Internal {
                weight,
                l_child: first.id,
                r_child: second.id,
            });
            heap.push(HeapEntry { weight, id });
        };

        trace!(nodes = nodes.len(), root, "built huffman tree");
        Some(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&HuffmanNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Derive every symbol's code from its root-to-leaf path.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable {
            codes: [None; ALPHABET_SIZE],
        };
        self.assign_codes(self.root, 0, 0, &mut table)?;
        Ok(table)
    }

    fn assign_codes(&self, id: NodeId, bits: u64, depth: usize, table: &mut CodeTable) -> Result<()> {
        match self.nodes[id] {
            HuffmanNode::Leaf { byte, .. } => {
                if depth > MAX_CODE_LEN {
                    return Err(Error::CodeTooLong { symbol: byte, len: depth });
                }
                table.codes[byte as usize] = Some(Code {
                    bits,
                    len: depth as u8,
                });
            }
            HuffmanNode::Placeholder => {}
            HuffmanNode::Internal { l_child, r_child, .. } => {
                self.assign_codes(l_child, bits << 1, depth + 1, table)?;
                self.assign_codes(r_child, (bits << 1) | 1, depth + 1, table)?;
            }
        }
        Ok(())
    }

    /// Walk the tree bit by bit until `count` symbols have been emitted.
    pub fn decode(&self, reader: &mut BitReader<'_>, count: u64) -> Result<Vec<u8>> {
        // every symbol costs at least one bit
        let reserve = count.min(reader.remaining() as u64) as usize;
        let mut out = Vec::with_capacity(reserve);
        let mut current = self.root;
        let mut decoded = 0u64;

        while decoded < count {
            let Some(bit) = reader.next_bit() else {
                return Err(StreamError::TruncatedStream {
                    decoded,
                    expected: count,
                }
                .into());
            };
            let corrupt = || StreamError::CorruptStream {
                position: reader.position() as u64 - 1,
            };

            let next = match self.nodes.get(current) {
                Some(HuffmanNode::Internal { l_child, r_child, .. }) => {
                    if bit { *r_child } else { *l_child }
                }
                _ => return Err(corrupt().into()),
            };

            match self.nodes.get(next) {
                Some(HuffmanNode::Leaf { byte, .. }) => {
                    out.push(*byte);
                    decoded += 1;
                    current = self.root;
                }
                Some(HuffmanNode::Internal { .. }) => current = next,
                Some(HuffmanNode::Placeholder) | None => return Err(corrupt().into()),
            }
        }

        Ok(out)
    }
}
