//! Prefix-code tree construction and the tree-walk decoder.
//!
//! # Construction
//!
//! Classic minimum-weight merging over a binary heap. Every queued node gets a
//! sequence number when it is pushed (leaves first, in ascending symbol order,
//! then merged nodes in creation order), and the heap pops by
//! `(weight, sequence)`. Equal weights therefore leave in FIFO order and the
//! tree depends only on the frequency values, never on map iteration order.
//!
//! Of each popped pair, the first (lighter or older) node goes on the
//! one-branch and the second on the zero-branch. For `{a: 3, b: 1}` that gives
//! `a = 0`, `b = 1`.
//!
//! # Decoding
//!
//! The decoder walks from the root one bit at a time and emits a symbol every
//! time it lands on a leaf. A root that is itself a leaf (one-symbol alphabet)
//! emits its symbol for every bit.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::bitio::BitReader;
use crate::error::{FormatError, HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// A node of the prefix-code tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        zero: Box<Node>,
        one: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// How the decoder treats payloads that do not line up with the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Drop a partial code at the end of the payload and accept any number of
    /// decoded symbols.
    #[default]
    Permissive,
    /// Fail on a partial trailing code or when the decoded symbol count differs
    /// from the header's frequency total.
    Strict,
}

/// A node waiting in the merge queue.
#[derive(Debug)]
struct Queued {
    node: Node,
    sequence: u64,
}

impl Queued {
    fn key(&self) -> (u64, u64) {
        (self.node.weight(), self.sequence)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lightest, oldest node first
        other.key().cmp(&self.key())
    }
}

/// A Huffman prefix-code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for every symbol with a non-zero count.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if no symbol has a non-zero count.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut queue = BinaryHeap::with_capacity(frequencies.distinct());
        let mut sequence = 0u64;

        for (symbol, weight) in frequencies.iter() {
            queue.push(Queued {
                node: Node::Leaf { symbol, weight },
                sequence,
            });
            sequence += 1;
        }

        let root = loop {
            let first = queue.pop().ok_or(HuffmanError::EmptyFrequencyTable)?;
            let Some(second) = queue.pop() else {
                break first.node;
            };

            let weight = first.node.weight() + second.node.weight();
            trace!(
                lighter = first.node.weight(),
                heavier = second.node.weight(),
                weight,
                "merging nodes"
            );

            queue.push(Queued {
                node: Node::Internal {
                    weight,
                    zero: Box::new(second.node),
                    one: Box::new(first.node),
                },
                sequence,
            });
            sequence += 1;
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, i.e. the number of symbols the tree was built for.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// True when the alphabet had a single symbol and the root is a leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        visit_leaves(&self.root, 0, &mut |_, _, _| count += 1);
        count
    }

    /// Depth of the deepest leaf (0 for a single-leaf tree).
    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        visit_leaves(&self.root, 0, &mut |_, _, depth| max = max.max(depth));
        max
    }

    /// Number of payload bits the tree's own frequencies encode to.
    ///
    /// A single-leaf tree spends one bit per symbol.
    pub fn encoded_bit_len(&self) -> u64 {
        let mut bits = 0u64;
        visit_leaves(&self.root, 0, &mut |_, weight, depth| {
            bits += weight * depth.max(1) as u64;
        });
        bits
    }

    /// Decode every bit `reader` has left by walking the tree.
    ///
    /// # Errors
    /// In `DecodeMode::Strict`:
    /// - `FormatError::DanglingBits` if the bits run out mid-code
    /// - `FormatError::SymbolCountMismatch` if the symbol count differs from
    ///   the tree weight
    pub fn decode(&self, reader: &mut BitReader<'_>, mode: DecodeMode) -> Result<Vec<u8>> {
        // Every symbol costs at least one bit, so the reader bounds the output
        let capacity = (self.weight() as usize).min(reader.bits_remaining());
        let mut output = Vec::with_capacity(capacity);

        let mut node = &self.root;
        let mut walked = 0usize;

        while !reader.is_empty() {
            let bit = reader.read_bit()?;
            walked += 1;

            node = match node {
                Node::Internal { zero, one, .. } => {
                    if bit {
                        &**one
                    } else {
                        &**zero
                    }
                }
                leaf @ Node::Leaf { .. } => leaf,
            };

            if let Node::Leaf { symbol, .. } = node {
                output.push(*symbol);
                node = &self.root;
                walked = 0;
            }
        }

        if walked > 0 {
            match mode {
                DecodeMode::Strict => {
                    return Err(FormatError::DanglingBits {
                        dangling: walked,
                        decoded: output.len(),
                    }
                    .into());
                }
                DecodeMode::Permissive => {
                    trace!(dangling = walked, "discarding partial code at end of payload");
                }
            }
        }

        if mode == DecodeMode::Strict && output.len() as u64 != self.weight() {
            return Err(FormatError::SymbolCountMismatch {
                expected: self.weight(),
                actual: output.len() as u64,
            }
            .into());
        }

        Ok(output)
    }
}

/// Depth-first visit of every leaf as `(symbol, weight, depth)`.
fn visit_leaves<F: FnMut(u8, u64, usize)>(node: &Node, depth: usize, f: &mut F) {
    match node {
        Node::Leaf { symbol, weight } => f(*symbol, *weight, depth),
        Node::Internal { zero, one, .. } => {
            visit_leaves(zero, depth + 1, f);
            visit_leaves(one, depth + 1, f);
        }
    }
}
