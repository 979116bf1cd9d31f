//! Code table derived from a [`HuffmanTree`].
//!
//! Codes are the root-to-leaf paths (`0` = zero-branch, `1` = one-branch), so
//! they are prefix-free by construction. A one-symbol alphabet has a leaf at
//! the root and no path to speak of; that symbol is given the code `0`.

use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::ALPHABET_SIZE;
use crate::tree::{HuffmanTree, Node};

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A non-empty bit string of at most 64 bits, stored right-aligned in
/// `value` and emitted most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    value: u64,
    length: u8,
}

impl Code {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.length <= other.length && other.value >> (other.length - self.length) == self.value
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.length).rev() {
            let bit = (self.value >> shift) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Mapping from symbol to code, indexed by byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Walk `tree` depth-first and record the path to every leaf.
    ///
    /// # Errors
    /// `HuffmanError::CodeTooLong` if a leaf sits deeper than 64 levels.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self {
            codes: [None; ALPHABET_SIZE],
        };

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = Some(Code {
                    value: 0,
                    length: 1,
                });
            }
            root => table.assign(root, 0, 0)?,
        }

        Ok(table)
    }

    fn assign(&mut self, node: &Node, value: u64, depth: usize) -> Result<()> {
        match node {
            Node::Leaf { symbol, .. } => {
                self.codes[*symbol as usize] = Some(Code {
                    value,
                    length: depth as u8,
                });
            }
            Node::Internal { zero, one, .. } => {
                // Header counts are u32, which keeps depth under 58. Only
                // in-memory u64 tables can get this deep.
                if depth >= MAX_CODE_LEN {
                    return Err(HuffmanError::CodeTooLong { length: depth + 1 }.into());
                }
                self.assign(zero, value << 1, depth + 1)?;
                self.assign(one, (value << 1) | 1, depth + 1)?;
            }
        }
        Ok(())
    }

    /// Code for `symbol`, if it occurred in the tree.
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Code for `symbol`, or `HuffmanError::UnknownSymbol`.
    pub fn code_for(&self, symbol: u8) -> Result<Code> {
        self.get(symbol)
            .ok_or_else(|| HuffmanError::UnknownSymbol { symbol }.into())
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }
}
