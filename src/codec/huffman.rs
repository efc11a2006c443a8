//! # Huffman Codec
//!
//! Variable-length prefix code built from the symbol frequencies of the
//! message itself.
//!
//! ## Tree construction
//! 1. Count every symbol of the message (delimiter included).
//! 2. Stable-sort the pending nodes by ascending frequency, so ties keep
//!    first-occurrence / creation order.
//! 3. Pop the two lightest nodes; the first takes branch `0`, the second
//!    branch `1`. Push their parent (frequency = sum) at the back.
//! 4. Repeat until a single root remains.
//!
//! A code is the sequence of branch labels from the root to a leaf, so the
//! table is prefix-free by construction. A tree with a single leaf would give
//! that symbol the empty code; it is assigned `"0"` instead.
//!
//! ## Decoding precondition
//! Decoding only works with the [`CodeTable`] produced for the message being
//! decoded. The table is returned by [`HuffmanCodec::from_text`] and must be
//! carried to the decoder explicitly; any other table yields garbage.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::{Codec, CodecKind, DELIMITER};
use crate::error::{Result, StegoError};

/// Symbol occurrence counts, kept in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(char, usize)>,
    index: HashMap<char, usize>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut table = Self::default();
        for symbol in text.chars() {
            table.add(symbol, 1);
        }
        table
    }

    pub fn add(&mut self, symbol: char, count: usize) {
        match self.index.get(&symbol) {
            Some(&slot) => self.entries[slot].1 += count,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push((symbol, count));
            }
        }
    }

    pub fn get(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// A node of the Huffman tree. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        freq: usize,
    },
    Internal {
        freq: usize,
        /// Symbols under this node, `one` side first.
        symbols: String,
        zero: Box<HuffmanNode>,
        one: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn freq(&self) -> usize {
        match self {
            Self::Leaf { freq, .. } | Self::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbols(&self) -> String {
        match self {
            Self::Leaf { symbol, .. } => symbol.to_string(),
            Self::Internal { symbols, .. } => symbols.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Builds the tree for `freqs`. Returns `None` for an empty table.
    pub fn build(freqs: &FrequencyTable) -> Option<Self> {
        let mut nodes: Vec<HuffmanNode> = freqs
            .iter()
            .map(|(symbol, freq)| HuffmanNode::Leaf { symbol, freq })
            .collect();

        while nodes.len() >= 2 {
            // sort_by_key is stable: equal weights keep creation order
            nodes.sort_by_key(HuffmanNode::freq);
            let zero = nodes.remove(0);
            let one = nodes.remove(0);
            let mut symbols = one.symbols();
            symbols.push_str(&zero.symbols());
            nodes.push(HuffmanNode::Internal {
                freq: zero.freq() + one.freq(),
                symbols,
                zero: Box::new(zero),
                one: Box::new(one),
            });
        }

        nodes.pop().map(|root| Self { root })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Walks the tree depth-first and collects the root-to-leaf path of every symbol.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();
        let mut stack = vec![(&self.root, String::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if path.is_empty() { "0".to_string() } else { path };
                    codes.insert(*symbol, code);
                }
                HuffmanNode::Internal { zero, one, .. } => {
                    stack.push((one.as_ref(), format!("{path}1")));
                    stack.push((zero.as_ref(), format!("{path}0")));
                }
            }
        }

        CodeTable { codes }
    }
}

/// Symbol → codeword mapping derived from a [`HuffmanTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_str()))
    }

    /// Writes the table as pretty-printed JSON.
    ///
    /// # Errors
    /// - [`StegoError::Io`] if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reads a table written by [`CodeTable::save`].
    ///
    /// # Errors
    /// - [`StegoError::Io`] if the file cannot be read
    /// - [`StegoError::Json`] if it does not hold a code table
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanCodec {
    table: CodeTable,
    delimiter: char,
}

impl HuffmanCodec {
    /// Builds a fresh tree and code table for `text`.
    ///
    /// `text` should already end with the delimiter. If it does not, the
    /// delimiter is still counted once so that decoding can find the end of
    /// the message.
    pub fn from_text(text: &str, delimiter: char) -> Self {
        let mut freqs = FrequencyTable::from_text(text);
        if freqs.get(delimiter).is_none() {
            freqs.add(delimiter, 1);
        }

        let table = HuffmanTree::build(&freqs)
            .map(|tree| tree.code_table())
            .unwrap_or_default();
        debug!(
            "Built Huffman code table: {} symbols from {} characters",
            table.len(),
            text.chars().count()
        );

        Self { table, delimiter }
    }

    /// Wraps a table produced by an earlier [`HuffmanCodec::from_text`].
    pub fn with_table(table: CodeTable, delimiter: char) -> Self {
        Self { table, delimiter }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn into_table(self) -> CodeTable {
        self.table
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::from_text("", DELIMITER)
    }
}

impl Codec for HuffmanCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Huffman
    }

    fn delimiter(&self) -> char {
        self.delimiter
    }

    /// # Errors
    /// - [`StegoError::Format`] if `text` contains a symbol missing from the table
    fn encode(&self, text: &str) -> Result<String> {
        let mut bits = String::new();
        for symbol in text.chars() {
            let code = self.table.code(symbol).ok_or_else(|| {
                StegoError::Format(format!("symbol {symbol:?} has no Huffman code"))
            })?;
            bits.push_str(code);
        }
        Ok(bits)
    }

    /// Accumulates bits until they spell a codeword; the delimiter's codeword
    /// ends the message. Leftover bits that never complete a codeword are dropped.
    fn decode(&self, bits: &str) -> String {
        let lookup: HashMap<&str, char> = self.table.iter().map(|(s, c)| (c, s)).collect();
        let terminator = self.table.code(self.delimiter);
        let longest = self.table.iter().map(|(_, c)| c.len()).max().unwrap_or(0);

        let mut text = String::new();
        let mut start = 0;
        for end in 1..=bits.len() {
            if end - start > longest {
                break;
            }
            let Some(pending) = bits.get(start..end) else {
                break;
            };
            if Some(pending) == terminator {
                break;
            }
            if let Some(&symbol) = lookup.get(pending) {
                text.push(symbol);
                start = end;
            }
        }
        text
    }
}
