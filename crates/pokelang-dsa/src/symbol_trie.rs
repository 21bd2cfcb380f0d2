use alloc::vec::Vec;
use core::fmt;

use crate::code_tree::NULL_NODE;

/// A node in the character trie.
///
/// Edges are kept sorted by character so lookups are a binary search over a
/// handful of entries rather than a hash probe.
#[derive(Clone, Debug)]
struct TrieNode {
    edges: Vec<(char, u32)>,
    /// Symbol whose spelling ends here (`NULL_NODE` = none).
    terminal: u32,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            terminal: NULL_NODE,
        }
    }

    #[inline(always)]
    fn child(&self, c: char) -> Option<u32> {
        self.edges
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| self.edges[i].1)
    }
}

/// A vocabulary symbol that spells a prefix of the queried text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Byte length of the matched prefix.
    pub len: usize,
    /// Vocabulary index of the symbol.
    pub symbol: u32,
}

/// Indexes one language's vocabulary by spelling.
#[derive(Clone)]
pub struct SymbolTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl fmt::Debug for SymbolTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTrie")
            .field("nodes_len", &self.nodes.len())
            .field("symbols", &self.len)
            .finish()
    }
}

impl Default for SymbolTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTrie {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(TrieNode::new());
        Self { nodes, len: 0 }
    }

    /// Marks `spelling` as symbol `symbol`.
    ///
    /// Returns the symbol previously stored under the same spelling, which is
    /// replaced. An empty spelling is ignored and returns `None`.
    pub fn insert(&mut self, spelling: &str, symbol: u32) -> Option<u32> {
        if spelling.is_empty() {
            return None;
        }
        let mut curr = 0usize;
        for c in spelling.chars() {
            curr = match self.nodes[curr].child(c) {
                Some(next) => next as usize,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::new());
                    let edges = &mut self.nodes[curr].edges;
                    let pos = edges.partition_point(|&(k, _)| k < c);
                    edges.insert(pos, (c, new_idx));
                    new_idx as usize
                }
            };
        }
        let slot = &mut self.nodes[curr].terminal;
        let prev = *slot;
        *slot = symbol;
        if prev == NULL_NODE {
            self.len += 1;
            None
        } else {
            Some(prev)
        }
    }

    /// Exact lookup of a spelling.
    pub fn get(&self, spelling: &str) -> Option<u32> {
        let mut curr = 0usize;
        for c in spelling.chars() {
            curr = self.nodes[curr].child(c)? as usize;
        }
        let terminal = self.nodes[curr].terminal;
        (terminal != NULL_NODE).then_some(terminal)
    }

    /// Every symbol spelling a prefix of `text`, in the order the walk
    /// discovers them (shorter before longer).
    pub fn prefixes(&self, text: &str) -> Vec<PrefixMatch> {
        let mut found = Vec::new();
        let mut curr = 0usize;
        for (offset, c) in text.char_indices() {
            match self.nodes[curr].child(c) {
                Some(next) => curr = next as usize,
                None => break,
            }
            let terminal = self.nodes[curr].terminal;
            if terminal != NULL_NODE {
                found.push(PrefixMatch {
                    len: offset + c.len_utf8(),
                    symbol: terminal,
                });
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
