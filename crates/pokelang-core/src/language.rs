use pokelang_dsa::{CodeTree, SymbolTrie};
use std::borrow::Cow;
use std::collections::HashSet;

use crate::config::LanguageDocument;
use crate::error::{DefinitionError, PokelangError, Result};

/// One loaded language: its prefix code, its spelling index and its policy
/// flags.
///
/// ## Invariant
/// `tree` and `trie` hold the same symbol set: vocabulary index `i` is the
/// leaf consumed by the `i`-th leaf marker and the trie terminal for the
/// folded spelling of `symbols[i]`. Both are immutable after `load`.
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    name: String,
    case_sensitive: bool,
    drop_extra: bool,
    tree: CodeTree,
    trie: SymbolTrie,
}

impl LanguageDefinition {
    /// Validates a document and builds its code tree and symbol trie.
    pub fn load(doc: LanguageDocument) -> std::result::Result<Self, DefinitionError> {
        let LanguageDocument {
            name,
            symbols,
            tree,
            drop_extra,
            case_sensitive,
        } = doc;
        if name.trim().is_empty() {
            return Err(DefinitionError::EmptyName);
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        let mut folded = Vec::with_capacity(symbols.len());
        for (index, symbol) in symbols.into_iter().enumerate() {
            if symbol.is_empty() {
                return Err(DefinitionError::EmptySymbol {
                    language: name,
                    index,
                });
            }
            let label = if case_sensitive {
                symbol
            } else {
                symbol.to_lowercase()
            };
            if !seen.insert(label.clone()) {
                return Err(DefinitionError::DuplicateSymbol {
                    language: name,
                    symbol: label,
                });
            }
            folded.push(label);
        }

        let tree = CodeTree::from_preorder(&tree, folded).map_err(|source| {
            DefinitionError::Shape {
                language: name.clone(),
                source,
            }
        })?;

        let mut trie = SymbolTrie::new();
        for (id, label) in tree.symbols().iter().enumerate() {
            trie.insert(label, id as u32);
        }

        tracing::debug!(
            "Loaded language '{}': {} symbols, {} tree nodes",
            name,
            tree.symbol_count(),
            tree.node_count()
        );

        Ok(Self {
            name,
            case_sensitive,
            drop_extra,
            tree,
            trie,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn drop_extra(&self) -> bool {
        self.drop_extra
    }

    pub fn tree(&self) -> &CodeTree {
        &self.tree
    }

    pub fn trie(&self) -> &SymbolTrie {
        &self.trie
    }

    /// Code string of a vocabulary symbol, looked up by (unfolded) spelling.
    pub fn code_of(&self, symbol: &str) -> Option<&str> {
        let id = self.trie.get(&self.fold(symbol))?;
        self.tree.code(id)
    }

    /// Applies this language's case policy.
    pub fn fold<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    /// Splits a word into vocabulary symbol indices.
    ///
    /// Greedy with one symbol of lookahead: at each position the candidates
    /// are tried shortest first, and a candidate is taken if it ends the word
    /// or leaves a suffix that at least one symbol can start. There is no
    /// deeper backtracking, so some decomposable words are rejected.
    pub fn segment(&self, word: &str) -> Result<Vec<u32>> {
        let folded = self.fold(word);
        let text = folded.as_ref();
        let mut out = Vec::with_capacity(text.len());
        let mut cursor = 0usize;
        let mut candidates = self.trie.prefixes(text);

        while cursor < text.len() {
            let mut accepted = None;
            for m in &candidates {
                let next = cursor + m.len;
                if next == text.len() {
                    accepted = Some((m.symbol, next, Vec::new()));
                    break;
                }
                let ahead = self.trie.prefixes(&text[next..]);
                if !ahead.is_empty() {
                    accepted = Some((m.symbol, next, ahead));
                    break;
                }
            }
            let Some((symbol, next, ahead)) = accepted else {
                return Err(PokelangError::Segmentation {
                    word: text.to_string(),
                    language: self.name.clone(),
                    offset: text[..cursor].chars().count(),
                });
            };
            out.push(symbol);
            cursor = next;
            candidates = ahead;
        }
        Ok(out)
    }

    /// Encodes a word as the concatenation of its symbols' codes.
    pub fn encode(&self, word: &str) -> Result<String> {
        let symbols = self.segment(word)?;
        let mut bits = String::with_capacity(symbols.len() * 4);
        for id in symbols {
            // Every segmented id is a vocabulary index with a code.
            if let Some(code) = self.tree.code(id) {
                bits.push_str(code);
            }
        }
        Ok(bits)
    }

    /// Decodes a bit-string into symbol indices.
    ///
    /// Trailing bits that stop inside the tree are dropped when `drop_extra`
    /// is set, otherwise they resolve to the nearest leaf below the point
    /// where decoding stopped.
    pub fn decode_symbols(&self, bits: &str) -> Result<Vec<u32>> {
        let root = self.tree.root();
        let mut out = Vec::with_capacity(bits.len() / 2 + 1);
        let mut curr = root;

        for (index, character) in bits.chars().enumerate() {
            let bit = match character {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(PokelangError::DecodeBit {
                        language: self.name.clone(),
                        character,
                        index,
                    })
                }
            };
            // Loaded trees split at the root and every split has two
            // children, so a step from a non-leaf always lands.
            curr = self.tree.step(curr, bit).unwrap_or(root);
            if let Some(symbol) = self.tree.leaf_symbol(curr) {
                out.push(symbol);
                curr = root;
            }
        }

        if curr != root {
            if self.drop_extra {
                tracing::trace!("'{}': dropping incomplete code tail", self.name);
            } else if let Some(symbol) = self
                .tree
                .nearest_leaf(curr)
                .and_then(|leaf| self.tree.leaf_symbol(leaf))
            {
                out.push(symbol);
            }
        }
        Ok(out)
    }

    /// Decodes a bit-string into the joined symbol spellings.
    pub fn decode(&self, bits: &str) -> Result<String> {
        let symbols = self.decode_symbols(bits)?;
        Ok(self.spell(&symbols))
    }

    /// Joins symbol indices into their spellings.
    pub fn spell(&self, symbols: &[u32]) -> String {
        symbols
            .iter()
            .filter_map(|&id| self.tree.symbol(id))
            .collect()
    }
}

impl TryFrom<LanguageDocument> for LanguageDefinition {
    type Error = DefinitionError;

    fn try_from(doc: LanguageDocument) -> std::result::Result<Self, Self::Error> {
        Self::load(doc)
    }
}
