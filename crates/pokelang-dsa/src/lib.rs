#![no_std]
extern crate alloc;

pub mod code_tree;
pub mod symbol_trie;

pub use code_tree::{CodeNode, CodeTree, ShapeError, NULL_NODE, ROOT};
pub use symbol_trie::{PrefixMatch, SymbolTrie};
