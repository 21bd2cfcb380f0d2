//! # DSA Layer Tests: CodeTree, SymbolTrie
//!
//! Validates pre-order tree reconstruction, code derivation, shape
//! rejection, nearest-leaf resolution and prefix queries.

use pokelang_dsa::{CodeTree, ShapeError, SymbolTrie};
use std::time::Instant;

fn owned(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// `[0, 1, 1]`: the root splits into leaf "a" (bit 0) and leaf "b" (bit 1).
#[test]
fn test_two_leaf_tree_codes() {
    let t = Instant::now();

    let tree = CodeTree::from_preorder(&[0, 1, 1], owned(&["a", "b"])).unwrap();

    assert_eq!(tree.symbol_count(), 2);
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.code(0), Some("0"));
    assert_eq!(tree.code(1), Some("1"));

    let overhead = t.elapsed();
    println!("test_two_leaf_tree_codes: Testing Overhead = {:?}", overhead);
}

/// Leaves consume symbols in pre-order, the first child being bit 0.
#[test]
fn test_preorder_symbol_assignment() {
    let t = Instant::now();

    let tree = CodeTree::from_preorder(&[0, 1, 0, 0, 1, 1, 1], owned(&["a", "b", "c", "d"])).unwrap();
    let codes: Vec<(&str, &str)> = tree.codes().collect();

    assert_eq!(
        codes,
        vec![("a", "0"), ("b", "100"), ("c", "101"), ("d", "11")]
    );

    let overhead = t.elapsed();
    println!("test_preorder_symbol_assignment: Testing Overhead = {:?}", overhead);
}

/// No code is a prefix of another and every symbol has a leaf.
#[test]
fn test_codes_are_prefix_free() {
    let t = Instant::now();

    let markers: [i64; 51] = [
        0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 0, 1, 1, 0, 0, 0, 1, 1, 1, 1, 0, 0,
        0, 1, 1, 0, 1, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1,
    ];
    let symbols: Vec<String> = "tvzqxjkfwmucresnhibpygoald".chars().map(String::from).collect();
    let tree = CodeTree::from_preorder(&markers, symbols).unwrap();

    let codes: Vec<&str> = tree.codes().map(|(_, c)| c).collect();
    assert_eq!(codes.len(), 26);
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a), "{a} is a prefix of {b}");
            }
        }
    }
    // Spot checks against the letter-frequency table.
    let code_of = |s: &str| tree.codes().find(|(sym, _)| *sym == s).map(|(_, c)| c);
    assert_eq!(code_of("e"), Some("011"));
    assert_eq!(code_of("t"), Some("000"));
    assert_eq!(code_of("z"), Some("001001000"));
    assert_eq!(code_of("d"), Some("11111"));

    let overhead = t.elapsed();
    println!("test_codes_are_prefix_free: Testing Overhead = {:?}", overhead);
}

#[test]
fn test_shape_rejections() {
    let t = Instant::now();

    assert_eq!(
        CodeTree::from_preorder(&[0, 1, 2], owned(&["a", "b"])).unwrap_err(),
        ShapeError::InvalidMarker { index: 2, value: 2 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[0, -1, 1], owned(&["a", "b"])).unwrap_err(),
        ShapeError::InvalidMarker { index: 1, value: -1 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[0, 1, 1], owned(&["a", "b", "c"])).unwrap_err(),
        ShapeError::LeafCountMismatch { leaves: 2, symbols: 3 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[0, 1, 1, 0, 1, 1], owned(&["a", "b", "c", "d"])).unwrap_err(),
        ShapeError::TrailingMarkers { index: 3 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[0, 0, 1, 1], owned(&["a", "b"])).unwrap_err(),
        ShapeError::IncompleteShape { pending: 1 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[], Vec::new()).unwrap_err(),
        ShapeError::IncompleteShape { pending: 1 }
    );
    assert_eq!(
        CodeTree::from_preorder(&[1], owned(&["a"])).unwrap_err(),
        ShapeError::RootIsLeaf
    );

    let overhead = t.elapsed();
    println!("test_shape_rejections: Testing Overhead = {:?}", overhead);
}

/// Bit-by-bit traversal reaches the leaf named by each code.
#[test]
fn test_step_follows_codes() {
    let t = Instant::now();

    let tree = CodeTree::from_preorder(&[0, 1, 0, 0, 1, 1, 1], owned(&["a", "b", "c", "d"])).unwrap();
    for id in 0..4u32 {
        let mut node = tree.root();
        for bit in tree.code(id).unwrap().chars() {
            node = tree.step(node, bit == '1').unwrap();
        }
        assert_eq!(tree.leaf_symbol(node), Some(id));
        assert_eq!(tree.leaf(id), Some(node));
        // Leaves have no children.
        assert_eq!(tree.step(node, false), None);
    }

    let overhead = t.elapsed();
    println!("test_step_follows_codes: Testing Overhead = {:?}", overhead);
}

/// The shallowest leaf wins, first child before second on ties.
#[test]
fn test_nearest_leaf_breadth_first() {
    let t = Instant::now();

    // a=0, b=100, c=101, d=11
    let tree = CodeTree::from_preorder(&[0, 1, 0, 0, 1, 1, 1], owned(&["a", "b", "c", "d"])).unwrap();
    let one = tree.step(tree.root(), true).unwrap();
    let leaf = tree.nearest_leaf(one).unwrap();
    assert_eq!(tree.leaf_symbol(leaf), Some(3), "d is one level closer than b");

    let ten = tree.step(one, false).unwrap();
    let leaf = tree.nearest_leaf(ten).unwrap();
    assert_eq!(tree.leaf_symbol(leaf), Some(1), "b precedes c at equal depth");

    // a=00, b=01, c=10, d=11
    let balanced = CodeTree::from_preorder(&[0, 0, 1, 1, 0, 1, 1], owned(&["a", "b", "c", "d"])).unwrap();
    let leaf = balanced.nearest_leaf(balanced.root()).unwrap();
    assert_eq!(balanced.leaf_symbol(leaf), Some(0));

    let overhead = t.elapsed();
    println!("test_nearest_leaf_breadth_first: Testing Overhead = {:?}", overhead);
}

/// Deep left spines build without recursion.
#[test]
fn test_deep_tree_builds() {
    let t = Instant::now();

    let depth = 2_000;
    let mut markers: Vec<i64> = Vec::with_capacity(depth * 2 + 1);
    for _ in 0..depth {
        markers.push(0);
        markers.push(1);
    }
    markers.push(1);
    let symbols: Vec<String> = (0..=depth).map(|i| format!("s{i}")).collect();

    let tree = CodeTree::from_preorder(&markers, symbols).unwrap();
    assert_eq!(tree.code(0), Some("0"));
    assert_eq!(tree.code(depth as u32).unwrap().len(), depth);

    let overhead = t.elapsed();
    println!("test_deep_tree_builds: Testing Overhead = {:?}", overhead);
}

/// Prefix matches come back shortest first with byte lengths.
#[test]
fn test_trie_prefix_discovery_order() {
    let t = Instant::now();

    let mut trie = SymbolTrie::new();
    assert_eq!(trie.insert("pi", 0), None);
    assert_eq!(trie.insert("pii", 1), None);
    assert_eq!(trie.insert("ka", 2), None);
    assert_eq!(trie.insert("chu", 3), None);
    assert_eq!(trie.len(), 4);

    let found: Vec<(usize, u32)> = trie.prefixes("piika").iter().map(|m| (m.len, m.symbol)).collect();
    assert_eq!(found, vec![(2, 0), (3, 1)]);

    assert!(trie.prefixes("xyz").is_empty());
    assert!(trie.prefixes("").is_empty());
    assert!(trie.prefixes("p").is_empty());

    assert_eq!(trie.get("pii"), Some(1));
    assert_eq!(trie.get("p"), None);
    assert_eq!(trie.get("piik"), None);

    let overhead = t.elapsed();
    println!("test_trie_prefix_discovery_order: Testing Overhead = {:?}", overhead);
}

#[test]
fn test_trie_multibyte_and_replacement() {
    let t = Instant::now();

    let mut trie = SymbolTrie::new();
    trie.insert("ä", 0);
    trie.insert("äb", 1);
    assert_eq!(trie.insert("ä", 7), Some(0));
    assert_eq!(trie.len(), 2);

    let found: Vec<(usize, u32)> = trie.prefixes("äbc").iter().map(|m| (m.len, m.symbol)).collect();
    assert_eq!(found, vec![(2, 7), (3, 1)]);

    assert_eq!(trie.insert("", 9), None);
    assert_eq!(trie.len(), 2);

    let overhead = t.elapsed();
    println!("test_trie_multibyte_and_replacement: Testing Overhead = {:?}", overhead);
}
