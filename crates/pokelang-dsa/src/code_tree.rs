use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Sentinel for "no node" in child, parent and symbol slots.
pub const NULL_NODE: u32 = u32::MAX;

/// Arena offset of the root node.
pub const ROOT: u32 = 0;

/// A node in the linearized binary code tree.
///
/// Children are 32-bit offsets into the `nodes` pool, `children[0]` is the
/// branch taken on bit `0`. Internal nodes carry `symbol == NULL_NODE`,
/// leaves carry `children == [NULL_NODE; 2]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct CodeNode {
    pub children: [u32; 2],
    /// Non-owning upward link, only walked when codes are derived.
    pub parent: u32,
    /// Vocabulary index of the symbol stored at a leaf.
    pub symbol: u32,
}

static_assertions::assert_eq_size!(CodeNode, [u8; 16]);

impl CodeNode {
    const fn pending(parent: u32) -> Self {
        Self {
            children: [NULL_NODE, NULL_NODE],
            parent,
            symbol: NULL_NODE,
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.symbol != NULL_NODE
    }
}

/// Rejections raised while rebuilding a tree from its pre-order markers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("tree marker {value} at index {index} is not 0 or 1")]
    InvalidMarker { index: usize, value: i64 },

    #[error("tree has {leaves} leaf markers but {symbols} symbols")]
    LeafCountMismatch { leaves: usize, symbols: usize },

    #[error("tree shape is complete before marker index {index}")]
    TrailingMarkers { index: usize },

    #[error("tree shape is incomplete: {pending} positions still need a marker")]
    IncompleteShape { pending: usize },

    #[error("tree root must split into two children")]
    RootIsLeaf,
}

/// A prefix-free binary code over a closed vocabulary.
///
/// ## Layout
/// Nodes live in a flat arena and are linked by `u32` offsets. The tree is
/// built once from a pre-order description and never mutated afterwards, so
/// it can be shared freely between translation threads.
#[derive(Clone)]
pub struct CodeTree {
    nodes: Vec<CodeNode>,
    symbols: Vec<String>,
    /// Symbol index -> leaf offset.
    leaves: Vec<u32>,
    /// Symbol index -> code string of `'0'`/`'1'`.
    codes: Vec<String>,
}

impl fmt::Debug for CodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeTree")
            .field("nodes_len", &self.nodes.len())
            .field("symbols_len", &self.symbols.len())
            .finish()
    }
}

impl CodeTree {
    /// Rebuilds a tree from its pre-order shape.
    ///
    /// `markers` holds one entry per node: `0` splits the node into two
    /// children, `1` makes it a leaf holding the next unused entry of
    /// `symbols`. Construction uses an explicit work-list, so hostile input
    /// cannot drive recursion depth.
    pub fn from_preorder(markers: &[i64], symbols: Vec<String>) -> Result<Self, ShapeError> {
        let mut leaves = 0usize;
        for (index, &value) in markers.iter().enumerate() {
            match value {
                0 => {}
                1 => leaves += 1,
                _ => return Err(ShapeError::InvalidMarker { index, value }),
            }
        }
        if leaves != symbols.len() {
            return Err(ShapeError::LeafCountMismatch {
                leaves,
                symbols: symbols.len(),
            });
        }
        if markers.first() == Some(&1) {
            return Err(ShapeError::RootIsLeaf);
        }

        let mut nodes = Vec::with_capacity(markers.len());
        nodes.push(CodeNode::pending(NULL_NODE));
        let mut leaf_of = Vec::with_capacity(symbols.len());
        // Pending positions, popped from the end: the first child is pushed
        // last so it receives the next marker.
        let mut pending: Vec<u32> = Vec::with_capacity(16);
        pending.push(ROOT);

        for (index, &marker) in markers.iter().enumerate() {
            let Some(curr) = pending.pop() else {
                return Err(ShapeError::TrailingMarkers { index });
            };
            if marker == 0 {
                let left = nodes.len() as u32;
                let right = left + 1;
                nodes.push(CodeNode::pending(curr));
                nodes.push(CodeNode::pending(curr));
                nodes[curr as usize].children = [left, right];
                pending.push(right);
                pending.push(left);
            } else {
                nodes[curr as usize].symbol = leaf_of.len() as u32;
                leaf_of.push(curr);
            }
        }
        if !pending.is_empty() {
            return Err(ShapeError::IncompleteShape {
                pending: pending.len(),
            });
        }

        let codes = leaf_of.iter().map(|&leaf| derive_code(&nodes, leaf)).collect();
        Ok(Self {
            nodes,
            symbols,
            leaves: leaf_of,
            codes,
        })
    }

    #[inline(always)]
    pub fn root(&self) -> u32 {
        ROOT
    }

    #[inline(always)]
    pub fn get_node(&self, idx: u32) -> Option<&CodeNode> {
        self.nodes.get(idx as usize)
    }

    /// Follows one branch bit from `node`. `None` when `node` is a leaf.
    #[inline(always)]
    pub fn step(&self, node: u32, bit: bool) -> Option<u32> {
        let next = self.nodes.get(node as usize)?.children[bit as usize];
        (next != NULL_NODE).then_some(next)
    }

    /// Symbol index stored at `node`, if it is a leaf.
    #[inline(always)]
    pub fn leaf_symbol(&self, node: u32) -> Option<u32> {
        self.nodes
            .get(node as usize)
            .filter(|n| n.is_leaf())
            .map(|n| n.symbol)
    }

    pub fn symbol(&self, id: u32) -> Option<&str> {
        self.symbols.get(id as usize).map(String::as_str)
    }

    pub fn code(&self, id: u32) -> Option<&str> {
        self.codes.get(id as usize).map(String::as_str)
    }

    pub fn leaf(&self, id: u32) -> Option<u32> {
        self.leaves.get(id as usize).copied()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `(symbol, code)` pairs in vocabulary order.
    pub fn codes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.symbols
            .iter()
            .zip(self.codes.iter())
            .map(|(s, c)| (s.as_str(), c.as_str()))
    }

    /// Nearest leaf below `node`, breadth-first.
    ///
    /// The first child of every node is queued before the second, so among
    /// equally shallow leaves the one reached through more `0` branches at
    /// the earliest divergence wins. Output compatibility depends on this
    /// order.
    pub fn nearest_leaf(&self, node: u32) -> Option<u32> {
        let mut queue = VecDeque::with_capacity(8);
        queue.push_back(node);
        while let Some(curr) = queue.pop_front() {
            let n = self.nodes.get(curr as usize)?;
            if n.is_leaf() {
                return Some(curr);
            }
            for &child in &n.children {
                if child != NULL_NODE {
                    queue.push_back(child);
                }
            }
        }
        None
    }
}

/// Walks parent links from `leaf` to the root and reverses the branch bits.
fn derive_code(nodes: &[CodeNode], leaf: u32) -> String {
    let mut bits = Vec::with_capacity(16);
    let mut curr = leaf;
    while curr != ROOT {
        let parent = nodes[curr as usize].parent;
        bits.push(if nodes[parent as usize].children[1] == curr { '1' } else { '0' });
        curr = parent;
    }
    bits.iter().rev().collect()
}

#[cfg(kani)]
mod proofs {
    use super::*;
    use alloc::vec;

    #[kani::proof]
    #[kani::unwind(8)]
    fn prove_step_never_leaves_arena() {
        let tree = CodeTree::from_preorder(
            &[0, 1, 0, 1, 1],
            vec![String::from("a"), String::from("b"), String::from("c")],
        )
        .unwrap();
        let node: u32 = kani::any();
        let bit: bool = kani::any();

        // Every reachable offset must resolve inside the node pool.
        if let Some(next) = tree.step(node, bit) {
            assert!(tree.get_node(next).is_some());
        }
    }
}
