use std::ascii;
use std::fmt;

use crate::code::{Code, CodeTable};
use crate::histogram::{Histogram, SYMBOL_COUNT};
use crate::min_heap::MinHeap;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        zero: NodeId,
        one: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

// Field order matters: the derived Ord compares weight first, then node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapKey {
    weight: u64,
    id: NodeId,
}

/// Huffman code tree stored as an arena of nodes.
///
/// Leaves are allocated first in ascending byte order and every merge appends
/// one internal node, so a node's id is also its insertion order. The min-heap
/// is keyed by `(weight, id)`: equal weights go to the earlier node, which
/// means the lower byte value among leaves and a leaf before any internal node.
/// The first node extracted becomes the zero-branch of the merged node.
///
/// Encoder and decoder both rebuild the tree through [`HuffmanTree::from_histogram`],
/// so the rule above is all they need to agree on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

impl HuffmanTree {
    /// Returns `None` for an all-zero histogram.
    pub fn from_histogram(histogram: &Histogram) -> Option<Self> {
        let mut nodes: Vec<HuffNode> = Vec::with_capacity(2 * SYMBOL_COUNT - 1);
        nodes.extend(
            histogram
                .symbols()
                .map(|(byte, weight)| HuffNode::Leaf { weight, byte }),
        );

        let keys = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| HeapKey {
                weight: node.weight(),
                id,
            })
            .collect();
        let mut heap = MinHeap::build(keys);

        loop {
            let zero = heap.extract_min()?;
            let Some(one) = heap.extract_min() else {
                return Some(HuffmanTree {
                    nodes,
                    root: zero.id,
                });
            };

            // Cannot overflow: every weight is a partial sum of the histogram total.
            let weight = zero.weight + one.weight;
            let id = nodes.len();
            nodes.push(HuffNode::Internal {
                weight,
                zero: zero.id,
                one: one.id,
            });
            heap.insert(HeapKey { weight, id });
        }
    }

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        Self::from_histogram(&Histogram::from_bytes(data))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn is_single_leaf(&self) -> bool {
        self.nodes[self.root].is_leaf()
    }

    /// Total weight, equal to the number of symbols the tree was built for.
    pub fn weight(&self) -> u64 {
        self.nodes[self.root].weight()
    }

    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes[id] {
            HuffNode::Leaf { byte, .. } => Some(byte),
            HuffNode::Internal { .. } => None,
        }
    }

    /// Follows one branch from `from`, returning `None` when no such child exists.
    ///
    /// A single-leaf tree has no branches; its only code is `0`, so bit 0 from the
    /// root lands back on the root (the leaf) and bit 1 has nowhere to go.
    pub fn step(&self, from: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[from] {
            HuffNode::Internal { zero, one, .. } => Some(if bit { one } else { zero }),
            HuffNode::Leaf { .. } if from == self.root && !bit => Some(self.root),
            HuffNode::Leaf { .. } => None,
        }
    }

    /// Assigns every leaf its root-to-leaf path, 0 for the zero-branch and 1 for
    /// the one-branch. A lone root leaf gets `0` instead of an empty code.
    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::empty();

        if let HuffNode::Leaf { byte, .. } = self.nodes[self.root] {
            table.insert(byte, Code::new().with_bit(false));
            return table;
        }

        let mut stack = vec![(self.root, Code::new())];
        while let Some((id, code)) = stack.pop() {
            match self.nodes[id] {
                HuffNode::Leaf { byte, .. } => table.insert(byte, code),
                HuffNode::Internal { zero, one, .. } => {
                    stack.push((one, code.with_bit(true)));
                    stack.push((zero, code.with_bit(false)));
                }
            }
        }
        table
    }

    fn fmt_node(&self, f: &mut fmt::Formatter, id: NodeId, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.nodes[id] {
            HuffNode::Leaf { byte, weight } => {
                writeln!(
                    f,
                    "{}{}-> Leaf: '{}' ({}) [weight: {}]",
                    indent,
                    label,
                    ascii::escape_default(byte),
                    byte,
                    weight
                )
            }
            HuffNode::Internal { weight, zero, one } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                self.fmt_node(f, zero, depth + 1, "0")?;
                self.fmt_node(f, one, depth + 1, "1")
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_node(f, self.root, 0, "root")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn codes(tree: &HuffmanTree) -> Vec<(u8, String)> {
        tree.generate_table()
            .iter()
            .map(|(byte, code)| (byte, code.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_histogram() {
        assert!(HuffmanTree::from_bytes(&[]).is_none());
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::from_bytes(b"zzzz").unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.weight(), 4);
        assert_eq!(codes(&tree), vec![(b'z', "0".to_string())]);

        assert_eq!(tree.step(tree.root(), false), Some(tree.root()));
        assert_eq!(tree.step(tree.root(), true), None);
    }

    #[test]
    fn test_two_symbols() {
        let tree = HuffmanTree::from_bytes(b"AAAB").unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.weight(), 4);
        // the rarer symbol is extracted first and takes the zero-branch
        assert_eq!(
            codes(&tree),
            vec![(b'A', "1".to_string()), (b'B', "0".to_string())]
        );
    }

    #[test]
    fn test_tie_break_prefers_earlier_node() {
        // a and b merge first (lowest byte values); c is then lighter than their parent
        let tree = HuffmanTree::from_bytes(b"abc").unwrap();
        assert_eq!(
            codes(&tree),
            vec![
                (b'a', "10".to_string()),
                (b'b', "11".to_string()),
                (b'c', "0".to_string()),
            ]
        );

        // leaf beats internal node of equal weight
        let tree = HuffmanTree::from_bytes(b"abcc").unwrap();
        assert_eq!(
            codes(&tree),
            vec![
                (b'a', "10".to_string()),
                (b'b', "11".to_string()),
                (b'c', "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let a = HuffmanTree::from_bytes(data).unwrap();
        let b = HuffmanTree::from_bytes(data).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.generate_table(), b.generate_table());
    }

    #[test]
    fn test_internal_weights_sum_children() {
        let tree = HuffmanTree::from_bytes(b"mississippi river").unwrap();
        for id in 0..tree.node_count() {
            if let HuffNode::Internal { weight, zero, one } = *tree.node(id) {
                assert_eq!(weight, tree.node(zero).weight() + tree.node(one).weight());
            }
        }
        assert_eq!(tree.weight(), 17);
    }

    #[test]
    fn test_all_byte_values_balanced() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = tree.generate_table();
        assert_eq!(table.len(), 256);
        assert!(table.iter().all(|(_, code)| code.len() == 8));
    }

    #[test]
    fn test_skewed_depth_and_prefix_free() {
        // Fibonacci weights give the deepest possible tree
        let mut counts = [0u64; SYMBOL_COUNT];
        let (mut a, mut b) = (1u64, 1u64);
        for count in counts.iter_mut().take(30) {
            *count = a;
            let next = a + b;
            a = b;
            b = next;
        }
        let histogram = Histogram::from_counts(counts).unwrap();
        let tree = HuffmanTree::from_histogram(&histogram).unwrap();
        let table = tree.generate_table();

        assert_eq!(table.len(), 30);
        assert_eq!(table.max_code_len(), 29);
        for (x, cx) in table.iter() {
            for (y, cy) in table.iter() {
                if x != y {
                    assert!(!cx.is_prefix_of(cy));
                }
            }
        }
    }

    #[test]
    fn test_step_walks_codes() {
        let tree = HuffmanTree::from_bytes(b"hello world").unwrap();
        for (byte, code) in tree.generate_table().iter() {
            let mut at = tree.root();
            for bit in code.bits() {
                at = tree.step(at, bit).unwrap();
            }
            assert_eq!(tree.symbol(at), Some(byte));
            // leaves have no children
            assert_eq!(tree.step(at, false), None);
        }
    }

    #[test]
    fn test_display() {
        let tree = HuffmanTree::from_bytes(b"AAAB").unwrap();
        let rendered = tree.to_string();
        assert_eq!(
            rendered,
            "root-> Internal [weight: 4]\n  0-> Leaf: 'B' (66) [weight: 1]\n  1-> Leaf: 'A' (65) [weight: 3]\n"
        );
    }
}
