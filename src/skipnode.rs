//! Nodes of the skip list, and the slab in which a list keeps them.

use std::{borrow::Borrow, cmp::Ordering, iter::FusedIterator, ops};

use slab::Slab;

// ////////////////////////////////////////////////////////////////////////////
// NodeRef / NodeKey
// ////////////////////////////////////////////////////////////////////////////

/// Handle to a node owned by a [`SkipList`][crate::SkipList].
///
/// Handles are only meaningful for the list which handed them out. Each one
/// pairs a slab key with the stamp its node received on allocation, so a
/// handle to a deleted node never resolves to whichever node later reuses the
/// same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    key: usize,
    stamp: u64,
}

/// The key held by a node.
///
/// The header and finish sentinels carry the keys $-\infty$ and $+\infty$
/// respectively, so that every ordinary key sorts strictly between them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey<K> {
    /// Key of the header sentinel.
    NegInfinity,
    /// Key of an ordinary node.
    Key(K),
    /// Key of the finish sentinel.
    PosInfinity,
}

impl<K> NodeKey<K> {
    /// Returns the ordinary key, or `None` for a sentinel.
    #[inline]
    pub fn as_key(&self) -> Option<&K> {
        match self {
            NodeKey::Key(key) => Some(key),
            NodeKey::NegInfinity | NodeKey::PosInfinity => None,
        }
    }

    /// Compares this node key against a plain key.
    #[inline]
    pub fn cmp_key<Q>(&self, key: &Q) -> Ordering
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self {
            NodeKey::NegInfinity => Ordering::Less,
            NodeKey::Key(own) => own.borrow().cmp(key),
            NodeKey::PosInfinity => Ordering::Greater,
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// A single entry of the skip list.
///
/// The node's level is the length of its `forward` vector: a node of level
/// $n$ is linked on levels $0, \ldots, n - 1$ and nowhere above. The level is
/// fixed at construction. Only the header grows or shrinks, as the list's own
/// level changes.
///
/// Queries beyond the node's level resolve to the `default` reference, which
/// is the finish sentinel for every node but finish itself.
#[derive(Debug)]
pub struct SkipNode<K, V> {
    key: NodeKey<K>,
    // Only `None` for the two sentinels.
    value: Option<V>,
    forward: Vec<NodeRef>,
    default: Option<NodeRef>,
    // Assigned by `Nodes::insert`.
    stamp: u64,
}

impl<K, V> SkipNode<K, V> {
    /// Create a header sentinel spanning no levels yet.
    pub(crate) fn header(finish: NodeRef) -> Self {
        SkipNode {
            key: NodeKey::NegInfinity,
            value: None,
            forward: Vec::new(),
            default: Some(finish),
            stamp: 0,
        }
    }

    /// Create a finish sentinel.
    pub(crate) fn finish() -> Self {
        SkipNode {
            key: NodeKey::PosInfinity,
            value: None,
            forward: Vec::new(),
            default: None,
            stamp: 0,
        }
    }

    /// Create an ordinary node whose level is `forward.len()`.
    pub(crate) fn new(key: K, value: V, forward: Vec<NodeRef>, finish: NodeRef) -> Self {
        SkipNode {
            key: NodeKey::Key(key),
            value: Some(value),
            forward,
            default: Some(finish),
            stamp: 0,
        }
    }

    /// The node's key, or `None` for a sentinel.
    #[inline]
    pub fn key(&self) -> Option<&K> {
        self.key.as_key()
    }

    /// The node's key, including the sentinel keys.
    #[inline]
    pub fn node_key(&self) -> &NodeKey<K> {
        &self.key
    }

    /// The node's value, or `None` for a sentinel.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Mutable access to the node's value, or `None` for a sentinel.
    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Number of levels on which this node is linked.
    #[inline]
    pub fn level(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` for the header and finish sentinels.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.key.as_key().is_none()
    }

    /// The next node on `level`.
    ///
    /// Levels above this node's own level resolve to the node's default
    /// reference. Only the finish sentinel returns `None`.
    #[inline]
    pub fn forward_pointer_at(&self, level: usize) -> Option<NodeRef> {
        self.forward.get(level).copied().or(self.default)
    }

    /// Consumes the node, returning its key and value.
    #[inline]
    pub fn into_inner(self) -> Option<(K, V)> {
        match (self.key, self.value) {
            (NodeKey::Key(key), Some(value)) => Some((key, value)),
            _ => None,
        }
    }

    /// Replace the stored value, returning a reference to the new one.
    pub(crate) fn set_value(&mut self, value: V) -> &mut V {
        self.value.insert(value)
    }

    /// Point the link on `level` at `target`.
    ///
    /// `level` must be below the node's level.
    pub(crate) fn set_forward(&mut self, level: usize, target: NodeRef) {
        self.forward[level] = target;
    }

    /// Extend the node up to `level` links, each new one pointing at `target`.
    pub(crate) fn grow(&mut self, level: usize, target: NodeRef) {
        if level > self.forward.len() {
            self.forward.resize(level, target);
        }
    }

    /// Drop every trailing link which points directly at `target`, returning
    /// how many were dropped.
    pub(crate) fn truncate(&mut self, target: NodeRef) -> usize {
        let before = self.forward.len();
        while self.forward.last() == Some(&target) {
            self.forward.pop();
        }
        before - self.forward.len()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Node slab
// ////////////////////////////////////////////////////////////////////////////

/// Owner of every node in a list.
///
/// Deleted nodes are moved out of the slab immediately and their slot is
/// recycled by a later allocation. Every allocation draws a fresh stamp, which
/// is what tells a live handle apart from a stale one for the same slot.
#[derive(Debug)]
pub(crate) struct Nodes<K, V> {
    slab: Slab<SkipNode<K, V>>,
    next_stamp: u64,
}

impl<K, V> Nodes<K, V> {
    pub(crate) fn new() -> Self {
        Nodes {
            slab: Slab::new(),
            next_stamp: 0,
        }
    }

    /// Take ownership of `node`, returning its handle.
    pub(crate) fn insert(&mut self, mut node: SkipNode<K, V>) -> NodeRef {
        let stamp = self.next_stamp;
        self.next_stamp = self.next_stamp.wrapping_add(1);
        node.stamp = stamp;
        NodeRef {
            key: self.slab.insert(node),
            stamp,
        }
    }

    /// Give up ownership of the node behind `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was already removed.
    pub(crate) fn remove(&mut self, node: NodeRef) -> SkipNode<K, V> {
        if self.get(node).is_none() {
            unreachable!("dangling node reference {node:?}");
        }
        self.slab.remove(node.key)
    }

    /// The node behind `node`, or `None` once it has been removed.
    pub(crate) fn get(&self, node: NodeRef) -> Option<&SkipNode<K, V>> {
        self.slab
            .get(node.key)
            .filter(|found| found.stamp == node.stamp)
    }

    fn get_mut(&mut self, node: NodeRef) -> Option<&mut SkipNode<K, V>> {
        self.slab
            .get_mut(node.key)
            .filter(|found| found.stamp == node.stamp)
    }

    /// Drop every node. Stamps keep counting, so no earlier handle resolves
    /// again.
    pub(crate) fn clear(&mut self) {
        self.slab.clear();
    }

    /// Number of live nodes, sentinels included.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slab.len()
    }

    /// Walk `level` starting at (and including) `origin`.
    pub(crate) fn traverse_from(&self, origin: NodeRef, level: usize) -> Traverse<'_, K, V> {
        Traverse {
            nodes: self,
            next: Some(origin),
            level,
        }
    }
}

impl<K, V> ops::Index<NodeRef> for Nodes<K, V> {
    type Output = SkipNode<K, V>;

    fn index(&self, node: NodeRef) -> &Self::Output {
        match self.get(node) {
            Some(found) => found,
            None => unreachable!("dangling node reference {node:?}"),
        }
    }
}

impl<K, V> ops::IndexMut<NodeRef> for Nodes<K, V> {
    fn index_mut(&mut self, node: NodeRef) -> &mut Self::Output {
        match self.get_mut(node) {
            Some(found) => found,
            None => unreachable!("dangling node reference {node:?}"),
        }
    }
}

// /////////////////////////////////
// Traversal
// /////////////////////////////////

/// Iterator following the links of a single level.
///
/// It yields its origin first, then every node reached by following
/// [`forward_pointer_at`][SkipNode::forward_pointer_at] on that level, ending
/// with the finish sentinel. Cloning it gives an independent restart point.
pub struct Traverse<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    next: Option<NodeRef>,
    level: usize,
}

impl<K, V> Clone for Traverse<'_, K, V> {
    fn clone(&self) -> Self {
        Traverse {
            nodes: self.nodes,
            next: self.next,
            level: self.level,
        }
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = (NodeRef, &'a SkipNode<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let nodes = self.nodes;
        let node = &nodes[current];
        self.next = node.forward_pointer_at(self.level);
        Some((current, node))
    }
}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}
