//! [`SkipList`] stores key-value pairs, with the keys being unique and always
//! sorted.

use std::{borrow::Borrow, cmp::Ordering, fmt, iter, iter::FusedIterator, mem, ops};

use crate::level_generator::{Geometric, LevelGenerator};
use crate::skipnode::{NodeRef, Nodes, SkipNode, Traverse};

// ////////////////////////////////////////////////////////////////////////////
// Update path
// ////////////////////////////////////////////////////////////////////////////

/// For each level, the last node visited strictly before a key's position.
///
/// Filled in by [`SkipList::search_path`]; insertion splices a new node in
/// right after these nodes and deletion relinks them past the removed one.
/// Levels the search did not reach hold the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdatePath(Vec<NodeRef>);

impl UpdatePath {
    /// Number of levels covered by the path.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path covers no level.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded predecessor on `level`.
    #[inline]
    #[must_use]
    pub fn get(&self, level: usize) -> Option<NodeRef> {
        self.0.get(level).copied()
    }

    /// Iterate over the recorded predecessors, from level 0 upwards.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.0.iter().copied()
    }

    fn reset(&mut self, header: NodeRef, level: usize) {
        self.0.clear();
        self.0.resize(level, header);
    }

    fn record(&mut self, level: usize, node: NodeRef) {
        self.0[level] = node;
    }

    fn grow(&mut self, level: usize, header: NodeRef) {
        if level > self.0.len() {
            self.0.resize(level, header);
        }
    }
}

impl ops::Index<usize> for UpdatePath {
    type Output = NodeRef;

    #[inline]
    fn index(&self, level: usize) -> &NodeRef {
        &self.0[level]
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// An ordered map implemented as a skip list.
///
/// Every level of the list is a sorted singly linked chain running from the
/// header sentinel to the finish sentinel. Level 0 contains every entry and
/// each higher level a subset of the level below, as decided by the list's
/// [`LevelGenerator`] when an entry is first inserted.
///
/// The list owns its two sentinels, so independent lists never share nodes.
///
/// ```
/// use probskip::SkipList;
///
/// let mut list = SkipList::new();
/// list.insert(3, "three");
/// list.insert(1, "one");
/// assert_eq!(list.get(&3), Some(&"three"));
/// assert_eq!(list.size(), 2);
///
/// let removed = list.delete(&3).unwrap();
/// assert_eq!(removed.value(), Some(&"three"));
/// assert!(list.search(&3).is_none());
/// ```
pub struct SkipList<K, V, G = Geometric> {
    nodes: Nodes<K, V>,
    header: NodeRef,
    finish: NodeRef,
    size: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V> SkipList<K, V> {
    /// Create a new skip list using a [`Geometric`] generator capped at
    /// [`DEFAULT_MAX_LEVEL`][crate::DEFAULT_MAX_LEVEL] with
    /// `$p =$` [`DEFAULT_P`][crate::DEFAULT_P].
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let list: SkipList<i64, String> = SkipList::new();
    /// assert!(list.is_empty());
    /// assert_eq!(list.level(), 0);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_level_generator(Geometric::default())
    }
}

impl<K, V, G> SkipList<K, V, G> {
    /// Create a new skip list drawing node levels from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::{NaiveGeometric, SkipList};
    ///
    /// let generator = NaiveGeometric::new(16, 0.25).unwrap();
    /// let mut list = SkipList::with_level_generator(generator);
    /// list.insert("key", 1);
    /// assert!(list.level() <= 17);
    /// ```
    #[inline]
    pub fn with_level_generator(level_generator: G) -> Self {
        let mut nodes = Nodes::new();
        let (header, finish) = Self::sentinels(&mut nodes);
        SkipList {
            nodes,
            header,
            finish,
            size: 0,
            level_generator,
        }
    }

    fn sentinels(nodes: &mut Nodes<K, V>) -> (NodeRef, NodeRef) {
        let finish = nodes.insert(SkipNode::finish());
        let header = nodes.insert(SkipNode::header(finish));
        (header, finish)
    }

    /// The generator deciding the level of new nodes.
    #[inline]
    pub fn level_generator(&self) -> &G {
        &self.level_generator
    }

    /// Mutable access to the generator deciding the level of new nodes.
    #[inline]
    pub fn level_generator_mut(&mut self) -> &mut G {
        &mut self.level_generator
    }

    /// Replace the level generator, returning the previous one.
    ///
    /// Existing nodes keep their levels.
    #[inline]
    pub fn set_level_generator(&mut self, level_generator: G) -> G {
        mem::replace(&mut self.level_generator, level_generator)
    }

    /// Returns the number of entries in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend((0..10).map(|x| (x, x)));
    /// list.insert(3, 30);
    /// assert_eq!(list.size(), 10);
    /// ```
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the list contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The current number of levels, which is the level of the header.
    #[inline]
    pub fn level(&self) -> usize {
        self.nodes[self.header].level()
    }

    /// The header sentinel, present on every level of the list.
    #[inline]
    pub fn header(&self) -> &SkipNode<K, V> {
        &self.nodes[self.header]
    }

    /// The finish sentinel, which terminates every level.
    #[inline]
    pub fn finish(&self) -> &SkipNode<K, V> {
        &self.nodes[self.finish]
    }

    /// The node behind `node`, or `None` if it has since been deleted.
    ///
    /// This holds even after the deleted node's storage has been handed to a
    /// newer node: the stale handle keeps resolving to `None`.
    #[inline]
    pub fn node(&self, node: NodeRef) -> Option<&SkipNode<K, V>> {
        self.nodes.get(node)
    }

    /// Walk `level` from the header to the finish sentinel, both included.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::{Deterministic, SkipList};
    ///
    /// let mut list = SkipList::with_level_generator(Deterministic::from(vec![0, 1, 0]));
    /// list.extend([(1, ()), (2, ()), (3, ())]);
    ///
    /// let level_1: Vec<_> = list.traverse(1).filter_map(|(_, node)| node.key()).collect();
    /// assert_eq!(level_1, vec![&2]);
    /// ```
    #[inline]
    pub fn traverse(&self, level: usize) -> Traverse<'_, K, V> {
        self.nodes.traverse_from(self.header, level)
    }

    /// Iterate over the entries in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let list: SkipList<_, _> = [(2, 'b'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<_> = list.iter().collect();
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b')]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.traverse(0),
            remaining: self.size,
        }
    }

    /// Remove every entry. The level generator is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        let (header, finish) = Self::sentinels(&mut self.nodes);
        self.header = header;
        self.finish = finish;
        self.size = 0;
    }

    /// Search for `key`, recording the update path.
    ///
    /// Starting from the header on the highest level, the search advances
    /// along each level while the next key is smaller than `key`, records the
    /// last node it stood on into `update`, then drops one level.
    ///
    /// Without `full_search`, an exact match met on any level ends the search
    /// at once and the path below that level is left unrecorded. With
    /// `full_search` the descent always reaches level 0, so that `update`
    /// holds a predecessor on every level.
    ///
    /// Returns the matching node, if any.
    pub fn search_path<Q>(
        &self,
        key: &Q,
        full_search: bool,
        update: &mut UpdatePath,
    ) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key, full_search, Some(update))
    }

    fn find<Q>(
        &self,
        key: &Q,
        full_search: bool,
        mut update: Option<&mut UpdatePath>,
    ) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if let Some(path) = update.as_deref_mut() {
            path.reset(self.header, self.level());
        }

        let mut cursor = self.header;
        for level in (0..self.level()).rev() {
            for (next, node) in self.nodes.traverse_from(cursor, level).skip(1) {
                match node.node_key().cmp_key(key) {
                    Ordering::Less => cursor = next,
                    Ordering::Equal if !full_search => return Some(next),
                    Ordering::Equal | Ordering::Greater => break,
                }
            }
            if let Some(path) = update.as_deref_mut() {
                path.record(level, cursor);
            }
        }

        let candidate = self.nodes[cursor].forward_pointer_at(0)?;
        (self.nodes[candidate].node_key().cmp_key(key) == Ordering::Equal).then_some(candidate)
    }

    /// Find the node holding `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert(1, "one");
    /// assert_eq!(list.search(&1).and_then(|node| node.value()), Some(&"one"));
    /// assert!(list.search(&2).is_none());
    /// ```
    #[inline]
    pub fn search<Q>(&self, key: &Q) -> Option<&SkipNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key, false, None).map(|node| &self.nodes[node])
    }

    /// Returns a reference to the value stored under `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).and_then(SkipNode::value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.insert("a", 1);
    /// if let Some(value) = list.get_mut("a") {
    ///     *value += 10;
    /// }
    /// assert_eq!(list["a"], 11);
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.find(key, false, None)?;
        self.nodes[node].value_mut()
    }

    /// Returns `true` if an entry is stored under `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key, false, None).is_some()
    }

    /// Remove the entry stored under `key`, returning its node.
    ///
    /// The returned node still exposes its key, value and level; its links are
    /// stale and must not be followed. After the removal, levels left with no
    /// entry at all are dropped from the list.
    ///
    /// Deleting an absent key changes nothing and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// list.extend((0..10).map(|x| (x, x * 10)));
    /// let node = list.delete(&4).unwrap();
    /// assert_eq!(node.into_inner(), Some((4, 40)));
    /// assert!(list.delete(&4).is_none());
    /// assert_eq!(list.size(), 9);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<SkipNode<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut update = UpdatePath::default();
        let target = self.find(key, true, Some(&mut update))?;

        for level in 0..self.nodes[target].level() {
            let next = self.nodes[target]
                .forward_pointer_at(level)
                .unwrap_or(self.finish);
            self.nodes[update[level]].set_forward(level, next);
        }
        self.size -= 1;

        let dropped = self.nodes[self.header].truncate(self.finish);
        if dropped > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(dropped, level = self.level(), "delete: list level truncated");
        }

        Some(self.nodes.remove(target))
    }

    fn value_mut_at(&mut self, node: NodeRef) -> &mut V {
        match self.nodes[node].value_mut() {
            Some(value) => value,
            None => unreachable!("sentinels carry no value"),
        }
    }
}

impl<K, V, G> SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    /// Insert `value` under `key`, returning a reference to the stored value.
    ///
    /// If the key is already present its value is overwritten in place and the
    /// size is unchanged. Otherwise a new node is created whose level is drawn
    /// from the level generator, growing the list's level if needed.
    ///
    /// # Panics
    ///
    /// Panics if the level generator returns `usize::MAX`, for which no node
    /// height exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use probskip::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(*list.insert(1, "Hello"), "Hello");
    /// assert_eq!(*list.insert(1, "World"), "World");
    /// assert_eq!(list.size(), 1);
    /// assert_eq!(list[&1], "World");
    /// ```
    #[expect(clippy::panic, reason = "A generator returning usize::MAX is a caller error")]
    pub fn insert(&mut self, key: K, value: V) -> &mut V {
        let mut update = UpdatePath::default();
        if let Some(found) = self.find(&key, false, Some(&mut update)) {
            return self.nodes[found].set_value(value);
        }

        let new_level = self.level_generator.next_level();
        let Some(height) = new_level.checked_add(1) else {
            panic!("level generator returned an unrepresentable level {new_level}");
        };
        let level = self.level();
        if height > level {
            self.nodes[self.header].grow(height, self.finish);
            update.grow(height, self.header);
            #[cfg(feature = "tracing")]
            tracing::trace!(from = level, to = height, "insert: list level grows");
        }

        let forward: Vec<NodeRef> = (0..height)
            .map(|level| {
                self.nodes[update[level]]
                    .forward_pointer_at(level)
                    .unwrap_or(self.finish)
            })
            .collect();
        let node = self
            .nodes
            .insert(SkipNode::new(key, value, forward, self.finish));
        for (level, previous) in update.iter().enumerate().take(height) {
            self.nodes[previous].set_forward(level, node);
        }
        self.size += 1;

        self.value_mut_at(node)
    }

    /// Index-style alias of [`insert`][SkipList::insert].
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> &mut V {
        self.insert(key, value)
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

#[cfg(test)]
impl<K: Ord, V, G> SkipList<K, V, G> {
    /// Checks the integrity of the list.
    fn check(&self) {
        use crate::skipnode::NodeKey;

        let level_0: Vec<&SkipNode<K, V>> = self.traverse(0).map(|(_, node)| node).collect();
        assert_eq!(level_0.len(), self.size + 2);
        assert_eq!(self.nodes.live(), self.size + 2);

        for level in 0..self.level() {
            let keys: Vec<&NodeKey<K>> = self
                .traverse(level)
                .map(|(_, node)| node.node_key())
                .collect();
            assert!(matches!(keys.first(), Some(NodeKey::NegInfinity)));
            assert!(matches!(keys.last(), Some(NodeKey::PosInfinity)));
            assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
            // Nothing but the sentinels on a level means it should have been
            // truncated.
            assert!(keys.len() > 2, "level {level} is empty");

            let expected = level_0
                .iter()
                .filter(|node| !node.is_sentinel() && node.level() > level)
                .count();
            assert_eq!(keys.len() - 2, expected, "level {level} misses nodes");
        }
        assert!(
            level_0.iter().all(|node| node.level() <= self.level()),
            "a node is taller than the header"
        );
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, G: Default> Default for SkipList<K, V, G> {
    #[inline]
    fn default() -> Self {
        Self::with_level_generator(G::default())
    }
}

impl<K, V, G> Extend<(K, V)> for SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.insert(key, value);
        }
    }
}

impl<K, V, G> iter::FromIterator<(K, V)> for SkipList<K, V, G>
where
    K: Ord,
    G: LevelGenerator + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iterable: I) -> Self {
        let mut list = Self::default();
        list.extend(iterable);
        list
    }
}

impl<K, V, G, Q> ops::Index<&Q> for SkipList<K, V, G>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present in the list.
    #[inline]
    #[expect(clippy::expect_used, reason = "Indexing an absent key is a caller error")]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, G> fmt::Debug for SkipList<K, V, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k:?}, {v:?})")?;
        }
        write!(f, "]")
    }
}

impl<K, V, G> fmt::Display for SkipList<K, V, G>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        write!(f, "]")
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipList<K, V, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Iterator over a [`SkipList`]'s entries, in key order.
pub struct Iter<'a, K, V> {
    inner: Traverse<'a, K, V>,
    remaining: usize,
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (_, node) = self.inner.next()?;
            if let (Some(key), Some(value)) = (node.key(), node.value()) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: 'a, V: 'a> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: 'a, V: 'a> FusedIterator for Iter<'a, K, V> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
