//! Text rendering of a list's level structure.

use std::fmt;

use crate::skiplist::SkipList;
use crate::skipnode::SkipNode;

/// Renders a [`SkipList`] as one row per level.
///
/// Each row reads `L<i>:`, `H`, one cell per entry in key order, then `F`,
/// separated by tabs. A cell holds the entry's key if the entry is linked on
/// that level and is empty otherwise. Rows are separated by newlines, lowest
/// level first; an empty list renders as an empty string.
///
/// ```
/// use probskip::{Deterministic, PrettyPrinter, SkipList};
///
/// let mut list = SkipList::with_level_generator(Deterministic::from(vec![1, 0]));
/// list.extend([(1, ()), (2, ())]);
/// assert_eq!(
///     PrettyPrinter::new(&list).to_string(),
///     "L0:\tH\t1\t2\tF\nL1:\tH\t1\t\tF"
/// );
/// ```
pub struct PrettyPrinter<'a, K, V, G> {
    list: &'a SkipList<K, V, G>,
}

impl<'a, K, V, G> PrettyPrinter<'a, K, V, G> {
    /// Wrap `list` for rendering.
    #[inline]
    #[must_use]
    pub fn new(list: &'a SkipList<K, V, G>) -> Self {
        PrettyPrinter { list }
    }
}

impl<K, V, G> fmt::Display for PrettyPrinter<'_, K, V, G>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<&SkipNode<K, V>> = self
            .list
            .traverse(0)
            .map(|(_, node)| node)
            .filter(|node| !node.is_sentinel())
            .collect();

        let mut first = true;
        for level in 0..self.list.level() {
            if !entries.iter().any(|node| node.level() > level) {
                continue;
            }
            if !first {
                f.write_str("\n")?;
            }
            first = false;

            write!(f, "L{level}:\tH")?;
            for node in &entries {
                f.write_str("\t")?;
                if let Some(key) = node.key().filter(|_| node.level() > level) {
                    write!(f, "{key}")?;
                }
            }
            f.write_str("\tF")?;
        }
        Ok(())
    }
}
