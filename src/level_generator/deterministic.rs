//! Level generator replaying predetermined level numbers.

use std::{fmt, iter};

use crate::level_generator::LevelGenerator;

/// A level generator which hands out level numbers from a fixed source.
///
/// The source is either a finite list, an arbitrary (possibly infinite)
/// iterator, or a single value repeated forever. This is meant for tests and
/// benchmarks that need a reproducible list shape.
///
/// Unlike the random generators there is no `max_level`: values are used as
/// they are, so a node of level number `$n$` makes the list allocate `$n + 1$`
/// links in its header. A value of `usize::MAX` makes
/// [`SkipList::insert`][crate::SkipList::insert] panic.
///
/// ```
/// use probskip::{Deterministic, SkipList};
///
/// let mut list = SkipList::with_level_generator(Deterministic::from(vec![4, 3, 2]));
/// list.insert(2, "2");
/// list.insert(4, "4");
/// list.insert(3, "3");
/// assert_eq!(list.level(), 5);
/// ```
pub struct Deterministic {
    values: Box<dyn Iterator<Item = usize>>,
}

impl Deterministic {
    /// Replay the level numbers yielded by `values`, in order.
    #[inline]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = usize>,
        I::IntoIter: 'static,
    {
        Deterministic {
            values: Box::new(values.into_iter()),
        }
    }

    /// Always produce `level`.
    #[inline]
    #[must_use]
    pub fn repeat(level: usize) -> Self {
        Self::new(iter::repeat(level))
    }
}

impl From<Vec<usize>> for Deterministic {
    #[inline]
    fn from(values: Vec<usize>) -> Self {
        Self::new(values)
    }
}

impl LevelGenerator for Deterministic {
    /// # Panics
    ///
    /// Panics once a finite source has been exhausted; callers must provide at
    /// least as many level numbers as there are insertions of new keys.
    #[inline]
    #[expect(clippy::panic, reason = "Exhausting the source is a caller error")]
    fn next_level(&mut self) -> usize {
        match self.values.next() {
            Some(level) => level,
            None => panic!("deterministic level source exhausted"),
        }
    }
}

impl fmt::Debug for Deterministic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deterministic")
            .field("remaining", &self.values.size_hint())
            .finish()
    }
}
