//! A skiplist is a way of storing elements in such a way that elements can be
//! efficiently accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ----------> <finish>
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ----------> <finish>
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] -> <finish>
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] -> <finish>
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead. The height of each node
//! is chosen once, at insertion, by a [`LevelGenerator`]; no rebalancing ever
//! takes place.
//!
//! [`SkipList`] is an ordered map: keys are unique and kept sorted according
//! to their [`Ord`] implementation, which **must** be a total order. Failure
//! to satisfy this can result in entries which cannot be found again.
//!
//! The list is a single-threaded structure. Sharing it between threads
//! requires external synchronisation.
//!
//! ```
//! use probskip::{Geometric, PrettyPrinter, SkipList};
//!
//! let generator = Geometric::with_seed(8, 0.5, 42).unwrap();
//! let mut list = SkipList::with_level_generator(generator);
//! for key in [5, 1, 4, 2, 3] {
//!     list.insert(key, key * 100);
//! }
//! assert_eq!(list[&4], 400);
//! assert!(list.delete(&4).is_some());
//! assert_eq!(list.size(), 4);
//! println!("{}", PrettyPrinter::new(&list));
//! ```

pub mod level_generator;
mod render;
mod skiplist;
mod skipnode;

pub use level_generator::{
    DEFAULT_MAX_LEVEL, DEFAULT_P, Deterministic, Geometric, GeometricError, LevelGenerator,
    NaiveGeometric,
};
pub use render::PrettyPrinter;
pub use skiplist::{Iter, SkipList, UpdatePath};
pub use skipnode::{NodeKey, NodeRef, SkipNode, Traverse};
