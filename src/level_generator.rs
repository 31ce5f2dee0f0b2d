//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$).
//!
//! Three generators are provided:
//!
//! - [`Geometric`] samples the geometric distribution in constant time by
//!   inverting its cumulative distribution function.
//! - [`NaiveGeometric`] simulates the Bernoulli trials one by one.
//! - [`Deterministic`] replays a caller-supplied sequence, which makes tests
//!   and benchmarks reproducible.
//!
//! Custom generators only need to implement [`LevelGenerator`].

pub mod deterministic;
pub mod geometric;
pub mod naive_geometric;

pub use deterministic::Deterministic;
pub use geometric::{Geometric, GeometricError};
pub use naive_geometric::NaiveGeometric;

/// Default cap on the level number handed out by the random generators.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// Default probability that a node present on level `$n$` is also present on
/// level `$n+1$`.
pub const DEFAULT_P: f64 = 0.5;

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels as determined by a [`LevelGenerator`].
///
/// A returned level number `$n$` means the new node is linked on levels
/// `$0, \ldots, n$`, that is it spans `$n + 1$` levels.
pub trait LevelGenerator {
    /// Produce the level number for a newly inserted node.
    ///
    /// Generators with a configured maximum must never return a value greater
    /// than that maximum.
    fn next_level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    #[inline]
    fn next_level(&mut self) -> usize {
        (**self).next_level()
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    #[inline]
    fn next_level(&mut self) -> usize {
        (**self).next_level()
    }
}
