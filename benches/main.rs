//! Benchmarks comparing the skip list against the standard library's
//! [`BTreeMap`][std::collections::BTreeMap], and the level generators against
//! each other.

use criterion::{criterion_group, criterion_main};

mod btreemap;
mod skiplist;

criterion_group!(
    benches,
    crate::btreemap::insert,
    crate::btreemap::rand_access,
    crate::btreemap::iter,
    crate::skiplist::insert,
    crate::skiplist::rand_access,
    crate::skiplist::delete,
    crate::skiplist::iter,
    crate::level_generator::next_level,
);
criterion_main!(benches);
