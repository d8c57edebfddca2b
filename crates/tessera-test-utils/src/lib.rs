//! Test utilities and mock types for Tessera development.
//!
//! Provides mock allocators whose propagation policy is chosen per type
//! ([`MockAllocator`] and its aliases), a layered pointer wrapper
//! ([`Fancy`]) for exercising address resolution through several
//! indirections, and a fixture container in [`fixtures`] that drives the
//! primitives the way a real allocator-aware container does.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tessera_mem::{AllocatorPolicy, ToAddress};

/// Shared allocation counters for a family of [`MockAllocator`] values.
///
/// Clones of an allocator share the same stats, so a test can check that
/// a propagation helper neither allocated nor freed through either side.
#[derive(Debug, Default)]
pub struct AllocStats {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
}

impl AllocStats {
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    pub fn deallocations(&self) -> usize {
        self.deallocations.load(Ordering::Relaxed)
    }

    /// Allocations not yet returned.
    ///
    /// Saturates at zero: an equal-id allocator built with
    /// [`MockAllocator::new`] rather than [`MockAllocator::sibling`] keeps
    /// its own counters, so frees of storage it took over land here
    /// without the matching allocation.
    pub fn live(&self) -> usize {
        self.allocations().saturating_sub(self.deallocations())
    }
}

/// Stateful allocator stand-in with a compile-time propagation policy.
///
/// Equality is by `id`: two mocks with the same id can free each other's
/// memory. Nothing is actually allocated; [`allocate`](Self::allocate)
/// and [`deallocate`](Self::deallocate) only bump the shared counters.
#[derive(Clone, Debug)]
pub struct MockAllocator<const COPY: bool, const MOVE: bool, const SWAP: bool> {
    id: u32,
    stats: Arc<AllocStats>,
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> MockAllocator<COPY, MOVE, SWAP> {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            stats: Arc::new(AllocStats::default()),
        }
    }

    /// A distinct allocator value that compares equal to `self` and
    /// records into the same stats.
    pub fn sibling(&self) -> Self {
        Self {
            id: self.id,
            stats: Arc::clone(&self.stats),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn stats(&self) -> &AllocStats {
        &self.stats
    }

    /// Record an allocation of `len` elements and return a token for it.
    pub fn allocate(&self, len: usize) -> Allocation {
        self.stats.allocations.fetch_add(1, Ordering::Relaxed);
        Allocation {
            owner: self.id,
            len,
        }
    }

    /// Record the release of an allocation.
    ///
    /// # Panics
    ///
    /// Panics if the allocation was made by an allocator that does not
    /// compare equal to this one.
    pub fn deallocate(&self, allocation: Allocation) {
        assert_eq!(
            allocation.owner, self.id,
            "allocation from allocator {} freed through allocator {}",
            allocation.owner, self.id
        );
        self.stats.deallocations.fetch_add(1, Ordering::Relaxed);
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> PartialEq
    for MockAllocator<COPY, MOVE, SWAP>
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> Eq for MockAllocator<COPY, MOVE, SWAP> {}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> AllocatorPolicy
    for MockAllocator<COPY, MOVE, SWAP>
{
    const PROPAGATE_ON_COPY: bool = COPY;
    const PROPAGATE_ON_MOVE: bool = MOVE;
    const PROPAGATE_ON_SWAP: bool = SWAP;
}

/// Stays with its container on every operation.
pub type StickyAllocator = MockAllocator<false, false, false>;
/// Follows the elements on every operation.
pub type PropagatingAllocator = MockAllocator<true, true, true>;
pub type CopyOnlyAllocator = MockAllocator<true, false, false>;
pub type MoveOnlyAllocator = MockAllocator<false, true, false>;
pub type SwapOnlyAllocator = MockAllocator<false, false, true>;

/// Token for memory handed out by a [`MockAllocator`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Allocation {
    owner: u32,
    len: usize,
}

impl Allocation {
    /// Id of the allocator that made the allocation.
    pub fn owner(&self) -> u32 {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One layer of pointer indirection.
///
/// `Fancy<Fancy<*const T>>` is a two-deep chain; resolving it through
/// [`ToAddress`] must reach the raw pointer at the bottom. The `hops`
/// field stands in for the bookkeeping real fancy pointers carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fancy<P> {
    inner: P,
    hops: u32,
}

impl<P> Fancy<P> {
    pub fn new(inner: P) -> Self {
        Self { inner, hops: 0 }
    }

    /// Member access: the pointer one layer down.
    pub fn arrow(&self) -> &P {
        &self.inner
    }

    /// Wrap `self` in one more layer.
    pub fn wrap(self) -> Fancy<Self> {
        let hops = self.hops + 1;
        Fancy { inner: self, hops }
    }

    /// Number of layers above the innermost `Fancy`.
    pub fn hops(&self) -> u32 {
        self.hops
    }
}

impl<P: ToAddress> ToAddress for Fancy<P> {
    type Raw = P::Raw;

    fn to_address(&self) -> P::Raw {
        self.arrow().to_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_equality_is_by_id() {
        let a = StickyAllocator::new(1);
        let b = StickyAllocator::new(1);
        let c = StickyAllocator::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn clones_share_stats() {
        let a = PropagatingAllocator::new(4);
        let b = a.clone();
        let block = b.allocate(16);
        assert_eq!(block.len(), 16);
        assert_eq!(a.stats().allocations(), 1);
        a.deallocate(block);
        assert_eq!(b.stats().live(), 0);
    }

    #[test]
    fn siblings_are_equal_and_share_stats() {
        let a = StickyAllocator::new(3);
        let b = a.sibling();
        assert_eq!(a, b);
        let block = a.allocate(4);
        b.deallocate(block);
        assert_eq!(a.stats().allocations(), 1);
        assert_eq!(a.stats().deallocations(), 1);
        assert_eq!(b.stats().live(), 0);
    }

    #[test]
    fn live_saturates_when_frees_land_on_foreign_counters() {
        let a = StickyAllocator::new(3);
        let b = StickyAllocator::new(3);
        let block = b.allocate(1);
        a.deallocate(block);
        assert_eq!(a.stats().deallocations(), 1);
        assert_eq!(a.stats().live(), 0);
        assert_eq!(b.stats().live(), 1);
    }

    #[test]
    #[should_panic(expected = "freed through allocator")]
    fn foreign_deallocation_panics() {
        let a = StickyAllocator::new(1);
        let b = StickyAllocator::new(2);
        let block = a.allocate(1);
        b.deallocate(block);
    }

    #[test]
    fn wrap_counts_layers() {
        let raw: *const u8 = std::ptr::null();
        let chain = Fancy::new(raw).wrap().wrap();
        assert_eq!(chain.hops(), 2);
        assert_eq!(chain.to_address(), raw);
    }
}
