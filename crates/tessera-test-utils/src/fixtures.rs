//! Fixture container for integration tests.
//!
//! [`FixtureTable`] is a minimal bucketed set of `usize` keys backed by a
//! [`MockAllocator`]. It is not a usable container; it exists to call
//! the primitives from the places a real one would:
//!
//! - bucket selection through [`PowerOfTwo::fast_mod`],
//! - copy-assignment through [`propagate_copy`],
//! - move-assignment through [`propagate_move`],
//! - swap through [`propagate_swap`],
//! - bucket handles as [`Fancy`] pointers resolved with `to_address`.
//!
//! Bucket storage is "allocated" from the table's allocator and returned
//! to it on drop, so a propagation mistake surfaces as a foreign
//! deallocation panic in [`MockAllocator::deallocate`].

use std::mem;

use tessera_mem::{
    allocators_compatible, propagate_copy, propagate_move, propagate_swap, AllocatorPolicy,
    MemError, PowerOfTwo,
};

use crate::{Allocation, Fancy, MockAllocator};

/// Bucketed key set parameterised by allocator policy.
pub struct FixtureTable<const COPY: bool, const MOVE: bool, const SWAP: bool> {
    alloc: MockAllocator<COPY, MOVE, SWAP>,
    storage: Option<Allocation>,
    size: PowerOfTwo,
    buckets: Vec<Vec<usize>>,
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> FixtureTable<COPY, MOVE, SWAP> {
    /// Create a table with at least `capacity` buckets.
    pub fn with_capacity(
        alloc: MockAllocator<COPY, MOVE, SWAP>,
        capacity: usize,
    ) -> Result<Self, MemError> {
        let size = PowerOfTwo::next_at_least(capacity)?;
        let storage = Some(alloc.allocate(size.get()));
        Ok(Self {
            alloc,
            storage,
            size,
            buckets: vec![Vec::new(); size.get()],
        })
    }

    pub fn allocator(&self) -> &MockAllocator<COPY, MOVE, SWAP> {
        &self.alloc
    }

    /// Id of the allocator the bucket storage came from, if any.
    pub fn storage_owner(&self) -> Option<u32> {
        self.storage.as_ref().map(Allocation::owner)
    }

    pub fn bucket_count(&self) -> usize {
        self.size.get()
    }

    pub fn bucket_of(&self, key: usize) -> usize {
        self.size.fast_mod(key)
    }

    pub fn insert(&mut self, key: usize) -> bool {
        let bucket = self.bucket_of(key);
        if self.buckets[bucket].contains(&key) {
            return false;
        }
        self.buckets[bucket].push(key);
        true
    }

    pub fn contains(&self, key: usize) -> bool {
        self.buckets[self.bucket_of(key)].contains(&key)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handle to the first slot of a bucket, one `Fancy` layer deep.
    pub fn bucket_ptr(&self, bucket: usize) -> Fancy<*const usize> {
        Fancy::new(self.buckets[bucket].as_ptr())
    }

    /// Copy-assignment.
    pub fn assign_from(&mut self, other: &Self) {
        self.release();
        propagate_copy(&mut self.alloc, &other.alloc);
        self.storage = Some(self.alloc.allocate(other.size.get()));
        self.size = other.size;
        self.buckets.clone_from(&other.buckets);
    }

    /// Move-assignment. `other` is left empty but usable.
    pub fn assign_move(&mut self, other: &mut Self) {
        self.release();
        let steal =
            MockAllocator::<COPY, MOVE, SWAP>::PROPAGATE_ON_MOVE || self.alloc == other.alloc;
        propagate_move(&mut self.alloc, &mut other.alloc);
        if steal {
            self.storage = other.storage.take();
        } else {
            // Allocators differ and stay put: rebuild in our own storage.
            self.storage = Some(self.alloc.allocate(other.size.get()));
        }
        self.size = other.size;
        self.buckets = mem::take(&mut other.buckets);
        other.buckets = vec![Vec::new(); other.size.get()];
    }

    /// Exchange contents with `other`.
    ///
    /// # Panics
    ///
    /// In checked builds, panics if the allocators do not propagate on
    /// swap and compare unequal.
    pub fn swap(&mut self, other: &mut Self) {
        propagate_swap(&mut self.alloc, &mut other.alloc);
        mem::swap(&mut self.storage, &mut other.storage);
        mem::swap(&mut self.size, &mut other.size);
        mem::swap(&mut self.buckets, &mut other.buckets);
    }

    /// Swap if storage can be exchanged, otherwise swap element-wise.
    ///
    /// Never panics on allocator mismatch.
    pub fn swap_or_exchange_elements(&mut self, other: &mut Self) {
        if allocators_compatible(&self.alloc, &other.alloc) {
            self.swap(other);
        } else {
            mem::swap(&mut self.buckets, &mut other.buckets);
            mem::swap(&mut self.size, &mut other.size);
            self.reallocate();
            other.reallocate();
        }
    }

    fn reallocate(&mut self) {
        self.release();
        self.storage = Some(self.alloc.allocate(self.size.get()));
    }

    fn release(&mut self) {
        if let Some(storage) = self.storage.take() {
            self.alloc.deallocate(storage);
        }
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> Drop for FixtureTable<COPY, MOVE, SWAP> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        self.release();
    }
}
