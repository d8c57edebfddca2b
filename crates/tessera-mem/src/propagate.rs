//! Allocator propagation on container copy, move and swap.
//!
//! A container's `clone_from`, move-assignment and `swap` call the
//! matching helper on its allocator before touching elements:
//!
//! ```rust
//! use tessera_mem::{propagate_copy, AllocatorPolicy};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Arena(u8);
//!
//! impl AllocatorPolicy for Arena {
//!     const PROPAGATE_ON_COPY: bool = true;
//! }
//!
//! struct Table {
//!     alloc: Arena,
//!     slots: Vec<u32>,
//! }
//!
//! impl Table {
//!     fn assign_from(&mut self, other: &Table) {
//!         propagate_copy(&mut self.alloc, &other.alloc);
//!         self.slots.clone_from(&other.slots);
//!     }
//! }
//!
//! let mut dst = Table { alloc: Arena(0), slots: vec![] };
//! let src = Table { alloc: Arena(3), slots: vec![1, 2] };
//! dst.assign_from(&src);
//! assert_eq!(dst.alloc, Arena(3));
//! ```
//!
//! Every branch tests an associated constant of [`AllocatorPolicy`], so
//! for an allocator that does not propagate the helper compiles to
//! nothing.

use std::mem;

use crate::policy::AllocatorPolicy;

/// Copy-assignment: `lhs` takes a copy of `rhs` if
/// [`PROPAGATE_ON_COPY`](AllocatorPolicy::PROPAGATE_ON_COPY) is set,
/// otherwise `lhs` is left untouched.
#[inline]
pub fn propagate_copy<A>(lhs: &mut A, rhs: &A)
where
    A: AllocatorPolicy + Clone,
{
    if A::PROPAGATE_ON_COPY {
        lhs.clone_from(rhs);
    }
}

/// Move-assignment: the state of `rhs` is transferred into `lhs` if
/// [`PROPAGATE_ON_MOVE`](AllocatorPolicy::PROPAGATE_ON_MOVE) is set,
/// otherwise both are left untouched.
///
/// After a propagating move `rhs` is valid but its value is unspecified.
/// It can be dropped or assigned to; do not read allocator state from it.
#[inline]
pub fn propagate_move<A>(lhs: &mut A, rhs: &mut A)
where
    A: AllocatorPolicy,
{
    if A::PROPAGATE_ON_MOVE {
        mem::swap(lhs, rhs);
    }
}

/// Swap: `lhs` and `rhs` are exchanged if
/// [`PROPAGATE_ON_SWAP`](AllocatorPolicy::PROPAGATE_ON_SWAP) is set.
///
/// Otherwise the allocators stay with their containers, which is only
/// sound if each can free the other's memory: the two must already
/// compare equal.
///
/// # Panics
///
/// With [`CHECKED`](crate::config::CHECKED) enabled, panics if the
/// allocators do not propagate on swap and compare unequal. Release builds
/// without the `checked` feature skip the comparison; swapping such
/// containers anyway leaves each one freeing memory through the wrong
/// allocator.
#[inline]
pub fn propagate_swap<A>(lhs: &mut A, rhs: &mut A)
where
    A: AllocatorPolicy + PartialEq,
{
    mem_assert!(
        allocators_compatible(lhs, rhs),
        "cannot swap containers with unequal non-propagating allocators"
    );

    if A::PROPAGATE_ON_SWAP {
        mem::swap(lhs, rhs);
    }
}

/// Whether containers using `lhs` and `rhs` may be swapped by exchanging
/// their storage.
///
/// This is the precondition of [`propagate_swap`] without the assertion.
/// A container can test it first and fall back to an element-wise swap.
#[inline]
#[must_use]
pub fn allocators_compatible<A>(lhs: &A, rhs: &A) -> bool
where
    A: AllocatorPolicy + PartialEq,
{
    A::PROPAGATE_ON_SWAP || A::IS_ALWAYS_EQUAL || lhs == rhs
}
