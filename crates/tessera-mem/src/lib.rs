//! Memory primitives for allocator-aware Tessera containers.
//!
//! Generic containers (dense maps, sparse sets, paged arrays) are
//! parameterised over an allocator and over the pointer type that
//! allocator hands out. This crate holds the handful of building blocks
//! every such container needs, so each one does not re-derive them:
//!
//! ```text
//! tessera-mem
//! ├── address    ToAddress: fancy pointer → raw address (compile-time recursion)
//! ├── policy     AllocatorPolicy: propagate-on-{copy,move,swap} flags
//! ├── propagate  propagate_copy / propagate_move / propagate_swap
//! ├── pow2       IsPowerOfTwo<N>, fast_mod::<N>, PowerOfTwo
//! ├── config     assertion level, default table sizes
//! └── error      MemError
//! ```
//!
//! None of the primitives allocate, block, or hold state. The allocator
//! helpers mutate only the `&mut` allocators they are handed.
//!
//! # Assertions
//!
//! Runtime preconditions (swapping containers whose non-propagating
//! allocators differ, a non-power-of-two modulus passed to
//! [`fast_mod_dyn`]) are checked in debug builds and whenever the
//! `checked` feature is enabled. Otherwise the checks compile out and the
//! precondition is the caller's responsibility. See [`config::CHECKED`].
//!
//! # Example
//!
//! ```rust
//! use tessera_mem::{fast_mod, propagate_swap, to_address, AllocatorPolicy};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Pool(u32);
//!
//! impl AllocatorPolicy for Pool {
//!     const PROPAGATE_ON_SWAP: bool = true;
//! }
//!
//! let mut a = Pool(1);
//! let mut b = Pool(2);
//! propagate_swap(&mut a, &mut b);
//! assert_eq!((a, b), (Pool(2), Pool(1)));
//!
//! let slot = Box::new(7_u64);
//! assert_eq!(to_address(&slot), &*slot as *const u64);
//!
//! assert_eq!(fast_mod::<8>(13), 5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod address;
pub mod config;
pub mod error;
pub mod policy;
pub mod pow2;
pub mod propagate;

// Public re-exports for the primary API surface.
pub use address::{to_address, ToAddress};
pub use error::MemError;
pub use policy::{AllocatorPolicy, Global};
pub use pow2::{
    fast_mod, fast_mod_dyn, is_power_of_two, next_power_of_two, IsPowerOfTwo, PowerOfTwo,
};
pub use propagate::{allocators_compatible, propagate_copy, propagate_move, propagate_swap};
