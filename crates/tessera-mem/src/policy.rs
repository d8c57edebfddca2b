//! Allocator propagation policy.

/// Compile-time propagation flags of an allocator type.
///
/// When a container is copy-assigned, move-assigned or swapped, its
/// allocator either follows the elements (propagates) or stays with the
/// container it was constructed for. Each allocator type declares which,
/// once, through these constants; the helpers in
/// [`propagate`](crate::propagate) read them so that containers do not
/// repeat the decision.
///
/// All flags default to `false`: a stateful allocator that declares
/// nothing stays put on every operation, and swapping two containers
/// then requires their allocators to compare equal.
///
/// The flags are associated constants, so every branch on them is
/// resolved during monomorphization.
pub trait AllocatorPolicy {
    /// Copy the source allocator into the destination on copy-assignment.
    const PROPAGATE_ON_COPY: bool = false;

    /// Transfer the source allocator into the destination on
    /// move-assignment.
    const PROPAGATE_ON_MOVE: bool = false;

    /// Exchange allocators when two containers are swapped.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Any two instances can free each other's allocations.
    ///
    /// Lets [`propagate_swap`](crate::propagate_swap) skip its equality
    /// check for stateless allocators.
    const IS_ALWAYS_EQUAL: bool = false;
}

/// The global heap as an allocator value.
///
/// Stateless, so every instance is interchangeable and propagation is
/// free either way. Moves propagate, matching how owning containers of
/// the global heap behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

impl AllocatorPolicy for Global {
    const PROPAGATE_ON_MOVE: bool = true;
    const IS_ALWAYS_EQUAL: bool = true;
}
