//! Build-time configuration.
//!
//! Everything here is a constant: the primitives have no runtime state to
//! configure. Consumers read these to size their tables and to decide
//! whether they can lean on the crate's precondition checks.

use crate::pow2::PowerOfTwo;

/// Whether runtime precondition checks are compiled in.
///
/// `true` in debug builds and whenever the `checked` feature is enabled.
/// When `false`, violating a documented precondition (for example
/// swapping containers with unequal non-propagating allocators) is not
/// detected, and the container is left in an inconsistent state.
pub const CHECKED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// Default bucket count for a freshly constructed table.
pub const DEFAULT_TABLE_SIZE: PowerOfTwo = PowerOfTwo::of::<16>();

/// Smallest table a container may shrink to.
pub const MIN_TABLE_SIZE: PowerOfTwo = PowerOfTwo::of::<1>();
