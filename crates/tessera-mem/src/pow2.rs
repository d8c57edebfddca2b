//! Power-of-two sizes and bitmask modulus.
//!
//! Containers that keep their bucket arrays at power-of-two lengths can
//! reduce a hash to a bucket index with a single AND instead of an integer
//! division. [`fast_mod`] does this for a size fixed at compile time,
//! [`PowerOfTwo`] for a size chosen at run time (tables that grow by
//! doubling).

use std::fmt;

use crate::error::MemError;

/// Returns `true` if exactly one bit of `value` is set.
///
/// `0` is not a power of two.
#[inline]
#[must_use]
pub const fn is_power_of_two(value: usize) -> bool {
    value != 0 && (value & (value - 1)) == 0
}

/// Compile-time power-of-two test for a const generic.
///
/// [`VALUE`](IsPowerOfTwo::VALUE) is the answer; referencing
/// [`ASSERT`](IsPowerOfTwo::ASSERT) turns a `false` answer into a build
/// error for that particular `N`.
///
/// ```
/// use tessera_mem::IsPowerOfTwo;
///
/// assert!(IsPowerOfTwo::<64>::VALUE);
/// assert!(!IsPowerOfTwo::<48>::VALUE);
/// ```
pub struct IsPowerOfTwo<const N: usize>;

impl<const N: usize> IsPowerOfTwo<N> {
    /// Whether `N` is a power of two.
    pub const VALUE: bool = is_power_of_two(N);

    /// Fails const evaluation unless `N` is a power of two.
    pub const ASSERT: () = assert!(Self::VALUE, "value must be a power of two");
}

/// `value % N` for a compile-time power of two `N`, computed as
/// `value & (N - 1)`.
///
/// A non-power-of-two `N` is rejected when the call is compiled:
///
/// ```compile_fail
/// let _ = tessera_mem::fast_mod::<12>(5);
/// ```
///
/// ```
/// use tessera_mem::fast_mod;
///
/// assert_eq!(fast_mod::<8>(13), 5);
/// assert_eq!(fast_mod::<8>(8), 0);
/// ```
#[inline]
#[must_use]
pub const fn fast_mod<const N: usize>(value: usize) -> usize {
    let () = IsPowerOfTwo::<N>::ASSERT;
    value & N.wrapping_sub(1)
}

/// `value % modulus` for a power-of-two `modulus` known only at run time.
///
/// # Panics
///
/// With [`CHECKED`](crate::config::CHECKED) enabled, panics if `modulus`
/// is not a power of two. Without checks the result is meaningless for
/// such a modulus. Prefer [`PowerOfTwo::fast_mod`], which cannot be
/// misused.
#[inline]
#[must_use]
pub const fn fast_mod_dyn(value: usize, modulus: usize) -> usize {
    mem_assert!(is_power_of_two(modulus), "modulus must be a power of two");
    value & modulus.wrapping_sub(1)
}

/// Smallest power of two greater than or equal to `value`.
///
/// `0` rounds up to `1`.
///
/// # Panics
///
/// With [`CHECKED`](crate::config::CHECKED) enabled, panics if the result
/// does not fit in a `usize`. Without checks the overflowing case returns
/// `0`. Use [`PowerOfTwo::next_at_least`] for a fallible version.
#[inline]
#[must_use]
pub const fn next_power_of_two(value: usize) -> usize {
    mem_assert!(
        value <= 1 << (usize::BITS - 1),
        "numeric limits exceeded"
    );
    match value.checked_next_power_of_two() {
        Some(next) => next,
        None => 0,
    }
}

/// A `usize` with exactly one bit set.
///
/// The invariant is established at construction, so bucket reduction
/// through [`fast_mod`](PowerOfTwo::fast_mod) needs no further checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerOfTwo(usize);

impl PowerOfTwo {
    /// Validate a runtime size.
    pub const fn new(value: usize) -> Result<Self, MemError> {
        if is_power_of_two(value) {
            Ok(Self(value))
        } else {
            Err(MemError::NotPowerOfTwo { value })
        }
    }

    /// Compile-time checked constructor.
    ///
    /// ```compile_fail
    /// const BAD: tessera_mem::PowerOfTwo = tessera_mem::PowerOfTwo::of::<24>();
    /// ```
    #[must_use]
    pub const fn of<const N: usize>() -> Self {
        let () = IsPowerOfTwo::<N>::ASSERT;
        Self(N)
    }

    /// Round `value` up to the nearest power of two (`0` and `1` give `1`).
    pub const fn next_at_least(value: usize) -> Result<Self, MemError> {
        match value.checked_next_power_of_two() {
            Some(next) => Ok(Self(next)),
            None => Err(MemError::PowerOfTwoOverflow { value }),
        }
    }

    /// The size as a plain integer.
    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// `self - 1`: the mask that reduces a value modulo `self`.
    #[inline]
    pub const fn mask(self) -> usize {
        self.0 - 1
    }

    /// Base-2 logarithm, i.e. the index of the set bit.
    #[inline]
    pub const fn log2(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// `value % self`.
    #[inline]
    #[must_use]
    pub const fn fast_mod(self, value: usize) -> usize {
        value & self.mask()
    }

    /// The next size up, or `None` if it would overflow.
    pub const fn checked_double(self) -> Option<Self> {
        match self.0.checked_mul(2) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl TryFrom<usize> for PowerOfTwo {
    type Error = MemError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PowerOfTwo> for usize {
    fn from(size: PowerOfTwo) -> Self {
        size.0
    }
}

impl fmt::Display for PowerOfTwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
