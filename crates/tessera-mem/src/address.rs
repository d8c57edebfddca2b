//! Raw addresses from pointer-like handles.
//!
//! An allocator-aware container stores whatever pointer type its
//! allocator hands out: a raw pointer, a `NonNull`, or a wrapper that
//! adds provenance, offsets or debugging state on top of one of those.
//! [`ToAddress`] peels those layers off and yields the raw pointer
//! underneath, which is what comparisons, hashing and pointer arithmetic
//! inside the container operate on.
//!
//! Raw pointers are the base case and are returned unchanged. A wrapper
//! implements the trait by resolving the pointer its member-access
//! operation yields, so a chain of `k` wrappers resolves through `k`
//! nested calls chosen entirely at compile time:
//!
//! ```rust
//! use tessera_mem::{to_address, ToAddress};
//!
//! /// Pointer that remembers which pool it came from.
//! struct Tagged<P> {
//!     pool: u16,
//!     ptr: P,
//! }
//!
//! impl<P> Tagged<P> {
//!     fn arrow(&self) -> &P {
//!         &self.ptr
//!     }
//! }
//!
//! impl<P: ToAddress> ToAddress for Tagged<P> {
//!     type Raw = P::Raw;
//!
//!     fn to_address(&self) -> P::Raw {
//!         self.arrow().to_address()
//!     }
//! }
//!
//! let value = 5_i32;
//! let raw = &value as *const i32;
//! let nested = Tagged { pool: 1, ptr: Tagged { pool: 2, ptr: raw } };
//! assert_eq!(to_address(&nested), raw);
//! ```
//!
//! None of the impls dereference the pointer, so dangling and null
//! pointers resolve like any other.

use std::ops::Deref;
use std::pin::Pin;
use std::ptr::{self, NonNull};
use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// A pointer-like handle that can be resolved to a raw address.
pub trait ToAddress {
    /// The raw pointer type at the bottom of the wrapper chain.
    type Raw: Copy;

    /// The raw address this handle refers to.
    fn to_address(&self) -> Self::Raw;
}

/// Resolve `ptr` to the raw address it ultimately refers to.
///
/// Free-function form of [`ToAddress::to_address`].
#[inline]
#[must_use]
pub fn to_address<P>(ptr: &P) -> P::Raw
where
    P: ToAddress + ?Sized,
{
    ptr.to_address()
}

impl<T: ?Sized> ToAddress for *const T {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        *self
    }
}

impl<T: ?Sized> ToAddress for *mut T {
    type Raw = *mut T;

    #[inline]
    fn to_address(&self) -> *mut T {
        *self
    }
}

impl<T: ?Sized> ToAddress for NonNull<T> {
    type Raw = *mut T;

    #[inline]
    fn to_address(&self) -> *mut T {
        self.as_ptr()
    }
}

/// `None` resolves to a null pointer.
impl<T> ToAddress for Option<NonNull<T>> {
    type Raw = *mut T;

    #[inline]
    fn to_address(&self) -> *mut T {
        match self {
            Some(p) => p.as_ptr(),
            None => ptr::null_mut(),
        }
    }
}

impl<T: ?Sized> ToAddress for &T {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        *self as *const T
    }
}

impl<T: ?Sized> ToAddress for &mut T {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        &**self as *const T
    }
}

impl<T: ?Sized> ToAddress for Box<T> {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        &**self as *const T
    }
}

/// Address of the shared value, not of the reference-count header.
impl<T: ?Sized> ToAddress for Rc<T> {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        Rc::as_ptr(self)
    }
}

/// Address of the shared value, not of the reference-count header.
impl<T: ?Sized> ToAddress for Arc<T> {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        Arc::as_ptr(self)
    }
}

/// Valid even after the value is dropped; the address is then dangling.
impl<T: ?Sized> ToAddress for rc::Weak<T> {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        self.as_ptr()
    }
}

impl<T: ?Sized> ToAddress for sync::Weak<T> {
    type Raw = *const T;

    #[inline]
    fn to_address(&self) -> *const T {
        self.as_ptr()
    }
}

/// Address of the pinned value, reached through `P`'s `Deref`.
///
/// `Pin` hands out no shared access to the `P` it wraps, so a pinned
/// wrapper resolves through what it dereferences to, not through its own
/// `ToAddress` impl.
impl<P> ToAddress for Pin<P>
where
    P: Deref,
{
    type Raw = *const P::Target;

    #[inline]
    fn to_address(&self) -> *const P::Target {
        self.as_ref().get_ref() as *const P::Target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Layer<P>(P);

    impl<P: ToAddress> ToAddress for Layer<P> {
        type Raw = P::Raw;

        fn to_address(&self) -> P::Raw {
            self.0.to_address()
        }
    }

    #[test]
    fn raw_pointers_are_returned_unchanged() {
        let mut value = 3_u32;
        let c = &value as *const u32;
        let m = &mut value as *mut u32;
        assert_eq!(to_address(&c), c);
        assert_eq!(to_address(&m), m);
    }

    #[test]
    fn null_and_dangling_resolve_without_dereference() {
        let null: *const u8 = ptr::null();
        assert!(to_address(&null).is_null());
        let dangling = NonNull::<u64>::dangling();
        assert_eq!(to_address(&dangling), dangling.as_ptr());
        assert!(to_address(&None::<NonNull<u8>>).is_null());
    }

    #[test]
    fn wrapper_chain_resolves_to_innermost() {
        let value = [1_u16, 2, 3];
        let raw = value.as_ptr();
        assert_eq!(to_address(&Layer(raw)), raw);
        assert_eq!(to_address(&Layer(Layer(raw))), raw);
        assert_eq!(to_address(&Layer(Layer(Layer(Layer(raw))))), raw);
    }

    #[test]
    fn smart_pointers_resolve_to_pointee() {
        let boxed = Box::new(11_i64);
        assert_eq!(to_address(&boxed), &*boxed as *const i64);

        let rc = Rc::new(String::from("rc"));
        let weak = Rc::downgrade(&rc);
        assert_eq!(to_address(&rc), &*rc as *const String);
        assert_eq!(to_address(&weak), to_address(&rc));

        let arc = Arc::new(0_u8);
        let weak = Arc::downgrade(&arc);
        assert_eq!(to_address(&arc), &*arc as *const u8);
        assert_eq!(to_address(&weak), to_address(&arc));

        let pinned = Box::pin(4_u32);
        assert_eq!(to_address(&pinned), &*pinned as *const u32);
    }

    #[test]
    fn weak_pointers_to_unsized_values() {
        let rc: Rc<[u8]> = Rc::from(&[1_u8, 2, 3][..]);
        let weak = Rc::downgrade(&rc);
        assert_eq!(to_address(&weak), Rc::as_ptr(&rc));
        assert_eq!(to_address(&weak).len(), 3);

        let arc: Arc<str> = Arc::from("tessera");
        let weak = Arc::downgrade(&arc);
        assert_eq!(to_address(&weak), Arc::as_ptr(&arc));
    }

    #[test]
    fn pinned_handles_resolve_to_pointee() {
        let mut value = 12_u16;
        let expected = &value as *const u16;
        let pinned = Pin::new(&mut value);
        assert_eq!(to_address(&pinned), expected);

        let shared = Rc::pin([0_u32; 2]);
        assert_eq!(to_address(&shared), &*shared as *const [u32; 2]);
    }

    #[test]
    fn references_resolve_to_referent() {
        let mut value = 9_u8;
        let expected = &value as *const u8;
        let shared = &value;
        assert_eq!(to_address(&shared), expected);
        let exclusive = &mut value;
        assert_eq!(to_address(&exclusive), expected);
    }

    #[test]
    fn unsized_pointees_keep_metadata() {
        let slice: Box<[u32]> = vec![1, 2, 3].into_boxed_slice();
        let raw = to_address(&slice);
        assert_eq!(raw, &*slice as *const [u32]);
        assert_eq!(raw.len(), 3);
    }
}
