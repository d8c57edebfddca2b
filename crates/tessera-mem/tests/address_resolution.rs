//! Integration test: resolving layered pointer handles.
//!
//! Wraps known raw addresses in chains of `Fancy` layers of increasing
//! depth and checks that resolution always lands on the original address.

use std::ptr::NonNull;
use std::rc::Rc;

use tessera_mem::{to_address, ToAddress};
use tessera_test_utils::Fancy;

#[test]
fn chains_of_every_depth_resolve_to_the_same_address() {
    let data = [0_u64; 4];
    let raw = data.as_ptr();

    let d0 = raw;
    let d1 = Fancy::new(raw);
    let d2 = d1.wrap();
    let d3 = d2.wrap();
    let d4 = d3.wrap();

    assert_eq!(to_address(&d0), raw);
    assert_eq!(to_address(&d1), raw);
    assert_eq!(to_address(&d2), raw);
    assert_eq!(to_address(&d3), raw);
    assert_eq!(to_address(&d4), raw);
    assert_eq!(d4.hops(), 3);
}

#[test]
fn mutable_chains_keep_mutability() {
    let mut value = 1_i32;
    let raw = &mut value as *mut i32;
    let chain = Fancy::new(Fancy::new(raw));
    let resolved: *mut i32 = to_address(&chain);
    assert_eq!(resolved, raw);
}

#[test]
fn non_null_at_the_bottom_resolves_to_mut_pointer() {
    let mut value = 2_u16;
    let nn = NonNull::from(&mut value);
    let chain = Fancy::new(nn).wrap();
    assert_eq!(chain.to_address(), nn.as_ptr());
}

#[test]
fn smart_pointer_at_the_bottom() {
    let shared = Rc::new([1_u8, 2, 3]);
    let expected = Rc::as_ptr(&shared);
    let chain = Fancy::new(Rc::clone(&shared)).wrap().wrap();
    assert_eq!(to_address(&chain), expected);
    assert_eq!(Rc::strong_count(&shared), 2);
}

#[test]
fn dangling_bottom_is_never_dereferenced() {
    let chain = Fancy::new(NonNull::<[u64; 1024]>::dangling()).wrap();
    assert_eq!(to_address(&chain), NonNull::dangling().as_ptr());
}
