extern crate std;

use std::vec;

use core::ptr::{self, NonNull};

use crate::{
    ForwardLink, Linked, Link, ListLink,
    intrusive::ops,
};

use super::{forward, items, pointers, walk_forward};

/// Links `links` front to back and terminates the chain.
unsafe fn chain_up(links: &[NonNull<ForwardLink<0>>]) {
    for pair in links.windows(2) {
        unsafe { ops::link(pair[0], pair[1]) };
    }
    if let Some(&last) = links.last() {
        unsafe { ops::link(last, None) };
    }
}

#[test]
fn test_link_connects_two_nodes() {
    let mut nodes = items(0..2);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        ops::link(links[0], links[1]);
        assert_eq!(links[0].as_ref().next(), Some(links[1]));
        assert_eq!(walk_forward(links[0]), vec![0, 1]);
    }
    assert!(nodes[0].forward.is_linked());
    assert!(!nodes[1].forward.is_linked());
}

#[test]
fn test_link_accepts_every_operand_form() {
    let mut a = ForwardLink::<0>::new();
    let mut b = ForwardLink::<0>::new();
    let b_ptr = NonNull::from(&mut b);

    unsafe {
        ops::link(&mut a, b_ptr);
        assert_eq!(a.next(), Some(b_ptr));

        ops::link(&mut a, ptr::null_mut());
        assert_eq!(a.next(), None);

        ops::link(NonNull::from(&mut a).as_ptr(), Some(b_ptr));
        assert_eq!(a.next(), Some(b_ptr));

        // A null left side touches nothing.
        ops::link(None, NonNull::from(&mut a));
        assert_eq!(a.next(), Some(b_ptr));
    }
}

#[test]
fn test_link_splice_inserts_after() {
    let mut nodes = items(1..=5);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links[..4]);
        ops::link_splice(links[1], links[4]);
        assert_eq!(walk_forward(links[0]), vec![1, 2, 5, 3, 4]);
    }
}

#[test]
fn test_link_splice_at_tail() {
    let mut nodes = items(1..=3);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links[..2]);
        ops::link_splice(links[1], links[2]);
        assert_eq!(walk_forward(links[0]), vec![1, 2, 3]);
        assert_eq!(links[2].as_ref().next(), None);
    }
}

#[test]
fn test_link_splice_range_inserts_chain() {
    let mut nodes = items(1..=5);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links[..3]);
        chain_up(&links[3..]);
        ops::link_splice_range(links[0], links[3], links[4]);
        assert_eq!(walk_forward(links[0]), vec![1, 4, 5, 2, 3]);
    }
}

#[test]
fn test_link_splice_range_without_lhs_terminates() {
    let mut nodes = items(1..=3);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links);
        ops::link_splice_range(None, links[0], links[1]);
        assert_eq!(walk_forward(links[0]), vec![1, 2]);

        // Null ends are a no-op.
        ops::link_splice_range(links[1], None, links[2]);
        assert_eq!(links[1].as_ref().next(), None);
    }
}

#[test]
fn test_unlink_after() {
    let mut nodes = items(1..=3);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links);
        ops::unlink_after(links[0]);
        assert_eq!(walk_forward(links[0]), vec![1, 3]);

        // The removed link keeps its own pointer.
        assert_eq!(links[1].as_ref().next(), Some(links[2]));

        ops::unlink_after(links[2]);
        assert_eq!(walk_forward(links[0]), vec![1, 3]);
    }
}

#[test]
fn test_unlink_after_range() {
    let mut nodes = items(1..=5);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        chain_up(&links);
        ops::unlink_after_range(links[0], links[2]);
        assert_eq!(walk_forward(links[0]), vec![1, 4, 5]);
        assert_eq!(walk_forward(links[1]), vec![2, 3, 4, 5]);
    }
}

#[derive(Linked)]
#[linked(crate_path = "crate")]
struct Dual {
    value: i32,
    first: ForwardLink<0>,
    second: ForwardLink<1>,
}

#[test]
fn test_roles_are_independent() {
    let mut nodes: vec::Vec<Dual> = (0..3)
        .map(|value| Dual {
            value,
            first: ForwardLink::new(),
            second: ForwardLink::new(),
        })
        .collect();
    let ptrs: vec::Vec<NonNull<Dual>> = nodes.iter_mut().map(NonNull::from).collect();
    let first = |i: usize| <Dual as Linked<ForwardLink<0>>>::to_link(ptrs[i]);
    let second = |i: usize| <Dual as Linked<ForwardLink<1>>>::to_link(ptrs[i]);

    unsafe {
        // 0 -> 1 -> 2 in the first role, 2 -> 1 -> 0 in the second.
        ops::link(first(0), first(1));
        ops::link(first(1), first(2));
        ops::link(second(2), second(1));
        ops::link(second(1), second(0));

        ops::unlink_after(first(0));

        assert_eq!(first(0).as_ref().next(), Some(first(2)));
        assert_eq!(second(2).as_ref().next(), Some(second(1)));
        assert_eq!(second(1).as_ref().next(), Some(second(0)));

        let back = Dual::from_link(second(1));
        assert_eq!(back.as_ref().value, 1);
    }

    assert_eq!(<ForwardLink<0> as Link>::ROLE, 0);
    assert_eq!(<ForwardLink<1> as Link>::ROLE, 1);
    assert!(nodes[0].first.is_linked());
    assert!(!nodes[0].second.is_linked());
}

#[test]
fn test_offsets_round_trip() {
    let mut nodes = items(7..8);
    let node = NonNull::from(&mut nodes[0]);
    let link = forward(node);

    unsafe {
        assert_eq!(super::Item::from_link(link), node);
    }
    assert_eq!(link.as_ptr().cast_const(), ptr::addr_of!(nodes[0].forward));
}

#[test]
fn test_terminated_tail_reads_linked() {
    let mut nodes = items(0..2);
    let links: vec::Vec<_> = pointers(&mut nodes).into_iter().map(forward).collect();

    unsafe {
        ops::link(links[0], links[1]);
        ops::link(links[1], Some(ForwardLink::<0>::TERMINATOR));
        assert_eq!(walk_forward(links[0]), vec![0, 1]);
        assert_eq!(links[1].as_ref().next(), None);

        // Nothing follows the terminator, so this is a no-op.
        ops::unlink_after(links[1]);
        assert_eq!(walk_forward(links[0]), vec![0, 1]);

        ops::unlink_after(links[0]);
        assert_eq!(walk_forward(links[0]), vec![0]);
    }
    assert!(nodes[0].forward.is_linked());
    assert!(ForwardLink::<0>::TERMINATED.is_linked());
    assert_eq!(ForwardLink::<0>::TERMINATED.next(), None);
}
