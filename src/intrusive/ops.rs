//! The link algebra.
//!
//! These functions are the only code that mutates link fields. They never
//! allocate, never fail and never look past the links they are handed.
//!
//! The splice functions insert *after* their first argument, which differs
//! from the "insert before" convention of `std` cursors but lets forward and
//! bidirectional links share one call shape. With a list holding `1, 2, 3, 4`,
//! `link_splice(two, five)` yields `1, 2, 5, 3, 4`.
//!
//! Every operand is an [`Operand`]: a `&mut L`, a `NonNull<L>`, an
//! `Option<NonNull<L>>` or a `*mut L`. Null operands are checked before use.
//! A null first operand turns `link` and `link_splice` into a no-op on that
//! side.
//!
//! # Safety
//!
//! All functions here are `unsafe`: every non-null operand, and every link
//! reachable through the fields they touch, must point to a live link of the
//! same role.

use core::ptr::NonNull;

use super::{
    double::BidirectionalLink,
    traits::{Link, ListLink},
    tree::TreeLink,
};

/// Anything that can name a (possibly null) link.
pub trait Operand<L> {
    fn into_link(self) -> Option<NonNull<L>>;
}

impl<L> Operand<L> for &mut L {
    #[inline]
    fn into_link(self) -> Option<NonNull<L>> {
        Some(NonNull::from(self))
    }
}

impl<L> Operand<L> for NonNull<L> {
    #[inline]
    fn into_link(self) -> Option<NonNull<L>> {
        Some(self)
    }
}

impl<L> Operand<L> for Option<NonNull<L>> {
    #[inline]
    fn into_link(self) -> Option<NonNull<L>> {
        self
    }
}

impl<L> Operand<L> for *mut L {
    #[inline]
    fn into_link(self) -> Option<NonNull<L>> {
        NonNull::new(self)
    }
}

/// Make `rhs` follow `lhs`.
///
/// For bidirectional links a non-null `rhs` always gets `previous = lhs`, so
/// `link(None, head)` marks `head` as the first link of a chain.
#[inline]
pub unsafe fn link<L, A, B>(lhs: A, rhs: B)
where
    L: ListLink,
    A: Operand<L>,
    B: Operand<L>,
{
    unsafe { L::link(lhs.into_link(), rhs.into_link()) }
}

/// Insert `rhs` right after `lhs`, keeping whatever followed `lhs`.
#[inline]
pub unsafe fn link_splice<L, A, B>(lhs: A, rhs: B)
where
    L: ListLink,
    A: Operand<L>,
    B: Operand<L>,
{
    unsafe { L::link_splice(lhs.into_link(), rhs.into_link()) }
}

/// Insert the already linked chain `[first..last]` right after `lhs`.
///
/// A null `lhs` terminates the chain at `last`. A null `first` or `last` is a no-op.
#[inline]
pub unsafe fn link_splice_range<L, A, F, E>(lhs: A, first: F, last: E)
where
    L: ListLink,
    A: Operand<L>,
    F: Operand<L>,
    E: Operand<L>,
{
    if let (Some(first), Some(last)) = (first.into_link(), last.into_link()) {
        unsafe { L::link_splice_range(lhs.into_link(), first, last) }
    }
}

/// Remove the link following `node`. The removed link keeps its own fields.
#[inline]
pub unsafe fn unlink_after<L, A>(node: A)
where
    L: ListLink,
    A: Operand<L>,
{
    if let Some(node) = node.into_link() {
        unsafe { L::unlink_after(node) }
    }
}

/// Remove the run `(before, last]`. The run keeps its internal links.
#[inline]
pub unsafe fn unlink_after_range<L, A, E>(before: A, last: E)
where
    L: ListLink,
    A: Operand<L>,
    E: Operand<L>,
{
    if let (Some(before), Some(last)) = (before.into_link(), last.into_link()) {
        unsafe { L::unlink_after_range(before, last) }
    }
}

/// Detach `node` from its neighbours, reconnect them, and clear `node`.
///
/// Unlinking an unlinked node changes nothing.
#[inline]
pub unsafe fn unlink<const ID: usize, A>(node: A)
where
    A: Operand<BidirectionalLink<ID>>,
{
    if let Some(node) = node.into_link() {
        unsafe {
            BidirectionalLink::bypass(node);
            (*node.as_ptr()).clear();
        }
    }
}

/// Detach the run `[first..last]`, reconnecting its outer neighbours.
///
/// When `first` and `last` are the same link this is [`unlink`]. Otherwise the
/// run's internal links, including `first.previous` and `last.next`, are left
/// for the caller to clear or reuse.
#[inline]
pub unsafe fn unlink_range<const ID: usize, F, E>(first: F, last: E)
where
    F: Operand<BidirectionalLink<ID>>,
    E: Operand<BidirectionalLink<ID>>,
{
    if let (Some(first), Some(last)) = (first.into_link(), last.into_link()) {
        unsafe {
            if first == last {
                unlink(first);
            } else {
                BidirectionalLink::bypass_range(first, last);
            }
        }
    }
}

/// Make `leaf` the left child of `parent`.
#[inline]
pub unsafe fn link_left<const ID: usize, P, C>(parent: P, leaf: C)
where
    P: Operand<TreeLink<ID>>,
    C: Operand<TreeLink<ID>>,
{
    let (parent, leaf) = (parent.into_link(), leaf.into_link());
    unsafe {
        if let Some(parent) = parent {
            (*parent.as_ptr()).set_left(leaf);
        }

        if let Some(leaf) = leaf {
            (*leaf.as_ptr()).set_parent(parent);
        }
    }
}

/// Make `leaf` the right child of `parent`.
#[inline]
pub unsafe fn link_right<const ID: usize, P, C>(parent: P, leaf: C)
where
    P: Operand<TreeLink<ID>>,
    C: Operand<TreeLink<ID>>,
{
    let (parent, leaf) = (parent.into_link(), leaf.into_link());
    unsafe {
        if let Some(parent) = parent {
            (*parent.as_ptr()).set_right(leaf);
        }

        if let Some(leaf) = leaf {
            (*leaf.as_ptr()).set_parent(parent);
        }
    }
}

/// Rotate `leaf`, the right child of `parent`, into `parent`'s place.
///
/// `parent` adopts `leaf`'s left subtree as its right child, and `leaf` takes
/// over `parent`'s parent pointer. The grandparent's child slot still points
/// to `parent`; the caller relinks `leaf` there.
#[inline]
pub unsafe fn link_rotate_left<const ID: usize, P, C>(parent: P, leaf: C)
where
    P: Operand<TreeLink<ID>>,
    C: Operand<TreeLink<ID>>,
{
    if let (Some(parent), Some(leaf)) = (parent.into_link(), leaf.into_link()) {
        unsafe {
            let p = &mut *parent.as_ptr();
            let l = &mut *leaf.as_ptr();

            p.set_right(l.left());
            if let Some(right) = p.right() {
                (*right.as_ptr()).set_parent(Some(parent));
            }

            l.set_parent(p.parent());
            p.set_parent(Some(leaf));
            l.set_left(Some(parent));
        }
    }
}

/// Rotate `leaf`, the left child of `parent`, into `parent`'s place.
///
/// Mirror image of [`link_rotate_left`]; the grandparent is not repaired either.
#[inline]
pub unsafe fn link_rotate_right<const ID: usize, P, C>(parent: P, leaf: C)
where
    P: Operand<TreeLink<ID>>,
    C: Operand<TreeLink<ID>>,
{
    if let (Some(parent), Some(leaf)) = (parent.into_link(), leaf.into_link()) {
        unsafe {
            let p = &mut *parent.as_ptr();
            let l = &mut *leaf.as_ptr();

            p.set_left(l.right());
            if let Some(left) = p.left() {
                (*left.as_ptr()).set_parent(Some(parent));
            }

            l.set_parent(p.parent());
            p.set_parent(Some(leaf));
            l.set_right(Some(parent));
        }
    }
}

/// Rotate right if `leaf` is the left child of `parent`, left otherwise.
#[inline]
pub unsafe fn link_rotate<const ID: usize, P, C>(parent: P, leaf: C)
where
    P: Operand<TreeLink<ID>>,
    C: Operand<TreeLink<ID>>,
{
    if let (Some(parent), Some(leaf)) = (parent.into_link(), leaf.into_link()) {
        unsafe {
            if (*parent.as_ptr()).left() == Some(leaf) {
                link_rotate_right(parent, leaf);
            } else {
                link_rotate_left(parent, leaf);
            }
        }
    }
}
