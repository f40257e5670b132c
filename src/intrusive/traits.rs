use core::ptr::NonNull;

use crate::error::Error;

/// A link role embedded in a node.
///
/// Every link role is parameterized by a compile-time `ID`, so the same link
/// kind can appear several times in one node as unrelated roles.
pub trait Link: Sized {
    /// The role identifier.
    const ROLE: usize;

    /// A link with every pointer cleared.
    const UNLINKED: Self;

    /// Returns true if any pointer of the link is set.
    fn is_linked(&self) -> bool;

    /// Clears every pointer of the link.
    fn clear(&mut self);
}

/// A link that can be threaded into a list.
///
/// The associated functions are the pointer surgery behind the free functions
/// in [`super::ops`]. They take raw pointers so the same implementation can
/// serve every operand form.
///
/// Containers end their chains at [`ListLink::TERMINATOR`] instead of a null
/// pointer, so every member, the last one included, reads as linked. The
/// terminator is never dereferenced. The link implementations skip it when
/// they update neighbours, and `next` reports it as `None`.
pub trait ListLink: Link {
    /// Non-null end marker of a container chain.
    ///
    /// It is a dangling, well aligned address that no live link can occupy.
    const TERMINATOR: NonNull<Self> = NonNull::dangling();

    /// A link whose `next` is the terminator. Containers start from it.
    const TERMINATED: Self;

    /// Get the next link. Returns `None` at the end of a chain, whether it is
    /// null or the terminator.
    fn next(&self) -> Option<NonNull<Self>>;

    /// Map a missing link to the terminator.
    #[inline]
    fn or_terminator(link: Option<NonNull<Self>>) -> Option<NonNull<Self>> {
        Some(link.unwrap_or(Self::TERMINATOR))
    }

    /// Drop the terminator, keeping real links.
    #[inline]
    fn live(link: Option<NonNull<Self>>) -> Option<NonNull<Self>> {
        link.filter(|&link| link != Self::TERMINATOR)
    }

    /// Make `rhs` follow `lhs`.
    ///
    /// # Safety
    ///
    /// Every non-null operand must point to a live link.
    unsafe fn link(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>);

    /// Insert `rhs` right after `lhs`, keeping what followed `lhs`.
    ///
    /// # Safety
    ///
    /// Every non-null operand, and the link following `lhs`, must be live.
    unsafe fn link_splice(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>);

    /// Insert the chain `[first..last]` right after `lhs`.
    ///
    /// # Safety
    ///
    /// `first` must reach `last` through `next`, and every link involved must be live.
    unsafe fn link_splice_range(lhs: Option<NonNull<Self>>, first: NonNull<Self>, last: NonNull<Self>);

    /// Remove the link following `node`, if any.
    ///
    /// # Safety
    ///
    /// `node` and the two links following it must be live.
    unsafe fn unlink_after(node: NonNull<Self>);

    /// Remove the run `(before, last]`, connecting `before` to what followed `last`.
    ///
    /// # Safety
    ///
    /// `before` must reach `last` through `next`, and every link involved must be live.
    unsafe fn unlink_after_range(before: NonNull<Self>, last: NonNull<Self>);

    /// Drop any back pointer held by `node`. Used by containers to turn `node`
    /// into a head that does not refer to the container's sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be live.
    #[inline]
    unsafe fn detach_previous(node: NonNull<Self>) {
        let _ = node;
    }
}

/// A node type that embeds the link role `L`.
///
/// Usually implemented with `#[derive(Linked)]`.
///
/// # Safety
///
/// `OFFSET` must be the byte offset of a field of type `L` inside `Self`.
pub unsafe trait Linked<L: Link>: Sized {
    /// Byte offset of the `L` field.
    const OFFSET: usize;

    /// Get the link embedded in `node`.
    #[inline]
    fn to_link(node: NonNull<Self>) -> NonNull<L> {
        let ptr = node.as_ptr().cast::<u8>().wrapping_add(Self::OFFSET);
        // SAFETY: `node` is non-null and the offset stays inside the node.
        unsafe { NonNull::new_unchecked(ptr.cast::<L>()) }
    }

    /// Get the node that embeds `link`.
    ///
    /// # Safety
    ///
    /// `link` must point to the `L` field of a `Self`.
    #[inline]
    unsafe fn from_link(link: NonNull<L>) -> NonNull<Self> {
        let ptr = link.as_ptr().cast::<u8>().wrapping_sub(Self::OFFSET);
        unsafe { NonNull::new_unchecked(ptr.cast::<Self>()) }
    }
}

/// An intrusive container that accepts nodes one at a time.
pub trait Push<T> {
    /// Push a node into the container.
    ///
    /// # Safety
    ///
    /// `node` must stay valid, and must not move, for as long as it is linked
    /// into the container.
    unsafe fn push(&mut self, node: NonNull<T>) -> Result<(), Error>;
}
