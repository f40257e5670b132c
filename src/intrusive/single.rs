use core::ptr::NonNull;

use super::traits::{Link, ListLink};

/// A link in a singly linked list.
///
/// A null `next` means the link is not linked. The tail of a container chain
/// points at [`ListLink::TERMINATOR`], which `next` reports as `None`.
#[derive(Debug, Default)]
pub struct ForwardLink<const ID: usize = 0> {
    next: Option<NonNull<Self>>,
}

impl<const ID: usize> ForwardLink<ID> {
    /// Creates an unlinked link.
    pub const fn new() -> Self {
        Self { next: None }
    }

    /// Get the next link.
    #[inline]
    pub fn next(&self) -> Option<NonNull<Self>> {
        <Self as ListLink>::live(self.next)
    }
}

impl<const ID: usize> Link for ForwardLink<ID> {
    const ROLE: usize = ID;
    const UNLINKED: Self = Self::new();

    #[inline]
    fn is_linked(&self) -> bool {
        self.next.is_some()
    }

    #[inline]
    fn clear(&mut self) {
        self.next = None;
    }
}

impl<const ID: usize> ListLink for ForwardLink<ID> {
    const TERMINATED: Self = Self {
        next: Some(Self::TERMINATOR),
    };

    #[inline]
    fn next(&self) -> Option<NonNull<Self>> {
        Self::live(self.next)
    }

    #[inline]
    unsafe fn link(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>) {
        if let Some(lhs) = lhs {
            unsafe { (*lhs.as_ptr()).next = rhs };
        }
    }

    #[inline]
    unsafe fn link_splice(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>) {
        if let Some(lhs) = lhs {
            unsafe {
                if let Some(rhs) = rhs {
                    (*rhs.as_ptr()).next = (*lhs.as_ptr()).next;
                }
                (*lhs.as_ptr()).next = rhs;
            }
        }
    }

    #[inline]
    unsafe fn link_splice_range(lhs: Option<NonNull<Self>>, first: NonNull<Self>, last: NonNull<Self>) {
        unsafe {
            match lhs {
                Some(lhs) => {
                    (*last.as_ptr()).next = (*lhs.as_ptr()).next;
                    (*lhs.as_ptr()).next = Some(first);
                }
                None => (*last.as_ptr()).next = None,
            }
        }
    }

    #[inline]
    unsafe fn unlink_after(node: NonNull<Self>) {
        unsafe {
            if let Some(unlinked) = Self::live((*node.as_ptr()).next) {
                (*node.as_ptr()).next = (*unlinked.as_ptr()).next;
            }
        }
    }

    #[inline]
    unsafe fn unlink_after_range(before: NonNull<Self>, last: NonNull<Self>) {
        unsafe { (*before.as_ptr()).next = (*last.as_ptr()).next };
    }
}

unsafe impl<const ID: usize> Send for ForwardLink<ID> {}
