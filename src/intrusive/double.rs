use core::ptr::NonNull;

use super::traits::{Link, ListLink};

/// A link in a doubly linked list.
///
/// The link reads as linked when either pointer is set. Inside a container the
/// last member points at [`ListLink::TERMINATOR`], so a lone member reads as
/// linked too.
#[derive(Debug, Default)]
pub struct BidirectionalLink<const ID: usize = 0> {
    next: Option<NonNull<Self>>,
    previous: Option<NonNull<Self>>,
}

impl<const ID: usize> BidirectionalLink<ID> {
    /// Creates an unlinked link.
    pub const fn new() -> Self {
        Self {
            next: None,
            previous: None,
        }
    }

    /// Get the next link.
    #[inline]
    pub fn next(&self) -> Option<NonNull<Self>> {
        <Self as ListLink>::live(self.next)
    }

    /// Get the previous link.
    #[inline]
    pub fn previous(&self) -> Option<NonNull<Self>> {
        self.previous
    }

    /// Swap the direction of this link.
    #[inline]
    pub fn reverse(&mut self) {
        core::mem::swap(&mut self.next, &mut self.previous);
    }

    /// Connect the neighbours of `node` to each other. The fields of `node`
    /// itself are left as they were.
    ///
    /// # Safety
    ///
    /// `node` and both of its neighbours must be live.
    pub(crate) unsafe fn bypass(node: NonNull<Self>) {
        unsafe {
            let next = (*node.as_ptr()).next;
            let previous = (*node.as_ptr()).previous;

            if let Some(previous) = previous {
                (*previous.as_ptr()).next = next;
            }

            if let Some(next) = Self::live(next) {
                (*next.as_ptr()).previous = previous;
            }
        }
    }

    /// Connect the outer neighbours of the run `[first..last]`.
    ///
    /// # Safety
    ///
    /// `first` must reach `last` through `next`, and every link involved must be live.
    pub(crate) unsafe fn bypass_range(first: NonNull<Self>, last: NonNull<Self>) {
        unsafe {
            let after = (*last.as_ptr()).next;
            let before = (*first.as_ptr()).previous;

            if let Some(after) = Self::live(after) {
                (*after.as_ptr()).previous = before;
            }

            if let Some(before) = before {
                (*before.as_ptr()).next = after;
            }
        }
    }
}

impl<const ID: usize> Link for BidirectionalLink<ID> {
    const ROLE: usize = ID;
    const UNLINKED: Self = Self::new();

    #[inline]
    fn is_linked(&self) -> bool {
        self.previous.is_some() || self.next.is_some()
    }

    #[inline]
    fn clear(&mut self) {
        self.previous = None;
        self.next = None;
    }
}

impl<const ID: usize> ListLink for BidirectionalLink<ID> {
    const TERMINATED: Self = Self {
        next: Some(Self::TERMINATOR),
        previous: None,
    };

    #[inline]
    fn next(&self) -> Option<NonNull<Self>> {
        Self::live(self.next)
    }

    #[inline]
    unsafe fn link(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>) {
        unsafe {
            if let Some(lhs) = lhs {
                (*lhs.as_ptr()).next = rhs;
            }

            if let Some(rhs) = Self::live(rhs) {
                (*rhs.as_ptr()).previous = lhs;
            }
        }
    }

    #[inline]
    unsafe fn link_splice(lhs: Option<NonNull<Self>>, rhs: Option<NonNull<Self>>) {
        unsafe {
            if let Some(rhs) = rhs {
                if let Some(lhs) = lhs {
                    (*rhs.as_ptr()).next = (*lhs.as_ptr()).next;
                }
                (*rhs.as_ptr()).previous = lhs;
            }

            if let Some(lhs) = lhs {
                if let Some(next) = Self::live((*lhs.as_ptr()).next) {
                    (*next.as_ptr()).previous = rhs;
                }
                (*lhs.as_ptr()).next = rhs;
            }
        }
    }

    #[inline]
    unsafe fn link_splice_range(lhs: Option<NonNull<Self>>, first: NonNull<Self>, last: NonNull<Self>) {
        unsafe {
            (*last.as_ptr()).next = match lhs {
                Some(lhs) => (*lhs.as_ptr()).next,
                None => None,
            };
            (*first.as_ptr()).previous = lhs;

            if let Some(next) = Self::live((*last.as_ptr()).next) {
                (*next.as_ptr()).previous = Some(last);
            }

            if let Some(lhs) = lhs {
                (*lhs.as_ptr()).next = Some(first);
            }
        }
    }

    #[inline]
    unsafe fn unlink_after(node: NonNull<Self>) {
        unsafe {
            if let Some(unlinked) = Self::live((*node.as_ptr()).next) {
                let after = (*unlinked.as_ptr()).next;
                (*node.as_ptr()).next = after;

                if let Some(after) = Self::live(after) {
                    (*after.as_ptr()).previous = Some(node);
                }
            }
        }
    }

    #[inline]
    unsafe fn unlink_after_range(before: NonNull<Self>, last: NonNull<Self>) {
        unsafe {
            let after = (*last.as_ptr()).next;
            (*before.as_ptr()).next = after;

            if let Some(after) = Self::live(after) {
                (*after.as_ptr()).previous = Some(before);
            }
        }
    }

    #[inline]
    unsafe fn detach_previous(node: NonNull<Self>) {
        unsafe { (*node.as_ptr()).previous = None };
    }
}

unsafe impl<const ID: usize> Send for BidirectionalLink<ID> {}
