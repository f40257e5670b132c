use core::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use super::traits::{Linked, ListLink};

/// An iterator over the nodes of an intrusive stack or list.
///
/// Borrows the container, so the chain cannot change while the iterator is alive.
pub struct Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
    current: Option<NonNull<L>>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, L> Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
    /// Creates an iterator starting at `head`.
    ///
    /// # Safety
    ///
    /// `head` must start a chain of exactly `len` live links embedded in `T`
    /// that stays valid for `'a`.
    pub(crate) unsafe fn new(head: Option<NonNull<L>>, len: usize) -> Self {
        Self {
            current: head,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, L> Iterator for Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let Some(current) = self.current else {
            self.remaining = 0;
            return None;
        };

        unsafe {
            self.current = current.as_ref().next();
            self.remaining -= 1;
            Some(&*T::from_link(current).as_ptr())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, L> ExactSizeIterator for Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
}

impl<'a, T, L> FusedIterator for Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
}

impl<'a, T, L> Clone for Iter<'a, T, L>
where
    T: Linked<L>,
    L: ListLink,
{
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}
