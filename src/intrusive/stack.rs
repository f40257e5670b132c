use core::{marker::PhantomData, ptr::NonNull};

use crate::error::{ensure, Error, ErrorPolicy, Report};

use super::{
    iter::Iter,
    single::ForwardLink,
    traits::{Link, Linked, ListLink, Push},
};

/// An intrusive LIFO stack.
///
/// The stack owns only a pointer to its top link and a count. Nodes are
/// threaded through their `L` link, which the stack clears when a node leaves.
/// The bottom node points at [`ListLink::TERMINATOR`], so every node on the
/// stack reads as linked.
///
/// Dropping the stack does not touch its nodes; call [`clear`](Self::clear)
/// first if the nodes are going to be reused.
pub struct IntrusiveStack<T, L = ForwardLink, P = Report>
where
    T: Linked<L>,
    L: ListLink,
{
    top: Option<NonNull<L>>,
    count: usize,
    _marker: PhantomData<(*const T, P)>,
}

impl<T, L, P> IntrusiveStack<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    /// Creates a new, empty stack.
    pub const fn new() -> Self {
        IntrusiveStack {
            top: None,
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Push a node on top of the stack.
    ///
    /// With a checking policy a node that is still linked is rejected with
    /// [`Error::AlreadyLinked`] and nothing changes.
    ///
    /// # Safety
    ///
    /// `node` must stay valid, and must not move, while it is on the stack.
    pub unsafe fn push(&mut self, node: NonNull<T>) -> Result<(), Error> {
        let link = T::to_link(node);
        unsafe {
            ensure::<P, _>(|| !link.as_ref().is_linked(), Error::AlreadyLinked)?;

            (*link.as_ptr()).clear();
            L::link(Some(link), L::or_terminator(self.top));
        }
        self.top = Some(link);
        self.count += 1;
        Ok(())
    }

    /// Pop the top node off the stack and clear its link.
    pub fn pop(&mut self) -> Result<NonNull<T>, Error> {
        let Some(top) = self.top else {
            return Err(P::raise(Error::Empty));
        };

        unsafe {
            let next = top.as_ref().next();
            (*top.as_ptr()).clear();
            if let Some(next) = next {
                L::detach_previous(next);
            }
            self.top = next;
            self.count -= 1;
            Ok(T::from_link(top))
        }
    }

    /// Pop the top node and push it into `destination` without touching the
    /// node's memory.
    ///
    /// # Safety
    ///
    /// The node must stay valid, and must not move, while it is linked into
    /// `destination`.
    pub unsafe fn pop_into<D>(&mut self, destination: &mut D) -> Result<(), Error>
    where
        D: Push<T>,
    {
        let node = self.pop()?;
        unsafe { destination.push(node) }
    }

    /// Reverse the order of the stack in place.
    pub fn reverse(&mut self) {
        let mut reversed: Option<NonNull<L>> = None;
        let mut current = self.top;

        unsafe {
            while let Some(link) = current {
                current = link.as_ref().next();
                L::link(Some(link), L::or_terminator(reversed));
                reversed = Some(link);
            }

            if let Some(top) = reversed {
                L::detach_previous(top);
            }
        }

        self.top = reversed;
    }

    /// Get the node on top of the stack.
    pub fn top(&self) -> Option<&T> {
        self.top.map(|top| unsafe { &*T::from_link(top).as_ptr() })
    }

    /// Pop every node, clearing each link.
    pub fn clear(&mut self) {
        while !self.is_empty() {
            let _ = self.pop();
        }
    }

    /// Iterate from the top of the stack to the bottom.
    pub fn iter(&self) -> Iter<'_, T, L> {
        unsafe { Iter::new(self.top, self.count) }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Get the number of nodes on the stack.
    pub fn len(&self) -> usize {
        self.count
    }
}

impl<T, L, P> Push<T> for IntrusiveStack<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    #[inline]
    unsafe fn push(&mut self, node: NonNull<T>) -> Result<(), Error> {
        unsafe { IntrusiveStack::push(self, node) }
    }
}

impl<T, L, P> Default for IntrusiveStack<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, L, P> IntoIterator for &'a IntrusiveStack<T, L, P>
where
    T: Linked<L>,
    L: ListLink,
    P: ErrorPolicy,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Linked<L> + Send, L: ListLink, P> Send for IntrusiveStack<T, L, P> {}
