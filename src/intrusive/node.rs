use super::{
    double::BidirectionalLink,
    single::ForwardLink,
    traits::{Link, Linked},
};

/// A node that pairs a single link role with a value.
///
/// Handy when the value type does not need to embed the link itself.
/// Types that take part in several containers embed their links directly and
/// derive [`Linked`](crate::Linked) instead.
#[derive(Debug)]
pub struct ListNode<L, T> {
    link: L,
    data: T,
}

/// A node in a singly linked container.
pub type ForwardNode<T, const ID: usize = 0> = ListNode<ForwardLink<ID>, T>;

/// A node in a doubly linked container.
pub type BidirectionalNode<T, const ID: usize = 0> = ListNode<BidirectionalLink<ID>, T>;

impl<L: Link, T> ListNode<L, T> {
    /// Creates an unlinked node holding `data`.
    pub const fn new(data: T) -> Self {
        Self {
            link: L::UNLINKED,
            data,
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns true if the node's link is set.
    pub fn is_linked(&self) -> bool {
        self.link.is_linked()
    }

    /// Consumes the node and returns its value.
    pub fn into_data(self) -> T {
        self.data
    }
}

unsafe impl<L: Link, T> Linked<L> for ListNode<L, T> {
    const OFFSET: usize = core::mem::offset_of!(Self, link);
}

impl<L, T> Default for ListNode<L, T>
where
    L: Link,
    T: Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}
