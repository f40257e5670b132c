use core::ptr::NonNull;

use super::traits::Link;

/// A link in a binary tree.
///
/// Child and parent pointers are kept symmetric by the tree functions in
/// [`super::ops`]: `parent.left == Some(self)` implies `self.parent == Some(parent)`,
/// and the same for `right`.
#[derive(Debug, Default)]
pub struct TreeLink<const ID: usize = 0> {
    parent: Option<NonNull<Self>>,
    left: Option<NonNull<Self>>,
    right: Option<NonNull<Self>>,
}

impl<const ID: usize> TreeLink<ID> {
    /// Creates an unlinked link.
    pub const fn new() -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NonNull<Self>> {
        self.parent
    }

    #[inline]
    pub fn left(&self) -> Option<NonNull<Self>> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NonNull<Self>> {
        self.right
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NonNull<Self>>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<NonNull<Self>>) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<NonNull<Self>>) {
        self.right = right;
    }
}

impl<const ID: usize> Link for TreeLink<ID> {
    const ROLE: usize = ID;
    const UNLINKED: Self = Self::new();

    #[inline]
    fn is_linked(&self) -> bool {
        self.parent.is_some() || self.left.is_some() || self.right.is_some()
    }

    #[inline]
    fn clear(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
    }
}

unsafe impl<const ID: usize> Send for TreeLink<ID> {}
