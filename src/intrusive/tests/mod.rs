extern crate std;

use std::vec::Vec;

use core::{cmp::Ordering, ptr::NonNull};

use crate::{BidirectionalLink, ForwardLink, Linked, TreeLink};

mod single;

/// A node taking part in one container of each link kind.
///
/// Equality and ordering look at `value` only, so `tag` can record where a
/// node started out.
#[derive(Debug, Linked)]
#[linked(crate_path = "crate")]
struct Item {
    value: i32,
    tag: usize,
    forward: ForwardLink<0>,
    chain: BidirectionalLink<1>,
    tree: TreeLink<2>,
}

impl Item {
    fn new(value: i32) -> Self {
        Self::tagged(value, 0)
    }

    fn tagged(value: i32, tag: usize) -> Self {
        Item {
            value,
            tag,
            forward: ForwardLink::new(),
            chain: BidirectionalLink::new(),
            tree: TreeLink::new(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Item {}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

fn items(values: impl IntoIterator<Item = i32>) -> Vec<Item> {
    values.into_iter().map(Item::new).collect()
}

/// Pointers to every item. The vector must not grow afterwards.
fn pointers(items: &mut [Item]) -> Vec<NonNull<Item>> {
    items.iter_mut().map(NonNull::from).collect()
}

fn forward(node: NonNull<Item>) -> NonNull<ForwardLink<0>> {
    <Item as Linked<ForwardLink<0>>>::to_link(node)
}

fn chain(node: NonNull<Item>) -> NonNull<BidirectionalLink<1>> {
    <Item as Linked<BidirectionalLink<1>>>::to_link(node)
}

fn tree(node: NonNull<Item>) -> NonNull<TreeLink<2>> {
    <Item as Linked<TreeLink<2>>>::to_link(node)
}

unsafe fn value_of<L>(link: NonNull<L>) -> i32
where
    L: crate::Link,
    Item: Linked<L>,
{
    unsafe { Item::from_link(link).as_ref().value }
}

/// Follow `next` from `head` and collect the values.
unsafe fn walk_forward(head: NonNull<ForwardLink<0>>) -> Vec<i32> {
    let mut values = Vec::new();
    let mut current = Some(head);
    while let Some(link) = current {
        unsafe {
            values.push(value_of(link));
            current = link.as_ref().next();
        }
    }
    values
}

/// Follow `next` from `head` and collect the values.
unsafe fn walk_next(head: NonNull<BidirectionalLink<1>>) -> Vec<i32> {
    let mut values = Vec::new();
    let mut current = Some(head);
    while let Some(link) = current {
        unsafe {
            values.push(value_of(link));
            current = link.as_ref().next();
        }
    }
    values
}

/// Follow `previous` from `tail` and collect the values.
unsafe fn walk_previous(tail: NonNull<BidirectionalLink<1>>) -> Vec<i32> {
    let mut values = Vec::new();
    let mut current = Some(tail);
    while let Some(link) = current {
        unsafe {
            values.push(value_of(link));
            current = link.as_ref().previous();
        }
    }
    values
}
