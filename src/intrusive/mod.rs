//! # Intrusive containers
//!
//! The containers in this module never own or allocate their nodes. A node is
//! any caller-owned struct that embeds one or more link roles, and a container
//! only rewires the pointers inside those links.
//!
//! ## Core Components
//!
//! - [`traits`]: `Link`, `ListLink`, `Linked` and `Push`.
//! - [`single::ForwardLink`], [`double::BidirectionalLink`] and [`tree::TreeLink`]: the link roles.
//! - [`ops`]: the link algebra, the only code that mutates link fields.
//! - [`stack::IntrusiveStack`]: a LIFO stack over list links.
//! - [`list::IntrusiveForwardList`]: a singly linked sequence with `forward_list` style operations.
//! - [`node::ListNode`]: a ready-made `{ link, data }` node.
//!
//! Each role carries a compile-time `ID`, so one node can sit in several
//! containers at once as long as every container uses a different role:
//!
//! ```
//! use core::ptr::NonNull;
//! use linkage_collections::{BidirectionalLink, ForwardLink, IntrusiveForwardList, IntrusiveStack, Linked};
//!
//! #[derive(Linked)]
//! struct Task {
//!     id: u32,
//!     queued: ForwardLink<0>,
//!     ready: BidirectionalLink<1>,
//! }
//!
//! let mut a = Task { id: 1, queued: ForwardLink::new(), ready: BidirectionalLink::new() };
//! let mut b = Task { id: 2, queued: ForwardLink::new(), ready: BidirectionalLink::new() };
//!
//! let mut stack = IntrusiveStack::<Task, ForwardLink<0>>::new();
//! let mut list = IntrusiveForwardList::<Task, BidirectionalLink<1>>::new();
//!
//! unsafe {
//!     stack.push(NonNull::from(&mut a)).unwrap();
//!     stack.push(NonNull::from(&mut b)).unwrap();
//!     list.push_front(NonNull::from(&mut a)).unwrap();
//!     list.push_front(NonNull::from(&mut b)).unwrap();
//! }
//!
//! list.reverse();
//!
//! assert_eq!(stack.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
//! assert_eq!(list.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
//! ```
//!
//! ## Safety
//!
//! Raw node pointers cross the API, so the caller upholds:
//!
//! - A node outlives every container it is linked into, and does not move while linked.
//! - A node is in at most one container per role.
//! - No `&mut` to a linked node is alive while a container operation runs.
//! - Positions handed back to a list belong to that list and are still valid.
//!
//! None of the containers are synchronized.

pub mod traits;
pub mod ops;
pub mod single;
pub mod double;
pub mod tree;
pub mod node;
pub mod stack;
pub mod list;
pub mod iter;

#[cfg(test)]
mod tests;
