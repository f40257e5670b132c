//! Intrusive containers over caller-owned nodes.
//!
//! Nodes embed one or more link roles ([`ForwardLink`], [`BidirectionalLink`],
//! [`TreeLink`]) and the containers in [`intrusive`] thread them together
//! without allocating or taking ownership. See [`intrusive`] for an overview.
#![no_std]

pub mod error;
pub mod intrusive;

pub use error::{Abort, Error, ErrorPolicy, Report, Unchecked};
pub use intrusive::{
    double::BidirectionalLink,
    list::{IntrusiveForwardList, Position},
    single::ForwardLink,
    stack::IntrusiveStack,
    traits::{Link, Linked, ListLink, Push},
    tree::TreeLink,
};
pub use linkage_collections_derive::Linked;
