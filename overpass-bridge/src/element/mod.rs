//! Typed geodata element model and conversion from the upstream JSON shape.
//!
//! The Overpass API describes every feature as a loosely-typed JSON object
//! whose meaning depends on a `type` string. This module provides:
//!
//! - [`Element`] - the strongly-typed discriminated union ([`Point`],
//!   [`Way`], [`Relation`]) that downstream consumers receive
//! - [`RawElement`] - the untyped decoded intermediate, one per upstream
//!   JSON object
//! - [`convert`] - the pure mapping from raw to typed
//!
//! Elements of a kind other than node/way/relation have no typed
//! counterpart and are dropped during conversion.

mod convert;
mod raw;
mod types;

pub use convert::{convert, member_type_from_wire};
pub use raw::{RawElement, RawMember};
pub use types::{Element, Member, MemberType, Point, Relation, Way};
