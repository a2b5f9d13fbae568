//! Declarative layout attributes resolved into de-duplicated constraint sets.
//!
//! Describe a view's layout as a list of attribute expressions, hand it to an
//! [`Installer`], and get back the activated native constraints. Applying a
//! list again replaces what was installed for the same attributes instead of
//! stacking duplicates.
//!
//! # Modules
//!
//! - [`constant`]: Constant, relation, multiplier and priority values
//! - [`attribute`]: Attribute kinds, compound attributes, reference defaults
//! - [`host`]: The [`LayoutHost`] seam to a platform's views and constraints
//! - [`registry`]: Per-view records of installed constraints
//! - [`install`]: Resolution and installation
//! - `tree`: In-memory [`LayoutHost`] (feature `std`)
//!
//! Everything is single-threaded and synchronous: calls that target the
//! same view must be serialized by the caller.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod attribute;
pub mod constant;
mod error;
pub mod host;
pub mod install;
pub mod registry;
#[cfg(feature = "std")]
pub mod tree;

pub use attribute::{Attribute, AttributeKind, Axis, CompoundKind, Insets, Target};
pub use constant::{
    Constant, Multiplier, Priority, Relation, greater_or_equal, less_or_equal, times,
};
pub use error::LayoutError;
pub use host::{ConstraintDescriptor, LayoutHost};
pub use install::{Installer, apply, clear};
pub use registry::{Identity, Record, Registry};
