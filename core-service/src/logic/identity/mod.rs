//! Identity Module
//!
//! Locates the subject identity (source IP) column of an uploaded table so
//! predictions can be correlated back to the records they came from.

pub mod resolver;

pub use resolver::{canonicalize, IdentityError, IdentityResolver, ResolvedIdentity};
