//! Report Module - Block list generation
//!
//! Derives a block list from the staged result set: every high- or
//! low-rated attack row becomes `(ip, attack type)` in a new CSV report.
//! Reports are never modified after they are written and outlive the
//! result set they came from.

pub mod materializer;
pub mod naming;

#[cfg(test)]
mod tests;

pub use materializer::{write_report, BlockPolicy, BlockReport, ReportError, ReportMaterializer};
pub use naming::{NameGenerator, TimestampNameGenerator};
