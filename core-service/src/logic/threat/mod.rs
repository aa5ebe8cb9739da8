//! Threat Module
//!
//! Labels and result containers for traffic classification.
//!
//! ## Structure
//! - `types`: Label, ClassificationRow, LabelCounts, ResultSet
//!
//! ## Usage
//! ```ignore
//! use ddos_shield_core::logic::threat::{Label, ResultSet};
//!
//! match Label::from_code(code) {
//!     Some(Label::Legitimate) => println!("Allow"),
//!     Some(label) => println!("Block: {}", label.display_name()),
//!     None => println!("Model emitted an unknown class"),
//! }
//! ```

pub mod types;

pub use types::{ClassificationRow, Label, LabelCounts, ResultSet};
