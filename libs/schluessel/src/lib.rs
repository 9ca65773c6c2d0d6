//! # schluessel
//!
//! Parsing and validation of German official administrative-region keys.
//!
//! ## Keys
//!
//! - **AGS** (Amtlicher Gemeindeschlüssel): up to 8 digits,
//!   state / district / county / municipality
//! - **ARS** (Amtlicher Regionalschlüssel): up to 12 digits,
//!   state / district / county / association / municipality
//!
//! Examples:
//! - `14730070` (AGS, Delitzsch)
//! - `147300070070` (ARS, Delitzsch)
//! - `010539105105` (ARS, Sachsenwald, a municipality-free area)
//!
//! ## Design Principles
//!
//! - Validation is purely syntactic; no registry of real keys is consulted
//! - Segments are typed, so an invalid digit run can never be stored in one
//! - Absent trailing segments are `None`, never an empty string
//! - Keys render as plain digit concatenation and reparse to the same segments
//! - Parse failures are values (`FormatError`), not panics

mod ags;
mod ars;
mod association;
mod error;
mod layout;
mod macros;
mod segment;

pub use ags::Ags;
pub use ars::Ars;
pub use association::AssociationType;
pub use error::{FormatError, KeyKind, SegmentError};
pub use segment::*;
