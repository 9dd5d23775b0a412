//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types from the crate.

pub use crate::error::UnitsError;
pub use crate::math::units::{DEFAULT_DECIMALS, format_units, parse_units};
pub use crate::normalize::{normalize, normalize_value};
pub use crate::value_objects::minor_units::MinorUnits;
