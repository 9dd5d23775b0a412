//! Core domain types for the vault analytics service.
//!
//! This crate owns the numeric layer shared by every other crate:
//! - Fixed-point conversion between human-readable decimal strings and
//!   minor-unit integers (the common 18-decimal on-chain convention)
//! - JSON normalization for big-integer-bearing payloads
//! - The error taxonomy for amount parsing

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Numeric conversion routines.
pub mod math;
/// JSON normalization for API boundaries.
pub mod normalize;
/// Value objects.
pub mod value_objects;

pub use error::UnitsError;
pub use value_objects::minor_units::MinorUnits;
