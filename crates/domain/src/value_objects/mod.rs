pub mod minor_units;

pub use minor_units::MinorUnits;
