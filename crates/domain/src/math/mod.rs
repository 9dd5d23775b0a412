pub mod units;

pub use units::{DEFAULT_DECIMALS, format_units, parse_units};
