//! mt-core: shared foundation for the mccabe crates.
//!
//! Contains:
//! - units (uom temperature types + Kelvin/Fahrenheit constructors)
//! - numeric (Real, float checks, uniform grids)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
