//! SQL building: filter extraction into WHERE fragments, statement text, bind values.

mod builder;
mod filter;
pub mod params;
pub use builder::*;
pub use filter::*;
pub use params::*;
