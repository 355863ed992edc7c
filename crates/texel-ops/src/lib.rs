//! Umbrella crate for the `texel-ops` workspace.
//!
//! Re-exports the pixel buffer core and every operation crate, so converters
//! can depend on a single crate.

pub use tx_composite::*;
pub use tx_core::*;
pub use tx_filter::*;
pub use tx_icc::*;
pub use tx_resample::*;
