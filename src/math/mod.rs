//! Arithmetic utilities.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`CheckedArithmetic`] | `Result`-returning `Amount` arithmetic |
//! | [`wide`] | 256-bit intermediates for pool pricing |

mod checked;
pub mod wide;

pub use checked::CheckedArithmetic;
