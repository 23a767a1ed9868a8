//! Pure text helpers: ORP lookup and local word segmentation.
//!
//! Both functions are leaves of the engine with no I/O and no state.

pub mod orp;
pub mod segment;

pub use orp::{compute_orp_index, split_at_char, split_at_orp, OrpError};
pub use segment::segment;
