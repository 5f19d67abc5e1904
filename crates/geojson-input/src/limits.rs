//! Security limits for decoding untrusted literals.
//!
//! These bound the work a single decode call can be made to do. They are the
//! defaults of [`crate::DecodeOptions`] and can be tightened per call.

/// Maximum nesting of geometry collections.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Maximum number of positions decoded in one call.
pub const MAX_POSITIONS: usize = 1_000_000;

/// Largest SRID accepted (SRIDs are signed 32-bit integers in most databases).
pub const MAX_SRID: i64 = i32::MAX as i64;
