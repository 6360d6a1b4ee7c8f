//! Domain layer for Include Guardian
//!
//! Pure model of the check: violations, the accumulated report, and the
//! error types shared across the crate. Independent of traversal, pattern
//! matching, and presentation concerns.

pub mod violations;

// Re-export main domain types for convenience
pub use violations::*;
