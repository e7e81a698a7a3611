//! Randomised generation of CPR numbers that fail the mod-11 test.
//!
//! Candidates are enumerated lazily through a tree of stages
//! (year → month → day → gender → running number). Each level interleaves its
//! children fairly at random, so output is never grouped by an outer
//! dimension and the full cross-product is never materialised.

pub mod builder;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;

pub use builder::{CprBuilder, age_window};
pub use engine::CprGenerator;
pub use errors::GenerationError;
pub use model::{Candidate, GenerateOptions, GenerationStats};
