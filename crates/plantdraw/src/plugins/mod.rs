//! Plugin implementations for the supported diagram kinds
//!
//! One plugin per kind (sequence, class, use case, activity), each
//! implementing the core traits, plus the classifier that picks a kind and
//! the orchestrator that runs the pipeline.

pub mod activity;
pub mod class;
pub mod classifier;
pub mod orchestrator;
pub mod sequence;
pub mod usecase;

pub use activity::*;
pub use class::*;
pub use classifier::*;
pub use orchestrator::*;
pub use sequence::*;
pub use usecase::*;
