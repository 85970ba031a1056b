//! Core orchestration for the sui-courier intent pipeline.
//!
//! Wires the stages together: parse user text into an intent, build the
//! transfer plan, and hand it to delivery. Every stage fails fast and its
//! error propagates upward unchanged; the caller is the single catch
//! point.

/// Pure construction of transfer transaction plans.
pub mod builder;
/// The pipeline context and per-request orchestration.
pub mod pipeline;

pub use builder::build_transfer;
pub use pipeline::{Pipeline, PipelineError, PipelineOutcome};
