//! Core library for the CivicWatch civic-accountability platform.
//!
//! The algorithmic heart is the leader accountability engine under
//! [`workflows::accountability`]: a static question catalog, an answer
//! normalizer, a weighted score aggregator, a profile completeness
//! evaluator, and a composer that merges everything into the leader's
//! published accountability attributes.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
