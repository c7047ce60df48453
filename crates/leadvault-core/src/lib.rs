//! Core types and trait definitions for the leadvault intake pipeline.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod id;
pub mod intake;
pub mod lead;
pub mod store;
pub mod validate;
