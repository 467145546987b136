//! Domain types for the extraction pipeline.

pub mod config;
pub mod run;
