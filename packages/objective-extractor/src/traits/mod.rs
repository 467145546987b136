//! Collaborator abstractions.
//!
//! The pipeline only talks to the outside world through these traits.

pub mod llm;
pub mod observer;
pub mod site;
