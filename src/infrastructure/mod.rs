//! Implementations of the domain ports.

pub mod https;
pub mod in_memory;
