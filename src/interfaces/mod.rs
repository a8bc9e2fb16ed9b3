//! Adapters that turn inbound wire formats into domain values.

pub mod form;
