//! Domain types for payment notifications. Nothing here performs I/O.

pub mod amount;
pub mod notification;
pub mod ports;
pub mod status;
pub mod timestamp;
pub mod verdict;
