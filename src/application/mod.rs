//! Application layer driving the verification protocol.
//!
//! `NotificationVerifier` is the entry point: it owns a frozen configuration
//! and a transport, and turns the processor's reply into a verdict.

pub mod verifier;
