#![allow(dead_code)]

use std::path::Path;

pub const FIXTURE: &str = "tests/fixtures/completed.txt";

/// The sandbox "express checkout" notification stored in `tests/fixtures`.
pub fn completed_payload() -> Vec<u8> {
    std::fs::read(Path::new(env!("CARGO_MANIFEST_DIR")).join(FIXTURE))
        .expect("fixture should be readable")
}

/// Builds a form body from pairs, encoding values the way the processor does.
pub fn payload(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).expect("pairs should encode")
}
