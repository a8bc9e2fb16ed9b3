use std::collections::BTreeMap;

/// Decodes an `application/x-www-form-urlencoded` notification body.
///
/// The body is split on `&`. Each segment must look like `key=value`, where the
/// key is one or more ASCII word characters and the value is everything after
/// the first `=`. Segments that don't fit are skipped, so a single malformed
/// segment never discards the rest of the payload.
///
/// Values are percent-decoded with `+` read as a space. When a key repeats, the
/// last occurrence wins.
pub fn decode_fields(raw: &[u8]) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for segment in raw.split(|b| *b == b'&') {
        if let Some((key, value)) = decode_segment(segment) {
            fields.insert(key, value);
        }
    }
    fields
}

fn decode_segment(segment: &[u8]) -> Option<(String, String)> {
    let eq = segment.iter().position(|b| *b == b'=')?;
    let key = &segment[..eq];
    if key.is_empty() || !key.iter().all(|b| is_word_byte(*b)) {
        return None;
    }

    // The key is plain ASCII, so only the value needs form decoding.
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(segment).ok()?;
    let (_, value) = pairs.into_iter().next()?;
    let key = String::from_utf8_lossy(key).into_owned();
    Some((key, value))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
