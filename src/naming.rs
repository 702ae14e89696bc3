//! Name generation for saved paths.
//!
//! Derives a human-readable bookmark name from the last path segment:
//! percent-decoding with fallback, `+`-to-space, a fixed set of HTML
//! entities, and whitespace normalization.

use log::warn;

/// Entities recognized by `decode_entities`, matched case-insensitively.
/// The table is deliberately closed; this is not a general HTML decoder.
const HTML_ENTITIES: [(&str, &str); 7] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&nbsp;", " "),
];

/// Derives a display name from a path.
///
/// Takes the last non-empty `/`-segment, strips any embedded query or
/// fragment, percent-decodes it, converts `+` to spaces, decodes the fixed
/// entity table, and collapses whitespace. Falls back to the second-to-last
/// segment and finally to `"Path"` when a step leaves nothing usable.
pub fn generate_name(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "Root".to_string();
    }

    let last = segments[segments.len() - 1];
    let clean = last.split(['?', '#']).next().unwrap_or(last);

    let base = if clean.is_empty() {
        fallback_segment(&segments)
    } else {
        clean.to_string()
    };

    let decoded = match percent_decode(&base) {
        Some(decoded) => decoded,
        None => {
            warn!("Failed to decode path segment: {}", base);
            base.clone()
        }
    };

    let decoded = decoded.replace('+', " ");
    let decoded = decode_entities(&decoded);

    // Collapse whitespace runs and trim ends
    let name = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        fallback_segment(&segments)
    } else {
        name
    }
}

/// Returns `base` if unused, else the first free `"base (n)"` starting at 1.
pub fn generate_unique_name(base: &str, existing: &[String]) -> String {
    if !existing.iter().any(|name| name == base) {
        return base.to_string();
    }

    let mut counter = 1;
    loop {
        let candidate = format!("{} ({})", base, counter);
        if !existing.iter().any(|name| name == &candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Second-to-last segment, or the literal `"Path"` when there is none.
fn fallback_segment(segments: &[&str]) -> String {
    if segments.len() >= 2 {
        segments[segments.len() - 2].to_string()
    } else {
        "Path".to_string()
    }
}

/// Decodes `%XX` escapes. Returns `None` when an escape is malformed or the
/// decoded bytes are not valid UTF-8; callers keep the input unchanged then.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return None;
            }
            let hi = hex_value(bytes[i + 1])?;
            let lo = hex_value(bytes[i + 2])?;
            out.push(hi * 16 + lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Replaces the entities in `HTML_ENTITIES`, case-insensitively.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    'scan: while !rest.is_empty() {
        if rest.starts_with('&') {
            for (entity, replacement) in HTML_ENTITIES {
                if let Some(prefix) = rest.get(..entity.len()) {
                    if prefix.eq_ignore_ascii_case(entity) {
                        out.push_str(replacement);
                        rest = &rest[entity.len()..];
                        continue 'scan;
                    }
                }
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}
