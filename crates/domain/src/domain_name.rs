//! Helpers for dot-separated, case-insensitive domain names.
//!
//! Every function here expects names that have already gone through
//! [`normalize`]: lowercase, no trailing root dot.

pub const WWW_PREFIX: &str = "www.";

/// Lowercases a queried name and strips the trailing root dot.
pub fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Number of label separators in `name` ("example.com" has one).
pub fn dot_count(name: &str) -> usize {
    name.bytes().filter(|b| *b == b'.').count()
}

/// Strips the leftmost label.
///
/// Returns `None` once the result would be a single label, so a walk up the
/// hierarchy never reaches a public suffix like `com`.
pub fn parent(name: &str) -> Option<&str> {
    if dot_count(name) < 2 {
        return None;
    }
    name.split_once('.').map(|(_, rest)| rest)
}

/// Label-aware suffix test: `shop.example.com` is within `example.com`,
/// `badexample.com` is not.
pub fn is_within(name: &str, root: &str) -> bool {
    if name == root {
        return true;
    }
    name.len() > root.len()
        && name.ends_with(root)
        && name.as_bytes()[name.len() - root.len() - 1] == b'.'
}

pub fn is_wildcard(name: &str) -> bool {
    name.starts_with('*')
}

/// The bare/www counterpart of a name.
///
/// `example.com` maps to `www.example.com` and `www.example.com` maps back
/// to `example.com`. Every other shape has no counterpart.
pub fn alias_equivalent(name: &str) -> Option<String> {
    match dot_count(name) {
        1 => Some(format!("{WWW_PREFIX}{name}")),
        2 => name.strip_prefix(WWW_PREFIX).map(str::to_string),
        _ => None,
    }
}
