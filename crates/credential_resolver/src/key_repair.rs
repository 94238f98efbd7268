//! Recovery of PEM private keys mangled by environment variable transport.
//!
//! Secret stores and CI variable editors routinely flatten multi-line values
//! into a single line, turning every newline in a PEM document into a space.
//! The resulting value no longer parses as PEM. Repair reverses the damage:
//! every space becomes a newline again, except the spaces that legitimately
//! belong inside the `-----BEGIN ...-----` and `-----END ...-----` marker
//! lines.

use regex::Regex;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "key_repair_tests.rs"]
mod tests;

const SPACE_SENTINEL: &str = "@SPACE@";

/// Rebuilds a private key whose newlines were collapsed to spaces.
///
/// Marker lines for any PEM private key label (`PRIVATE KEY`,
/// `RSA PRIVATE KEY`, `OPENSSH PRIVATE KEY`, and so on) are recognized and
/// their interior spaces preserved. Input that contains no marker, or that
/// is already well-formed multi-line PEM, comes back unchanged, so the
/// repair is safe to apply unconditionally and is idempotent.
pub fn repair_private_key(key: &str) -> String {
    let marker = Regex::new(r"-----(?:BEGIN|END)(?: [A-Z0-9]+)* PRIVATE KEY-----")
        .expect("marker pattern is a valid regex");
    if !marker.is_match(key) {
        return key.to_string();
    }

    let shielded = marker.replace_all(key, |caps: &regex::Captures<'_>| {
        caps[0].replace(' ', SPACE_SENTINEL)
    });
    shielded.replace(' ', "\n").replace(SPACE_SENTINEL, " ")
}
