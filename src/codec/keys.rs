//! Wire-key tables and key matching.
//!
//! Every entity declares its keys once, as a `'static` slice of [`WireKey`]s
//! in field order. Tables are immutable and shared freely across threads.

use super::KeyMatching;

/// The JSON object key of one entity field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WireKey {
    name: &'static str,
}

impl WireKey {
    /// Create a wire key.
    ///
    /// Keys are written to the output verbatim, so they must not need JSON
    /// escaping.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Canonical key.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `key` is byte-for-byte the canonical key.
    pub fn matches_exact(&self, key: &[u8]) -> bool {
        self.name.as_bytes() == key
    }

    /// Whether `key` equals the canonical key ignoring ASCII case and any
    /// non-letter characters.
    pub fn matches_folded(&self, key: &[u8]) -> bool {
        letters(self.name.as_bytes()).eq(letters(key))
    }
}

fn letters(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .filter(|byte| byte.is_ascii_alphabetic())
        .map(u8::to_ascii_lowercase)
}

/// Resolve an object key to the index of its field in `keys`.
///
/// Exact matches win over folded ones. Returns `None` for an unknown key,
/// which the decoder skips.
pub fn resolve(keys: &[WireKey], key: &[u8], matching: KeyMatching) -> Option<usize> {
    if key.is_empty() {
        return None;
    }

    if let Some(index) = keys.iter().position(|wire| wire.matches_exact(key)) {
        return Some(index);
    }

    match matching {
        KeyMatching::Exact => None,
        KeyMatching::Lenient => keys.iter().position(|wire| wire.matches_folded(key)),
    }
}
