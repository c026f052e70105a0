//! Ordered header container with duplicate-key tolerance.
//!
//! STOMP permits the same header key to appear more than once in a frame;
//! the first occurrence wins on lookup, and the wire order is exactly the
//! insertion order. A hash map would lose both properties, so headers are
//! stored as a flat list of strings interpreted as alternating key/value
//! pairs.
//!
//! # Example
//!
//! ```
//! use stompwire_client::protocol::Headers;
//!
//! let h = Headers::new()
//!     .add("destination", "/queue/orders")
//!     .add("receipt", "r-1");
//!
//! assert_eq!(h.value("destination"), "/queue/orders");
//! assert_eq!(h.len(), 4);
//! ```

use crate::error::{Result, StompError};

/// An ordered sequence of header key/value pairs.
///
/// Backed by a flat `Vec<String>` of even length (`key0, val0, key1,
/// val1, ...`). Duplicate keys are allowed; lookups always return the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<String>);

impl Headers {
    /// Create an empty header list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a header list from a flat key/value vector.
    ///
    /// The vector is taken as-is; call [`Headers::validate`] to check
    /// that its length is even.
    pub fn from_vec(raw: Vec<String>) -> Self {
        Self(raw)
    }

    /// Return a new header list with `key`/`value` appended.
    pub fn add(mut self, key: &str, value: &str) -> Self {
        self.push(key, value);
        self
    }

    /// Return a new header list with all pairs of `other` appended after
    /// the receiver's pairs.
    pub fn add_headers(mut self, other: Headers) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Append a pair in place.
    pub fn push(&mut self, key: &str, value: &str) {
        self.0.push(key.to_string());
        self.0.push(value.to_string());
    }

    /// Value of the first occurrence of `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// True iff `key` occurs in the list.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Value of the first occurrence of `key`, or the empty string if
    /// absent. Use [`Headers::contains`] to distinguish a missing key
    /// from an empty value.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Slot index of the first occurrence of `key`, or `None`.
    pub fn index(&self, key: &str) -> Option<usize> {
        (0..self.0.len() / 2 * 2)
            .step_by(2)
            .find(|&i| self.0[i] == key)
    }

    /// Check the key/value pairing invariant.
    ///
    /// Fails with [`StompError::HeaderListOdd`] when the element count
    /// is odd.
    pub fn validate(&self) -> Result<()> {
        if self.0.len() % 2 != 0 {
            return Err(StompError::HeaderListOdd(self.0.len()));
        }
        Ok(())
    }

    /// Return a copy with the first occurrence of `key` removed.
    ///
    /// A plain clone when `key` is absent.
    pub fn delete(&self, key: &str) -> Headers {
        let mut r = self.clone();
        if let Some(i) = r.index(key) {
            r.0.drain(i..i + 2);
        }
        r
    }

    /// Pair-level equality irrespective of order.
    ///
    /// Checks equal length plus two one-directional containment scans:
    /// every pair of `self` must occur somewhere in `other` and vice
    /// versa. Under repeated keys this does not verify multiplicities,
    /// so certain duplicate-pair permutations compare equal; that
    /// matches the protocol's historical behavior and is kept as-is.
    pub fn compare(&self, other: &Headers) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        self.pairs().all(|p| other.contains_pair(p))
            && other.pairs().all(|p| self.contains_pair(p))
    }

    fn contains_pair(&self, (key, value): (&str, &str)) -> bool {
        self.pairs().any(|(k, v)| k == key && v == value)
    }

    /// Number of elements (keys plus values), matching wire order.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True iff no pairs are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    ///
    /// A trailing unpaired element (invalid list) is skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// Mutable access to the keys, in order. Used by the encoder to
    /// escape keys in place before emission.
    pub(crate) fn keys_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.0.chunks_exact_mut(2).map(|pair| &mut pair[0])
    }

    /// Encoded byte size of the header block: `key:value\n` per pair.
    pub(crate) fn wire_size(&self) -> usize {
        self.pairs().map(|(k, v)| k.len() + 1 + v.len() + 1).sum()
    }
}
