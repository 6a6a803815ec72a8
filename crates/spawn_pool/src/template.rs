//! Template identity and metadata
//!
//! A template is the blueprint an instance is created from (the host
//! engine's prefab, archetype, or asset handle). The pool never looks
//! inside a template; it only reads the small surface defined here: a
//! stable cache key, a display name for diagnostics, and an optional
//! persistence preference for the template's group.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Stable integer identity of a template, used as the pool cache key.
///
/// Two references to the same logical template must produce the same key,
/// and distinct templates must produce distinct keys with overwhelming
/// probability. [`TemplateKey::of`] derives a key from any stable hashable
/// identity (an asset id, a path, a GUID); hosts with an integer asset id
/// already in hand can wrap it directly with [`TemplateKey::from_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateKey(u64);

impl TemplateKey {
    /// Derive a key by hashing a stable identity.
    pub fn of<T: Hash + ?Sized>(identity: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Wrap an integer identity that is already stable.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value.
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Metadata surface the pool reads off a template.
///
/// Implemented by the host's template type. Only [`key`](Self::key) is
/// load-bearing; [`display_name`](Self::display_name) feeds group naming
/// and log output, and [`persistent_hint`](Self::persistent_hint) seeds the
/// owning group's `persistent` flag.
pub trait PoolTemplate {
    /// Stable cache key for this template.
    fn key(&self) -> TemplateKey;

    /// Human-readable name, used for group naming and diagnostics.
    fn display_name(&self) -> &str;

    /// Optional persistence preference for this template's group.
    ///
    /// `Some(true)` makes the group survive bulk reclamation. `None` leaves
    /// the group non-persistent.
    fn persistent_hint(&self) -> Option<bool> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_is_deterministic() {
        assert_eq!(TemplateKey::of("drone"), TemplateKey::of("drone"));
    }

    #[test]
    fn test_distinct_identities_yield_distinct_keys() {
        assert_ne!(TemplateKey::of("drone"), TemplateKey::of("barrel"));
    }

    #[test]
    fn test_raw_round_trip() {
        let key = TemplateKey::from_raw(42);
        assert_eq!(key.as_raw(), 42);
    }

    #[test]
    fn test_display_is_stable_hex() {
        let key = TemplateKey::from_raw(0xABCD);
        assert_eq!(format!("{}", key), "0x000000000000abcd");
    }
}
