//! Unique key generation for Portable Text objects.
//!
//! Keys are produced through an injected [`KeyGenerator`] so that a transform can
//! be made deterministic in tests while producing random identifiers in production.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique, opaque object keys
pub trait KeyGenerator: Send + Sync {
    fn next_key(&self) -> String;
}

/// Random v4 UUID keys
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn next_key(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic keys `<prefix>0`, `<prefix>1`, ...
#[derive(Debug, Default)]
pub struct SequentialKeys {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: AtomicU64::new(0),
        }
    }
}

impl KeyGenerator for SequentialKeys {
    fn next_key(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_keys() {
        let keys = SequentialKeys::with_prefix("k");
        assert_eq!(keys.next_key(), "k0");
        assert_eq!(keys.next_key(), "k1");
        assert_eq!(SequentialKeys::new().next_key(), "0");
    }

    #[test]
    fn test_uuid_keys_are_unique() {
        let keys = UuidKeys;
        let a = keys.next_key();
        let b = keys.next_key();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
