//! Persistence of the last chosen resolution
//!
//! The stored value is the decimal tier as text. Anything that does not
//! parse to one of the known tiers reads back as full resolution.

use crate::core::resolution::Resolution;
use crate::prelude::HashMap;
use crate::traits::PreferenceStore;
use crate::Result;
use std::cell::RefCell;
use std::rc::Rc;

/// Reads and writes the resolution preference under a fixed key
pub struct ResolutionPreference<S: PreferenceStore> {
    store: S,
    key: String,
}

impl<S: PreferenceStore> ResolutionPreference<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored resolution, falling back to [`Resolution::High`]
    pub fn load(&self) -> Resolution {
        match self.store.get_item(&self.key) {
            Ok(raw) => parse_stored(raw.as_deref()),
            Err(e) => {
                log::warn!("Reading '{}' failed, using full resolution: {}", self.key, e);
                Resolution::High
            }
        }
    }

    /// Writes `value` unconditionally
    pub fn save(&mut self, value: Resolution) -> Result<()> {
        self.store.set_item(&self.key, &value.value().to_string())
    }
}

/// Interprets a raw stored string
pub fn parse_stored(raw: Option<&str>) -> Resolution {
    let Some(parsed) = raw.and_then(parse_leading_int) else {
        return Resolution::High;
    };

    match u32::try_from(parsed).ok().map(Resolution::from_value) {
        Some(Ok(resolution)) => resolution,
        _ => {
            log::debug!("Ignoring stored resolution {}", parsed);
            Resolution::High
        }
    }
}

/// Leading base-10 integer of `s`: skips leading whitespace, accepts one
/// sign, stops at the first non-digit. `None` if no digit follows.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// In-memory [`PreferenceStore`]. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SwitcherError;

    const KEY: &str = "kk-image-resolution";

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(SwitcherError::Storage("denied".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(SwitcherError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut preference = ResolutionPreference::new(MemoryStore::new(), KEY);
        for value in [
            Resolution::LowZoomedOut,
            Resolution::LowZoomedIn,
            Resolution::High,
        ] {
            preference.save(value).unwrap();
            assert_eq!(preference.load(), value);
        }
        assert_eq!(preference.store().get(KEY).as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_key_is_high() {
        let preference = ResolutionPreference::new(MemoryStore::new(), KEY);
        assert_eq!(preference.load(), Resolution::High);
    }

    #[test]
    fn test_corrupt_values_are_high() {
        for raw in ["", "abc", "0", "3", "-4", "px4", "99999999999999999999"] {
            let preference = ResolutionPreference::new(MemoryStore::with_entry(KEY, raw), KEY);
            assert_eq!(preference.load(), Resolution::High, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_leading_integer_is_used() {
        assert_eq!(parse_stored(Some(" 4")), Resolution::LowZoomedOut);
        assert_eq!(parse_stored(Some("2px")), Resolution::LowZoomedIn);
        assert_eq!(parse_stored(Some("+4")), Resolution::LowZoomedOut);
        assert_eq!(parse_stored(Some("4.0")), Resolution::LowZoomedOut);
    }

    #[test]
    fn test_read_failure_is_high() {
        let preference = ResolutionPreference::new(FailingStore, KEY);
        assert_eq!(preference.load(), Resolution::High);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::with_entry(KEY, "garbage");
        let mut preference = ResolutionPreference::new(store.clone(), KEY);
        preference.save(Resolution::LowZoomedIn).unwrap();
        assert_eq!(store.get(KEY).as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }
}
