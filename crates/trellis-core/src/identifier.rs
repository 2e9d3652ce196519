//! Cell identifiers backed by string interning.
//!
//! This module provides the [`Id`] type. Cell ids are compared and hashed on
//! every traversal step of the layout pipeline, so they are interned once and
//! passed around as `Copy` symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner. The
/// interner only ever grows; it holds no layout state.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier of a diagram cell.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let final_match = Id::new("final");
/// let semi = Id::new("semi_1");
///
/// assert_ne!(final_match, semi);
/// assert_eq!(final_match, "final");
/// assert_eq!(final_match.to_string(), "final");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from `&str`, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "semi_1"`
    fn eq(&self, other: &str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("quarter_1");
        let id2 = Id::new("quarter_1");
        let id3 = Id::new("quarter_2");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "quarter_1");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "from_cell".into();
        let id2 = Id::new("from_cell");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("round_of_16");

        assert!(id == "round_of_16");
        assert!(id != "round_of_8");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }

    #[test]
    fn test_partial_eq_str_ref() {
        let id = Id::new("merge");
        let same = String::from("merge");
        let other = String::from("split");

        assert!(id == same.as_str());
        assert!(id != other.as_str());
    }
}
