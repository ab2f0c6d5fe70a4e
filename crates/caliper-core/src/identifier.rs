//! Identifier management using string interning for efficient name storage and comparison.
//!
//! This module provides the [`Id`] type used for document object names, plus
//! [`real_name`] for stripping the auto-numbering suffix the document store
//! appends when it de-duplicates names.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// Object names are unique within a document and are compared constantly
/// during graph traversal, so they are interned once and compared as symbols.
///
/// # Examples
///
/// ```
/// use caliper_core::identifier::Id;
///
/// let wire_id = Id::new("Wire001");
/// let group_id = Id::new("Group");
///
/// assert_eq!(wire_id, Id::new("Wire001"));
/// assert_ne!(wire_id, group_id);
/// assert_eq!(wire_id, "Wire001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper_core::identifier::Id;
    ///
    /// let object_id = Id::new("Wire001");
    /// let group_id = Id::new("Assembly");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper_core::identifier::Id;
    ///
    /// let id: Id = "Wire".into();
    /// assert_eq!(id, "Wire");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    ///
    /// # Examples
    ///
    /// ```
    /// use caliper_core::identifier::Id;
    ///
    /// let id = Id::new("Wire001");
    /// assert!(id == "Wire001");
    /// ```
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == &string`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Strips the trailing digits from a name to get only the letters.
///
/// The document store de-duplicates names by appending a numeric suffix
/// (`"Wire"`, `"Wire001"`, `"Wire002"`, ...); this recovers the stem.
///
/// The returned string is never empty as long as the input contains at
/// least one non-digit character; a name consisting entirely of digits is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use caliper_core::identifier::real_name;
///
/// assert_eq!(real_name("Wire001"), "Wire");
/// assert_eq!(real_name("Wire"), "Wire");
/// assert_eq!(real_name("42"), "42");
/// ```
pub fn real_name(name: &str) -> &str {
    let stem_len = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if stem_len == 0 { name } else { &name[..stem_len] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("Wire");
        let id2 = Id::new("Wire");
        let id3 = Id::new("Group");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "Wire");
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
        assert_eq!(id1, "test_string");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

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
        let id = Id::new("Clone");

        assert!(id == "Clone");
        assert!(id != "Wire");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }

    #[test]
    fn test_real_name_strips_suffix() {
        assert_eq!(real_name("Line001"), "Line");
        assert_eq!(real_name("Box12"), "Box");
        assert_eq!(real_name("Wire"), "Wire");
    }

    #[test]
    fn test_real_name_all_digits() {
        // A name with no letters cannot be shortened further.
        assert_eq!(real_name("1234"), "1234");
    }

    #[test]
    fn test_real_name_empty() {
        assert_eq!(real_name(""), "");
    }

    #[test]
    fn test_real_name_digits_inside() {
        // Only the trailing run of digits is stripped.
        assert_eq!(real_name("Wire2Frame003"), "Wire2Frame");
    }
}
