//! Interned identifiers and their case-insensitive keys.

use std::fmt;

/// Interned string identifier.
///
/// Preserves the spelling it was interned with. Two names compare equal only
/// when their spelling is identical; use [`NameKey`] for Delphi identity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Case-folded identity of a [`Name`].
///
/// Delphi identifiers are case-insensitive: `TPoint`, `tpoint` and `TPOINT`
/// all produce the same key. Every name-keyed map in the analyzer is keyed
/// by `NameKey`, never by `Name`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NameKey(Name);

impl NameKey {
    #[inline]
    pub(crate) const fn new(folded: Name) -> Self {
        NameKey(folded)
    }

    /// The interned lower-case spelling backing this key.
    #[inline]
    pub const fn folded(self) -> Name {
        self.0
    }
}

impl fmt::Debug for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameKey({})", self.0.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrips_raw() {
        let name = Name::from_raw(42);
        assert_eq!(name.raw(), 42);
        assert_eq!(name.index(), 42);
    }

    #[test]
    fn name_default_is_empty() {
        assert_eq!(Name::default(), Name::EMPTY);
    }

    #[test]
    fn name_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Name::from_raw(1));
        set.insert(Name::from_raw(1));
        set.insert(Name::from_raw(2));
        assert_eq!(set.len(), 2);
    }
}
