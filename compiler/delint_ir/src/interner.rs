//! Per-session string interner with case-folded keys.
//!
//! Every interned spelling records the `Name` of its lower-case form, so a
//! [`NameKey`] lookup never allocates after the first intern of a spelling.
//!
//! The interner is deliberately single-threaded: one analysis session owns
//! one interner (inside its type factory). Parallel analysis uses one
//! session per worker.

use super::{Name, NameKey};
use rustc_hash::FxHashMap;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct spellings were interned.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Interner mapping spellings to [`Name`]s.
pub struct StringInterner {
    /// Spelling -> name, for deduplication.
    map: FxHashMap<Box<str>, Name>,
    /// Storage indexed by `Name`.
    strings: Vec<Box<str>>,
    /// Lower-case counterpart of each name, indexed by `Name`.
    folded: Vec<Name>,
}

impl StringInterner {
    /// Create a new interner holding only the empty string.
    pub fn new() -> Self {
        let mut interner = Self {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
            folded: Vec::with_capacity(256),
        };
        interner.map.insert("".into(), Name::EMPTY);
        interner.strings.push("".into());
        interner.folded.push(Name::EMPTY);
        interner
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }

        let lower = s.to_lowercase();
        let folded = if lower == s {
            None
        } else {
            Some(self.try_intern(&lower)?)
        };

        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let name = Name::from_raw(raw);

        self.strings.push(s.into());
        self.folded.push(folded.unwrap_or(name));
        self.map.insert(s.into(), name);

        Ok(name)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity. Use `try_intern` for
    /// fallible interning.
    pub fn intern(&mut self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the spelling for a Name.
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Case-insensitive identity of an interned name.
    pub fn key(&self, name: Name) -> NameKey {
        NameKey::new(self.folded[name.index()])
    }

    /// Case-insensitive identity of a spelling, interning it if needed.
    pub fn key_of(&mut self, s: &str) -> NameKey {
        let name = self.intern(s);
        self.key(name)
    }

    /// Whether two names denote the same Delphi identifier.
    pub fn same_identifier(&self, a: Name, b: Name) -> bool {
        a == b || self.key(a) == self.key(b)
    }

    /// Get the number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner is empty (only has the empty string).
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
