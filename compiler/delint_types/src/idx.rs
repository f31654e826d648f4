//! Unified type index handle.
//!
//! `Idx` is how every Delphi type is referenced. Types live in the
//! [`TypeFactory`](crate::TypeFactory) arena and are compared by index.
//!
//! - Intrinsic types and argument matchers have fixed indices, so an
//!   intrinsic is the same `Idx` in every factory
//! - Structural types are hash-consed: equal shapes share one index
//! - Declared types (structs, aliases, enums, type parameters) are nominal:
//!   each declaration gets its own index

use std::fmt;

/// A 32-bit index into the type factory.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Special (0-2) ===
    /// Type that could not be determined. Propagates silently.
    pub const UNKNOWN: Self = Self(0);
    /// Untyped parameter / untyped constant type.
    pub const UNTYPED: Self = Self(1);
    /// Result of a procedure; also the target of the `nil` pointer.
    pub const VOID: Self = Self(2);

    // === Integers (3-14) ===
    pub const SHORTINT: Self = Self(3);
    pub const SMALLINT: Self = Self(4);
    pub const INTEGER: Self = Self(5);
    pub const INT64: Self = Self(6);
    pub const BYTE: Self = Self(7);
    pub const WORD: Self = Self(8);
    pub const CARDINAL: Self = Self(9);
    pub const UINT64: Self = Self(10);
    pub const NATIVEINT: Self = Self(11);
    pub const NATIVEUINT: Self = Self(12);
    pub const LONGINT: Self = Self(13);
    pub const LONGWORD: Self = Self(14);

    // === Booleans (15-18) ===
    pub const BOOLEAN: Self = Self(15);
    pub const BYTEBOOL: Self = Self(16);
    pub const WORDBOOL: Self = Self(17);
    pub const LONGBOOL: Self = Self(18);

    // === Characters (19-20) ===
    pub const ANSICHAR: Self = Self(19);
    pub const WIDECHAR: Self = Self(20);

    // === Reals (21-26) ===
    pub const SINGLE: Self = Self(21);
    pub const DOUBLE: Self = Self(22);
    pub const EXTENDED: Self = Self(23);
    pub const REAL48: Self = Self(24);
    pub const COMP: Self = Self(25);
    pub const CURRENCY: Self = Self(26);

    // === Strings (27-30) ===
    pub const SHORTSTRING: Self = Self(27);
    pub const ANSISTRING: Self = Self(28);
    pub const WIDESTRING: Self = Self(29);
    pub const UNICODESTRING: Self = Self(30);

    // === Variants (31-32) ===
    pub const VARIANT: Self = Self(31);
    pub const OLEVARIANT: Self = Self(32);

    // === Pointers and files (33-35) ===
    /// The untyped `Pointer`.
    pub const POINTER: Self = Self(33);
    /// The type of the `nil` literal.
    pub const NIL: Self = Self(34);
    /// The untyped `file`.
    pub const FILE: Self = Self(35);

    // === Argument matchers (36-42) ===
    // Meta-types, only valid as formal parameters of intrinsic signatures.
    pub const ANY_ORDINAL: Self = Self(36);
    pub const ANY_SET: Self = Self(37);
    pub const ANY_DYNAMIC_ARRAY: Self = Self(38);
    pub const ANY_TYPED_POINTER: Self = Self(39);
    pub const ANY_CLASS_REFERENCE: Self = Self(40);
    pub const ANY_OBJECT: Self = Self(41);
    pub const POINTER_MATH_OPERAND: Self = Self(42);

    /// Number of pre-interned types.
    pub const PRIMITIVE_COUNT: u32 = 43;

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    /// Sentinel value indicating no type / invalid index.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is the UNKNOWN type.
    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == Self::UNKNOWN.0
    }

    /// Get the Delphi spelling for pre-interned types.
    ///
    /// Returns `None` for dynamic types, which need the factory to render.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("<unknown>"),
            1 => Some("<untyped>"),
            2 => Some("<void>"),
            3 => Some("ShortInt"),
            4 => Some("SmallInt"),
            5 => Some("Integer"),
            6 => Some("Int64"),
            7 => Some("Byte"),
            8 => Some("Word"),
            9 => Some("Cardinal"),
            10 => Some("UInt64"),
            11 => Some("NativeInt"),
            12 => Some("NativeUInt"),
            13 => Some("LongInt"),
            14 => Some("LongWord"),
            15 => Some("Boolean"),
            16 => Some("ByteBool"),
            17 => Some("WordBool"),
            18 => Some("LongBool"),
            19 => Some("AnsiChar"),
            20 => Some("WideChar"),
            21 => Some("Single"),
            22 => Some("Double"),
            23 => Some("Extended"),
            24 => Some("Real48"),
            25 => Some("Comp"),
            26 => Some("Currency"),
            27 => Some("ShortString"),
            28 => Some("AnsiString"),
            29 => Some("WideString"),
            30 => Some("UnicodeString"),
            31 => Some("Variant"),
            32 => Some("OleVariant"),
            33 => Some("Pointer"),
            34 => Some("nil"),
            35 => Some("file"),
            36 => Some("<any ordinal>"),
            37 => Some("<any set>"),
            38 => Some("<any dynamic array>"),
            39 => Some("<any typed pointer>"),
            40 => Some("<any class reference>"),
            41 => Some("<any object>"),
            42 => Some("<pointer math operand>"),
            _ => None,
        }
    }

    /// Get the display name, using `"<type>"` as a fallback for dynamic types.
    #[inline]
    pub fn display_name(self) -> &'static str {
        self.name().unwrap_or("<type>")
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.is_none()) {
            (_, true) => write!(f, "Idx::NONE"),
            (Some(name), false) => write!(f, "Idx({name})"),
            (None, false) => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.is_none() => f.write_str("<none>"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

// Compile-time size assertion: Idx must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<Idx>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_primitive_has_a_name() {
        for raw in 0..Idx::PRIMITIVE_COUNT {
            assert!(Idx::from_raw(raw).name().is_some(), "missing name for {raw}");
        }
        assert!(Idx::from_raw(Idx::FIRST_DYNAMIC).name().is_none());
    }

    #[test]
    fn primitive_check_works() {
        assert!(Idx::INTEGER.is_primitive());
        assert!(Idx::POINTER_MATH_OPERAND.is_primitive());
        assert!(!Idx::from_raw(Idx::FIRST_DYNAMIC).is_primitive());
    }

    #[test]
    fn none_sentinel_works() {
        assert!(Idx::NONE.is_none());
        assert!(!Idx::UNKNOWN.is_none());
        assert_eq!(Idx::NONE.to_string(), "<none>");
    }

    #[test]
    fn display_uses_delphi_spelling() {
        assert_eq!(Idx::UNICODESTRING.to_string(), "UnicodeString");
        assert_eq!(Idx::from_raw(100).to_string(), "type#100");
        assert_eq!(format!("{:?}", Idx::INT64), "Idx(Int64)");
    }
}
