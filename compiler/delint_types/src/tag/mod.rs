//! Type kind tag for tag-driven dispatch.
//!
//! Every `TypeData` maps to one `Tag`. Tags are grouped into ranges so the
//! common category checks are a single comparison:
//! - 0-15: Special and intrinsic scalars
//! - 16-31: Structural types (hash-consed)
//! - 32-47: Nominal types (one per declaration)
//! - 240-255: Meta types

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Special and intrinsic scalars (0-15) ===
    Unknown = 0,
    Untyped = 1,
    Void = 2,
    Integer = 3,
    Boolean = 4,
    Char = 5,
    Real = 6,
    String = 7,
    Variant = 8,

    // === Structural (16-31) ===
    File = 16,
    Pointer = 17,
    Set = 18,
    Array = 19,
    ArrayConstructor = 20,
    Procedural = 21,
    ClassReference = 22,

    // === Nominal (32-47) ===
    Enumeration = 32,
    Subrange = 33,
    Struct = 34,
    TypeParameter = 35,
    Alias = 36,

    // === Meta (240-255) ===
    /// Argument matcher placeholder.
    Matcher = 240,
}

impl Tag {
    /// Check if this tag is a special or intrinsic scalar kind.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        (self as u8) < 16
    }

    /// Check if values of this tag are hash-consed by shape.
    #[inline]
    pub const fn is_structural(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 32
    }

    /// Check if every construction of this tag yields a fresh type.
    #[inline]
    pub const fn is_nominal(self) -> bool {
        let v = self as u8;
        v >= 32 && v < 48
    }

    /// Check if this tag can be counted and ordered.
    ///
    /// Subranges are ordinal through their host; aliases are resolved
    /// before tags are consulted for structural questions.
    #[inline]
    pub const fn is_ordinal(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Boolean | Self::Char | Self::Enumeration | Self::Subrange
        )
    }

    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Untyped => "untyped",
            Self::Void => "void",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Real => "real",
            Self::String => "string",
            Self::Variant => "variant",
            Self::File => "file",
            Self::Pointer => "pointer",
            Self::Set => "set",
            Self::Array => "array",
            Self::ArrayConstructor => "array_constructor",
            Self::Procedural => "procedural",
            Self::ClassReference => "class_reference",
            Self::Enumeration => "enumeration",
            Self::Subrange => "subrange",
            Self::Struct => "struct",
            Self::TypeParameter => "type_parameter",
            Self::Alias => "alias",
            Self::Matcher => "matcher",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Compile-time size assertion: Tag must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<Tag>() == 1);
