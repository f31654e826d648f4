//! Type representation stored in the type factory.
//!
//! `TypeData` is what an `Idx` points at. Children are `Idx` handles, never
//! boxed types, so structural equality of interned shapes is index equality.

use delint_ir::Name;

use crate::{ArgumentMatcher, Idx, ScopeId, Tag};

/// Integer intrinsic kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IntegerKind {
    ShortInt,
    SmallInt,
    Integer,
    Int64,
    Byte,
    Word,
    Cardinal,
    UInt64,
    NativeInt,
    NativeUInt,
    LongInt,
    LongWord,
}

impl IntegerKind {
    /// Whether the kind admits negative values.
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::ShortInt
                | Self::SmallInt
                | Self::Integer
                | Self::Int64
                | Self::NativeInt
                | Self::LongInt
        )
    }
}

/// Boolean intrinsic kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BooleanKind {
    Boolean,
    ByteBool,
    WordBool,
    LongBool,
}

/// Character intrinsic kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CharKind {
    Ansi,
    Wide,
}

/// Floating point and fixed point intrinsic kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RealKind {
    Single,
    Double,
    Extended,
    Real48,
    Comp,
    Currency,
}

/// String intrinsic kinds, in promotion order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum StringKind {
    Short,
    Ansi,
    Wide,
    Unicode,
}

impl StringKind {
    /// The pre-interned type for this kind.
    pub const fn idx(self) -> Idx {
        match self {
            Self::Short => Idx::SHORTSTRING,
            Self::Ansi => Idx::ANSISTRING,
            Self::Wide => Idx::WIDESTRING,
            Self::Unicode => Idx::UNICODESTRING,
        }
    }
}

/// Variant intrinsic kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariantKind {
    Variant,
    OleVariant,
}

/// The flavour of a struct type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructKind {
    Class,
    Record,
    Interface,
    /// Turbo Pascal style `object`.
    Object,
    ClassHelper,
    RecordHelper,
}

impl StructKind {
    /// Keyword used when displaying anonymous structs.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Record => "record",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::ClassHelper => "class helper",
            Self::RecordHelper => "record helper",
        }
    }
}

/// Array shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArrayKind {
    /// `array[0..length-1] of T`.
    Fixed { length: u32 },
    /// `array of T` declared as a type.
    Dynamic,
    /// `array of T` as a parameter type.
    Open,
}

/// Procedural type shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ProceduralKind {
    /// `procedure(...)` / `function(...): T`.
    Procedure,
    /// `procedure(...) of object`.
    Method,
    /// `reference to procedure(...)`.
    Reference,
}

/// Weak aliases are transparent to identity checks; strong aliases
/// (`type X = type Y`) are opaque.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AliasKind {
    Weak,
    Strong,
}

/// A requirement on a generic argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Constraint {
    /// `T: class`
    Class,
    /// `T: record`
    Record,
    /// `T: constructor`
    Constructor,
    /// `T: TBase` / `T: IFoo`: the argument is, descends from, or
    /// implements the type.
    Type(Idx),
}

/// A class, record, interface or object declaration (or specialization).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructData {
    /// Declared name, without type arguments.
    pub name: Name,
    pub kind: StructKind,
    /// Type parameters for a generic declaration, type arguments for a
    /// specialization, empty otherwise.
    pub type_args: Box<[Idx]>,
    /// The generic declaration this struct was specialized from.
    pub origin: Option<Idx>,
    /// Member scope (may still be pending for forward declarations).
    pub scope: ScopeId,
}

/// Type representation stored in the factory.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    // === Special ===
    Unknown,
    Untyped,
    Void,

    // === Intrinsics (pre-interned) ===
    Integer(IntegerKind),
    Boolean(BooleanKind),
    Char(CharKind),
    Real(RealKind),
    String(StringKind),
    Variant(VariantKind),

    // === Structural (hash-consed) ===
    /// `file of T`; `Untyped` element for a plain `file`.
    File(Idx),
    /// `^T`. The untyped `Pointer` targets `Untyped`, `nil` targets `Void`.
    Pointer { target: Idx, pointer_math: bool },
    /// `set of T`.
    Set(Idx),
    Array { element: Idx, kind: ArrayKind },
    /// Candidate element types of a `[a, b, c]` literal, in source order.
    ArrayConstructor(Box<[Idx]>),
    Procedural {
        kind: ProceduralKind,
        params: Box<[Idx]>,
        /// `Idx::VOID` for procedures.
        ret: Idx,
    },
    /// `class of T`.
    ClassReference(Idx),

    // === Nominal (one slot per declaration) ===
    Enumeration { name: Name, elements: Box<[Name]> },
    Subrange { name: Name, host: Idx },
    Struct(StructData),
    TypeParameter { name: Name, constraints: Box<[Constraint]> },
    Alias { kind: AliasKind, name: Name, aliased: Idx },

    // === Meta ===
    Matcher(ArgumentMatcher),
}

impl TypeData {
    /// Get the kind tag for this type.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Unknown => Tag::Unknown,
            Self::Untyped => Tag::Untyped,
            Self::Void => Tag::Void,
            Self::Integer(_) => Tag::Integer,
            Self::Boolean(_) => Tag::Boolean,
            Self::Char(_) => Tag::Char,
            Self::Real(_) => Tag::Real,
            Self::String(_) => Tag::String,
            Self::Variant(_) => Tag::Variant,
            Self::File(_) => Tag::File,
            Self::Pointer { .. } => Tag::Pointer,
            Self::Set(_) => Tag::Set,
            Self::Array { .. } => Tag::Array,
            Self::ArrayConstructor(_) => Tag::ArrayConstructor,
            Self::Procedural { .. } => Tag::Procedural,
            Self::ClassReference(_) => Tag::ClassReference,
            Self::Enumeration { .. } => Tag::Enumeration,
            Self::Subrange { .. } => Tag::Subrange,
            Self::Struct(_) => Tag::Struct,
            Self::TypeParameter { .. } => Tag::TypeParameter,
            Self::Alias { .. } => Tag::Alias,
            Self::Matcher(_) => Tag::Matcher,
        }
    }

    /// Direct child types, in declaration order.
    ///
    /// Struct members live in the scope table and are not children here.
    pub fn children(&self) -> Vec<Idx> {
        match self {
            Self::File(inner)
            | Self::Set(inner)
            | Self::ClassReference(inner)
            | Self::Pointer { target: inner, .. }
            | Self::Array { element: inner, .. }
            | Self::Subrange { host: inner, .. }
            | Self::Alias { aliased: inner, .. } => vec![*inner],
            Self::ArrayConstructor(elements) => elements.to_vec(),
            Self::Procedural { params, ret, .. } => {
                let mut children = params.to_vec();
                children.push(*ret);
                children
            }
            Self::Struct(data) => data.type_args.to_vec(),
            Self::TypeParameter { constraints, .. } => constraints
                .iter()
                .filter_map(|c| match c {
                    Constraint::Type(ty) => Some(*ty),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_kinds_promote_in_declaration_order() {
        assert!(StringKind::Short < StringKind::Ansi);
        assert!(StringKind::Ansi < StringKind::Wide);
        assert!(StringKind::Wide < StringKind::Unicode);
    }

    #[test]
    fn procedural_children_end_with_return_type() {
        let data = TypeData::Procedural {
            kind: ProceduralKind::Procedure,
            params: Box::new([Idx::INTEGER, Idx::BOOLEAN]),
            ret: Idx::UNICODESTRING,
        };
        assert_eq!(
            data.children(),
            vec![Idx::INTEGER, Idx::BOOLEAN, Idx::UNICODESTRING]
        );
    }

    #[test]
    fn signedness() {
        assert!(IntegerKind::ShortInt.is_signed());
        assert!(!IntegerKind::Cardinal.is_signed());
    }
}
