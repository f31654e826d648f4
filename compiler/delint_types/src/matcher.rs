//! Argument matchers: predicate meta-types for intrinsic signatures.
//!
//! A matcher stands in for "any type with property P" in the formal
//! parameter list of a synthesized signature, e.g. `In(ANY_ORDINAL,
//! ANY_SET): Boolean`. Matchers are pre-interned at fixed indices and are
//! never the type of a value.

use crate::{Idx, StructKind, TypeFactory};

/// The predicate behind a matcher meta-type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArgumentMatcher {
    /// Integer, boolean, enumeration, subrange or character. Never a string.
    AnyOrdinal,
    /// A true set, or an array constructor (which may denote a set literal).
    AnySet,
    AnyDynamicArray,
    /// A pointer with a known target: not `Pointer`, not `nil`.
    AnyTypedPointer,
    AnyClassReference,
    /// A struct declared with the `object` keyword.
    AnyObject,
    /// The right operand of pointer arithmetic: the untyped `Pointer`, or a
    /// fixed-size array of `AnsiChar`/`WideChar`.
    PointerMathOperand,
}

impl ArgumentMatcher {
    pub const ALL: [Self; 7] = [
        Self::AnyOrdinal,
        Self::AnySet,
        Self::AnyDynamicArray,
        Self::AnyTypedPointer,
        Self::AnyClassReference,
        Self::AnyObject,
        Self::PointerMathOperand,
    ];

    /// The pre-interned meta-type for this matcher.
    pub const fn idx(self) -> Idx {
        match self {
            Self::AnyOrdinal => Idx::ANY_ORDINAL,
            Self::AnySet => Idx::ANY_SET,
            Self::AnyDynamicArray => Idx::ANY_DYNAMIC_ARRAY,
            Self::AnyTypedPointer => Idx::ANY_TYPED_POINTER,
            Self::AnyClassReference => Idx::ANY_CLASS_REFERENCE,
            Self::AnyObject => Idx::ANY_OBJECT,
            Self::PointerMathOperand => Idx::POINTER_MATH_OPERAND,
        }
    }

    /// The matcher behind a meta-type index, if it is one.
    pub const fn from_idx(idx: Idx) -> Option<Self> {
        match idx {
            Idx::ANY_ORDINAL => Some(Self::AnyOrdinal),
            Idx::ANY_SET => Some(Self::AnySet),
            Idx::ANY_DYNAMIC_ARRAY => Some(Self::AnyDynamicArray),
            Idx::ANY_TYPED_POINTER => Some(Self::AnyTypedPointer),
            Idx::ANY_CLASS_REFERENCE => Some(Self::AnyClassReference),
            Idx::ANY_OBJECT => Some(Self::AnyObject),
            Idx::POINTER_MATH_OPERAND => Some(Self::PointerMathOperand),
            _ => None,
        }
    }

    /// Whether an argument of type `ty` is accepted.
    pub fn matches(self, factory: &TypeFactory, ty: Idx) -> bool {
        match self {
            Self::AnyOrdinal => factory.is_ordinal(ty),
            Self::AnySet => factory.is_set(ty) || factory.is_array_constructor(ty),
            Self::AnyDynamicArray => factory.is_dynamic_array(ty),
            Self::AnyTypedPointer => {
                factory.is_pointer(ty)
                    && !factory.is_untyped_pointer(ty)
                    && !factory.is_nil_pointer(ty)
            }
            Self::AnyClassReference => factory.is_class_reference(ty),
            Self::AnyObject => factory.struct_kind(ty) == Some(StructKind::Object),
            Self::PointerMathOperand => {
                factory.is_untyped_pointer(ty)
                    || (factory.is_fixed_array(ty)
                        && factory
                            .element_type(ty)
                            .is_some_and(|element| factory.is_char(element)))
            }
        }
    }
}
