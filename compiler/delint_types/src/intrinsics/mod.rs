//! Return types of compiler intrinsic routines.
//!
//! Most intrinsics have a fixed result type. The ones here compute it from
//! their argument types: `High(x)` is `x`'s own type for ordinals,
//! `Concat` promotes strings, `Slice` turns a dynamic array into an open
//! array. Inapplicable arguments produce `Idx::UNKNOWN`, never an error.

mod routines;


pub use routines::IntrinsicRoutine;

use tracing::trace;

use crate::{CharKind, Idx, Invocable, StringKind, TypeData, TypeFactory, VariantKind};

/// A rule computing an intrinsic's result type from its argument types.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IntrinsicReturnType {
    High,
    Low,
    Round,
    Trunc,
    /// A class reference used as a value: the referenced class.
    ClassReferenceValue,
    Concat,
    Copy,
    Slice,
    /// The type of the argument at this position.
    ArgumentByIndex(usize),
}

impl IntrinsicReturnType {
    /// Result type of a call with `arguments`.
    pub fn resolve(self, factory: &mut TypeFactory, arguments: &[Idx]) -> Idx {
        let resolved = match self {
            Self::ArgumentByIndex(i) => arguments.get(i).copied().unwrap_or(Idx::UNKNOWN),
            Self::Concat => concat(factory, arguments),
            _ => {
                let Some(&first) = arguments.first() else {
                    return Idx::UNKNOWN;
                };
                match self {
                    Self::High | Self::Low => bound(factory, first),
                    Self::Round => rounded(factory, first, "Round"),
                    Self::Trunc => rounded(factory, first, "Trunc"),
                    Self::ClassReferenceValue => factory
                        .class_reference_target(first)
                        .unwrap_or(Idx::UNKNOWN),
                    Self::Copy => copy(factory, first),
                    Self::Slice => slice(factory, first),
                    Self::ArgumentByIndex(_) | Self::Concat => Idx::UNKNOWN,
                }
            }
        };
        trace!(rule = ?self, result = %resolved, "intrinsic return type");
        resolved
    }
}

/// `High(x)` / `Low(x)`.
fn bound(factory: &TypeFactory, ty: Idx) -> Idx {
    if let Some(class) = factory.class_reference_target(ty) {
        class
    } else if factory.is_string(ty) || factory.is_array(ty) {
        Idx::INTEGER
    } else {
        ty
    }
}

/// `Round(x)` / `Trunc(x)`: reals round to `Int64`; records may declare
/// `class operator Round`/`Trunc`.
fn rounded(factory: &mut TypeFactory, ty: Idx, operator: &str) -> Idx {
    if factory.is_real(ty) || factory.is_variant(ty) {
        return Idx::INT64;
    }
    if !factory.is_struct(ty) {
        return Idx::UNKNOWN;
    }
    let keys = [factory.key_of(operator)];
    factory
        .self_and_ancestors(ty)
        .into_iter()
        .find_map(|owner| {
            factory
                .scope(owner)
                .and_then(|scope| scope.operators(&keys).next())
                .map(Invocable::return_type)
        })
        .unwrap_or(Idx::UNKNOWN)
}

/// `Concat(a, b, ...)`.
fn concat(factory: &mut TypeFactory, arguments: &[Idx]) -> Idx {
    let Some(&first) = arguments.first() else {
        return Idx::UNKNOWN;
    };

    if arguments
        .iter()
        .any(|&a| factory.is_array(a) || factory.is_array_constructor(a))
    {
        return concat_arrays(factory, arguments);
    }

    if let Some(kind) = arguments.iter().find_map(|&a| factory.variant_kind(a)) {
        return match kind {
            VariantKind::Variant => Idx::VARIANT,
            VariantKind::OleVariant => Idx::OLEVARIANT,
        };
    }

    if factory.is_text(first) {
        return arguments
            .iter()
            .map(|&a| string_family(factory, a))
            .try_fold(StringKind::Short, |widest, kind| Some(widest.max(kind?)))
            .map_or(Idx::UNKNOWN, StringKind::idx);
    }

    Idx::UNKNOWN
}

/// The string kind a text argument contributes to a concatenation.
fn string_family(factory: &TypeFactory, ty: Idx) -> Option<StringKind> {
    match factory.structural(ty) {
        TypeData::String(kind) => Some(*kind),
        TypeData::Char(CharKind::Ansi) => Some(StringKind::Ansi),
        TypeData::Char(CharKind::Wide) => Some(StringKind::Unicode),
        _ => None,
    }
}

fn concat_arrays(factory: &mut TypeFactory, arguments: &[Idx]) -> Idx {
    if let Some(&dynamic) = arguments.iter().find(|&&a| factory.is_dynamic_array(a)) {
        return dynamic;
    }
    if arguments.iter().all(|&a| factory.is_array_constructor(a)) {
        let elements: Vec<Idx> = arguments
            .iter()
            .flat_map(|&a| factory.array_constructor_elements(a).iter().copied())
            .collect();
        return factory.array_constructor(&elements);
    }
    Idx::UNKNOWN
}

/// `Copy(x, ...)`.
fn copy(factory: &TypeFactory, ty: Idx) -> Idx {
    if factory.is_string(ty) || factory.is_array(ty) || factory.is_array_constructor(ty) {
        return ty;
    }
    match factory.structural(ty) {
        TypeData::Char(CharKind::Ansi) => Idx::ANSISTRING,
        TypeData::Char(CharKind::Wide) | TypeData::Variant(_) => Idx::UNICODESTRING,
        _ => Idx::UNKNOWN,
    }
}

/// `Slice(a, count)`.
fn slice(factory: &mut TypeFactory, ty: Idx) -> Idx {
    match (factory.is_dynamic_array(ty), factory.element_type(ty)) {
        (true, Some(element)) => factory.open_array(element),
        _ => Idx::UNKNOWN,
    }
}
