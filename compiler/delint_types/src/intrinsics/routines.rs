//! The table of compiler intrinsic routines.

use delint_ir::Name;

use super::IntrinsicReturnType;
use crate::{Idx, Invocable, Parameter, ParameterMode, RoutineKind, TypeFactory};
use IntrinsicReturnType as R;
use Returns::{Computed, Fixed};

/// How an intrinsic's result type is determined.
#[derive(Copy, Clone)]
enum Returns {
    Fixed(Idx),
    /// `Char` for the configured compiler version.
    Char,
    Computed(IntrinsicReturnType),
}

struct Row {
    name: &'static str,
    parameters: &'static [Parameter],
    returns: Returns,
    variadic: bool,
}

const fn value(ty: Idx) -> Parameter {
    Parameter::of(ty)
}

const fn var(ty: Idx) -> Parameter {
    Parameter::of(ty).with_mode(ParameterMode::Var)
}

const fn optional(ty: Idx) -> Parameter {
    Parameter::of(ty).with_default()
}

const fn row(
    name: &'static str,
    parameters: &'static [Parameter],
    returns: Returns,
) -> Row {
    Row {
        name,
        parameters,
        returns,
        variadic: false,
    }
}

const fn variadic(
    name: &'static str,
    parameters: &'static [Parameter],
    returns: Returns,
) -> Row {
    Row {
        name,
        parameters,
        returns,
        variadic: true,
    }
}

/// Sorted by name.
const ROUTINES: &[Row] = &[
    row("Abs", &[value(Idx::UNTYPED)], Computed(R::ArgumentByIndex(0))),
    row("Addr", &[value(Idx::UNTYPED)], Fixed(Idx::POINTER)),
    row("Assigned", &[value(Idx::UNTYPED)], Fixed(Idx::BOOLEAN)),
    row("Chr", &[value(Idx::INTEGER)], Returns::Char),
    variadic("Concat", &[value(Idx::UNTYPED)], Computed(R::Concat)),
    row(
        "Copy",
        &[value(Idx::UNTYPED), optional(Idx::INTEGER), optional(Idx::INTEGER)],
        Computed(R::Copy),
    ),
    row(
        "Dec",
        &[var(Idx::ANY_ORDINAL), optional(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row("Default", &[value(Idx::UNTYPED)], Computed(R::ArgumentByIndex(0))),
    row(
        "Delete",
        &[var(Idx::UNTYPED), value(Idx::INTEGER), value(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row("Dispose", &[var(Idx::ANY_TYPED_POINTER)], Fixed(Idx::VOID)),
    row(
        "Exclude",
        &[var(Idx::ANY_SET), value(Idx::ANY_ORDINAL)],
        Fixed(Idx::VOID),
    ),
    row("Exit", &[optional(Idx::UNTYPED)], Fixed(Idx::VOID)),
    row(
        "FillChar",
        &[var(Idx::UNTYPED), value(Idx::INTEGER), value(Idx::ANY_ORDINAL)],
        Fixed(Idx::VOID),
    ),
    row(
        "Finalize",
        &[var(Idx::UNTYPED), optional(Idx::NATIVEINT)],
        Fixed(Idx::VOID),
    ),
    row(
        "FreeMem",
        &[var(Idx::POINTER), optional(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row(
        "GetMem",
        &[var(Idx::POINTER), value(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row("High", &[value(Idx::UNTYPED)], Computed(R::High)),
    row(
        "Inc",
        &[var(Idx::ANY_ORDINAL), optional(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row(
        "Include",
        &[var(Idx::ANY_SET), value(Idx::ANY_ORDINAL)],
        Fixed(Idx::VOID),
    ),
    row(
        "Initialize",
        &[var(Idx::UNTYPED), optional(Idx::NATIVEINT)],
        Fixed(Idx::VOID),
    ),
    row(
        "Insert",
        &[value(Idx::UNTYPED), var(Idx::UNTYPED), value(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row("Length", &[value(Idx::UNTYPED)], Fixed(Idx::INTEGER)),
    row("Low", &[value(Idx::UNTYPED)], Computed(R::Low)),
    row("New", &[var(Idx::ANY_TYPED_POINTER)], Fixed(Idx::VOID)),
    row("Odd", &[value(Idx::ANY_ORDINAL)], Fixed(Idx::BOOLEAN)),
    row("Ord", &[value(Idx::ANY_ORDINAL)], Fixed(Idx::INTEGER)),
    row("Pred", &[value(Idx::ANY_ORDINAL)], Computed(R::ArgumentByIndex(0))),
    row("Ptr", &[value(Idx::NATIVEINT)], Fixed(Idx::POINTER)),
    row("Round", &[value(Idx::UNTYPED)], Computed(R::Round)),
    variadic(
        "SetLength",
        &[var(Idx::UNTYPED), value(Idx::INTEGER)],
        Fixed(Idx::VOID),
    ),
    row("SizeOf", &[value(Idx::UNTYPED)], Fixed(Idx::INTEGER)),
    row(
        "Slice",
        &[var(Idx::UNTYPED), value(Idx::INTEGER)],
        Computed(R::Slice),
    ),
    row("Succ", &[value(Idx::ANY_ORDINAL)], Computed(R::ArgumentByIndex(0))),
    row("Trunc", &[value(Idx::UNTYPED)], Computed(R::Trunc)),
    row("TypeInfo", &[value(Idx::UNTYPED)], Fixed(Idx::POINTER)),
];

/// A compiler intrinsic routine: its signature and how its result type is
/// determined.
#[derive(Clone, Debug)]
pub struct IntrinsicRoutine {
    invocable: Invocable,
    return_type: Option<IntrinsicReturnType>,
    variadic: bool,
}

impl IntrinsicRoutine {
    /// Every intrinsic routine, sorted by name.
    pub fn all(factory: &mut TypeFactory) -> Vec<Self> {
        ROUTINES.iter().map(|row| Self::build(factory, row)).collect()
    }

    /// Look up an intrinsic by case-insensitive name.
    pub fn find(factory: &mut TypeFactory, name: &str) -> Option<Self> {
        let key = factory.key_of(name);
        let row = ROUTINES.iter().find(|row| factory.key_of(row.name) == key)?;
        Some(Self::build(factory, row))
    }

    fn build(factory: &mut TypeFactory, row: &Row) -> Self {
        let name: Name = factory.intern(row.name);
        let (declared, return_type) = match row.returns {
            Fixed(ty) => (ty, None),
            Returns::Char => (factory.char_type(), None),
            Computed(rule) => (Idx::UNKNOWN, Some(rule)),
        };
        let invocable = Invocable::new(
            name,
            factory.key(name),
            RoutineKind::Intrinsic,
            row.parameters.to_vec(),
            declared,
        );
        let invocable = factory.with_weak_aliases_stripped(invocable);
        Self {
            invocable,
            return_type,
            variadic: row.variadic,
        }
    }

    pub fn invocable(&self) -> &Invocable {
        &self.invocable
    }

    pub fn name(&self) -> Name {
        self.invocable.name()
    }

    /// Accepts more arguments than its declared parameters; the last one
    /// repeats.
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// The rule computing the result type, if it is not fixed.
    pub fn computed_return_type(&self) -> Option<IntrinsicReturnType> {
        self.return_type
    }

    /// Result type of a call with `arguments`.
    pub fn return_type(&self, factory: &mut TypeFactory, arguments: &[Idx]) -> Idx {
        match self.return_type {
            Some(rule) => rule.resolve(factory, arguments),
            None => self.invocable.return_type(),
        }
    }
}
