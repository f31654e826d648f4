//! Type system for the delint Delphi analyzer.
//!
//! Every Delphi type is an [`Idx`] into a [`TypeFactory`] arena:
//! - Intrinsic types and argument matchers are pre-interned at fixed indices
//! - Structural types (pointers, arrays, sets, procedural types) are
//!   hash-consed, so identical shapes compare equal by index
//! - Declared types (structs, enums, aliases, type parameters) are nominal
//!
//! On top of the model sit the queries the analyzer's rules need:
//! - [`TypeFactory::specialize`]: substitute generic arguments, with a
//!   per-type cache that makes self-referencing generics terminate
//! - [`OperatorResolution`]: candidate signatures for an operator
//! - [`IntrinsicReturnType`] and [`IntrinsicRoutine`]: result types of
//!   compiler intrinsics such as `High`, `Concat` and `Copy`
//!
//! # Aliases
//!
//! A weak alias (`type TFoo = Integer`) is the same type as what it
//! aliases. A strong alias (`type TFoo = type Integer`) is a distinct type
//! that still answers every structural query (`is_integer`, `size`, ...)
//! like the aliased type.

mod config;
mod data;
mod error;
mod factory;
mod flags;
mod idx;
mod intrinsics;
mod invocable;
mod matcher;
mod operators;
mod scope;
mod specialize;
mod stack;
mod tag;

pub use config::{Architecture, CompilerVersion, Platform, Toolchain, TypeFactoryConfig};
pub use data::{
    AliasKind, ArrayKind, BooleanKind, CharKind, Constraint, IntegerKind, ProceduralKind,
    RealKind, StringKind, StructData, StructKind, TypeData, VariantKind,
};
pub use error::TypeError;
pub use factory::{TypeFactory, WellKnown};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use intrinsics::{IntrinsicReturnType, IntrinsicRoutine};
pub use invocable::{Invocable, Parameter, ParameterMode, RoutineKind};
pub use matcher::ArgumentMatcher;
pub use operators::{BinaryOperator, OperatorResolution, UnaryOperator};
pub use scope::{Field, ScopeId, StructScope};
pub use specialize::{GenerifiableDeclaration, TypeSpecializationContext};
pub use tag::Tag;

// Size assertions to prevent accidental regressions.
// Parameters and fields are stored by value in every signature and scope.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Field, Parameter};
    // Name (4) + Idx (4) + mode (1) + has_default (1), padded to 12
    delint_ir::static_assert_size!(Parameter, 12);
    // Name (4) + NameKey (4) + Idx (4)
    delint_ir::static_assert_size!(Field, 12);
}
