//! Callable signatures: user routines, operator overloads and synthesized
//! intrinsics.

use std::hash::{Hash, Hasher};

use delint_ir::{Name, NameKey};

use crate::Idx;

/// What kind of routine a signature belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RoutineKind {
    Procedure,
    Function,
    Constructor,
    Destructor,
    /// `class operator` overloads and synthesized operator signatures.
    Operator,
    /// Compiler intrinsic routines (`High`, `Length`, ...).
    Intrinsic,
}

/// How an argument is passed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ParameterMode {
    #[default]
    Value,
    Const,
    Var,
    Out,
}

/// A formal parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Parameter {
    /// `Name::EMPTY` for synthesized signatures.
    pub name: Name,
    pub ty: Idx,
    pub mode: ParameterMode,
    pub has_default: bool,
}

impl Parameter {
    /// An unnamed by-value parameter.
    pub const fn of(ty: Idx) -> Self {
        Self {
            name: Name::EMPTY,
            ty,
            mode: ParameterMode::Value,
            has_default: false,
        }
    }

    pub const fn named(name: Name, ty: Idx) -> Self {
        Self {
            name,
            ty,
            mode: ParameterMode::Value,
            has_default: false,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ParameterMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// A named, typed callable signature.
///
/// Two invocables are equal when their names match case-insensitively and
/// their parameter and return types are the same types. Parameter names,
/// modes and the routine kind do not take part in equality. Signatures
/// built through the [`TypeFactory`](crate::TypeFactory) compare with weak
/// aliases removed.
#[derive(Clone, Debug)]
pub struct Invocable {
    name: Name,
    key: NameKey,
    kind: RoutineKind,
    parameters: Vec<Parameter>,
    return_type: Idx,
    type_parameters: Box<[Idx]>,
    class_invocable: bool,
    /// Parameter types then the return type, as compared by `==`.
    identity: Box<[Idx]>,
}

impl Invocable {
    /// Create a signature. Prefer [`TypeFactory::invocable`](crate::TypeFactory::invocable),
    /// which interns the name and computes its key.
    pub fn new(
        name: Name,
        key: NameKey,
        kind: RoutineKind,
        parameters: Vec<Parameter>,
        return_type: Idx,
    ) -> Self {
        let identity = signature_types(&parameters, return_type);
        Self {
            name,
            key,
            kind,
            parameters,
            return_type,
            identity,
            type_parameters: Box::new([]),
            // Operators and intrinsics are always statically dispatched.
            class_invocable: matches!(kind, RoutineKind::Operator | RoutineKind::Intrinsic),
        }
    }

    /// Mark a method as `class`/`static`.
    #[must_use]
    pub fn class_invocable(mut self) -> Self {
        self.class_invocable = true;
        self
    }

    /// Make this a generic routine over `type_parameters`.
    #[must_use]
    pub fn with_type_parameters(mut self, type_parameters: impl Into<Box<[Idx]>>) -> Self {
        self.type_parameters = type_parameters.into();
        self
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn key(&self) -> NameKey {
        self.key
    }

    pub fn kind(&self) -> RoutineKind {
        self.kind
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = Idx> + '_ {
        self.parameters.iter().map(|p| p.ty)
    }

    pub fn return_type(&self) -> Idx {
        self.return_type
    }

    pub fn type_parameters(&self) -> &[Idx] {
        &self.type_parameters
    }

    /// Number of parameters without a default value.
    pub fn required_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.has_default).count()
    }

    /// Whether this is a genuine user subroutine that can be invoked by name.
    ///
    /// Operators and intrinsics are never invoked by name.
    pub fn is_callable(&self) -> bool {
        !matches!(self.kind, RoutineKind::Operator | RoutineKind::Intrinsic)
    }

    /// Whether calls are statically dispatched, with no receiver binding.
    pub fn is_class_invocable(&self) -> bool {
        self.class_invocable
    }

    pub(crate) fn with_signature(&self, parameters: Vec<Parameter>, return_type: Idx) -> Self {
        Self {
            identity: signature_types(&parameters, return_type),
            parameters,
            return_type,
            ..self.clone()
        }
    }

    /// Replace the types `==` compares, one per parameter plus the return
    /// type.
    pub(crate) fn with_identity(mut self, identity: Box<[Idx]>) -> Self {
        debug_assert_eq!(identity.len(), self.parameters.len() + 1);
        self.identity = identity;
        self
    }
}

fn signature_types(parameters: &[Parameter], return_type: Idx) -> Box<[Idx]> {
    parameters
        .iter()
        .map(|p| p.ty)
        .chain(std::iter::once(return_type))
        .collect()
}

impl PartialEq for Invocable {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.identity == other.identity
    }
}

impl Eq for Invocable {}

impl Hash for Invocable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.identity.hash(state);
    }
}
