//! Substitution maps for generic specialization.

use tracing::debug;

use crate::{Constraint, Idx, Invocable, TypeData, TypeFactory};

/// Anything with an ordered list of type parameters: a generic struct's
/// parameter list, or a generic routine.
pub trait GenerifiableDeclaration {
    fn type_parameters(&self) -> &[Idx];
}

impl GenerifiableDeclaration for [Idx] {
    fn type_parameters(&self) -> &[Idx] {
        self
    }
}

impl GenerifiableDeclaration for Invocable {
    fn type_parameters(&self) -> &[Idx] {
        Invocable::type_parameters(self)
    }
}

/// An immutable `type parameter -> argument` map.
///
/// Built all-or-nothing: when the argument count differs from the
/// parameter count, or any argument violates one of its parameter's
/// constraints, the map is empty and
/// [`has_signature_mismatch`](Self::has_signature_mismatch) is true.
/// Specializing under such a context is a no-op.
///
/// Hashes by content, so it doubles as a specialization cache key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeSpecializationContext {
    bindings: Box<[(Idx, Idx)]>,
    mismatch: bool,
}

impl TypeSpecializationContext {
    /// Bind `declaration`'s type parameters to `arguments`, checking
    /// constraints.
    ///
    /// Type constraints that mention the declaration's own parameters
    /// (`T: IComparable<T>`) are checked after substitution.
    pub fn new(
        factory: &mut TypeFactory,
        declaration: &(impl GenerifiableDeclaration + ?Sized),
        arguments: &[Idx],
    ) -> Self {
        let parameters = declaration.type_parameters();
        if parameters.len() != arguments.len() {
            debug!(
                expected = parameters.len(),
                got = arguments.len(),
                "type argument count mismatch"
            );
            return Self::mismatch();
        }

        let candidate = Self::bind(parameters, arguments);
        for (&parameter, &argument) in parameters.iter().zip(arguments) {
            let constraints = match factory.data(parameter) {
                TypeData::TypeParameter { constraints, .. } => constraints.clone(),
                _ => continue,
            };
            for constraint in constraints.iter().copied() {
                let constraint = match constraint {
                    Constraint::Type(ty) => Constraint::Type(factory.specialize(ty, &candidate)),
                    other => other,
                };
                if !factory.satisfies_constraint(argument, constraint) {
                    debug!(
                        parameter = %factory.image(parameter),
                        argument = %factory.image(argument),
                        ?constraint,
                        "type argument violates constraint"
                    );
                    return Self::mismatch();
                }
            }
        }
        candidate
    }

    /// Pair parameters with arguments without checking constraints.
    ///
    /// Used to rebuild the context of an existing specialization, whose
    /// arguments were checked when it was first requested.
    pub(crate) fn bind(parameters: &[Idx], arguments: &[Idx]) -> Self {
        if parameters.len() != arguments.len() {
            return Self::mismatch();
        }
        Self {
            bindings: parameters.iter().copied().zip(arguments.iter().copied()).collect(),
            mismatch: false,
        }
    }

    fn mismatch() -> Self {
        Self {
            bindings: Box::new([]),
            mismatch: true,
        }
    }

    /// The argument bound to `parameter`.
    pub fn get(&self, parameter: Idx) -> Option<Idx> {
        self.bindings
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|&(_, argument)| argument)
    }

    /// Whether the arguments did not fit the declaration.
    pub fn has_signature_mismatch(&self) -> bool {
        self.mismatch
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// `(parameter, argument)` pairs in declaration order.
    pub fn bindings(&self) -> impl Iterator<Item = (Idx, Idx)> + '_ {
        self.bindings.iter().copied()
    }
}
