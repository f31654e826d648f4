//! Generic specialization.
//!
//! `TypeFactory::specialize` maps a type that mentions type parameters to
//! the type obtained by substituting a [`TypeSpecializationContext`].
//!
//! # Caching
//!
//! Each type caches its own specializations by context. A struct is
//! specialized in two steps: a shell (name, kind, arguments, origin) is
//! created and cached first, then its members are specialized. A member
//! that refers back to the struct (`TNode<T>` holding `^TNode<T>`) finds
//! the shell in the cache instead of recursing.
//!
//! Specializations of specializations are routed back to the generic
//! declaration, so `TList<T>` specialized with `T -> Integer` and
//! `TList<U>` specialized with `U -> Integer` are the same `Idx`.

mod context;


pub use context::{GenerifiableDeclaration, TypeSpecializationContext};

use tracing::debug;

use crate::stack::ensure_sufficient_stack;
use crate::{
    Constraint, Field, Idx, Invocable, Parameter, StructData, StructScope, TypeData, TypeFactory,
    TypeFlags,
};

impl TypeFactory {
    /// Substitute `context` into `ty`.
    ///
    /// Returns `ty` unchanged when the context is a mismatch or `ty`
    /// mentions no type parameter. Never fails.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %ty))]
    pub fn specialize(&mut self, ty: Idx, context: &TypeSpecializationContext) -> Idx {
        if context.has_signature_mismatch()
            || context.is_empty()
            || !self.flags(ty).needs_specialization()
        {
            return ty;
        }
        ensure_sufficient_stack(|| self.specialize_uncached(ty, context))
    }

    /// Specialize the generic declaration `generic` with `arguments`,
    /// checking them against its type parameters.
    pub fn specialize_with(&mut self, generic: Idx, arguments: &[Idx]) -> Idx {
        let parameters = self.type_parameters_of(generic).to_vec();
        let context = TypeSpecializationContext::new(self, parameters.as_slice(), arguments);
        self.specialize(generic, &context)
    }

    /// Own type parameters of a generic struct declaration; empty otherwise.
    pub fn type_parameters_of(&self, idx: Idx) -> &[Idx] {
        match self.struct_data(idx) {
            Some(data) if data.origin.is_none() => &data.type_args,
            _ => &[],
        }
    }

    /// Substitute `context` into a signature.
    ///
    /// Parameters bound by the context are dropped from the routine's own
    /// type parameter list.
    pub fn specialize_invocable(
        &mut self,
        invocable: &Invocable,
        context: &TypeSpecializationContext,
    ) -> Invocable {
        if context.has_signature_mismatch() || context.is_empty() {
            return invocable.clone();
        }
        let parameters = invocable
            .parameters()
            .iter()
            .map(|p| Parameter {
                ty: self.specialize(p.ty, context),
                ..*p
            })
            .collect();
        let return_type = self.specialize(invocable.return_type(), context);
        let remaining: Box<[Idx]> = invocable
            .type_parameters()
            .iter()
            .copied()
            .filter(|p| context.get(*p).is_none())
            .collect();
        let specialized = invocable
            .with_signature(parameters, return_type)
            .with_type_parameters(remaining);
        self.with_weak_aliases_stripped(specialized)
    }

    /// Whether `argument` may be bound to a parameter with `constraint`.
    ///
    /// A type parameter argument satisfies a constraint when one of its own
    /// constraints implies it. Unknown arguments satisfy everything.
    pub fn satisfies_constraint(&self, argument: Idx, constraint: Constraint) -> bool {
        if self.is_unknown(argument) {
            return true;
        }
        if let TypeData::TypeParameter { constraints, .. } = self.structural(argument) {
            return constraints
                .iter()
                .any(|&own| self.constraint_implies(own, constraint));
        }
        match constraint {
            Constraint::Class | Constraint::Constructor => self.is_class(argument),
            Constraint::Record => self.is_value_type(argument),
            Constraint::Type(ty) => self.is_unknown(ty) || self.descends_from(argument, ty),
        }
    }

    fn constraint_implies(&self, own: Constraint, required: Constraint) -> bool {
        match (own, required) {
            _ if own == required => true,
            (Constraint::Type(own), Constraint::Type(required)) => {
                self.descends_from(own, required)
            }
            (Constraint::Type(own), Constraint::Class | Constraint::Constructor) => {
                self.is_class(own)
            }
            _ => false,
        }
    }

    /// Non-nullable value types: what a `record` constraint accepts.
    fn is_value_type(&self, ty: Idx) -> bool {
        self.is_record(ty)
            || self.is_ordinal(ty)
            || self.is_real(ty)
            || self.is_set(ty)
            || self.is_fixed_array(ty)
    }

    fn specialize_uncached(&mut self, ty: Idx, context: &TypeSpecializationContext) -> Idx {
        if let TypeData::TypeParameter { .. } = self.data(ty) {
            return context.get(ty).unwrap_or(ty);
        }
        // A declaration caches by its own argument list, whatever else the
        // caller's context binds.
        let own_context;
        let context = if self.is_generic_declaration(ty) {
            own_context = self.declaration_context(ty, context);
            &own_context
        } else {
            context
        };
        if let Some(cached) = self.cached_specialization(ty, context) {
            return cached;
        }

        let specialized = self.do_specialization(ty, context);
        if specialized == ty {
            return ty;
        }
        debug!(from = %self.image(ty), to = %self.image(specialized), "specialized");
        self.cache_specialization(ty, context.clone(), specialized);
        self.do_after_specialization(specialized);
        specialized
    }

    /// `context` narrowed to the type parameters of the declaration `ty`.
    fn declaration_context(
        &self,
        ty: Idx,
        context: &TypeSpecializationContext,
    ) -> TypeSpecializationContext {
        let parameters = self.type_parameters_of(ty);
        let arguments: Vec<Idx> = parameters
            .iter()
            .map(|&p| context.get(p).unwrap_or(p))
            .collect();
        TypeSpecializationContext::bind(parameters, &arguments)
    }

    fn do_specialization(&mut self, ty: Idx, context: &TypeSpecializationContext) -> Idx {
        match self.data(ty).clone() {
            TypeData::Struct(data) => self.specialize_struct(ty, &data, context),
            TypeData::Alias {
                kind,
                name,
                aliased,
            } => {
                let new_aliased = self.specialize(aliased, context);
                if new_aliased == aliased {
                    ty
                } else {
                    self.alias_of_kind(kind, name, new_aliased)
                }
            }
            TypeData::Pointer {
                target,
                pointer_math,
            } => {
                let new_target = self.specialize(target, context);
                match (new_target == target, pointer_math) {
                    (true, _) => ty,
                    (false, true) => self.pointer_with_math(new_target),
                    (false, false) => self.pointer(new_target),
                }
            }
            TypeData::Set(element) => {
                let new_element = self.specialize(element, context);
                if new_element == element {
                    ty
                } else {
                    self.set(new_element)
                }
            }
            TypeData::File(element) => {
                let new_element = self.specialize(element, context);
                if new_element == element {
                    ty
                } else {
                    self.file_of(new_element)
                }
            }
            TypeData::ClassReference(class) => {
                let new_class = self.specialize(class, context);
                if new_class == class {
                    ty
                } else {
                    self.class_reference(new_class)
                }
            }
            TypeData::Array { element, kind } => {
                let new_element = self.specialize(element, context);
                if new_element == element {
                    ty
                } else {
                    self.array(new_element, kind)
                }
            }
            TypeData::ArrayConstructor(elements) => {
                let new_elements = self.specialize_all(&elements, context);
                if new_elements == elements {
                    ty
                } else {
                    self.array_constructor(&new_elements)
                }
            }
            TypeData::Procedural { kind, params, ret } => {
                let new_params = self.specialize_all(&params, context);
                let new_ret = self.specialize(ret, context);
                if new_params == params && new_ret == ret {
                    ty
                } else {
                    self.procedural(kind, &new_params, new_ret)
                }
            }
            // Type parameters are resolved before the cache; everything
            // else has no type parameter children.
            _ => ty,
        }
    }

    fn specialize_all(
        &mut self,
        types: &[Idx],
        context: &TypeSpecializationContext,
    ) -> Box<[Idx]> {
        types.iter().map(|&ty| self.specialize(ty, context)).collect()
    }

    fn specialize_struct(
        &mut self,
        ty: Idx,
        data: &StructData,
        context: &TypeSpecializationContext,
    ) -> Idx {
        let arguments = self.specialize_all(&data.type_args, context);
        if arguments == data.type_args {
            return ty;
        }
        match data.origin {
            None => self.specialized_struct_shell(ty, data, arguments),
            Some(origin) => {
                let rerouted =
                    TypeSpecializationContext::bind(self.type_parameters_of(origin), &arguments);
                self.specialize(origin, &rerouted)
            }
        }
    }

    /// Complete a freshly created specialization.
    fn do_after_specialization(&mut self, specialized: Idx) {
        if self.flags(specialized).contains(TypeFlags::IS_SPECIALIZED) {
            self.complete_specialization(specialized);
        }
    }

    /// Fill the pending scope of a specialized struct from its generic
    /// declaration. No-op when already completed (or being completed), or
    /// when the declaration itself is still a forward declaration.
    fn complete_specialization(&mut self, shell: Idx) {
        let Some(data) = self.struct_data(shell).cloned() else {
            return;
        };
        let Some(origin) = data.origin else {
            return;
        };
        if self.scope_by_id(data.scope).is_some() {
            return;
        }
        let Some(template) = self.scope(origin).cloned() else {
            debug!(shell = %self.image(shell), "generic declaration still pending");
            return;
        };

        // Members that refer back to the shell must not re-enter here.
        self.set_scope(data.scope, StructScope::new());

        let context =
            TypeSpecializationContext::bind(self.type_parameters_of(origin), &data.type_args);
        let ancestors = self.specialize_all(&template.ancestors, &context).into_vec();
        let fields = template
            .fields
            .iter()
            .map(|field| Field {
                ty: self.specialize(field.ty, &context),
                ..field.clone()
            })
            .collect();
        let routines = template
            .routines
            .iter()
            .map(|routine| self.specialize_invocable(routine, &context))
            .collect();

        self.set_scope(
            data.scope,
            StructScope {
                ancestors,
                fields,
                routines,
            },
        );
    }

    /// Supply the members of a forward-declared struct.
    ///
    /// Specializations created while the struct was pending are completed
    /// as well.
    pub fn complete_struct(&mut self, idx: Idx, scope: StructScope) {
        let Some(data) = self.struct_data(idx) else {
            debug!(ty = %self.image(idx), "complete_struct on a non-struct");
            return;
        };
        let scope_id = data.scope;
        self.set_scope(scope_id, scope);
        debug!(ty = %self.image(idx), "struct completed");

        for (_, specialized) in self.specializations_of(idx) {
            self.complete_specialization(specialized);
        }
    }
}

impl Invocable {
    /// This signature with `context` substituted into its parameter and
    /// return types. See [`TypeFactory::specialize_invocable`].
    #[must_use]
    pub fn specialize(
        &self,
        factory: &mut TypeFactory,
        context: &TypeSpecializationContext,
    ) -> Invocable {
        factory.specialize_invocable(self, context)
    }
}
