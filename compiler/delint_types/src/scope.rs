//! Struct member scopes.
//!
//! A struct's ancestors, fields and routines are kept apart from its
//! `TypeData` in a scope table owned by the factory. Forward declarations
//! (`TFoo = class;`) get a pending slot that is completed later, and
//! specializations get a pending slot that is completed right after their
//! shell has been cached.

use delint_ir::{Name, NameKey};

use crate::{Idx, Invocable, RoutineKind};

/// Index into the factory's scope table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A field of a struct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Name,
    pub key: NameKey,
    pub ty: Idx,
}

/// Members of a struct type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructScope {
    /// Parent class first (if any), then implemented interfaces.
    pub ancestors: Vec<Idx>,
    pub fields: Vec<Field>,
    pub routines: Vec<Invocable>,
}

impl StructScope {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ancestor(mut self, ancestor: Idx) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_routine(mut self, routine: Invocable) -> Self {
        self.routines.push(routine);
        self
    }

    /// Find a field by case-insensitive key.
    pub fn field(&self, key: NameKey) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// All routines whose name matches `key`.
    pub fn routines_named(&self, key: NameKey) -> impl Iterator<Item = &Invocable> {
        self.routines.iter().filter(move |r| r.key() == key)
    }

    /// Operator methods (`class operator`) whose name is one of `keys`.
    pub fn operators<'a>(&'a self, keys: &'a [NameKey]) -> impl Iterator<Item = &'a Invocable> {
        self.routines
            .iter()
            .filter(move |r| r.kind() == RoutineKind::Operator && keys.contains(&r.key()))
    }
}
