//! Type construction methods for `TypeFactory`.

use delint_ir::Name;

use crate::{
    AliasKind, ArrayKind, Constraint, Idx, ProceduralKind, StructData, StructKind, StructScope,
    TypeData, TypeError, TypeFactory,
};

impl TypeFactory {
    // === Pointers ===

    /// `^T` with pointer math disabled. `pointer(UNTYPED)` is `Pointer`.
    pub fn pointer(&mut self, target: Idx) -> Idx {
        self.intern_type(TypeData::Pointer {
            target,
            pointer_math: false,
        })
    }

    /// `^T` declared under `{$POINTERMATH ON}`.
    pub fn pointer_with_math(&mut self, target: Idx) -> Idx {
        self.intern_type(TypeData::Pointer {
            target,
            pointer_math: true,
        })
    }

    // === Containers ===

    /// `set of T`.
    pub fn set(&mut self, element: Idx) -> Idx {
        self.intern_type(TypeData::Set(element))
    }

    pub fn array(&mut self, element: Idx, kind: ArrayKind) -> Idx {
        self.intern_type(TypeData::Array { element, kind })
    }

    /// `array[0..length-1] of T`.
    pub fn fixed_array(&mut self, element: Idx, length: u32) -> Idx {
        self.array(element, ArrayKind::Fixed { length })
    }

    /// `array of T`.
    pub fn dynamic_array(&mut self, element: Idx) -> Idx {
        self.array(element, ArrayKind::Dynamic)
    }

    /// `array of T` in a parameter list.
    pub fn open_array(&mut self, element: Idx) -> Idx {
        self.array(element, ArrayKind::Open)
    }

    /// The type of a `[a, b, c]` literal.
    pub fn array_constructor(&mut self, elements: &[Idx]) -> Idx {
        self.intern_type(TypeData::ArrayConstructor(elements.into()))
    }

    /// `file of T`. `file_of(UNTYPED)` is the untyped `file`.
    pub fn file_of(&mut self, element: Idx) -> Idx {
        self.intern_type(TypeData::File(element))
    }

    // === Procedural types ===

    pub fn procedural(&mut self, kind: ProceduralKind, params: &[Idx], ret: Idx) -> Idx {
        self.intern_type(TypeData::Procedural {
            kind,
            params: params.into(),
            ret,
        })
    }

    /// `procedure(...)`.
    pub fn procedure(&mut self, params: &[Idx]) -> Idx {
        self.procedural(ProceduralKind::Procedure, params, Idx::VOID)
    }

    /// `function(...): T`.
    pub fn function(&mut self, params: &[Idx], ret: Idx) -> Idx {
        self.procedural(ProceduralKind::Procedure, params, ret)
    }

    /// `procedure(...) of object` / `function(...): T of object`.
    pub fn method_pointer(&mut self, params: &[Idx], ret: Idx) -> Idx {
        self.procedural(ProceduralKind::Method, params, ret)
    }

    /// `reference to procedure(...)` / `reference to function(...): T`.
    pub fn reference_to(&mut self, params: &[Idx], ret: Idx) -> Idx {
        self.procedural(ProceduralKind::Reference, params, ret)
    }

    /// `class of T`.
    pub fn class_reference(&mut self, class: Idx) -> Idx {
        self.intern_type(TypeData::ClassReference(class))
    }

    // === Nominal types ===

    /// `TName = (A, B, C)`.
    pub fn enumeration(&mut self, name: &str, elements: &[&str]) -> Idx {
        let name = self.intern(name);
        let elements = elements.iter().map(|e| self.intern(e)).collect();
        self.push(TypeData::Enumeration { name, elements })
    }

    /// `TName = low..high` over `host`.
    pub fn subrange(&mut self, name: &str, host: Idx) -> Idx {
        let name = self.intern(name);
        self.push(TypeData::Subrange { name, host })
    }

    /// A type parameter of a generic declaration.
    pub fn type_parameter(&mut self, name: &str, constraints: &[Constraint]) -> Idx {
        let name = self.intern(name);
        self.push(TypeData::TypeParameter {
            name,
            constraints: constraints.into(),
        })
    }

    /// Declare a struct whose members are not known yet (`TFoo = class;`).
    ///
    /// `type_params` is non-empty for generic declarations. Complete it with
    /// [`complete_struct`](Self::complete_struct).
    pub fn declare_struct(&mut self, name: &str, kind: StructKind, type_params: &[Idx]) -> Idx {
        let name = self.intern(name);
        let scope = self.new_scope(None);
        self.push(TypeData::Struct(StructData {
            name,
            kind,
            type_args: type_params.into(),
            origin: None,
            scope,
        }))
    }

    /// Declare a struct together with its members.
    pub fn define_struct(
        &mut self,
        name: &str,
        kind: StructKind,
        type_params: &[Idx],
        scope: StructScope,
    ) -> Idx {
        let idx = self.declare_struct(name, kind, type_params);
        self.complete_struct(idx, scope);
        idx
    }

    /// Create a struct shell for a specialization; the caller fills in its
    /// scope once the shell is cached.
    pub(crate) fn specialized_struct_shell(
        &mut self,
        origin: Idx,
        data: &StructData,
        type_args: Box<[Idx]>,
    ) -> Idx {
        let scope = self.new_scope(None);
        self.push(TypeData::Struct(StructData {
            name: data.name,
            kind: data.kind,
            type_args,
            origin: Some(origin),
            scope,
        }))
    }

    // === Aliases ===

    /// `TName = T` (`AliasKind::Weak`) or `TName = type T` (`AliasKind::Strong`).
    ///
    /// # Errors
    ///
    /// Fails for indices this factory did not create and for argument
    /// matchers, which are never the type of a value.
    pub fn try_alias(
        &mut self,
        kind: AliasKind,
        name: &str,
        aliased: Idx,
    ) -> Result<Idx, TypeError> {
        if !self.is_valid(aliased) || self.flags(aliased).is_matcher() {
            return Err(TypeError::UnaliasableType { aliased });
        }
        let name = self.intern(name);
        Ok(self.push(TypeData::Alias {
            kind,
            name,
            aliased,
        }))
    }

    /// `TName = T`.
    ///
    /// # Panics
    ///
    /// Panics if `aliased` cannot be aliased, see [`try_alias`](Self::try_alias).
    pub fn weak_alias(&mut self, name: &str, aliased: Idx) -> Idx {
        self.try_alias(AliasKind::Weak, name, aliased)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// `TName = type T`.
    ///
    /// # Panics
    ///
    /// Panics if `aliased` cannot be aliased, see [`try_alias`](Self::try_alias).
    pub fn strong_alias(&mut self, name: &str, aliased: Idx) -> Idx {
        self.try_alias(AliasKind::Strong, name, aliased)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    pub(crate) fn alias_of_kind(&mut self, kind: AliasKind, name: Name, aliased: Idx) -> Idx {
        self.push(TypeData::Alias {
            kind,
            name,
            aliased,
        })
    }

    // === Compiler-version dependent types ===

    /// What `string` means for the configured compiler version.
    pub fn string_type(&self) -> Idx {
        if self.config().compiler_version.has_unicode_strings() {
            Idx::UNICODESTRING
        } else {
            Idx::ANSISTRING
        }
    }

    /// What `Char` means for the configured compiler version.
    pub fn char_type(&self) -> Idx {
        if self.config().compiler_version.has_unicode_strings() {
            Idx::WIDECHAR
        } else {
            Idx::ANSICHAR
        }
    }

    /// What `PChar` means for the configured compiler version.
    pub fn pchar(&self) -> Idx {
        if self.config().compiler_version.has_unicode_strings() {
            self.well_known().pwidechar
        } else {
            self.well_known().pansichar
        }
    }
}
