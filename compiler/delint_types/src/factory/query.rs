//! Structural queries for `TypeFactory`.
//!
//! Every predicate looks through aliases of both kinds: a strong alias is
//! its own type for identity, but it is still an integer, a set, a class.
//! Only [`TypeFactory::is`] and the naming methods treat aliases specially.

use crate::{
    AliasKind, ArrayKind, BooleanKind, CharKind, Idx, IntegerKind, ProceduralKind, RealKind,
    StringKind, StructData, StructKind, StructScope, Tag, TypeData, TypeFactory, VariantKind,
};

use super::eq_ignore_case;

impl TypeFactory {
    // === Alias delegation ===

    /// Follow aliases of both kinds down to the type they denote.
    pub fn resolve_alias(&self, mut idx: Idx) -> Idx {
        while let TypeData::Alias { aliased, .. } = self.data(idx) {
            idx = *aliased;
        }
        idx
    }

    /// Follow weak aliases only. Strong aliases stop the walk.
    pub fn strip_weak_aliases(&self, mut idx: Idx) -> Idx {
        while let TypeData::Alias {
            kind: AliasKind::Weak,
            aliased,
            ..
        } = self.data(idx)
        {
            idx = *aliased;
        }
        idx
    }

    /// The data of the type `idx` denotes, with all aliases removed.
    pub fn structural(&self, idx: Idx) -> &TypeData {
        self.data(self.resolve_alias(idx))
    }

    /// The tag of the type `idx` denotes, with all aliases removed.
    pub fn structural_tag(&self, idx: Idx) -> Tag {
        self.structural(idx).tag()
    }

    /// The aliased type, for an alias.
    pub fn aliased_type(&self, idx: Idx) -> Option<Idx> {
        match self.data(idx) {
            TypeData::Alias { aliased, .. } => Some(*aliased),
            _ => None,
        }
    }

    pub fn is_alias(&self, idx: Idx) -> bool {
        self.tag(idx) == Tag::Alias
    }

    pub fn is_weak_alias(&self, idx: Idx) -> bool {
        matches!(
            self.data(idx),
            TypeData::Alias {
                kind: AliasKind::Weak,
                ..
            }
        )
    }

    pub fn is_strong_alias(&self, idx: Idx) -> bool {
        matches!(
            self.data(idx),
            TypeData::Alias {
                kind: AliasKind::Strong,
                ..
            }
        )
    }

    // === Identity ===

    /// Type identity.
    ///
    /// Weak aliases are transparent and strong aliases are distinct types.
    /// Nominal types are identical only to themselves; structural shapes
    /// compare component-wise.
    pub fn is(&self, a: Idx, b: Idx) -> bool {
        let a = self.strip_weak_aliases(a);
        let b = self.strip_weak_aliases(b);
        if a == b {
            return true;
        }
        match (self.data(a), self.data(b)) {
            (TypeData::Pointer { target: x, .. }, TypeData::Pointer { target: y, .. })
            | (TypeData::Set(x), TypeData::Set(y))
            | (TypeData::File(x), TypeData::File(y))
            | (TypeData::ClassReference(x), TypeData::ClassReference(y)) => self.is(*x, *y),
            (
                TypeData::Array {
                    element: x,
                    kind: kx,
                },
                TypeData::Array {
                    element: y,
                    kind: ky,
                },
            ) => kx == ky && self.is(*x, *y),
            (TypeData::ArrayConstructor(xs), TypeData::ArrayConstructor(ys)) => {
                self.all_same(xs, ys)
            }
            (
                TypeData::Procedural {
                    kind: kx,
                    params: px,
                    ret: rx,
                },
                TypeData::Procedural {
                    kind: ky,
                    params: py,
                    ret: ry,
                },
            ) => kx == ky && self.is(*rx, *ry) && self.all_same(px, py),
            _ => false,
        }
    }

    fn all_same(&self, xs: &[Idx], ys: &[Idx]) -> bool {
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.is(*x, *y))
    }

    /// Case-insensitive comparison of a type against a display name.
    ///
    /// Matches the type's [`image`](Self::image), or the alias's own name for
    /// aliases.
    pub fn is_named(&self, idx: Idx, name: &str) -> bool {
        if eq_ignore_case(&self.image(idx), name) {
            return true;
        }
        match self.data(idx) {
            TypeData::Alias { name: own, .. } => eq_ignore_case(self.lookup(*own), name),
            _ => false,
        }
    }

    // === Predicates ===

    pub fn is_unknown(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Unknown
    }

    pub fn is_untyped(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Untyped
    }

    pub fn is_void(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Void
    }

    pub fn is_integer(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Integer
    }

    pub fn is_boolean(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Boolean
    }

    pub fn is_char(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Char
    }

    pub fn is_real(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Real
    }

    /// Integer or real.
    pub fn is_numeric(&self, idx: Idx) -> bool {
        matches!(self.structural_tag(idx), Tag::Integer | Tag::Real)
    }

    pub fn is_string(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::String
    }

    /// String or character: anything that concatenates to a string.
    pub fn is_text(&self, idx: Idx) -> bool {
        matches!(self.structural_tag(idx), Tag::String | Tag::Char)
    }

    pub fn is_variant(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Variant
    }

    /// Integer, boolean, character, enumeration or subrange.
    pub fn is_ordinal(&self, idx: Idx) -> bool {
        self.structural_tag(idx).is_ordinal()
    }

    pub fn is_enumeration(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Enumeration
    }

    pub fn is_subrange(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Subrange
    }

    pub fn is_file(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::File
    }

    pub fn is_set(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Set
    }

    pub fn is_array(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Array
    }

    pub fn is_fixed_array(&self, idx: Idx) -> bool {
        matches!(self.array_kind(idx), Some(ArrayKind::Fixed { .. }))
    }

    pub fn is_dynamic_array(&self, idx: Idx) -> bool {
        self.array_kind(idx) == Some(ArrayKind::Dynamic)
    }

    pub fn is_open_array(&self, idx: Idx) -> bool {
        self.array_kind(idx) == Some(ArrayKind::Open)
    }

    pub fn is_array_constructor(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::ArrayConstructor
    }

    pub fn is_procedural(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Procedural
    }

    pub fn is_method_pointer(&self, idx: Idx) -> bool {
        self.procedural_kind(idx) == Some(ProceduralKind::Method)
    }

    pub fn is_class_reference(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::ClassReference
    }

    pub fn is_type_parameter(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::TypeParameter
    }

    pub fn is_matcher(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Matcher
    }

    pub fn is_pointer(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Pointer
    }

    /// The untyped `Pointer`.
    pub fn is_untyped_pointer(&self, idx: Idx) -> bool {
        self.resolve_alias(idx) == Idx::POINTER
    }

    /// The type of `nil`.
    pub fn is_nil_pointer(&self, idx: Idx) -> bool {
        self.resolve_alias(idx) == Idx::NIL
    }

    /// Whether pointer arithmetic is enabled on this pointer type.
    pub fn allows_pointer_math(&self, idx: Idx) -> bool {
        matches!(
            self.structural(idx),
            TypeData::Pointer {
                pointer_math: true,
                ..
            }
        )
    }

    pub fn is_struct(&self, idx: Idx) -> bool {
        self.structural_tag(idx) == Tag::Struct
    }

    pub fn is_class(&self, idx: Idx) -> bool {
        self.struct_kind(idx) == Some(StructKind::Class)
    }

    pub fn is_record(&self, idx: Idx) -> bool {
        self.struct_kind(idx) == Some(StructKind::Record)
    }

    pub fn is_interface(&self, idx: Idx) -> bool {
        self.struct_kind(idx) == Some(StructKind::Interface)
    }

    /// Whether `idx` is a generic struct declaration (not a specialization).
    pub fn is_generic_declaration(&self, idx: Idx) -> bool {
        self.struct_data(idx)
            .is_some_and(|s| s.origin.is_none() && !s.type_args.is_empty())
    }

    // === Kinds and components ===

    pub fn integer_kind(&self, idx: Idx) -> Option<IntegerKind> {
        match self.structural(idx) {
            TypeData::Integer(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn boolean_kind(&self, idx: Idx) -> Option<BooleanKind> {
        match self.structural(idx) {
            TypeData::Boolean(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn char_kind(&self, idx: Idx) -> Option<CharKind> {
        match self.structural(idx) {
            TypeData::Char(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn real_kind(&self, idx: Idx) -> Option<RealKind> {
        match self.structural(idx) {
            TypeData::Real(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn string_kind(&self, idx: Idx) -> Option<StringKind> {
        match self.structural(idx) {
            TypeData::String(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn variant_kind(&self, idx: Idx) -> Option<VariantKind> {
        match self.structural(idx) {
            TypeData::Variant(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn array_kind(&self, idx: Idx) -> Option<ArrayKind> {
        match self.structural(idx) {
            TypeData::Array { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn procedural_kind(&self, idx: Idx) -> Option<ProceduralKind> {
        match self.structural(idx) {
            TypeData::Procedural { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn struct_kind(&self, idx: Idx) -> Option<StructKind> {
        self.struct_data(idx).map(|s| s.kind)
    }

    pub fn struct_data(&self, idx: Idx) -> Option<&StructData> {
        match self.structural(idx) {
            TypeData::Struct(data) => Some(data),
            _ => None,
        }
    }

    /// Element type of a set, array or typed file.
    pub fn element_type(&self, idx: Idx) -> Option<Idx> {
        match self.structural(idx) {
            TypeData::Set(element) | TypeData::Array { element, .. } => Some(*element),
            TypeData::File(element) if *element != Idx::UNTYPED => Some(*element),
            _ => None,
        }
    }

    /// Candidate element types of an array constructor.
    pub fn array_constructor_elements(&self, idx: Idx) -> &[Idx] {
        match self.structural(idx) {
            TypeData::ArrayConstructor(elements) => elements,
            _ => &[],
        }
    }

    /// Dereferenced type of a pointer.
    pub fn pointer_target(&self, idx: Idx) -> Option<Idx> {
        match self.structural(idx) {
            TypeData::Pointer { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Class of a class reference.
    pub fn class_reference_target(&self, idx: Idx) -> Option<Idx> {
        match self.structural(idx) {
            TypeData::ClassReference(class) => Some(*class),
            _ => None,
        }
    }

    /// Host type of a subrange.
    pub fn subrange_host(&self, idx: Idx) -> Option<Idx> {
        match self.structural(idx) {
            TypeData::Subrange { host, .. } => Some(*host),
            _ => None,
        }
    }

    /// Number of elements of an enumeration.
    pub fn enumeration_len(&self, idx: Idx) -> Option<usize> {
        match self.structural(idx) {
            TypeData::Enumeration { elements, .. } => Some(elements.len()),
            _ => None,
        }
    }

    /// Parameter and return types of a procedural type.
    pub fn procedural_signature(&self, idx: Idx) -> Option<(&[Idx], Idx)> {
        match self.structural(idx) {
            TypeData::Procedural { params, ret, .. } => Some((params, *ret)),
            _ => None,
        }
    }

    // === Struct members ===

    /// Members of a struct, or `None` for non-structs and pending scopes.
    pub fn scope(&self, idx: Idx) -> Option<&StructScope> {
        self.struct_data(idx)
            .and_then(|data| self.scope_by_id(data.scope))
    }

    /// Whether a struct's members are still unknown.
    pub fn is_pending(&self, idx: Idx) -> bool {
        self.struct_data(idx)
            .is_some_and(|data| self.scope_by_id(data.scope).is_none())
    }

    /// Direct ancestors of a struct: parent first, then interfaces.
    pub fn ancestors(&self, idx: Idx) -> &[Idx] {
        self.scope(idx).map_or(&[], |s| s.ancestors.as_slice())
    }

    /// Whether `idx` is, descends from, or implements `ancestor`.
    pub fn descends_from(&self, idx: Idx, ancestor: Idx) -> bool {
        let mut seen = Vec::new();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if self.is(current, ancestor) {
                return true;
            }
            let current = self.resolve_alias(current);
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            stack.extend(self.ancestors(current).iter().rev());
        }
        false
    }

    /// `idx` and its ancestors, breadth-first, each struct once.
    pub fn self_and_ancestors(&self, idx: Idx) -> Vec<Idx> {
        let mut result = vec![self.resolve_alias(idx)];
        let mut next = 0;
        while next < result.len() {
            for &ancestor in self.ancestors(result[next]) {
                let ancestor = self.resolve_alias(ancestor);
                if !result.contains(&ancestor) {
                    result.push(ancestor);
                }
            }
            next += 1;
        }
        result
    }

    // === Size ===

    /// Size in bytes of a value of this type on the configured target.
    ///
    /// Types without a storage size (`Unknown`, `Void`, type parameters,
    /// matchers) are 0.
    pub fn size(&self, idx: Idx) -> u32 {
        let toolchain = self.config().toolchain;
        let pointer = toolchain.pointer_size();
        match self.structural(idx) {
            TypeData::Unknown
            | TypeData::Untyped
            | TypeData::Void
            | TypeData::TypeParameter { .. }
            | TypeData::Matcher(_)
            | TypeData::ArrayConstructor(_)
            | TypeData::File(_) => 0,
            TypeData::Integer(kind) => match kind {
                IntegerKind::ShortInt | IntegerKind::Byte => 1,
                IntegerKind::SmallInt | IntegerKind::Word => 2,
                IntegerKind::Integer | IntegerKind::Cardinal => 4,
                IntegerKind::Int64 | IntegerKind::UInt64 => 8,
                IntegerKind::NativeInt | IntegerKind::NativeUInt => pointer,
                IntegerKind::LongInt | IntegerKind::LongWord => toolchain.long_size(),
            },
            TypeData::Boolean(kind) => match kind {
                BooleanKind::Boolean | BooleanKind::ByteBool => 1,
                BooleanKind::WordBool => 2,
                BooleanKind::LongBool => 4,
            },
            TypeData::Char(CharKind::Ansi) => 1,
            TypeData::Char(CharKind::Wide) => 2,
            TypeData::Real(kind) => match kind {
                RealKind::Single => 4,
                RealKind::Double | RealKind::Comp | RealKind::Currency => 8,
                RealKind::Extended => toolchain.extended_size(),
                RealKind::Real48 => 6,
            },
            TypeData::String(StringKind::Short) => 256,
            TypeData::String(_) | TypeData::Pointer { .. } | TypeData::ClassReference(_) => {
                pointer
            }
            TypeData::Variant(_) => toolchain.variant_size(),
            TypeData::Set(element) => self.set_size(*element),
            TypeData::Array { element, kind } => match kind {
                ArrayKind::Fixed { length } => self.size(*element).saturating_mul(*length),
                ArrayKind::Dynamic | ArrayKind::Open => pointer,
            },
            TypeData::Procedural { kind, .. } => match kind {
                ProceduralKind::Method => pointer * 2,
                ProceduralKind::Procedure | ProceduralKind::Reference => pointer,
            },
            TypeData::Enumeration { elements, .. } => match elements.len() {
                0..=256 => 1,
                257..=65536 => 2,
                _ => 4,
            },
            TypeData::Subrange { host, .. } => self.size(*host),
            TypeData::Struct(data) => match data.kind {
                StructKind::Class | StructKind::Interface => pointer,
                StructKind::ClassHelper | StructKind::RecordHelper => 0,
                StructKind::Record | StructKind::Object => {
                    self.scope_by_id(data.scope).map_or(0, |scope| {
                        scope
                            .fields
                            .iter()
                            .fold(0u32, |total, f| total.saturating_add(self.size(f.ty)))
                    })
                }
            },
            // Resolved above.
            TypeData::Alias { .. } => 0,
        }
    }

    /// Storage of `set of element`: one bit per ordinal value.
    fn set_size(&self, element: Idx) -> u32 {
        let bits = match self.structural(element) {
            TypeData::Enumeration { elements, .. } => elements.len(),
            TypeData::Subrange { host, .. } => return self.set_size(*host),
            _ => 256,
        };
        #[expect(
            clippy::cast_possible_truncation,
            reason = "enumerations are far below u32::MAX elements"
        )]
        let bytes = bits.div_ceil(8).clamp(1, 32) as u32;
        match bytes {
            3 => 4,
            n => n,
        }
    }

    /// The largest of `types` by size, first on ties.
    pub fn largest(&self, types: &[Idx]) -> Option<Idx> {
        types
            .iter()
            .copied()
            .reduce(|best, ty| if self.size(ty) > self.size(best) { ty } else { best })
    }
}
