//! The type factory: arena and constructor for every type of a session.
//!
//! # Layout
//!
//! - `entries[idx]` holds the `TypeData`, its pre-computed `TypeFlags`, and
//!   that type's own specialization cache
//! - `interned` deduplicates structural shapes so equal shapes share an `Idx`
//! - `scopes` holds struct members, separately from the struct's `TypeData`,
//!   so a struct can exist (and be cached) before its members are resolved
//!
//! Intrinsics occupy the fixed indices declared on [`Idx`] and are created
//! once per factory. Dropping the factory drops every type and every cache.

mod construct;
mod format;
mod query;

#[cfg(test)]
mod tests;

use delint_ir::{Name, NameKey, StringInterner};
use rustc_hash::FxHashMap;

use crate::{
    ArgumentMatcher, BooleanKind, CharKind, Field, Idx, IntegerKind, Invocable, Parameter,
    RealKind, RoutineKind, ScopeId, StringKind, StructScope, Tag, TypeFactoryConfig, TypeFlags,
    TypeData, TypeSpecializationContext, VariantKind,
};

pub(crate) use format::eq_ignore_case;

/// One arena slot.
#[derive(Debug)]
struct Entry {
    data: TypeData,
    flags: TypeFlags,
    /// Specializations of this type, keyed by context.
    specializations: FxHashMap<TypeSpecializationContext, Idx>,
}

/// Types every session needs beyond the intrinsics.
#[derive(Copy, Clone, Debug)]
pub struct WellKnown {
    /// `UTF8String`, a strong alias of `AnsiString`.
    pub utf8_string: Idx,
    /// `RawByteString`, a strong alias of `AnsiString`.
    pub raw_byte_string: Idx,
    /// `PAnsiChar`, with pointer math.
    pub pansichar: Idx,
    /// `PWideChar`, with pointer math.
    pub pwidechar: Idx,
}

/// Arena and constructor for every type of one analysis session.
///
/// Not thread-safe: the specialization caches are mutated through
/// `&mut self`. Analyze files in parallel with one factory per worker.
pub struct TypeFactory {
    config: TypeFactoryConfig,
    interner: StringInterner,
    entries: Vec<Entry>,
    interned: FxHashMap<TypeData, Idx>,
    /// `None` while a struct's members are pending.
    scopes: Vec<Option<StructScope>>,
    well_known: WellKnown,
}

/// Intrinsic types, in `Idx` order.
fn intrinsic_types() -> [TypeData; Idx::PRIMITIVE_COUNT as usize] {
    [
        TypeData::Unknown,
        TypeData::Untyped,
        TypeData::Void,
        TypeData::Integer(IntegerKind::ShortInt),
        TypeData::Integer(IntegerKind::SmallInt),
        TypeData::Integer(IntegerKind::Integer),
        TypeData::Integer(IntegerKind::Int64),
        TypeData::Integer(IntegerKind::Byte),
        TypeData::Integer(IntegerKind::Word),
        TypeData::Integer(IntegerKind::Cardinal),
        TypeData::Integer(IntegerKind::UInt64),
        TypeData::Integer(IntegerKind::NativeInt),
        TypeData::Integer(IntegerKind::NativeUInt),
        TypeData::Integer(IntegerKind::LongInt),
        TypeData::Integer(IntegerKind::LongWord),
        TypeData::Boolean(BooleanKind::Boolean),
        TypeData::Boolean(BooleanKind::ByteBool),
        TypeData::Boolean(BooleanKind::WordBool),
        TypeData::Boolean(BooleanKind::LongBool),
        TypeData::Char(CharKind::Ansi),
        TypeData::Char(CharKind::Wide),
        TypeData::Real(RealKind::Single),
        TypeData::Real(RealKind::Double),
        TypeData::Real(RealKind::Extended),
        TypeData::Real(RealKind::Real48),
        TypeData::Real(RealKind::Comp),
        TypeData::Real(RealKind::Currency),
        TypeData::String(StringKind::Short),
        TypeData::String(StringKind::Ansi),
        TypeData::String(StringKind::Wide),
        TypeData::String(StringKind::Unicode),
        TypeData::Variant(VariantKind::Variant),
        TypeData::Variant(VariantKind::OleVariant),
        TypeData::Pointer {
            target: Idx::UNTYPED,
            pointer_math: false,
        },
        TypeData::Pointer {
            target: Idx::VOID,
            pointer_math: false,
        },
        TypeData::File(Idx::UNTYPED),
        TypeData::Matcher(ArgumentMatcher::AnyOrdinal),
        TypeData::Matcher(ArgumentMatcher::AnySet),
        TypeData::Matcher(ArgumentMatcher::AnyDynamicArray),
        TypeData::Matcher(ArgumentMatcher::AnyTypedPointer),
        TypeData::Matcher(ArgumentMatcher::AnyClassReference),
        TypeData::Matcher(ArgumentMatcher::AnyObject),
        TypeData::Matcher(ArgumentMatcher::PointerMathOperand),
    ]
}

impl TypeFactory {
    /// Create a factory for the default target (Win32, Delphi 11).
    pub fn new() -> Self {
        Self::with_config(TypeFactoryConfig::default())
    }

    /// Create a factory for a specific target.
    pub fn with_config(config: TypeFactoryConfig) -> Self {
        let mut factory = Self {
            config,
            interner: StringInterner::new(),
            entries: Vec::with_capacity(256),
            interned: FxHashMap::default(),
            scopes: Vec::new(),
            well_known: WellKnown {
                utf8_string: Idx::NONE,
                raw_byte_string: Idx::NONE,
                pansichar: Idx::NONE,
                pwidechar: Idx::NONE,
            },
        };

        for data in intrinsic_types() {
            factory.intern_type(data);
        }
        debug_assert_eq!(factory.entries.len(), Idx::FIRST_DYNAMIC as usize);

        factory.well_known = WellKnown {
            utf8_string: factory.strong_alias("UTF8String", Idx::ANSISTRING),
            raw_byte_string: factory.strong_alias("RawByteString", Idx::ANSISTRING),
            pansichar: factory.pointer_with_math(Idx::ANSICHAR),
            pwidechar: factory.pointer_with_math(Idx::WIDECHAR),
        };

        factory
    }

    pub fn config(&self) -> &TypeFactoryConfig {
        &self.config
    }

    pub fn well_known(&self) -> &WellKnown {
        &self.well_known
    }

    // === Names ===

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Spelling of an interned name.
    pub fn lookup(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    /// Case-insensitive key of an interned name.
    pub fn key(&self, name: Name) -> NameKey {
        self.interner.key(name)
    }

    /// Case-insensitive key of a spelling.
    pub fn key_of(&mut self, s: &str) -> NameKey {
        self.interner.key_of(s)
    }

    /// Build a signature, interning its name.
    pub fn invocable(
        &mut self,
        name: &str,
        kind: RoutineKind,
        parameters: &[Idx],
        return_type: Idx,
    ) -> Invocable {
        let name = self.intern(name);
        let invocable = Invocable::new(
            name,
            self.key(name),
            kind,
            parameters.iter().copied().map(Parameter::of).collect(),
            return_type,
        );
        self.with_weak_aliases_stripped(invocable)
    }

    /// Make `invocable` compare equal to signatures that spell its types
    /// through weak aliases.
    pub(crate) fn with_weak_aliases_stripped(&self, invocable: Invocable) -> Invocable {
        let identity = invocable
            .parameter_types()
            .chain([invocable.return_type()])
            .map(|ty| self.strip_weak_aliases(ty))
            .collect();
        invocable.with_identity(identity)
    }

    /// Build a struct field, interning its name.
    pub fn field(&mut self, name: &str, ty: Idx) -> Field {
        let name = self.intern(name);
        Field {
            name,
            key: self.key(name),
            ty,
        }
    }

    // === Arena ===

    /// Number of types in the factory, intrinsics included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: intrinsics are created with the factory.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `idx` was created by this factory.
    pub fn is_valid(&self, idx: Idx) -> bool {
        idx.index() < self.entries.len()
    }

    /// The data stored for `idx`, without looking through aliases.
    ///
    /// Indices not created by this factory read as `Unknown`.
    pub fn data(&self, idx: Idx) -> &TypeData {
        static UNKNOWN: TypeData = TypeData::Unknown;
        self.entries.get(idx.index()).map_or(&UNKNOWN, |e| &e.data)
    }

    /// The tag of `idx`, without looking through aliases.
    pub fn tag(&self, idx: Idx) -> Tag {
        self.data(idx).tag()
    }

    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.entries
            .get(idx.index())
            .map_or(TypeFlags::HAS_UNKNOWN, |e| e.flags)
    }

    /// Store a nominal type: always a fresh index.
    fn push(&mut self, data: TypeData) -> Idx {
        let flags = TypeFlags::compute(&data, |child| self.flags(child));
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a session never holds u32::MAX types"
        )]
        let idx = Idx::from_raw(self.entries.len() as u32);
        self.entries.push(Entry {
            data,
            flags,
            specializations: FxHashMap::default(),
        });
        idx
    }

    /// Store a structural type: equal shapes share one index.
    fn intern_type(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.interned.get(&data) {
            return idx;
        }
        let idx = self.push(data.clone());
        self.interned.insert(data, idx);
        idx
    }

    // === Scopes ===

    #[expect(
        clippy::cast_possible_truncation,
        reason = "a session never holds u32::MAX scopes"
    )]
    fn new_scope(&mut self, scope: Option<StructScope>) -> ScopeId {
        let id = ScopeId::from_raw(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }

    pub(crate) fn set_scope(&mut self, id: ScopeId, scope: StructScope) {
        self.scopes[id.index()] = Some(scope);
    }

    pub(crate) fn scope_by_id(&self, id: ScopeId) -> Option<&StructScope> {
        self.scopes.get(id.index()).and_then(Option::as_ref)
    }

    // === Specialization caches ===

    pub(crate) fn cached_specialization(
        &self,
        idx: Idx,
        context: &TypeSpecializationContext,
    ) -> Option<Idx> {
        self.entries
            .get(idx.index())
            .and_then(|e| e.specializations.get(context).copied())
    }

    pub(crate) fn cache_specialization(
        &mut self,
        idx: Idx,
        context: TypeSpecializationContext,
        specialized: Idx,
    ) {
        if let Some(entry) = self.entries.get_mut(idx.index()) {
            entry.specializations.insert(context, specialized);
        }
    }

    /// Number of cached specializations of `idx`.
    pub fn specialization_count(&self, idx: Idx) -> usize {
        self.entries
            .get(idx.index())
            .map_or(0, |e| e.specializations.len())
    }

    /// Cached specializations of `idx`, with their contexts.
    pub(crate) fn specializations_of(&self, idx: Idx) -> Vec<(TypeSpecializationContext, Idx)> {
        self.entries.get(idx.index()).map_or_else(Vec::new, |e| {
            e.specializations
                .iter()
                .map(|(ctx, &ty)| (ctx.clone(), ty))
                .collect()
        })
    }
}

impl Default for TypeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeFactory")
            .field("config", &self.config)
            .field("types", &self.entries.len())
            .field("scopes", &self.scopes.len())
            .finish_non_exhaustive()
    }
}
