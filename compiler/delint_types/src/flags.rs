//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once when a type enters the factory, so the
//! specialization engine can skip types that mention no type parameter
//! without walking them.

use bitflags::bitflags;

use crate::{Tag, TypeData};

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence Flags (bits 0-7) ===

        /// Mentions a type parameter somewhere in its shape.
        const HAS_TYPE_PARAM = 1 << 0;
        /// Mentions the Unknown type.
        const HAS_UNKNOWN = 1 << 1;

        // === Category Flags (bits 8-15) ===

        /// Pre-interned compiler intrinsic.
        const IS_INTRINSIC = 1 << 8;
        /// Hash-consed by shape.
        const IS_STRUCTURAL = 1 << 9;
        /// One type per declaration.
        const IS_NOMINAL = 1 << 10;
        /// Argument matcher meta-type.
        const IS_MATCHER = 1 << 11;
        /// Generic struct declaration (has its own type parameters).
        const IS_GENERIC_DECL = 1 << 12;
        /// Produced by specializing a generic declaration.
        const IS_SPECIALIZED = 1 << 13;
    }
}

impl TypeFlags {
    /// Flags inherited by a type from all of its children.
    pub const PROPAGATE_MASK: Self =
        Self::from_bits_truncate(Self::HAS_TYPE_PARAM.bits() | Self::HAS_UNKNOWN.bits());

    /// Compute the flags of `data`, given a way to read the flags of its
    /// children.
    pub(crate) fn compute(data: &TypeData, child_flags: impl Fn(crate::Idx) -> Self) -> Self {
        let tag = data.tag();
        let mut flags = match tag {
            Tag::Unknown => Self::IS_INTRINSIC | Self::HAS_UNKNOWN,
            Tag::Matcher => Self::IS_MATCHER,
            t if t.is_scalar() => Self::IS_INTRINSIC,
            t if t.is_structural() => Self::IS_STRUCTURAL,
            _ => Self::IS_NOMINAL,
        };

        for child in data.children() {
            flags |= child_flags(child) & Self::PROPAGATE_MASK;
        }

        match data {
            TypeData::TypeParameter { .. } => {
                // Constraints are checked, never substituted.
                flags.remove(Self::PROPAGATE_MASK);
                flags |= Self::HAS_TYPE_PARAM;
            }
            TypeData::Struct(data) => {
                if data.origin.is_some() {
                    flags |= Self::IS_SPECIALIZED;
                } else if !data.type_args.is_empty() {
                    flags |= Self::IS_GENERIC_DECL;
                }
            }
            _ => {}
        }

        flags
    }

    /// Whether a specialization context could change this type.
    #[inline]
    pub const fn needs_specialization(self) -> bool {
        self.contains(Self::HAS_TYPE_PARAM)
    }

    /// Check if the type is a compiler intrinsic.
    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.contains(Self::IS_INTRINSIC)
    }

    /// Check if the type is an argument matcher.
    #[inline]
    pub const fn is_matcher(self) -> bool {
        self.contains(Self::IS_MATCHER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Idx, ProceduralKind};
    use delint_ir::Name;

    fn no_children(_: Idx) -> TypeFlags {
        TypeFlags::empty()
    }

    #[test]
    fn intrinsics_are_flagged() {
        let flags = TypeFlags::compute(&TypeData::Untyped, no_children);
        assert!(flags.is_intrinsic());
        assert!(!flags.needs_specialization());
    }

    #[test]
    fn type_parameter_needs_specialization() {
        let data = TypeData::TypeParameter {
            name: Name::EMPTY,
            constraints: Box::new([]),
        };
        let flags = TypeFlags::compute(&data, no_children);
        assert!(flags.needs_specialization());
        assert!(flags.contains(TypeFlags::IS_NOMINAL));
    }

    #[test]
    fn presence_propagates_from_children() {
        let data = TypeData::Procedural {
            kind: ProceduralKind::Procedure,
            params: Box::new([Idx::from_raw(100)]),
            ret: Idx::VOID,
        };
        let flags = TypeFlags::compute(&data, |child| {
            if child == Idx::from_raw(100) {
                TypeFlags::HAS_TYPE_PARAM | TypeFlags::IS_NOMINAL
            } else {
                TypeFlags::IS_INTRINSIC
            }
        });
        assert!(flags.needs_specialization());
        assert!(flags.contains(TypeFlags::IS_STRUCTURAL));
        // Category flags do not propagate.
        assert!(!flags.contains(TypeFlags::IS_NOMINAL));
        assert!(!flags.is_intrinsic());
    }

    #[test]
    fn matcher_is_not_intrinsic() {
        let data = TypeData::Matcher(crate::ArgumentMatcher::AnySet);
        let flags = TypeFlags::compute(&data, no_children);
        assert!(flags.is_matcher());
        assert!(!flags.is_intrinsic());
    }
}
