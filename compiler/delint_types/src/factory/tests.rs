use pretty_assertions::assert_eq;

use super::*;
use crate::{AliasKind, CompilerVersion, RoutineKind, StructKind, Toolchain, TypeError};

fn factory_for(toolchain: Toolchain) -> TypeFactory {
    TypeFactory::with_config(TypeFactoryConfig::new(toolchain, CompilerVersion::VER350))
}

// === Arena ===

#[test]
fn intrinsics_sit_at_fixed_indices() {
    let factory = TypeFactory::new();
    assert_eq!(factory.tag(Idx::INTEGER), Tag::Integer);
    assert_eq!(factory.tag(Idx::UNICODESTRING), Tag::String);
    assert_eq!(factory.tag(Idx::ANY_SET), Tag::Matcher);
    assert_eq!(factory.pointer_target(Idx::POINTER), Some(Idx::UNTYPED));
    assert_eq!(factory.pointer_target(Idx::NIL), Some(Idx::VOID));
    assert!(factory.flags(Idx::BOOLEAN).is_intrinsic());
    assert!(factory.flags(Idx::ANY_ORDINAL).is_matcher());
}

#[test]
fn structural_types_are_hash_consed() {
    let mut factory = TypeFactory::new();
    let a = factory.dynamic_array(Idx::INTEGER);
    let b = factory.dynamic_array(Idx::INTEGER);
    let c = factory.open_array(Idx::INTEGER);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(factory.pointer(Idx::UNTYPED), Idx::POINTER);
    assert_eq!(factory.file_of(Idx::UNTYPED), Idx::FILE);
}

#[test]
fn nominal_types_are_fresh_per_declaration() {
    let mut factory = TypeFactory::new();
    let a = factory.enumeration("TColor", &["Red"]);
    let b = factory.enumeration("TColor", &["Red"]);
    assert_ne!(a, b);
    assert!(!factory.is(a, b));
}

#[test]
fn out_of_range_reads_as_unknown() {
    let factory = TypeFactory::new();
    let bogus = Idx::from_raw(1_000_000);
    assert!(!factory.is_valid(bogus));
    assert_eq!(factory.data(bogus), &TypeData::Unknown);
    assert!(factory.is_unknown(Idx::NONE));
    assert_eq!(factory.size(bogus), 0);
}

// === Aliases ===

#[test]
fn weak_alias_is_transparent() {
    let mut factory = TypeFactory::new();
    let alias = factory.weak_alias("TCount", Idx::INTEGER);
    assert!(factory.is(alias, Idx::INTEGER));
    assert!(factory.is(Idx::INTEGER, alias));
    assert_eq!(factory.image(alias), "Integer");
    assert!(factory.is_named(alias, "integer"));
    assert!(factory.is_named(alias, "TCOUNT"));
    assert!(factory.is_integer(alias));
    assert_eq!(factory.size(alias), 4);
}

#[test]
fn strong_alias_is_opaque_but_delegates_predicates() {
    let mut factory = TypeFactory::new();
    let alias = factory.strong_alias("TIndex", Idx::INTEGER);
    assert!(!factory.is(alias, Idx::INTEGER));
    assert!(factory.is(alias, alias));
    assert_eq!(factory.image(alias), "TIndex");
    assert_eq!(factory.alias_image(alias).as_deref(), Some("TIndex"));
    assert!(factory.is_named(alias, "tindex"));
    assert!(factory.is_integer(alias));
    assert!(factory.is_ordinal(alias));
    assert_eq!(factory.size(alias), 4);
    assert_eq!(factory.integer_kind(alias), Some(IntegerKind::Integer));
}

#[test]
fn weak_alias_of_strong_alias_keeps_strong_identity() {
    let mut factory = TypeFactory::new();
    let strong = factory.strong_alias("TIndex", Idx::INTEGER);
    let weak = factory.weak_alias("TPos", strong);
    assert!(factory.is(weak, strong));
    assert!(!factory.is(weak, Idx::INTEGER));
    assert_eq!(factory.image(weak), "TIndex");
}

#[test]
fn aliasing_a_matcher_or_foreign_index_fails() {
    let mut factory = TypeFactory::new();
    assert_eq!(
        factory.try_alias(AliasKind::Weak, "X", Idx::ANY_SET),
        Err(TypeError::UnaliasableType {
            aliased: Idx::ANY_SET
        })
    );
    assert!(factory.try_alias(AliasKind::Strong, "X", Idx::NONE).is_err());
}

#[test]
#[should_panic(expected = "cannot alias")]
fn weak_alias_panics_on_contract_violation() {
    let mut factory = TypeFactory::new();
    factory.weak_alias("X", Idx::from_raw(9999));
}

#[test]
fn well_known_string_aliases_are_strong() {
    let factory = TypeFactory::new();
    let utf8 = factory.well_known().utf8_string;
    assert!(factory.is_string(utf8));
    assert!(!factory.is(utf8, Idx::ANSISTRING));
    assert_eq!(factory.image(utf8), "UTF8String");
}

// === Identity ===

#[test]
fn structural_identity_looks_through_weak_aliases() {
    let mut factory = TypeFactory::new();
    let alias = factory.weak_alias("TCount", Idx::INTEGER);
    let via_alias = factory.dynamic_array(alias);
    let direct = factory.dynamic_array(Idx::INTEGER);
    assert_ne!(via_alias, direct);
    assert!(factory.is(via_alias, direct));

    let strong = factory.strong_alias("TIndex", Idx::INTEGER);
    let via_strong = factory.dynamic_array(strong);
    assert!(!factory.is(via_strong, direct));
}

#[test]
fn signatures_compare_through_weak_aliases() {
    let mut factory = TypeFactory::new();
    let my_int = factory.weak_alias("TMyInt", Idx::INTEGER);
    let strong = factory.strong_alias("TIndex", Idx::INTEGER);
    let direct = factory.invocable("Add", RoutineKind::Operator, &[Idx::INTEGER; 2], Idx::INTEGER);
    let via_alias = factory.invocable("Add", RoutineKind::Operator, &[my_int; 2], my_int);
    let via_strong = factory.invocable("Add", RoutineKind::Operator, &[strong; 2], strong);

    assert_eq!(via_alias, direct);
    assert_eq!(via_alias.return_type(), my_int);
    assert_ne!(via_strong, direct);
}

#[test]
fn pointer_and_nil_are_distinct() {
    let factory = TypeFactory::new();
    assert!(!factory.is(Idx::POINTER, Idx::NIL));
    assert!(factory.is_untyped_pointer(Idx::POINTER));
    assert!(factory.is_nil_pointer(Idx::NIL));
}

// === Images ===

#[test]
fn images_use_delphi_syntax() {
    let mut factory = TypeFactory::new();
    let node = factory.declare_struct("TNode", StructKind::Record, &[]);
    let pnode = factory.pointer(node);
    let fixed = factory.fixed_array(Idx::ANSICHAR, 16);
    let callback = factory.method_pointer(&[Idx::INTEGER, Idx::BOOLEAN], Idx::VOID);
    let getter = factory.reference_to(&[], Idx::UNICODESTRING);
    let set = factory.set(Idx::BYTE);
    let ctor = factory.array_constructor(&[Idx::INTEGER, Idx::ANSICHAR]);

    assert_eq!(factory.image(pnode), "^TNode");
    assert_eq!(factory.image(fixed), "array[0..15] of AnsiChar");
    assert_eq!(
        factory.image(callback),
        "procedure(Integer; Boolean) of object"
    );
    assert_eq!(factory.image(getter), "reference to function: UnicodeString");
    assert_eq!(factory.image(set), "set of Byte");
    assert_eq!(factory.image(ctor), "[Integer, AnsiChar]");
}

#[test]
fn generic_struct_image_lists_arguments() {
    let mut factory = TypeFactory::new();
    let t = factory.type_parameter("T", &[]);
    let list = factory.declare_struct("TList", StructKind::Class, &[t]);
    assert_eq!(factory.image(list), "TList<T>");
    assert!(factory.is_named(list, "tlist<t>"));
}

#[test]
fn non_ascii_names_compare_case_insensitively() {
    assert!(eq_ignore_case("TÜbung", "tübung"));
    assert!(!eq_ignore_case("TÜbung", "tubung"));
}

// === Sizes ===

#[test]
fn intrinsic_sizes_on_win32() {
    let factory = factory_for(Toolchain::Dcc32);
    assert_eq!(factory.size(Idx::SHORTINT), 1);
    assert_eq!(factory.size(Idx::SMALLINT), 2);
    assert_eq!(factory.size(Idx::INTEGER), 4);
    assert_eq!(factory.size(Idx::INT64), 8);
    assert_eq!(factory.size(Idx::NATIVEINT), 4);
    assert_eq!(factory.size(Idx::LONGINT), 4);
    assert_eq!(factory.size(Idx::WORDBOOL), 2);
    assert_eq!(factory.size(Idx::WIDECHAR), 2);
    assert_eq!(factory.size(Idx::EXTENDED), 10);
    assert_eq!(factory.size(Idx::REAL48), 6);
    assert_eq!(factory.size(Idx::SHORTSTRING), 256);
    assert_eq!(factory.size(Idx::UNICODESTRING), 4);
    assert_eq!(factory.size(Idx::VARIANT), 16);
    assert_eq!(factory.size(Idx::POINTER), 4);
}

#[test]
fn platform_dependent_sizes_on_linux64() {
    let factory = factory_for(Toolchain::DccLinux64);
    assert_eq!(factory.size(Idx::NATIVEINT), 8);
    assert_eq!(factory.size(Idx::LONGINT), 8);
    assert_eq!(factory.size(Idx::EXTENDED), 16);
    assert_eq!(factory.size(Idx::VARIANT), 24);
    assert_eq!(factory.size(Idx::UNICODESTRING), 8);
}

#[test]
fn composite_sizes() {
    let mut factory = factory_for(Toolchain::Dcc64);
    let fixed = factory.fixed_array(Idx::WORD, 10);
    let method = factory.method_pointer(&[], Idx::VOID);
    let small_enum = factory.enumeration("TSmall", &["A", "B", "C"]);
    let small_set = factory.set(small_enum);
    let byte_set = factory.set(Idx::BYTE);
    let x = factory.field("X", Idx::INTEGER);
    let y = factory.field("Y", Idx::DOUBLE);
    let point = factory.define_struct(
        "TPoint",
        StructKind::Record,
        &[],
        StructScope::new().with_field(x).with_field(y),
    );
    let class = factory.declare_struct("TFoo", StructKind::Class, &[]);

    assert_eq!(factory.size(fixed), 20);
    assert_eq!(factory.size(method), 16);
    assert_eq!(factory.size(small_enum), 1);
    assert_eq!(factory.size(small_set), 1);
    assert_eq!(factory.size(byte_set), 32);
    assert_eq!(factory.size(point), 12);
    assert_eq!(factory.size(class), 8);
}

#[test]
fn record_size_saturates_instead_of_overflowing() {
    let mut factory = TypeFactory::new();
    let huge = factory.fixed_array(Idx::INTEGER, u32::MAX / 2);
    let a = factory.field("A", huge);
    let b = factory.field("B", huge);
    let record = factory.define_struct(
        "THuge",
        StructKind::Record,
        &[],
        StructScope::new().with_field(a).with_field(b),
    );
    assert_eq!(factory.size(huge), u32::MAX);
    assert_eq!(factory.size(record), u32::MAX);
}

// === Components ===

#[test]
fn component_queries_look_through_aliases() {
    let mut factory = TypeFactory::new();
    let suit = factory.enumeration("TSuit", &["Clubs", "Diamonds", "Hearts", "Spades"]);
    let suits = factory.weak_alias("TSuits", suit);
    let digit = factory.subrange("TDigit", Idx::BYTE);
    let handler = factory.method_pointer(&[Idx::INTEGER], Idx::BOOLEAN);
    let callback = factory.function(&[Idx::INTEGER], Idx::BOOLEAN);

    assert_eq!(factory.enumeration_len(suits), Some(4));
    assert_eq!(factory.enumeration_len(Idx::INTEGER), None);
    assert_eq!(factory.subrange_host(digit), Some(Idx::BYTE));
    assert_eq!(factory.subrange_host(suit), None);
    assert_eq!(
        factory.procedural_signature(handler),
        Some(([Idx::INTEGER].as_slice(), Idx::BOOLEAN))
    );
    assert!(factory.is_method_pointer(handler));
    assert!(!factory.is_method_pointer(callback));
}

#[test]
fn generic_declarations_and_their_specializations() {
    let mut factory = TypeFactory::new();
    let t = factory.type_parameter("T", &[]);
    let list = factory.define_struct("TList", StructKind::Class, &[t], StructScope::new());
    let plain = factory.define_struct("TPlain", StructKind::Class, &[], StructScope::new());
    let list_of_byte = factory.specialize_with(list, &[Idx::BYTE]);

    assert!(factory.is_generic_declaration(list));
    assert!(!factory.is_generic_declaration(plain));
    assert!(!factory.is_generic_declaration(list_of_byte));
}

// === Struct members ===

#[test]
fn descends_from_walks_ancestors() {
    let mut factory = TypeFactory::new();
    let intf = factory.define_struct("IFoo", StructKind::Interface, &[], StructScope::new());
    let base = factory.define_struct("TBase", StructKind::Class, &[], StructScope::new());
    let derived = factory.define_struct(
        "TDerived",
        StructKind::Class,
        &[],
        StructScope::new().with_ancestor(base).with_ancestor(intf),
    );
    assert!(factory.descends_from(derived, base));
    assert!(factory.descends_from(derived, intf));
    assert!(factory.descends_from(derived, derived));
    assert!(!factory.descends_from(base, derived));
    assert_eq!(factory.self_and_ancestors(derived), vec![derived, base, intf]);
}

#[test]
fn forward_declarations_are_pending_until_completed() {
    let mut factory = TypeFactory::new();
    let class = factory.declare_struct("TFoo", StructKind::Class, &[]);
    assert!(factory.is_pending(class));
    assert!(factory.scope(class).is_none());
    factory.complete_struct(class, StructScope::new());
    assert!(!factory.is_pending(class));
}

// === Compiler version ===

#[test]
fn string_and_char_follow_compiler_version() {
    let unicode = TypeFactory::new();
    assert_eq!(unicode.string_type(), Idx::UNICODESTRING);
    assert_eq!(unicode.char_type(), Idx::WIDECHAR);
    assert_eq!(unicode.pointer_target(unicode.pchar()), Some(Idx::WIDECHAR));
    assert!(unicode.allows_pointer_math(unicode.pchar()));

    let ansi = TypeFactory::with_config(TypeFactoryConfig::new(
        Toolchain::Dcc32,
        CompilerVersion::from_raw(185),
    ));
    assert_eq!(ansi.string_type(), Idx::ANSISTRING);
    assert_eq!(ansi.char_type(), Idx::ANSICHAR);
    assert_eq!(ansi.pointer_target(ansi.pchar()), Some(Idx::ANSICHAR));
}
