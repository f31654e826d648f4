//! Intrinsic calls as a rule engine sees them: look the routine up by name,
//! then ask for the result type of a concrete call.

mod common;

use delint_types::{
    CompilerVersion, Idx, IntrinsicRoutine, StructKind, Toolchain, TypeFactory, TypeFactoryConfig,
};
use pretty_assertions::assert_eq;

fn call(factory: &mut TypeFactory, name: &str, arguments: &[Idx]) -> Idx {
    let Some(routine) = IntrinsicRoutine::find(factory, name) else {
        panic!("{name} is not an intrinsic");
    };
    routine.return_type(factory, arguments)
}

#[test]
fn high_and_low() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let foo = factory.declare_struct("TFoo", StructKind::Class, &[]);
    let meta = factory.class_reference(foo);
    let names = factory.dynamic_array(Idx::UNICODESTRING);

    assert_eq!(call(&mut factory, "High", &[Idx::SMALLINT]), Idx::SMALLINT);
    assert_eq!(call(&mut factory, "High", &[Idx::UNICODESTRING]), Idx::INTEGER);
    assert_eq!(call(&mut factory, "High", &[names]), Idx::INTEGER);
    assert_eq!(call(&mut factory, "High", &[meta]), foo);
    assert_eq!(call(&mut factory, "low", &[Idx::ANSICHAR]), Idx::ANSICHAR);
}

#[test]
fn concat_and_copy() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let utf8 = factory.well_known().utf8_string;
    let bytes = factory.dynamic_array(Idx::BYTE);
    let tbytes = factory.strong_alias("TBytes", bytes);

    assert_eq!(
        call(&mut factory, "Concat", &[Idx::SHORTSTRING, utf8, Idx::WIDECHAR]),
        Idx::UNICODESTRING
    );
    assert_eq!(
        call(&mut factory, "Concat", &[Idx::OLEVARIANT, Idx::VARIANT]),
        Idx::OLEVARIANT
    );
    assert_eq!(call(&mut factory, "Concat", &[tbytes, bytes]), tbytes);

    assert_eq!(call(&mut factory, "Copy", &[utf8, Idx::INTEGER, Idx::INTEGER]), utf8);
    assert_eq!(call(&mut factory, "Copy", &[tbytes, Idx::INTEGER]), tbytes);
    assert_eq!(call(&mut factory, "Copy", &[Idx::ANSICHAR]), Idx::ANSISTRING);
    assert_eq!(call(&mut factory, "Copy", &[Idx::VARIANT]), Idx::UNICODESTRING);
}

#[test]
fn ordinal_helpers_return_their_argument() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let suit = factory.enumeration("TSuit", &["Clubs", "Diamonds", "Hearts", "Spades"]);
    assert_eq!(call(&mut factory, "Succ", &[suit]), suit);
    assert_eq!(call(&mut factory, "Pred", &[Idx::WORD]), Idx::WORD);
    assert_eq!(call(&mut factory, "Abs", &[Idx::DOUBLE]), Idx::DOUBLE);
    assert_eq!(call(&mut factory, "Ord", &[suit]), Idx::INTEGER);
    assert_eq!(call(&mut factory, "Odd", &[Idx::INT64]), Idx::BOOLEAN);
}

#[test]
fn slice_round_and_procedures() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let words = factory.dynamic_array(Idx::WORD);
    let open = factory.open_array(Idx::WORD);

    assert_eq!(call(&mut factory, "Slice", &[words, Idx::INTEGER]), open);
    assert_eq!(call(&mut factory, "Round", &[Idx::EXTENDED]), Idx::INT64);
    assert_eq!(call(&mut factory, "Trunc", &[Idx::SINGLE]), Idx::INT64);
    assert_eq!(call(&mut factory, "SetLength", &[words, Idx::INTEGER]), Idx::VOID);
    assert_eq!(call(&mut factory, "Include", &[Idx::UNKNOWN]), Idx::VOID);
}

#[test]
fn character_intrinsics_follow_the_compiler_version() {
    common::init_tracing();
    let mut legacy = TypeFactory::with_config(TypeFactoryConfig::new(
        Toolchain::Dcc32,
        CompilerVersion::from_raw(185),
    ));
    assert_eq!(call(&mut legacy, "Chr", &[Idx::BYTE]), Idx::ANSICHAR);

    let mut modern = TypeFactory::new();
    assert_eq!(call(&mut modern, "Chr", &[Idx::BYTE]), Idx::WIDECHAR);
}
