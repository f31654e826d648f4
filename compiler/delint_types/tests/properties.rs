//! Property tests for aliases and generic specialization.

mod common;

use delint_types::{Idx, StructKind, StructScope, TypeFactory};
use proptest::prelude::*;

// -- Type Generators --

/// A type shape, built into a factory per test case.
#[derive(Clone, Debug)]
enum Shape {
    /// Pre-interned type, excluding the special and matcher indices.
    Intrinsic(u32),
    Pointer(Box<Shape>),
    Set(Box<Shape>),
    DynamicArray(Box<Shape>),
    FixedArray(Box<Shape>, u32),
    Function(Vec<Shape>, Box<Shape>),
    Record(Vec<Shape>),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = (Idx::SHORTINT.raw()..=Idx::FILE.raw()).prop_map(Shape::Intrinsic);
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Pointer(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Set(Box::new(s))),
            inner.clone().prop_map(|s| Shape::DynamicArray(Box::new(s))),
            (inner.clone(), 1u32..8).prop_map(|(s, n)| Shape::FixedArray(Box::new(s), n)),
            (prop::collection::vec(inner.clone(), 0..3), inner.clone())
                .prop_map(|(params, ret)| Shape::Function(params, Box::new(ret))),
            prop::collection::vec(inner, 1..4).prop_map(Shape::Record),
        ]
    })
}

fn build(factory: &mut TypeFactory, shape: &Shape) -> Idx {
    match shape {
        Shape::Intrinsic(raw) => Idx::from_raw(*raw),
        Shape::Pointer(target) => {
            let target = build(factory, target);
            factory.pointer(target)
        }
        Shape::Set(element) => {
            let element = build(factory, element);
            factory.set(element)
        }
        Shape::DynamicArray(element) => {
            let element = build(factory, element);
            factory.dynamic_array(element)
        }
        Shape::FixedArray(element, length) => {
            let element = build(factory, element);
            factory.fixed_array(element, *length)
        }
        Shape::Function(params, ret) => {
            let params: Vec<Idx> = params.iter().map(|p| build(factory, p)).collect();
            let ret = build(factory, ret);
            factory.function(&params, ret)
        }
        Shape::Record(fields) => {
            let mut scope = StructScope::new();
            for (i, field) in fields.iter().enumerate() {
                let ty = build(factory, field);
                scope = scope.with_field(factory.field(&format!("F{i}"), ty));
            }
            factory.define_struct("TRec", StructKind::Record, &[], scope)
        }
    }
}

/// Every structural query an alias must answer like its aliased type.
fn structure(factory: &TypeFactory, ty: Idx) -> (Vec<bool>, u32, Option<Idx>) {
    let predicates = vec![
        factory.is_integer(ty),
        factory.is_boolean(ty),
        factory.is_char(ty),
        factory.is_real(ty),
        factory.is_string(ty),
        factory.is_variant(ty),
        factory.is_ordinal(ty),
        factory.is_pointer(ty),
        factory.is_untyped_pointer(ty),
        factory.is_set(ty),
        factory.is_array(ty),
        factory.is_dynamic_array(ty),
        factory.is_fixed_array(ty),
        factory.is_procedural(ty),
        factory.is_record(ty),
        factory.is_file(ty),
    ];
    (predicates, factory.size(ty), factory.element_type(ty))
}

// -- Property Tests --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// A weak alias is the aliased type under another name.
    #[test]
    fn weak_alias_is_transparent(shape in shape_strategy()) {
        common::init_tracing();
        let mut factory = TypeFactory::new();
        let ty = build(&mut factory, &shape);
        let alias = factory.weak_alias("TAlias", ty);

        prop_assert!(factory.is(alias, ty));
        prop_assert!(factory.is(ty, alias));
        prop_assert!(factory.is_named(alias, &factory.image(ty)));
        prop_assert!(factory.is_named(alias, "talias"));
        prop_assert_eq!(structure(&factory, alias), structure(&factory, ty));
    }

    /// A strong alias is a distinct type with the same structure.
    #[test]
    fn strong_alias_is_opaque_but_structural(shape in shape_strategy()) {
        common::init_tracing();
        let mut factory = TypeFactory::new();
        let ty = build(&mut factory, &shape);
        let alias = factory.strong_alias("TDistinct", ty);

        prop_assert!(!factory.is(alias, ty));
        prop_assert!(!factory.is(ty, alias));
        prop_assert_eq!(factory.image(alias), "TDistinct");
        prop_assert_eq!(factory.alias_image(alias), Some("TDistinct".to_owned()));
        prop_assert_eq!(structure(&factory, alias), structure(&factory, ty));
    }

    /// Specializing with the wrong number of arguments changes nothing.
    #[test]
    fn arity_mismatch_is_a_no_op(
        params in 1usize..4,
        args in prop::collection::vec(shape_strategy(), 0..5),
    ) {
        prop_assume!(params != args.len());
        common::init_tracing();
        let mut factory = TypeFactory::new();
        let type_params: Vec<Idx> = (0..params)
            .map(|i| factory.type_parameter(&format!("T{i}"), &[]))
            .collect();
        let generic = factory.define_struct(
            "TGeneric",
            StructKind::Class,
            &type_params,
            StructScope::new(),
        );
        let args: Vec<Idx> = args.iter().map(|a| build(&mut factory, a)).collect();

        let types = factory.len();
        prop_assert_eq!(factory.specialize_with(generic, &args), generic);
        prop_assert_eq!(factory.len(), types);
        prop_assert_eq!(factory.specialization_count(generic), 0);
    }

    /// Equal argument lists always produce the same specialization.
    #[test]
    fn specialization_is_cached(shape in shape_strategy()) {
        common::init_tracing();
        let mut factory = TypeFactory::new();
        let t = factory.type_parameter("T", &[]);
        let node = factory.declare_struct("TNode", StructKind::Record, &[t]);
        let pnode = factory.pointer(node);
        let value = factory.field("Value", t);
        let next = factory.field("Next", pnode);
        factory.complete_struct(node, StructScope::new().with_field(value).with_field(next));

        let argument = build(&mut factory, &shape);
        let first = factory.specialize_with(node, &[argument]);
        let types = factory.len();
        let second = factory.specialize_with(node, &[argument]);
        prop_assert_eq!(first, second);
        prop_assert_eq!(factory.len(), types);
        prop_assert_eq!(factory.specialization_count(node), 1);

        let key = factory.key_of("value");
        let field = factory.scope(first).and_then(|scope| scope.field(key)).map(|f| f.ty);
        prop_assert_eq!(field, Some(argument));
    }
}
