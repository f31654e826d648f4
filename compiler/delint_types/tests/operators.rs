//! Operator resolution against declared types, checked the way an overload
//! resolver consumes it: candidate signatures whose parameters are matched
//! against argument types.

mod common;

use delint_types::{
    ArgumentMatcher, BinaryOperator, Idx, Invocable, OperatorResolution, RoutineKind,
    StructKind, StructScope, TypeFactory, UnaryOperator,
};
use pretty_assertions::assert_eq;

/// ```pascal
/// TPoint = record
///   X, Y: Integer;
///   class operator Add(const A, B: TPoint): TPoint;
/// end;
/// ```
fn point(factory: &mut TypeFactory) -> (Idx, Invocable) {
    let point = factory.declare_struct("TPoint", StructKind::Record, &[]);
    let x = factory.field("X", Idx::INTEGER);
    let y = factory.field("Y", Idx::INTEGER);
    let add = factory.invocable("Add", RoutineKind::Operator, &[point, point], point);
    factory.complete_struct(
        point,
        StructScope::new()
            .with_field(x)
            .with_field(y)
            .with_routine(add.clone()),
    );
    (point, add)
}

/// Whether `signature` accepts `arguments`, treating matcher and untyped
/// parameters the way the overload resolver does.
fn accepts(factory: &TypeFactory, signature: &Invocable, arguments: &[Idx]) -> bool {
    signature.parameters().len() == arguments.len()
        && signature
            .parameter_types()
            .zip(arguments)
            .all(|(param, &arg)| match ArgumentMatcher::from_idx(param) {
                Some(matcher) => matcher.matches(factory, arg),
                None => param == Idx::UNTYPED || factory.is(param, arg),
            })
}

#[test]
fn user_add_is_the_only_candidate_for_tpoint() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let (point, add) = point(&mut factory);

    let candidates =
        OperatorResolution::new(&mut factory).collect_binary(point, BinaryOperator::Add);
    assert_eq!(candidates, vec![add]);
    assert!(accepts(&factory, &candidates[0], &[point, point]));
    assert!(!candidates[0].is_callable());
}

#[test]
fn tpoint_without_overload_falls_back_to_intrinsics() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let (point, _) = point(&mut factory);
    let mut resolution = OperatorResolution::new(&mut factory);

    let equal = resolution.collect_binary(point, BinaryOperator::Equal);
    assert_eq!(equal.len(), 1);

    let subtract = resolution.collect_binary(point, BinaryOperator::Subtract);
    let negate = resolution.collect_unary(point, UnaryOperator::Negate);
    assert!(subtract.iter().all(|s| s.return_type() != point));
    assert_eq!(negate.len(), 3);

    assert!(accepts(&factory, &equal[0], &[point, point]));
    assert!(!subtract.iter().any(|s| accepts(&factory, s, &[point, point])));
}

#[test]
fn pchar_arithmetic_accepts_character_buffers() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let pchar = factory.pchar();
    let buffer = factory.fixed_array(Idx::WIDECHAR, 260);
    let bytes = factory.fixed_array(Idx::BYTE, 260);

    let add =
        OperatorResolution::new(&mut factory).collect_binary(pchar, BinaryOperator::Add);
    let offset_by_buffer = &add[2];
    assert!(accepts(&factory, offset_by_buffer, &[pchar, buffer]));
    assert!(!accepts(&factory, offset_by_buffer, &[pchar, bytes]));
    assert!(accepts(&factory, offset_by_buffer, &[pchar, Idx::POINTER]));
    assert!(accepts(&factory, &add[0], &[pchar, Idx::INTEGER]));
}

#[test]
fn membership_test_on_an_enumeration_set() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let day = factory.enumeration("TDay", &["Mon", "Tue", "Wed"]);
    let days = factory.set(day);
    let weekend = factory.weak_alias("TWeekend", days);

    let within =
        OperatorResolution::new(&mut factory).collect_binary(day, BinaryOperator::In);
    assert_eq!(within.len(), 1);
    assert!(accepts(&factory, &within[0], &[day, weekend]));
    assert!(!accepts(&factory, &within[0], &[Idx::UNICODESTRING, weekend]));
    assert_eq!(within[0].return_type(), Idx::BOOLEAN);
}

#[test]
fn boolean_and_integer_forms_of_logical_operators() {
    common::init_tracing();
    let mut factory = TypeFactory::new();
    let candidates =
        OperatorResolution::new(&mut factory).collect_binary(Idx::BOOLEAN, BinaryOperator::Or);

    let accepting: Vec<Idx> = candidates
        .iter()
        .filter(|s| accepts(&factory, s, &[Idx::BOOLEAN, Idx::BOOLEAN]))
        .map(Invocable::return_type)
        .collect();
    assert_eq!(accepting, vec![Idx::BOOLEAN]);

    let accepting: Vec<Idx> = candidates
        .iter()
        .filter(|s| accepts(&factory, s, &[Idx::INT64, Idx::INTEGER]))
        .map(Invocable::return_type)
        .collect();
    assert_eq!(accepting, vec![Idx::INT64]);
}
