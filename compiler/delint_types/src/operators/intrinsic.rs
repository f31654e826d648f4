//! Scalar operator signatures built into the compiler.
//!
//! These are layered on top of the type-kind branch for every operand type,
//! so an expression such as `Ord(x) + 1` finds its integer candidates no
//! matter what the left operand turned out to be.

use super::{OperatorResolution, Signatures};
use crate::{BinaryOperator, Idx, UnaryOperator};

/// Integer arithmetic: mixed pairs promote to `Int64`.
const INTEGER_PAIRS: [(Idx, Idx, Idx); 4] = [
    (Idx::INTEGER, Idx::INTEGER, Idx::INTEGER),
    (Idx::INTEGER, Idx::INT64, Idx::INT64),
    (Idx::INT64, Idx::INTEGER, Idx::INT64),
    (Idx::INT64, Idx::INT64, Idx::INT64),
];

const EXTENDED_PAIRS: [(Idx, Idx, Idx); 3] = [
    (Idx::EXTENDED, Idx::EXTENDED, Idx::EXTENDED),
    (Idx::INTEGER, Idx::EXTENDED, Idx::EXTENDED),
    (Idx::EXTENDED, Idx::INTEGER, Idx::EXTENDED),
];

pub(super) fn binary(
    resolution: &mut OperatorResolution<'_>,
    op: BinaryOperator,
    found: &mut Signatures,
) {
    let names = op.overload_names();
    match op {
        BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor => {
            let (logical, bitwise) = match names {
                [logical, bitwise] => (*logical, *bitwise),
                _ => return,
            };
            pairs(resolution, bitwise, &INTEGER_PAIRS, found);
            resolution.push(&[logical], &[Idx::BOOLEAN, Idx::BOOLEAN], Idx::BOOLEAN, found);
        }
        op if op.is_comparison() => {
            resolution.push(names, &[Idx::UNTYPED, Idx::UNTYPED], Idx::BOOLEAN, found);
        }
        BinaryOperator::In => {
            resolution.push(names, &[Idx::ANY_ORDINAL, Idx::ANY_SET], Idx::BOOLEAN, found);
        }
        BinaryOperator::Add => {
            arithmetic(resolution, names, found);
            let string = resolution.factory.string_type();
            resolution.push(names, &[string, string], string, found);
        }
        BinaryOperator::Subtract | BinaryOperator::Multiply => {
            arithmetic(resolution, names, found);
        }
        BinaryOperator::Divide => {
            resolution.push(names, &[Idx::EXTENDED, Idx::EXTENDED], Idx::EXTENDED, found);
        }
        BinaryOperator::Div | BinaryOperator::Mod | BinaryOperator::Shl | BinaryOperator::Shr => {
            if let Some(name) = names.first() {
                pairs(resolution, name, &INTEGER_PAIRS, found);
            }
        }
        _ => {}
    }
}

pub(super) fn unary(
    resolution: &mut OperatorResolution<'_>,
    op: UnaryOperator,
    found: &mut Signatures,
) {
    let names = op.overload_names();
    match op {
        UnaryOperator::Not => {
            let (logical, bitwise) = match names {
                [logical, bitwise] => (*logical, *bitwise),
                _ => return,
            };
            resolution.push(&[bitwise], &[Idx::INTEGER], Idx::INTEGER, found);
            resolution.push(&[bitwise], &[Idx::INT64], Idx::INT64, found);
            resolution.push(&[logical], &[Idx::BOOLEAN], Idx::BOOLEAN, found);
        }
        UnaryOperator::Plus | UnaryOperator::Negate => {
            for ty in [Idx::INTEGER, Idx::INT64, Idx::EXTENDED] {
                resolution.push(names, &[ty], ty, found);
            }
        }
        UnaryOperator::Address => {}
    }
}

/// The 4 integer and 3 `Extended` combinations.
fn arithmetic(resolution: &mut OperatorResolution<'_>, names: &[&str], found: &mut Signatures) {
    let Some(name) = names.first() else {
        return;
    };
    pairs(resolution, name, &INTEGER_PAIRS, found);
    pairs(resolution, name, &EXTENDED_PAIRS, found);
}

fn pairs(
    resolution: &mut OperatorResolution<'_>,
    name: &str,
    table: &[(Idx, Idx, Idx)],
    found: &mut Signatures,
) {
    for &(left, right, ret) in table {
        resolution.push(&[name], &[left, right], ret, found);
    }
}
