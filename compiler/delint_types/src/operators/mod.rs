//! Operator resolution.
//!
//! Given an operand type and an operator, produce every signature the
//! overload resolver should consider: user `class operator` overloads,
//! type-kind specific built-ins (pointer math, variant and set arithmetic,
//! dynamic array concatenation), and the scalar intrinsic signatures.
//!
//! Picking the best candidate is the resolver's job, not ours.

mod intrinsic;


use std::fmt;

use delint_ir::NameKey;
use smallvec::SmallVec;
use tracing::trace;

use crate::{Idx, Invocable, RoutineKind, TypeFactory};

/// Binary operators, as written in source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    /// `/`
    Divide,
    /// `div`
    Div,
    /// `mod`
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    In,
    As,
    Is,
}

impl BinaryOperator {
    pub const ALL: [Self; 20] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Div,
        Self::Mod,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Shl,
        Self::Shr,
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::GreaterThan,
        Self::LessThanEqual,
        Self::GreaterThanEqual,
        Self::In,
        Self::As,
        Self::Is,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::Shr => "shr",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEqual => "<=",
            Self::GreaterThanEqual => ">=",
            Self::In => "in",
            Self::As => "as",
            Self::Is => "is",
        }
    }

    /// Names a `class operator` must have to overload this operator.
    pub const fn overload_names(self) -> &'static [&'static str] {
        match self {
            Self::Add => &["Add"],
            Self::Subtract => &["Subtract"],
            Self::Multiply => &["Multiply"],
            Self::Divide => &["Divide"],
            Self::Div => &["IntDivide"],
            Self::Mod => &["Modulus"],
            Self::And => &["LogicalAnd", "BitwiseAnd"],
            Self::Or => &["LogicalOr", "BitwiseOr"],
            Self::Xor => &["LogicalXor", "BitwiseXor"],
            Self::Shl => &["LeftShift"],
            Self::Shr => &["RightShift"],
            Self::Equal => &["Equal"],
            Self::NotEqual => &["NotEqual"],
            Self::LessThan => &["LessThan"],
            Self::GreaterThan => &["GreaterThan"],
            Self::LessThanEqual => &["LessThanOrEqual"],
            Self::GreaterThanEqual => &["GreaterThanOrEqual"],
            Self::In => &["In"],
            Self::As | Self::Is => &[],
        }
    }

    /// Name given to synthesized signatures of this operator. `as` and `is`
    /// cannot be overloaded but still name their built-in forms.
    pub const fn signature_name(self) -> &'static str {
        match self {
            Self::As => "As",
            Self::Is => "Is",
            _ => self.overload_names()[0],
        }
    }

    /// `= <> < > <= >=`
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::GreaterThan
                | Self::LessThanEqual
                | Self::GreaterThanEqual
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators, as written in source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnaryOperator {
    Not,
    Plus,
    Negate,
    /// `@`
    Address,
}

impl UnaryOperator {
    pub const ALL: [Self; 4] = [Self::Not, Self::Plus, Self::Negate, Self::Address];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Address => "@",
        }
    }

    /// Names a `class operator` must have to overload this operator.
    pub const fn overload_names(self) -> &'static [&'static str] {
        match self {
            Self::Not => &["LogicalNot", "BitwiseNot"],
            Self::Plus => &["Positive"],
            Self::Negate => &["Negative"],
            Self::Address => &[],
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Collects candidate operator signatures for an operand type.
pub struct OperatorResolution<'f> {
    factory: &'f mut TypeFactory,
}

impl<'f> OperatorResolution<'f> {
    pub fn new(factory: &'f mut TypeFactory) -> Self {
        Self { factory }
    }

    /// Candidate signatures for `ty <op> _` / `_ <op> ty`, without
    /// duplicates, in discovery order. Empty when nothing applies.
    ///
    /// When `ty` is a struct with a matching `class operator`, only its
    /// overloads are returned.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %ty, op = %op))]
    pub fn collect_binary(&mut self, ty: Idx, op: BinaryOperator) -> Vec<Invocable> {
        let mut found = Signatures::default();

        if self.factory.is_struct(ty) {
            self.user_operators(ty, op.overload_names(), &mut found);
            if !found.is_empty() {
                return found.into_vec();
            }
        } else if self.factory.is_pointer(ty) {
            self.pointer_math(ty, op, &mut found);
        } else if self.factory.is_variant(ty) {
            if !matches!(op, BinaryOperator::In | BinaryOperator::As) {
                let ret = if op.is_comparison() { Idx::BOOLEAN } else { ty };
                self.push(&[op.signature_name()], &[ty, ty], ret, &mut found);
            }
        } else if self.factory.is_set(ty) || self.factory.is_array_constructor(ty) {
            if matches!(
                op,
                BinaryOperator::Add | BinaryOperator::Subtract | BinaryOperator::Multiply
            ) {
                let set = self.normalize_set(ty);
                self.push(op.overload_names(), &[set, set], set, &mut found);
            }
        } else if self.factory.is_dynamic_array(ty) && op == BinaryOperator::Add {
            self.push(op.overload_names(), &[ty, ty], ty, &mut found);
        }
        trace!(count = found.len(), "type-kind signatures");

        intrinsic::binary(self, op, &mut found);
        found.into_vec()
    }

    /// Candidate signatures for `<op> ty`.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = %ty, op = %op))]
    pub fn collect_unary(&mut self, ty: Idx, op: UnaryOperator) -> Vec<Invocable> {
        let mut found = Signatures::default();

        if self.factory.is_struct(ty) {
            self.user_operators(ty, op.overload_names(), &mut found);
            if !found.is_empty() {
                return found.into_vec();
            }
        } else if self.factory.is_variant(ty) && op != UnaryOperator::Address {
            self.push(op.overload_names(), &[ty], ty, &mut found);
        }

        intrinsic::unary(self, op, &mut found);
        found.into_vec()
    }

    /// `class operator` methods of `ty` and its ancestors named one of
    /// `names`.
    fn user_operators(&mut self, ty: Idx, names: &[&str], found: &mut Signatures) {
        let keys: SmallVec<[NameKey; 2]> =
            names.iter().map(|n| self.factory.key_of(n)).collect();
        for owner in self.factory.self_and_ancestors(ty) {
            if let Some(scope) = self.factory.scope(owner) {
                for routine in scope.operators(&keys) {
                    found.push(routine.clone());
                }
            }
        }
        trace!(count = found.len(), "user operator overloads");
    }

    /// Pointer arithmetic, when `{$POINTERMATH ON}` applies to `ty`.
    fn pointer_math(&mut self, ty: Idx, op: BinaryOperator, found: &mut Signatures) {
        if !self.factory.allows_pointer_math(ty) {
            return;
        }
        let names = op.overload_names();
        match op {
            BinaryOperator::Add => {
                self.push(names, &[ty, Idx::INTEGER], ty, found);
                self.push(names, &[Idx::INTEGER, ty], ty, found);
                self.push(names, &[ty, Idx::POINTER_MATH_OPERAND], ty, found);
            }
            BinaryOperator::Subtract => {
                self.push(names, &[ty, Idx::INTEGER], ty, found);
                self.push(names, &[ty, Idx::POINTER_MATH_OPERAND], Idx::INTEGER, found);
            }
            _ => {}
        }
    }

    /// A set stays itself; an array constructor becomes `set of` its
    /// largest candidate element type.
    fn normalize_set(&mut self, ty: Idx) -> Idx {
        if self.factory.is_set(ty) {
            return ty;
        }
        let elements = self.factory.array_constructor_elements(ty).to_vec();
        let element = self.factory.largest(&elements).unwrap_or(Idx::VOID);
        self.factory.set(element)
    }

    /// Add a synthesized operator signature named after the first overload
    /// name of its operator.
    fn push(&mut self, names: &[&str], params: &[Idx], ret: Idx, found: &mut Signatures) {
        let Some(name) = names.first() else {
            return;
        };
        let signature = self
            .factory
            .invocable(name, RoutineKind::Operator, params, ret);
        found.push(signature);
    }
}

/// Insertion-ordered set of signatures.
#[derive(Default)]
struct Signatures(Vec<Invocable>);

impl Signatures {
    fn push(&mut self, signature: Invocable) {
        if !self.0.contains(&signature) {
            self.0.push(signature);
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_vec(self) -> Vec<Invocable> {
        self.0
    }
}
