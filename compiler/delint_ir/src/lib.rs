//! Delint IR - shared identifier types for the Delphi analyzer.
//!
//! This crate holds the pieces every other analyzer crate agrees on:
//! - `Name` for interned identifiers (case-preserving, O(1) equality)
//! - `NameKey` for Delphi's case-insensitive identifier identity
//! - `StringInterner`, one per analysis session
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → Idx(u32)
//! - **Fold Once**: every name remembers its case-folded key at intern time,
//!   so case-insensitive comparison is an integer comparison

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;

pub use interner::{InternError, StringInterner};
pub use name::{Name, NameKey};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, NameKey};
    static_assert_size!(Name, 4);
    static_assert_size!(NameKey, 4);
}
