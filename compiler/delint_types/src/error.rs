//! Type system errors.
//!
//! Only configuration parsing and factory contract checks can fail.
//! Specialization, operator resolution and intrinsic inference degrade to
//! no-ops or `Idx::UNKNOWN` instead of returning errors.

use thiserror::Error;

use crate::Idx;

/// Error raised by the type factory or its configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An alias was requested over something that is not a type the factory
    /// owns (an out-of-range index, the `NONE` sentinel, or a matcher).
    #[error("cannot alias {aliased:?}: not a concrete type of this factory")]
    UnaliasableType { aliased: Idx },

    /// `Toolchain::from_str` got an unrecognized compiler name.
    #[error("unknown toolchain `{0}` (expected a compiler name such as DCC32 or DCCLINUX64)")]
    UnknownToolchain(String),

    /// `CompilerVersion::from_str` got something that is neither `VERnnn`
    /// nor `major.minor`.
    #[error("invalid compiler version `{0}` (expected `VER350` or `35.0`)")]
    InvalidCompilerVersion(String),
}
