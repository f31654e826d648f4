//! Analysis configuration: which compiler the analyzed code targets.
//!
//! The target decides platform-dependent type sizes (`Pointer`, `Extended`,
//! `LongInt`, `Variant`) and the compiler version decides whether `string`
//! and `Char` mean the Unicode or the Ansi types.

use std::fmt;
use std::str::FromStr;

use crate::TypeError;

/// Operating system family of a toolchain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
}

/// CPU architecture of a toolchain.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Architecture {
    X86,
    X64,
    Arm32,
    Arm64,
}

/// A Delphi compiler executable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Toolchain {
    #[default]
    Dcc32,
    Dcc64,
    DccOsx64,
    DccOsxArm64,
    DccLinux64,
    DccAarm,
    DccAarm64,
    DccIosArm64,
}

impl Toolchain {
    const ALL: [Toolchain; 8] = [
        Self::Dcc32,
        Self::Dcc64,
        Self::DccOsx64,
        Self::DccOsxArm64,
        Self::DccLinux64,
        Self::DccAarm,
        Self::DccAarm64,
        Self::DccIosArm64,
    ];

    /// The compiler's executable name.
    pub const fn compiler_name(self) -> &'static str {
        match self {
            Self::Dcc32 => "DCC32",
            Self::Dcc64 => "DCC64",
            Self::DccOsx64 => "DCCOSX64",
            Self::DccOsxArm64 => "DCCOSXARM64",
            Self::DccLinux64 => "DCCLINUX64",
            Self::DccAarm => "DCCAARM",
            Self::DccAarm64 => "DCCAARM64",
            Self::DccIosArm64 => "DCCIOSARM64",
        }
    }

    pub const fn platform(self) -> Platform {
        match self {
            Self::Dcc32 | Self::Dcc64 => Platform::Windows,
            Self::DccOsx64 | Self::DccOsxArm64 => Platform::MacOs,
            Self::DccLinux64 => Platform::Linux,
            Self::DccAarm | Self::DccAarm64 => Platform::Android,
            Self::DccIosArm64 => Platform::Ios,
        }
    }

    pub const fn architecture(self) -> Architecture {
        match self {
            Self::Dcc32 => Architecture::X86,
            Self::Dcc64 | Self::DccOsx64 | Self::DccLinux64 => Architecture::X64,
            Self::DccAarm => Architecture::Arm32,
            Self::DccOsxArm64 | Self::DccAarm64 | Self::DccIosArm64 => Architecture::Arm64,
        }
    }

    /// Whether pointers are 64 bits wide.
    pub const fn is_64_bit(self) -> bool {
        matches!(self.architecture(), Architecture::X64 | Architecture::Arm64)
    }

    /// Size of `Pointer` and of every reference type.
    pub const fn pointer_size(self) -> u32 {
        if self.is_64_bit() {
            8
        } else {
            4
        }
    }

    /// Size of `Extended`.
    pub const fn extended_size(self) -> u32 {
        match (self.platform(), self.architecture()) {
            (Platform::Windows, Architecture::X86) => 10,
            (Platform::Windows, _) => 8,
            (_, Architecture::X64) => 16,
            _ => 8,
        }
    }

    /// Size of `LongInt` and `LongWord`.
    ///
    /// They follow the C `long` of the platform: 64-bit on 64-bit POSIX.
    pub const fn long_size(self) -> u32 {
        if self.is_64_bit() && !matches!(self.platform(), Platform::Windows) {
            8
        } else {
            4
        }
    }

    /// Size of `Variant` and `OleVariant`.
    pub const fn variant_size(self) -> u32 {
        if self.is_64_bit() {
            24
        } else {
            16
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compiler_name())
    }
}

impl FromStr for Toolchain {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.compiler_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TypeError::UnknownToolchain(s.to_owned()))
    }
}

/// A Delphi compiler version, as in the `VERnnn` conditional symbol.
///
/// `VER350` (Delphi 11) is stored as `350`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompilerVersion(u16);

impl CompilerVersion {
    /// Delphi 2009, the first Unicode compiler.
    pub const VER200: Self = Self(200);
    /// Delphi 11 Alexandria.
    pub const VER350: Self = Self(350);
    /// Delphi 12 Athens.
    pub const VER360: Self = Self(360);

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Whether `string` is `UnicodeString` (and `Char` is `WideChar`).
    pub const fn has_unicode_strings(self) -> bool {
        self.0 >= Self::VER200.0
    }
}

impl Default for CompilerVersion {
    fn default() -> Self {
        Self::VER350
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VER{}", self.0)
    }
}

impl FromStr for CompilerVersion {
    type Err = TypeError;

    /// Accepts `VER350` (any case) or `35.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidCompilerVersion(s.to_owned());
        let trimmed = s.trim();

        if let Some(digits) = trimmed.to_ascii_uppercase().strip_prefix("VER") {
            return digits.parse::<u16>().map(Self).map_err(|_| invalid());
        }

        let (major, minor) = trimmed.split_once('.').ok_or_else(invalid)?;
        let major: u16 = major.parse().map_err(|_| invalid())?;
        let minor: u16 = minor.parse().map_err(|_| invalid())?;
        if minor > 9 {
            return Err(invalid());
        }
        major
            .checked_mul(10)
            .and_then(|v| v.checked_add(minor))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// Configuration of a [`TypeFactory`](crate::TypeFactory).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeFactoryConfig {
    pub toolchain: Toolchain,
    pub compiler_version: CompilerVersion,
}

impl TypeFactoryConfig {
    pub fn new(toolchain: Toolchain, compiler_version: CompilerVersion) -> Self {
        Self {
            toolchain,
            compiler_version,
        }
    }
}
