//! Encoder format flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset of encoder behaviours.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FormatFlags(u32);

impl FormatFlags {
    /// Emit every non-ASCII character as a `\uXXXX` escape.
    pub const ESCAPE_UNICODE: Self = Self(1);
    /// Emit `/` as `\/`.
    pub const ESCAPE_SLASHES: Self = Self(1 << 1);
    /// Indented multi-line output.
    pub const PRETTY_PRINT: Self = Self(1 << 2);

    const KNOWN: u32 = 0b111;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(Self::KNOWN)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `None` if any bit outside the known flags is set.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !Self::KNOWN == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FormatFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormatFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<u32> for FormatFlags {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| format!("unknown format flag bits {:#x}", bits & !Self::KNOWN))
    }
}

impl From<FormatFlags> for u32 {
    fn from(flags: FormatFlags) -> u32 {
        flags.0
    }
}

impl fmt::Debug for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (Self::ESCAPE_UNICODE, "ESCAPE_UNICODE"),
            (Self::ESCAPE_SLASHES, "ESCAPE_SLASHES"),
            (Self::PRETTY_PRINT, "PRETTY_PRINT"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
        if names.is_empty() {
            write!(f, "FormatFlags(empty)")
        } else {
            write!(f, "FormatFlags({})", names.join(" | "))
        }
    }
}
