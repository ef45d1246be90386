//! Depth header values.

use std::fmt;

/// `WebDAV` Depth header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// A finite number of levels below the target (0 is the target alone).
    Finite(u32),
    /// Depth: infinity - The resource and all descendants.
    #[default]
    Infinity,
}

impl Depth {
    /// Depth: 0.
    pub const ZERO: Self = Self::Finite(0);
    /// Depth: 1.
    pub const ONE: Self = Self::Finite(1);

    /// Parses from header value.
    ///
    /// Only a plain run of decimal digits is finite; anything else, including
    /// `infinity` and unparseable values, is treated as `infinity`.
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Infinity;
        }
        value.parse().map_or(Self::Infinity, Self::Finite)
    }

    /// Returns whether a resource `level` steps below the target is included.
    #[must_use]
    pub const fn allows(self, level: u32) -> bool {
        match self {
            Self::Finite(max) => level <= max,
            Self::Infinity => true,
        }
    }

    /// Returns whether this depth covers a whole subtree for MOVE.
    ///
    /// Only `infinity` or a finite depth greater than one qualifies.
    #[must_use]
    pub const fn is_deep(self) -> bool {
        match self {
            Self::Finite(n) => n > 1,
            Self::Infinity => true,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Infinity => f.write_str("infinity"),
        }
    }
}
