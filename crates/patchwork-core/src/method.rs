//! Delete-strategy tags selecting a compaction algorithm.
//!
//! [`BackFill`] and [`ShiftUp`] are stateless, zero-sized policy markers for
//! call sites that fix the strategy at compile time. [`DeleteMethod`] is the
//! runtime selector stored in container configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How a destroy operation closes the holes it leaves behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeleteMethod {
    /// Fill holes with elements taken from the tail of the buffer.
    ///
    /// O(killed) moves; the relative order of survivors is not preserved.
    #[default]
    BackFill,
    /// Shift every survivor down over the holes.
    ///
    /// Up to O(n) moves; the relative order of survivors is preserved.
    ShiftUp,
}

impl DeleteMethod {
    /// Numeric code used when the method travels through configuration.
    pub fn code(self) -> u8 {
        match self {
            Self::BackFill => 0,
            Self::ShiftUp => 1,
        }
    }

    /// Decode a numeric method code.
    ///
    /// Returns `Err(DomainError::UnknownDeleteMethod)` for any code other
    /// than those produced by [`DeleteMethod::code`].
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::BackFill),
            1 => Ok(Self::ShiftUp),
            other => Err(DomainError::UnknownDeleteMethod {
                value: other.to_string(),
            }),
        }
    }

    /// Whether survivors keep their relative order under this method.
    pub fn preserves_order(self) -> bool {
        matches!(self, Self::ShiftUp)
    }
}

impl TryFrom<u8> for DeleteMethod {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl FromStr for DeleteMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backfill" | "back_fill" | "back-fill" => Ok(Self::BackFill),
            "shiftup" | "shift_up" | "shift-up" => Ok(Self::ShiftUp),
            _ => Err(DomainError::UnknownDeleteMethod {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeleteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackFill => write!(f, "BackFill"),
            Self::ShiftUp => write!(f, "ShiftUp"),
        }
    }
}

/// A compile-time delete strategy.
pub trait DeleteStrategy: Copy + Default + Send + Sync + 'static {
    /// The runtime method this tag stands for.
    const METHOD: DeleteMethod;
}

/// Tag for [`DeleteMethod::BackFill`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BackFill;

impl DeleteStrategy for BackFill {
    const METHOD: DeleteMethod = DeleteMethod::BackFill;
}

/// Tag for [`DeleteMethod::ShiftUp`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShiftUp;

impl DeleteStrategy for ShiftUp {
    const METHOD: DeleteMethod = DeleteMethod::ShiftUp;
}
