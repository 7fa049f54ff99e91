//! Encoding error types

/// Encoding error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// E01: Character outside 0-9, A-Z, space
    UnsupportedCharacter,
    /// E02: Encoded bit stream would exceed buffer capacity
    CapacityExceeded,
    /// E03: Buffer too small for header plus payload
    InvalidCapacity,
}

impl EncodeError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedCharacter => "E01",
            Self::CapacityExceeded => "E02",
            Self::InvalidCapacity => "E03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnsupportedCharacter => "unsupported character",
            Self::CapacityExceeded => "buffer capacity exceeded",
            Self::InvalidCapacity => "buffer too small",
        }
    }
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
