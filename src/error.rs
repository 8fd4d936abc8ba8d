//! Error taxonomy for the encoder

use thiserror::Error;

use crate::encoder::modes::Mode;
use crate::models::{ECLevel, Version};

/// Failure of a single encode call. Encoding is deterministic, so retrying
/// the same call reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A payload byte cannot be represented in the requested mode
    #[error("byte at offset {position} cannot be encoded in {mode:?} mode")]
    InvalidCharacterForMode { mode: Mode, position: usize },

    /// The payload does not fit in a version 40 symbol at the requested level
    #[error(
        "payload needs {required_bits} bits but version 40-{ec_level} holds {capacity_bits}"
    )]
    CapacityExceeded {
        ec_level: ECLevel,
        required_bits: usize,
        capacity_bits: usize,
    },

    /// The caller pinned a version too small for the payload
    #[error(
        "payload needs {required_bits} bits but requested version {version} holds {capacity_bits}"
    )]
    InvalidVersionOverride {
        version: Version,
        required_bits: usize,
        capacity_bits: usize,
    },

    /// The fixed block or capacity tables are inconsistent (a defect, not an input problem)
    #[error("inconsistent codeword tables for version {version}-{ec_level}")]
    MalformedSegmentTable { version: Version, ec_level: ECLevel },
}

impl EncodeError {
    /// Whether the failure was caused by the caller's input rather than an internal defect
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EncodeError::MalformedSegmentTable { .. })
    }
}
