use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CIP object-model operations
#[derive(Error, Debug)]
pub enum CipError {
    #[error("Attribute {0} is not supported")]
    AttributeNotSupported(u16),

    #[error("Attribute {0} is not gettable")]
    AttributeNotGettable(u16),

    #[error("Attribute {0} is not setable")]
    AttributeNotSetable(u16),

    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    #[error("Encode failure: {0}")]
    EncodeFailure(String),

    #[error("Attribute {0} is marked setable but has no write handler")]
    Unimplemented(u16),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for CIP object-model operations
pub type CipResult<T> = Result<T, CipError>;

/// CIP general status codes carried in a message router response
///
/// Only the codes this object model actually reports are listed; the
/// full table lives in CIP Vol. 1 appendix B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum GeneralStatus {
    Success = 0x00,
    ServiceNotSupported = 0x08,
    InvalidAttributeValue = 0x09,
    AttributeNotSetable = 0x0E,
    NotEnoughData = 0x13,
    AttributeNotSupported = 0x14,
    TooMuchData = 0x15,
}

impl GeneralStatus {
    /// Get the wire value of this status code
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl From<&CipError> for GeneralStatus {
    /// Map a library error onto the general status reported on the wire.
    ///
    /// There is no dedicated "attribute not gettable" general status in
    /// CIP; that denial is reported as attribute-not-supported, matching
    /// the reference stacks.
    fn from(error: &CipError) -> Self {
        match error {
            CipError::AttributeNotSupported(_) => GeneralStatus::AttributeNotSupported,
            CipError::AttributeNotGettable(_) => GeneralStatus::AttributeNotSupported,
            CipError::AttributeNotSetable(_) => GeneralStatus::AttributeNotSetable,
            CipError::DecodeFailure(_) => GeneralStatus::NotEnoughData,
            CipError::EncodeFailure(_) => GeneralStatus::InvalidAttributeValue,
            CipError::Unimplemented(_) => GeneralStatus::ServiceNotSupported,
            CipError::InvalidData(_) => GeneralStatus::InvalidAttributeValue,
        }
    }
}
