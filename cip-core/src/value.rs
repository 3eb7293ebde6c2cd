//! CIP elementary data values

use crate::epath::Epath;
use crate::error::{CipError, CipResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container class holding a single CIP attribute value
///
/// Covers the elementary data types used by the device objects in this
/// workspace plus EPATH and opaque byte payloads for attributes with a
/// custom wire encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CipValue {
    /// Boolean value (BOOL)
    Bool(bool),
    /// Signed integer 8-bit (SINT)
    Sint(i8),
    /// Signed integer 16-bit (INT)
    Int(i16),
    /// Signed integer 32-bit (DINT)
    Dint(i32),
    /// Signed integer 64-bit (LINT)
    Lint(i64),
    /// Unsigned integer 8-bit (USINT)
    Usint(u8),
    /// Unsigned integer 16-bit (UINT)
    Uint(u16),
    /// Unsigned integer 32-bit (UDINT)
    Udint(u32),
    /// Unsigned integer 64-bit (ULINT)
    Ulint(u64),
    /// IEEE-754 single precision (REAL)
    Real(f32),
    /// IEEE-754 double precision (LREAL)
    Lreal(f64),
    /// Logical path segments (EPATH)
    Epath(Epath),
    /// Raw octets, already in wire order
    OctetString(Vec<u8>),
}

/// Type enumeration for CipValue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipDataType {
    /// Boolean
    Bool,
    /// Signed integer 8-bit
    Sint,
    /// Signed integer 16-bit
    Int,
    /// Signed integer 32-bit
    Dint,
    /// Signed integer 64-bit
    Lint,
    /// Unsigned integer 8-bit
    Usint,
    /// Unsigned integer 16-bit
    Uint,
    /// Unsigned integer 32-bit
    Udint,
    /// Unsigned integer 64-bit
    Ulint,
    /// IEEE-754 single precision
    Real,
    /// IEEE-754 double precision
    Lreal,
    /// Logical path segments
    Epath,
    /// Attribute with a custom wire encoding (e.g. an odometer array)
    Opaque,
}

impl CipDataType {
    /// Check if this type is a number type
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            CipDataType::Sint
                | CipDataType::Int
                | CipDataType::Dint
                | CipDataType::Lint
                | CipDataType::Usint
                | CipDataType::Uint
                | CipDataType::Udint
                | CipDataType::Ulint
                | CipDataType::Real
                | CipDataType::Lreal
        )
    }
}

impl CipValue {
    /// Get the type of this CipValue
    pub fn get_type(&self) -> CipDataType {
        match self {
            CipValue::Bool(_) => CipDataType::Bool,
            CipValue::Sint(_) => CipDataType::Sint,
            CipValue::Int(_) => CipDataType::Int,
            CipValue::Dint(_) => CipDataType::Dint,
            CipValue::Lint(_) => CipDataType::Lint,
            CipValue::Usint(_) => CipDataType::Usint,
            CipValue::Uint(_) => CipDataType::Uint,
            CipValue::Udint(_) => CipDataType::Udint,
            CipValue::Ulint(_) => CipDataType::Ulint,
            CipValue::Real(_) => CipDataType::Real,
            CipValue::Lreal(_) => CipDataType::Lreal,
            CipValue::Epath(_) => CipDataType::Epath,
            CipValue::OctetString(_) => CipDataType::Opaque,
        }
    }

    /// Check if this CipValue is a number
    pub fn is_number(&self) -> bool {
        self.get_type().is_number()
    }

    /// Get the value as a UINT
    pub fn as_uint(&self) -> CipResult<u16> {
        match self {
            CipValue::Uint(u) => Ok(*u),
            _ => Err(CipError::InvalidData(format!(
                "Expected Uint, got {:?}",
                self.get_type()
            ))),
        }
    }

    /// Get the value as a ULINT
    pub fn as_ulint(&self) -> CipResult<u64> {
        match self {
            CipValue::Ulint(u) => Ok(*u),
            _ => Err(CipError::InvalidData(format!(
                "Expected Ulint, got {:?}",
                self.get_type()
            ))),
        }
    }

    /// Get the value as a LINT
    pub fn as_lint(&self) -> CipResult<i64> {
        match self {
            CipValue::Lint(i) => Ok(*i),
            _ => Err(CipError::InvalidData(format!(
                "Expected Lint, got {:?}",
                self.get_type()
            ))),
        }
    }

    /// Get the value as a REAL
    pub fn as_real(&self) -> CipResult<f32> {
        match self {
            CipValue::Real(r) => Ok(*r),
            _ => Err(CipError::InvalidData(format!(
                "Expected Real, got {:?}",
                self.get_type()
            ))),
        }
    }

    /// Get the value as an EPATH
    pub fn as_epath(&self) -> CipResult<&Epath> {
        match self {
            CipValue::Epath(p) => Ok(p),
            _ => Err(CipError::InvalidData(format!(
                "Expected Epath, got {:?}",
                self.get_type()
            ))),
        }
    }
}

impl fmt::Display for CipValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipValue::Bool(b) => write!(f, "BOOL: {}", b),
            CipValue::Sint(i) => write!(f, "SINT: {}", i),
            CipValue::Int(i) => write!(f, "INT: {}", i),
            CipValue::Dint(i) => write!(f, "DINT: {}", i),
            CipValue::Lint(i) => write!(f, "LINT: {}", i),
            CipValue::Usint(u) => write!(f, "USINT: {}", u),
            CipValue::Uint(u) => write!(f, "UINT: {}", u),
            CipValue::Udint(u) => write!(f, "UDINT: {}", u),
            CipValue::Ulint(u) => write!(f, "ULINT: {}", u),
            CipValue::Real(r) => write!(f, "REAL: {}", r),
            CipValue::Lreal(r) => write!(f, "LREAL: {}", r),
            CipValue::Epath(p) => write!(f, "EPATH: {}", p),
            CipValue::OctetString(s) => {
                write!(f, "OCTET_STRING: ")?;
                for byte in s {
                    write!(f, "{:02X} ", byte)?;
                }
                Ok(())
            }
        }
    }
}
