//! Message router request/response envelope
//!
//! A deliberately narrow view of the surrounding transport: the router
//! hands an object the requested service, the attribute number and the
//! raw payload; the object hands back a status and the reply payload.

use bytes::Bytes;
use cip_core::{CipError, GeneralStatus};
use std::fmt;

/// Reply service bit set on every response service code
pub const REPLY_SERVICE_FLAG: u8 = 0x80;

/// Services this object model answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ServiceCode {
    GetAttributeAll = 0x01,
    GetAttributeSingle = 0x0E,
    SetAttributeSingle = 0x10,
}

impl ServiceCode {
    /// Get the wire value of this service code
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Reply service code: request service with the reply bit set
    pub fn reply(&self) -> u8 {
        self.value() | REPLY_SERVICE_FLAG
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceCode::GetAttributeAll => write!(f, "Get_Attribute_All"),
            ServiceCode::GetAttributeSingle => write!(f, "Get_Attribute_Single"),
            ServiceCode::SetAttributeSingle => write!(f, "Set_Attribute_Single"),
        }
    }
}

/// Inbound request as seen by an object
#[derive(Debug, Clone)]
pub struct MessageRouterRequest {
    /// Requested service
    pub service: ServiceCode,
    /// Attribute number from the request path (0 for Get Attribute All)
    pub attribute_id: u16,
    /// Raw payload bytes (set data; empty for gets)
    pub data: Bytes,
}

impl MessageRouterRequest {
    /// Build a Get Attribute Single request
    pub fn get_single(attribute_id: u16) -> Self {
        Self {
            service: ServiceCode::GetAttributeSingle,
            attribute_id,
            data: Bytes::new(),
        }
    }

    /// Build a Get Attribute All request
    pub fn get_all() -> Self {
        Self {
            service: ServiceCode::GetAttributeAll,
            attribute_id: 0,
            data: Bytes::new(),
        }
    }

    /// Build a Set Attribute Single request
    pub fn set_single(attribute_id: u16, data: impl Into<Bytes>) -> Self {
        Self {
            service: ServiceCode::SetAttributeSingle,
            attribute_id,
            data: data.into(),
        }
    }
}

/// Outbound response as produced by an object
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRouterResponse {
    /// Request service with the reply bit set
    pub reply_service: u8,
    /// General status of the operation
    pub general_status: GeneralStatus,
    /// Encoded reply payload; empty on every denial path
    pub data: Vec<u8>,
}

impl MessageRouterResponse {
    /// Build a success response carrying an encoded payload
    pub fn success(service: ServiceCode, data: Vec<u8>) -> Self {
        Self {
            reply_service: service.reply(),
            general_status: GeneralStatus::Success,
            data,
        }
    }

    /// Build an error response; the payload stays empty
    pub fn error(service: ServiceCode, error: &CipError) -> Self {
        Self {
            reply_service: service.reply(),
            general_status: GeneralStatus::from(error),
            data: Vec::new(),
        }
    }

    /// Check whether the operation succeeded
    pub fn is_success(&self) -> bool {
        self.general_status == GeneralStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_service_bit() {
        assert_eq!(ServiceCode::GetAttributeSingle.reply(), 0x8E);
        assert_eq!(ServiceCode::GetAttributeAll.reply(), 0x81);
        assert_eq!(ServiceCode::SetAttributeSingle.reply(), 0x90);
    }

    #[test]
    fn test_error_response_has_empty_payload() {
        let response = MessageRouterResponse::error(
            ServiceCode::GetAttributeSingle,
            &CipError::AttributeNotSupported(99),
        );
        assert!(!response.is_success());
        assert_eq!(response.general_status, GeneralStatus::AttributeNotSupported);
        assert!(response.data.is_empty());
    }

    #[test]
    fn test_success_response() {
        let response =
            MessageRouterResponse::success(ServiceCode::GetAttributeSingle, vec![0x01, 0x00]);
        assert!(response.is_success());
        assert_eq!(response.reply_service, 0x8E);
        assert_eq!(response.data, vec![0x01, 0x00]);
    }
}
