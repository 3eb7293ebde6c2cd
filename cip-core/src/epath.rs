//! EPATH logical segments
//!
//! An EPATH addresses an object in the device by class, instance and
//! optionally attribute. On the wire it is a 16-bit word count followed
//! by logical segments; each segment uses the 8-bit form when the value
//! fits in one byte and the padded 16-bit form otherwise.

use crate::error::{CipError, CipResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const CLASS_SEGMENT_8: u8 = 0x20;
const CLASS_SEGMENT_16: u8 = 0x21;
const INSTANCE_SEGMENT_8: u8 = 0x24;
const INSTANCE_SEGMENT_16: u8 = 0x25;
const ATTRIBUTE_SEGMENT_8: u8 = 0x30;
const ATTRIBUTE_SEGMENT_16: u8 = 0x31;

/// Logical path to an object instance, optionally down to one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Epath {
    /// Class ID of the addressed object
    pub class_id: u16,
    /// Instance number (0 addresses the class itself)
    pub instance_number: u16,
    /// Attribute number; `None` for a two-segment path
    pub attribute_number: Option<u16>,
}

impl Epath {
    /// Create a new EPATH
    pub fn new(class_id: u16, instance_number: u16, attribute_number: Option<u16>) -> Self {
        Self {
            class_id,
            instance_number,
            attribute_number,
        }
    }

    /// Path size in 16-bit words, as transmitted before the segments
    pub fn path_size(&self) -> u16 {
        let mut words = Self::segment_words(self.class_id) + Self::segment_words(self.instance_number);
        if let Some(attribute) = self.attribute_number {
            words += Self::segment_words(attribute);
        }
        words
    }

    fn segment_words(value: u16) -> u16 {
        if value > 0xFF { 2 } else { 1 }
    }

    /// Encode the EPATH: path size word, then the logical segments
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.path_size().to_le_bytes());
        Self::encode_segment(&mut bytes, CLASS_SEGMENT_8, CLASS_SEGMENT_16, self.class_id);
        Self::encode_segment(
            &mut bytes,
            INSTANCE_SEGMENT_8,
            INSTANCE_SEGMENT_16,
            self.instance_number,
        );
        if let Some(attribute) = self.attribute_number {
            Self::encode_segment(&mut bytes, ATTRIBUTE_SEGMENT_8, ATTRIBUTE_SEGMENT_16, attribute);
        }
        bytes
    }

    fn encode_segment(bytes: &mut Vec<u8>, tag_8: u8, tag_16: u8, value: u16) {
        if value > 0xFF {
            // 16-bit form carries a pad byte before the value
            bytes.push(tag_16);
            bytes.push(0x00);
            bytes.extend_from_slice(&value.to_le_bytes());
        } else {
            bytes.push(tag_8);
            bytes.push(value as u8);
        }
    }

    /// Decode an EPATH from bytes
    pub fn decode(data: &[u8]) -> CipResult<Self> {
        if data.len() < 2 {
            return Err(CipError::DecodeFailure(
                "Insufficient data for EPATH size word".to_string(),
            ));
        }
        let path_size = u16::from_le_bytes([data[0], data[1]]) as usize;
        let segments = &data[2..];
        if segments.len() < path_size * 2 {
            return Err(CipError::DecodeFailure(format!(
                "EPATH declares {} words but only {} bytes follow",
                path_size,
                segments.len()
            )));
        }

        let mut class_id = None;
        let mut instance_number = None;
        let mut attribute_number = None;
        let mut position = 0;
        while position < path_size * 2 {
            let (tag, value, consumed) = Self::decode_segment(&segments[position..])?;
            match tag {
                CLASS_SEGMENT_8 | CLASS_SEGMENT_16 => class_id = Some(value),
                INSTANCE_SEGMENT_8 | INSTANCE_SEGMENT_16 => instance_number = Some(value),
                ATTRIBUTE_SEGMENT_8 | ATTRIBUTE_SEGMENT_16 => attribute_number = Some(value),
                other => {
                    return Err(CipError::DecodeFailure(format!(
                        "Unsupported EPATH segment 0x{:02X}",
                        other
                    )));
                }
            }
            position += consumed;
        }

        let class_id = class_id
            .ok_or_else(|| CipError::DecodeFailure("EPATH has no class segment".to_string()))?;
        let instance_number = instance_number
            .ok_or_else(|| CipError::DecodeFailure("EPATH has no instance segment".to_string()))?;
        Ok(Self {
            class_id,
            instance_number,
            attribute_number,
        })
    }

    fn decode_segment(data: &[u8]) -> CipResult<(u8, u16, usize)> {
        if data.len() < 2 {
            return Err(CipError::DecodeFailure(
                "Truncated EPATH segment".to_string(),
            ));
        }
        let tag = data[0];
        match tag {
            CLASS_SEGMENT_16 | INSTANCE_SEGMENT_16 | ATTRIBUTE_SEGMENT_16 => {
                if data.len() < 4 {
                    return Err(CipError::DecodeFailure(
                        "Truncated 16-bit EPATH segment".to_string(),
                    ));
                }
                Ok((tag, u16::from_le_bytes([data[2], data[3]]), 4))
            }
            _ => Ok((tag, data[1] as u16, 2)),
        }
    }
}

impl fmt::Display for Epath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Class 0x{:02X}, Instance {}",
            self.class_id, self.instance_number
        )?;
        if let Some(attribute) = self.attribute_number {
            write!(f, ", Attribute {}", attribute)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epath_size() {
        let path = Epath::new(0x4F, 1, Some(0));
        assert_eq!(path.path_size(), 3);

        let path = Epath::new(0x4F, 1, None);
        assert_eq!(path.path_size(), 2);

        let path = Epath::new(0x100, 1, None);
        assert_eq!(path.path_size(), 3);
    }

    #[test]
    fn test_epath_encode() {
        let path = Epath::new(0x4F, 1, Some(0));
        let encoded = path.encode();
        assert_eq!(encoded, vec![0x03, 0x00, 0x20, 0x4F, 0x24, 0x01, 0x30, 0x00]);
    }

    #[test]
    fn test_epath_round_trip() {
        let path = Epath::new(0x4E, 1, Some(9));
        assert_eq!(Epath::decode(&path.encode()).unwrap(), path);

        let wide = Epath::new(0x300, 2, None);
        assert_eq!(Epath::decode(&wide.encode()).unwrap(), wide);
    }

    #[test]
    fn test_epath_decode_truncated() {
        let path = Epath::new(0x4F, 1, Some(0));
        let encoded = path.encode();
        assert!(Epath::decode(&encoded[..4]).is_err());
        assert!(Epath::decode(&[0x01]).is_err());
    }
}
