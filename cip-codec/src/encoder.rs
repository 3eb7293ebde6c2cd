//! Encoder for CIP elementary data types

use cip_core::CipValue;

/// Encoder producing little-endian CIP wire bytes
pub struct CipEncoder {
    buffer: Vec<u8>,
}

impl CipEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode a CipValue
    pub fn encode_value(&mut self, value: &CipValue) {
        match value {
            CipValue::Bool(b) => self.encode_u8(if *b { 0x01 } else { 0x00 }),
            CipValue::Sint(i) => self.encode_i8(*i),
            CipValue::Int(i) => self.encode_i16(*i),
            CipValue::Dint(i) => self.encode_i32(*i),
            CipValue::Lint(i) => self.encode_i64(*i),
            CipValue::Usint(u) => self.encode_u8(*u),
            CipValue::Uint(u) => self.encode_u16(*u),
            CipValue::Udint(u) => self.encode_u32(*u),
            CipValue::Ulint(u) => self.encode_u64(*u),
            CipValue::Real(r) => self.encode_f32(*r),
            CipValue::Lreal(r) => self.encode_f64(*r),
            CipValue::Epath(p) => self.encode_bytes(&p.encode()),
            CipValue::OctetString(s) => self.encode_bytes(s),
        }
    }

    /// Encode a u8
    pub fn encode_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Encode an i8
    pub fn encode_i8(&mut self, value: i8) {
        self.buffer.push(value as u8);
    }

    /// Encode a u16 (little-endian)
    pub fn encode_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode an i16 (little-endian)
    pub fn encode_i16(&mut self, value: i16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode a u32 (little-endian)
    pub fn encode_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode an i32 (little-endian)
    pub fn encode_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode a u64 (little-endian)
    pub fn encode_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode an i64 (little-endian)
    pub fn encode_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode an f32 (IEEE 754 little-endian)
    pub fn encode_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode an f64 (IEEE 754 little-endian)
    pub fn encode_f64(&mut self, value: f64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Encode raw bytes
    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Get the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of bytes encoded so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check whether anything has been encoded
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the encoder buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for CipEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cip_core::Epath;

    #[test]
    fn test_encode_u16() {
        let mut encoder = CipEncoder::new();
        encoder.encode_u16(0x1234);
        assert_eq!(encoder.as_bytes(), &[0x34, 0x12]);
    }

    #[test]
    fn test_encode_i16_negative() {
        let mut encoder = CipEncoder::new();
        encoder.encode_i16(-2);
        assert_eq!(encoder.as_bytes(), &[0xFE, 0xFF]);
    }

    #[test]
    fn test_encode_f32() {
        let mut encoder = CipEncoder::new();
        encoder.encode_f32(1.0);
        assert_eq!(encoder.as_bytes(), &[0x00, 0x00, 0x80, 0x3F]);
    }

    #[test]
    fn test_encode_value() {
        let mut encoder = CipEncoder::new();
        encoder.encode_value(&CipValue::Uint(7));
        encoder.encode_value(&CipValue::Epath(Epath::new(0x4F, 1, None)));
        assert_eq!(
            encoder.into_bytes(),
            vec![0x07, 0x00, 0x02, 0x00, 0x20, 0x4F, 0x24, 0x01]
        );
    }
}
