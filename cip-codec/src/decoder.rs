//! Decoder for CIP elementary data types

use cip_core::{CipDataType, CipError, CipResult, CipValue, Epath};

/// Decoder consuming little-endian CIP wire bytes
pub struct CipDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> CipDecoder<'a> {
    /// Create a new decoder
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Decode a value of the given declared type
    ///
    /// CIP carries no tag bytes; the attribute's registered data type
    /// drives the interpretation.
    pub fn decode_value(&mut self, data_type: CipDataType) -> CipResult<CipValue> {
        match data_type {
            CipDataType::Bool => Ok(CipValue::Bool(self.decode_u8()? != 0x00)),
            CipDataType::Sint => Ok(CipValue::Sint(self.decode_i8()?)),
            CipDataType::Int => Ok(CipValue::Int(self.decode_i16()?)),
            CipDataType::Dint => Ok(CipValue::Dint(self.decode_i32()?)),
            CipDataType::Lint => Ok(CipValue::Lint(self.decode_i64()?)),
            CipDataType::Usint => Ok(CipValue::Usint(self.decode_u8()?)),
            CipDataType::Uint => Ok(CipValue::Uint(self.decode_u16()?)),
            CipDataType::Udint => Ok(CipValue::Udint(self.decode_u32()?)),
            CipDataType::Ulint => Ok(CipValue::Ulint(self.decode_u64()?)),
            CipDataType::Real => Ok(CipValue::Real(self.decode_f32()?)),
            CipDataType::Lreal => Ok(CipValue::Lreal(self.decode_f64()?)),
            CipDataType::Epath => Ok(CipValue::Epath(self.decode_epath()?)),
            CipDataType::Opaque => Err(CipError::DecodeFailure(
                "Opaque attributes have no generic decoding".to_string(),
            )),
        }
    }

    /// Decode a u8
    pub fn decode_u8(&mut self) -> CipResult<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Decode an i8
    pub fn decode_i8(&mut self) -> CipResult<i8> {
        Ok(self.decode_u8()? as i8)
    }

    /// Decode a u16 (little-endian)
    pub fn decode_u16(&mut self) -> CipResult<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Decode an i16 (little-endian)
    pub fn decode_i16(&mut self) -> CipResult<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Decode a u32 (little-endian)
    pub fn decode_u32(&mut self) -> CipResult<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decode an i32 (little-endian)
    pub fn decode_i32(&mut self) -> CipResult<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decode a u64 (little-endian)
    pub fn decode_u64(&mut self) -> CipResult<u64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    /// Decode an i64 (little-endian)
    pub fn decode_i64(&mut self) -> CipResult<i64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(raw))
    }

    /// Decode an f32 (IEEE 754 little-endian)
    pub fn decode_f32(&mut self) -> CipResult<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Decode an f64 (IEEE 754 little-endian)
    pub fn decode_f64(&mut self) -> CipResult<f64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }

    /// Decode an EPATH
    pub fn decode_epath(&mut self) -> CipResult<Epath> {
        let path = Epath::decode(&self.buffer[self.position..])?;
        self.position += 2 + path.path_size() as usize * 2;
        Ok(path)
    }

    /// Number of bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    fn read_bytes(&mut self, count: usize) -> CipResult<&'a [u8]> {
        if self.remaining() < count {
            return Err(CipError::DecodeFailure(format!(
                "Need {} bytes but only {} remain",
                count,
                self.remaining()
            )));
        }
        let bytes = &self.buffer[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }
}
