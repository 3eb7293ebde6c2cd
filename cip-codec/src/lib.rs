//! Byte-level encoding/decoding for CIP elementary data types
//!
//! CIP transmits elementary values as raw little-endian octets; the
//! declared attribute type, not a tag byte, tells the receiver how to
//! interpret them.

pub mod decoder;
pub mod encoder;

pub use decoder::CipDecoder;
pub use encoder::CipEncoder;
