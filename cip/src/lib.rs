//! cip_rs - attribute-addressable CIP object model
//!
//! This library implements the permission-checked attribute read/write
//! path of an industrial-automation device's object model, together
//! with the Base Energy object (class 0x4E) and its odometer-style
//! energy counters.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `cip-core`: Error types, general status codes, data values, EPATH
//! - `cip-codec`: Little-endian encoding/decoding of elementary types
//! - `cip-object`: Attribute registry, capability checks, message routing
//! - `cip-energy`: The Base Energy object and metering cycle
//!
//! # Usage
//!
//! ```no_run
//! use cip::energy::BaseEnergyObject;
//! use cip::object::{MessageRouterRequest, dispatch};
//!
//! # async fn example() -> cip::CipResult<()> {
//! let object = BaseEnergyObject::new(1)?;
//! object.accumulate(1500).await;
//! let response = dispatch(&object, &MessageRouterRequest::get_single(7)).await;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use cip_core::{CipDataType, CipError, CipResult, CipValue, Epath, GeneralStatus};

// Re-export the codec
pub mod codec {
    pub use cip_codec::*;
}

// Re-export the object-model plumbing
pub mod object {
    pub use cip_object::*;
}

// Re-export the Base Energy object
pub mod energy {
    pub use cip_energy::*;
}
