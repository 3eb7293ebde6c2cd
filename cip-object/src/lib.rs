//! Attribute registry, capability checks and message routing for CIP objects
//!
//! This crate provides the generic object-model plumbing that individual
//! device objects plug into: per-attribute capability sets fixed at
//! registration time, the message router request/response envelope, and
//! the dispatcher that gates every attribute access by capability before
//! handing it to the object.

pub mod attribute;
pub mod message;
pub mod router;

pub use attribute::{AttributeCapability, AttributeEntry, AttributeRegistry};
pub use message::{MessageRouterRequest, MessageRouterResponse, ServiceCode};
pub use router::{CipObject, dispatch};
