//! Core types and utilities for the CIP object model
//!
//! This crate provides fundamental types, error handling, and the CIP
//! elementary data value model used throughout the implementation.

pub mod error;
pub mod epath;
pub mod value;

pub use error::{CipError, CipResult, GeneralStatus};
pub use epath::Epath;
pub use value::{CipDataType, CipValue};
