//! Domain layer for SkyView
//!
//! Contains the core weather model: locations, observations, feedback and the
//! value objects they are built from. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
