//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic, reads inputs and serializes results.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{IoResultExt, JsonResultExt};
pub use services::{node_label, ConversionService, Input, Summary};
