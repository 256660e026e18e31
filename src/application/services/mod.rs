//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod conversion;

pub use conversion::{compare_by_key, node_label, ConversionService, Input, Summary};
