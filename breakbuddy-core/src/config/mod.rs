//! Device configuration
//!
//! - [`types`]: validated configuration types
//! - [`parse`]: parser for the `breakbuddy.toml` subset

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
