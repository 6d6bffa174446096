/// Shared utilities and error types
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
