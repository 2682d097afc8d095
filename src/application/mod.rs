//! # Application Layer
//!
//! Ports the connectors implement and the use cases that drive them.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
