//! # Domain Layer
//!
//! Requirements, terms and dictionaries, plus the identifier rules shared by
//! every layer. Nothing here touches the file system.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
