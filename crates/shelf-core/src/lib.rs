//! # shelf-core
//!
//! Core crate for Shelf. Contains configuration schemas, the wire types
//! exchanged with the drive listing service, the collaborator traits
//! (`ResourceSource`, `EdgeCache`), and the unified error system.
//!
//! This crate has **no** internal dependencies on other Shelf crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
