//! Error types for the Anigen wizard.
//!
//! This crate provides the foundation error types used throughout the Anigen workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every failure is caught at the command boundary and shown to the user as
//! text, so `Display` output is written for humans first.
//!
//! # Examples
//!
//! ```
//! use anigen_error::{AnigenResult, ServiceError, ServiceErrorKind};
//!
//! fn parse_script() -> AnigenResult<String> {
//!     Err(ServiceError::new(ServiceErrorKind::Network {
//!         service: "parser".to_string(),
//!         message: "Connection refused".to_string(),
//!     }))?
//! }
//!
//! match parse_script() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod export;
mod json;
mod service;
mod storage;
mod upload;
mod wizard;

pub use config::ConfigError;
pub use error::{AnigenError, AnigenErrorKind, AnigenResult};
pub use export::{ExportError, ExportErrorKind};
pub use json::JsonError;
pub use service::{ServiceError, ServiceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use upload::{UploadError, UploadErrorKind};
pub use wizard::{WizardError, WizardErrorKind};
