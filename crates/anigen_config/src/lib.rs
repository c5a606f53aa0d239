//! Layered configuration for the Anigen wizard.
//!
//! Values come from, in increasing precedence:
//! 1. Bundled defaults (`anigen.toml` shipped with the crate)
//! 2. `~/.config/anigen/anigen.toml`
//! 3. `./anigen.toml`, or an explicit file passed by the caller
//! 4. `ANIGEN__SECTION__KEY` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{AnigenConfig, ServicesConfig, SpeechConfig, StorageConfig, UploadsConfig};
