//! Anigen - storyboard-to-video wizard
//!
//! Anigen walks a script through five steps and hands the result to a video
//! renderer: the script is parsed into scenes, characters and backgrounds get
//! images, characters get voices and the video gets background music, every
//! line is synthesized to speech, and the whole storyboard is rendered.
//!
//! # Architecture
//!
//! Anigen is organized as a workspace with focused crates:
//!
//! - `anigen_error` - Error types
//! - `anigen_core` - Script tree, side maps, audio records, slots and steps
//! - `anigen_storage` - Durable slot store and typed repositories
//! - `anigen_config` - Layered configuration
//! - `anigen_services` - Parser, speech and renderer clients
//! - `anigen_workflow` - Wizard, reconciliation, speech batching and export
//!
//! This crate (`anigen`) re-exports everything for convenience and ships the
//! `anigen` command-line binary.

pub use anigen_config::*;
pub use anigen_core::*;
pub use anigen_error::*;
pub use anigen_services::*;
pub use anigen_storage::*;
pub use anigen_workflow::*;
