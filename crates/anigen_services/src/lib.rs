//! Clients for the three remote services the wizard orchestrates.
//!
//! Parsing, speech synthesis and video compositing are opaque HTTP services.
//! Each is reached through an async trait so the wizard can be driven by a
//! stand-in during tests, and each trait has a `reqwest` client:
//!
//! - [`ParserClient`] → `POST /parse`
//! - [`SpeechClient`] → `POST /generate_tts`
//! - [`RendererClient`] → `POST /render`
//!
//! All three also answer `GET /health`.
//!
//! # Example
//!
//! ```rust,no_run
//! use anigen_services::{ParserClient, ScriptParser};
//!
//! # async fn example() -> anigen_error::AnigenResult<()> {
//! let parser = ParserClient::new("http://localhost:5001");
//! let parsed = parser.parse("Aki: It's late.").await?;
//! println!("{} scenes", parsed.storyboard().map_or(0, |s| s.scenes.len()));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod endpoint;
mod models;
mod parser;
mod renderer;
mod speech;
mod traits;

pub use anigen_error::{ServiceError, ServiceErrorKind};
pub use models::{
    HealthReport, ParseRequest, RenderBgm, RenderLine, RenderRequest, RenderResponse, RenderScene,
    RenderSubScene, SpeechRequest,
};
pub use parser::ParserClient;
pub use renderer::RendererClient;
pub use speech::SpeechClient;
pub use traits::{ScriptParser, SpeechSynthesizer, VideoRenderer};
