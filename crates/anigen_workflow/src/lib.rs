//! Wizard engine for Anigen.
//!
//! This crate turns a script into a rendered video through five steps:
//! parse the script, assign images, assign voices and background music,
//! synthesize speech, and export. State lives in a [`Session`] of typed slot
//! repositories over a durable store, so an interrupted wizard resumes where
//! it stopped.
//!
//! # Features
//!
//! - **Reconciliation**: [`reconcile`] keeps the parsed script's derived
//!   images and voices equal to the side maps
//! - **Cascade**: changing the script clears every slot derived from it
//! - **Speech batching**: [`SpeechDriver`] issues requests in fixed-size
//!   concurrent groups and drops results that arrive for superseded records
//! - **Export**: [`assemble`] builds the renderer payload and refuses to call
//!   the renderer without scenes or audio
//!
//! # Example
//!
//! ```rust,no_run
//! use anigen_config::AnigenConfig;
//! use anigen_storage::open_or_in_memory;
//! use anigen_workflow::{Services, Session, Wizard, WizardSettings};
//!
//! # async fn example() -> anigen_error::AnigenResult<()> {
//! let config = AnigenConfig::load(None)?;
//! let store = open_or_in_memory(
//!     &config.storage().resolved_session_dir(),
//!     *config.storage().schema_version(),
//! )
//! .await;
//! let wizard = Wizard::open(
//!     Session::new(store),
//!     Services::from_config(config.services()),
//!     WizardSettings::from_config(&config),
//! )
//! .await?;
//!
//! wizard.submit_script("Aki: It's late.").await?;
//! println!("{:?}", wizard.view().await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export;
mod ledger;
mod reconcile;
mod session;
mod settings;
mod speech;
mod upload;
mod view;
mod wizard;

pub use export::{ExportAssembler, assemble};
pub use ledger::{AudioLedger, Completion, RESTORE_FAILED};
pub use reconcile::{SideMaps, reconcile};
pub use session::Session;
pub use settings::{
    DEFAULT_CLIP_READY_TIMEOUT, Services, WizardSettings, WizardSettingsBuilder,
    WizardSettingsBuilderError,
};
pub use speech::{
    DEFAULT_BATCH_PAUSE, DEFAULT_BATCH_SIZE, SpeechDriver, SpeechReport, SpeechTask,
    eligible_tasks, pending_tasks,
};
pub use upload::{Upload, UploadKind, UploadPolicy, read_upload};
pub use view::{AudioStatus, CharacterVoice, ExportSummary, LineStatus, SceneSummary, StepView};
pub use wizard::{Wizard, parse_step};
