//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Anigen - turn a script into a narrated, illustrated video
#[derive(Parser, Debug)]
#[command(name = "anigen")]
#[command(about = "Turn a script into a narrated, illustrated video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Session directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub session: Option<PathBuf>,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current step and its state
    Status,

    /// Jump to a step by number (1-5) or name
    Step {
        /// Step number or name, e.g. `3` or `voice-bgm-selection`
        step: String,
    },

    /// Continue to the next step
    Next,

    /// Submit the script and parse it
    Parse(ScriptSource),

    /// Character and background images
    #[command(subcommand)]
    Image(ImageCommands),

    /// Character voices
    #[command(subcommand)]
    Voice(VoiceCommands),

    /// Background music
    #[command(subcommand)]
    Bgm(BgmCommands),

    /// Speech generation
    #[command(subcommand)]
    Speech(SpeechCommands),

    /// Render the video, or clear the stored one
    Export {
        /// Optional action
        #[command(subcommand)]
        action: Option<ExportCommands>,
    },

    /// Probe the parser, speech and renderer services
    Health,

    /// Clear every stored slot
    Reset,
}

/// Where the script comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ScriptSource {
    /// Script text
    #[arg(long)]
    pub text: Option<String>,

    /// File holding the script
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Image subcommands
#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Assign an image to a character
    Character {
        /// Character name as it appears in the script
        name: String,
        /// Image file
        file: PathBuf,
    },

    /// Assign a background to a scene
    Background {
        /// Scene key shown by `status` on the picker step
        scene_key: String,
        /// Image file
        file: PathBuf,
    },

    /// Remove a character's image
    RemoveCharacter {
        /// Character name
        name: String,
    },

    /// Remove a scene's background
    RemoveBackground {
        /// Scene key
        scene_key: String,
    },
}

/// Voice subcommands
#[derive(Subcommand, Debug)]
pub enum VoiceCommands {
    /// Give a character a voice
    Set {
        /// Character name
        name: String,
        /// Voice short name, see `voice list`
        voice: String,
    },

    /// Clear one character's voice, or every voice
    Clear {
        /// Character name; all characters when omitted
        name: Option<String>,
    },

    /// List available voices
    List,
}

/// Background music subcommands
#[derive(Subcommand, Debug)]
pub enum BgmCommands {
    /// Use an audio file as background music
    Set {
        /// Audio file
        file: PathBuf,
    },

    /// Set the volume between 0.0 and 1.0
    Volume {
        /// Volume
        volume: f32,
    },

    /// Remove the background music
    Remove,
}

/// Speech subcommands
#[derive(Subcommand, Debug)]
pub enum SpeechCommands {
    /// Generate audio for every line that lacks it
    Generate,

    /// Generate one line again
    Regenerate {
        /// Line id shown by `status` on the speech step
        id: String,
    },

    /// Delete one line's audio
    Delete {
        /// Line id
        id: String,
    },

    /// Delete all audio
    Clear,

    /// Write one line's audio to a file
    Save {
        /// Line id
        id: String,
        /// Destination file
        file: PathBuf,
    },
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Forget the stored video
    Clear,
}
