//! Command dispatch.

use super::commands::{
    BgmCommands, Cli, Commands, ExportCommands, ImageCommands, ScriptSource, SpeechCommands,
    VoiceCommands,
};
use super::display;
use anigen_config::AnigenConfig;
use anigen_core::AudioKey;
use anigen_error::{AnigenResult, UploadError, UploadErrorKind};
use anigen_storage::open_or_in_memory;
use anigen_workflow::{Completion, Services, Session, Wizard, WizardSettings, parse_step};

/// Open the session described by `cli` and run its command.
pub async fn run(cli: Cli) -> AnigenResult<()> {
    let mut config = AnigenConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.session {
        config = config.with_session_dir(dir);
    }

    if let Commands::Voice(VoiceCommands::List) = cli.command {
        display::voice_catalog();
        return Ok(());
    }

    let session_dir = config.storage().resolved_session_dir();
    let store = open_or_in_memory(&session_dir, *config.storage().schema_version()).await;
    if !store.is_persistent() {
        println!("Warning: session storage unavailable, changes will not be saved.");
    }
    tracing::debug!(session = %session_dir.display(), "Session opened");

    let wizard = Wizard::open(
        Session::new(store),
        Services::from_config(config.services()),
        WizardSettings::from_config(&config),
    )
    .await?;

    dispatch(&wizard, cli.command).await
}

async fn dispatch(wizard: &Wizard, command: Commands) -> AnigenResult<()> {
    match command {
        Commands::Status => show_current(wizard).await,

        Commands::Step { step } => {
            wizard.select(parse_step(&step)?).await?;
            show_current(wizard).await
        }

        Commands::Next => {
            wizard.advance().await?;
            show_current(wizard).await
        }

        Commands::Parse(source) => {
            let text = read_script(source).await?;
            let parsed = wizard.submit_script(&text).await?;
            match parsed.error() {
                Some(error) => println!("Parser reported an error: {}", error),
                None => println!("Script parsed."),
            }
            show_current(wizard).await
        }

        Commands::Image(cmd) => image(wizard, cmd).await,
        Commands::Voice(cmd) => voice(wizard, cmd).await,
        Commands::Bgm(cmd) => bgm(wizard, cmd).await,
        Commands::Speech(cmd) => speech(wizard, cmd).await,

        Commands::Export { action: None } => {
            println!("Generating video...");
            let video = wizard.export_video().await?;
            println!("Video generated: {}", video);
            Ok(())
        }

        Commands::Export {
            action: Some(ExportCommands::Clear),
        } => {
            wizard.clear_video().await?;
            println!("Video cleared.");
            Ok(())
        }

        Commands::Health => {
            display::health(&wizard.health().await);
            Ok(())
        }

        Commands::Reset => {
            wizard.reset().await?;
            println!("Session cleared.");
            Ok(())
        }
    }
}

async fn show_current(wizard: &Wizard) -> AnigenResult<()> {
    let step = wizard.step().await?;
    display::view(step, &wizard.view().await?);
    Ok(())
}

async fn read_script(source: ScriptSource) -> AnigenResult<String> {
    match (source.text, source.file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => tokio::fs::read_to_string(&path).await.map_err(|e| {
            UploadError::new(UploadErrorKind::Read(format!("{}: {}", path.display(), e))).into()
        }),
        (None, None) => Ok(String::new()),
    }
}

async fn image(wizard: &Wizard, cmd: ImageCommands) -> AnigenResult<()> {
    match cmd {
        ImageCommands::Character { name, file } => {
            wizard.set_character_image(&name, &file).await?;
            println!("Image assigned to {}.", name);
        }
        ImageCommands::Background { scene_key, file } => {
            wizard.set_background_image(&scene_key, &file).await?;
            println!("Background assigned to scene {}.", scene_key);
        }
        ImageCommands::RemoveCharacter { name } => {
            if wizard.remove_character_image(&name).await? {
                println!("Image removed from {}.", name);
            } else {
                println!("{} has no image.", name);
            }
        }
        ImageCommands::RemoveBackground { scene_key } => {
            if wizard.remove_background_image(&scene_key).await? {
                println!("Background removed from scene {}.", scene_key);
            } else {
                println!("Scene {} has no background.", scene_key);
            }
        }
    }
    Ok(())
}

async fn voice(wizard: &Wizard, cmd: VoiceCommands) -> AnigenResult<()> {
    match cmd {
        VoiceCommands::Set { name, voice } => {
            wizard.set_voice(&name, &voice).await?;
            println!("{} will speak with {}.", name, voice);
        }
        VoiceCommands::Clear { name: Some(name) } => {
            if wizard.clear_voice(&name).await? {
                println!("Voice cleared for {}.", name);
            } else {
                println!("{} has no voice.", name);
            }
        }
        VoiceCommands::Clear { name: None } => {
            wizard.clear_voices().await?;
            println!("All voices cleared.");
        }
        VoiceCommands::List => display::voice_catalog(),
    }
    Ok(())
}

async fn bgm(wizard: &Wizard, cmd: BgmCommands) -> AnigenResult<()> {
    match cmd {
        BgmCommands::Set { file } => {
            let bgm = wizard.set_bgm(&file).await?;
            println!(
                "Background music set to {} at {}%.",
                bgm.file_name,
                display::percent(bgm.volume)
            );
        }
        BgmCommands::Volume { volume } => {
            let bgm = wizard.set_bgm_volume(volume).await?;
            println!("Volume set to {}%.", display::percent(bgm.volume));
        }
        BgmCommands::Remove => {
            wizard.remove_bgm().await?;
            println!("Background music removed.");
        }
    }
    Ok(())
}

async fn speech(wizard: &Wizard, cmd: SpeechCommands) -> AnigenResult<()> {
    match cmd {
        SpeechCommands::Generate => {
            let report = wizard.generate_all_speech().await?;
            println!(
                "Generated {} of {} audio files ({} failed).",
                report.succeeded, report.requested, report.failed
            );
            show_current(wizard).await?;
        }
        SpeechCommands::Regenerate { id } => {
            match wizard.regenerate_line(&AudioKey::from(id.clone())).await? {
                Completion::Stored => println!("Audio generated for {}.", id),
                Completion::Failed(message) => println!("Generation failed for {}: {}", id, message),
                Completion::Stale => println!("Line {} changed while generating.", id),
            }
        }
        SpeechCommands::Delete { id } => {
            if wizard.delete_audio(&AudioKey::from(id.clone())).await? {
                println!("Audio deleted for {}.", id);
            } else {
                println!("{} has no audio.", id);
            }
        }
        SpeechCommands::Clear => {
            wizard.clear_audio().await?;
            println!("All audio deleted.");
        }
        SpeechCommands::Save { id, file } => {
            let bytes = wizard.save_clip(&AudioKey::from(id), &file).await?;
            println!("Wrote {} bytes to {}.", bytes, file.display());
        }
    }
    Ok(())
}
