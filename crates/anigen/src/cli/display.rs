//! Plain-text rendering of step views.

use anigen_core::{VOICE_CATALOG, WizardStep};
use anigen_error::AnigenResult;
use anigen_services::HealthReport;
use anigen_workflow::{AudioStatus, StepView};

fn step_count() -> usize {
    WizardStep::VideoExport.index() + 1
}

/// Volume as a whole percentage.
pub fn percent(volume: f32) -> u32 {
    (volume * 100.0).round() as u32
}

fn assigned(present: bool) -> &'static str {
    if present { "assigned" } else { "none" }
}

/// Print the view of `step`.
pub fn view(step: WizardStep, view: &StepView) {
    println!(
        "Step {}/{}: {}",
        step.index() + 1,
        step_count(),
        step.title()
    );
    println!("{:-<60}", "");

    match view {
        StepView::ScriptEntry { script } => {
            if script.is_empty() {
                println!("No script yet. Use `anigen parse --text ...` or `--file ...`.");
            } else {
                println!("{}", script);
            }
        }

        StepView::PickerAssignment {
            scenes,
            characters,
            character_images,
            background_images,
        } => {
            println!("Scenes:");
            for scene in scenes {
                println!(
                    "  [{}] {} ({} lines), background: {}",
                    scene.key,
                    scene.description,
                    scene.line_count,
                    assigned(background_images.contains_key(&scene.key))
                );
            }
            println!("Characters:");
            for name in characters {
                println!(
                    "  {}: image {}",
                    name,
                    assigned(character_images.contains_key(name))
                );
            }
        }

        StepView::VoiceBgmSelection {
            characters,
            selected,
            total,
            bgm,
        } => {
            println!("Voices ({}/{} characters):", selected, total);
            for character in characters {
                println!(
                    "  {}: {}",
                    character.name,
                    character.voice.as_deref().unwrap_or("not selected")
                );
            }
            match bgm {
                Some(bgm) => println!(
                    "Background music: {} at {}%",
                    bgm.file_name,
                    percent(bgm.volume)
                ),
                None => println!("Background music: none"),
            }
        }

        StepView::SpeechGeneration { lines } => {
            let ready = lines
                .iter()
                .filter(|l| l.status == AudioStatus::Ready)
                .count();
            println!("Audio ready for {}/{} lines", ready, lines.len());
            for line in lines {
                let status = match &line.status {
                    AudioStatus::NoVoice => "no voice".to_string(),
                    AudioStatus::Missing => "not generated".to_string(),
                    AudioStatus::Generating => "generating".to_string(),
                    AudioStatus::Ready => "ready".to_string(),
                    AudioStatus::Failed(message) => format!("failed: {}", message),
                };
                println!("  {} {} ({}): {}", line.key, line.character, line.expression, line.text);
                println!("      {}", status);
            }
        }

        StepView::VideoExport(summary) => {
            println!(
                "Audio files: {}/{} available",
                summary.available_audio, summary.expected_audio
            );
            println!(
                "Character images: {}",
                assigned(summary.has_character_images)
            );
            println!(
                "Background images: {}",
                assigned(summary.has_background_images)
            );
            if summary.is_ready() {
                println!("Ready to render. Run `anigen export`.");
            }
            if let Some(video) = &summary.video {
                println!("Video: {}", video);
            }
        }

        StepView::ParseError { message, .. } => println!("Error: {}", message),

        StepView::Placeholder { message, .. } => println!("{}", message),
    }
}

/// Print the voice catalog.
pub fn voice_catalog() {
    for voice in VOICE_CATALOG {
        println!(
            "{:<28} {:<22} {:<7} {}",
            voice.short_name, voice.name, voice.gender, voice.locale
        );
    }
}

/// Print one line per service probe.
pub fn health(reports: &[(&'static str, AnigenResult<HealthReport>)]) {
    for (name, report) in reports {
        match report {
            Ok(report) if report.is_healthy() => println!("{:<9} healthy", name),
            Ok(report) => println!("{:<9} {}", name, report.status),
            Err(e) => println!("{:<9} {}", name, e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.333), 33);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_step_count() {
        assert_eq!(step_count(), 5);
    }
}
