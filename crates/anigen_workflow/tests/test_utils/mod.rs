//! Test utilities for wizard tests.
//!
//! This module provides stand-in services and session helpers.

#![allow(dead_code)]

pub mod mock_services;

#[allow(unused_imports)]
pub use mock_services::{MockParser, MockRenderer, MockSpeech};

use anigen_core::ParsedScript;
use anigen_storage::{DurableStore, InMemoryStore};
use anigen_workflow::{Services, Session, Wizard, WizardSettings};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Two scenes, three speakers, `lines` lines spread over them.
pub fn storyboard_json(lines: usize) -> serde_json::Value {
    let speakers = ["Aki", "Ren", "Mio"];
    let make = |range: std::ops::Range<usize>| -> Vec<serde_json::Value> {
        range
            .map(|i| {
                json!({
                    "character": speakers[i % speakers.len()],
                    "expression": "calm",
                    "line": format!("Line number {}", i),
                })
            })
            .collect()
    };
    let split = lines / 2;
    json!({
        "scenes": [
            {
                "scene_id": "s1",
                "scene_desc": "Rooftop",
                "sub_scenes": [{"camera_movement": "pan", "storyboards": make(0..split)}]
            },
            {
                "scene_id": "s2",
                "scene_desc": "Classroom",
                "sub_scenes": [{"camera_movement": "static", "storyboards": make(split..lines)}]
            }
        ]
    })
}

/// Parsed form of [`storyboard_json`].
pub fn storyboard(lines: usize) -> ParsedScript {
    serde_json::from_value(storyboard_json(lines)).expect("valid storyboard")
}

/// Settings with no pause between speech groups.
pub fn fast_settings() -> WizardSettings {
    WizardSettings::builder()
        .batch_pause(Duration::from_millis(5))
        .build()
        .expect("valid settings")
}

/// Stand-ins wired as services.
pub fn services(parser: &MockParser, speech: &MockSpeech, renderer: &MockRenderer) -> Services {
    Services {
        parser: Arc::new(parser.clone()),
        speech: Arc::new(speech.clone()),
        renderer: Arc::new(renderer.clone()),
    }
}

/// Wizard over an in-memory store.
pub async fn wizard(parser: &MockParser, speech: &MockSpeech, renderer: &MockRenderer) -> Wizard {
    let store: Arc<dyn DurableStore> = Arc::new(InMemoryStore::new());
    wizard_on(store, parser, speech, renderer).await
}

/// Wizard over `store`.
pub async fn wizard_on(
    store: Arc<dyn DurableStore>,
    parser: &MockParser,
    speech: &MockSpeech,
    renderer: &MockRenderer,
) -> Wizard {
    Wizard::open(
        Session::new(store),
        services(parser, speech, renderer),
        fast_settings(),
    )
    .await
    .expect("wizard opens")
}

/// Give every character of [`storyboard_json`] a catalog voice.
pub async fn assign_voices(wizard: &Wizard) {
    for (name, voice) in [
        ("Aki", "en-US-AriaNeural"),
        ("Ren", "en-US-GuyNeural"),
        ("Mio", "en-US-JennyNeural"),
    ] {
        wizard.set_voice(name, voice).await.expect("voice set");
    }
}
