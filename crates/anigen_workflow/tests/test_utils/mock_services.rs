//! Stand-in services for testing.

use anigen_core::{AudioClip, ParsedScript, VideoReference};
use anigen_error::{AnigenResult, ServiceError, ServiceErrorKind};
use anigen_services::{
    HealthReport, RenderRequest, ScriptParser, SpeechRequest, SpeechSynthesizer, VideoRenderer,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn healthy(service: &str) -> AnigenResult<HealthReport> {
    Ok(HealthReport {
        status: "healthy".to_string(),
        service: service.to_string(),
    })
}

/// Parser that answers with a fixed result.
#[derive(Clone)]
pub struct MockParser {
    result: Arc<Mutex<ParsedScript>>,
    calls: Arc<AtomicUsize>,
}

impl MockParser {
    /// Always answer with `result`.
    pub fn new(result: ParsedScript) -> Self {
        Self {
            result: Arc::new(Mutex::new(result)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer with `result` from now on.
    pub fn respond_with(&self, result: ParsedScript) {
        *self.result.lock().unwrap() = result;
    }

    /// Number of parse calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptParser for MockParser {
    async fn parse(&self, _text: &str) -> AnigenResult<ParsedScript> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.lock().unwrap().clone())
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        healthy("parser")
    }
}

/// Speech service that records concurrency and fails chosen lines.
#[derive(Clone)]
pub struct MockSpeech {
    failing: Arc<Mutex<HashSet<String>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl MockSpeech {
    /// Succeed for every line after a short delay.
    pub fn new() -> Self {
        Self {
            failing: Arc::new(Mutex::new(HashSet::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::from_millis(20),
        }
    }

    /// Fail requests whose text is `text`.
    pub fn fail_on(&self, text: impl Into<String>) {
        self.failing.lock().unwrap().insert(text.into());
    }

    /// Highest number of overlapping requests seen.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of synthesize calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> AnigenResult<AudioClip> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&request.text) {
            return Err(ServiceError::new(ServiceErrorKind::Status {
                service: "speech".to_string(),
                status: 500,
                message: "voice offline".to_string(),
            })
            .into());
        }
        Ok(AudioClip::new(
            "audio/mpeg",
            format!("{}|{}", request.voice, request.text).into_bytes(),
        ))
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        healthy("speech")
    }
}

/// Renderer that records requests.
#[derive(Clone)]
pub struct MockRenderer {
    rejection: Option<String>,
    requests: Arc<Mutex<Vec<RenderRequest>>>,
}

impl MockRenderer {
    /// Answer every request with a video path.
    pub fn new() -> Self {
        Self {
            rejection: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with an `{error}` body.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoRenderer for MockRenderer {
    async fn render(&self, request: &RenderRequest) -> AnigenResult<VideoReference> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.rejection {
            Some(message) => {
                Err(ServiceError::new(ServiceErrorKind::Rejected(message.clone())).into())
            }
            None => Ok(VideoReference::from("/videos/output.mp4".to_string())),
        }
    }

    async fn health(&self) -> AnigenResult<HealthReport> {
        healthy("renderer")
    }
}
