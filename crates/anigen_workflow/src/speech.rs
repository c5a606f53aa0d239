//! Speech generation in fixed-size concurrent groups.

use crate::ledger::{AudioLedger, Completion};
use anigen_core::{AudioKey, AudioRecords, Storyboard, VoiceMap};
use anigen_services::{SpeechRequest, SpeechSynthesizer};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Default number of requests in flight per group.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Default pause between groups.
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(500);

/// One line to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechTask {
    /// Audio record key of the line
    pub key: AudioKey,
    /// Text to speak
    pub text: String,
    /// Voice short name
    pub voice: String,
}

/// Lines that can be synthesized: text, a speaker and a voice for that speaker.
pub fn eligible_tasks(storyboard: &Storyboard, voices: &VoiceMap) -> Vec<SpeechTask> {
    storyboard
        .lines()
        .filter(|(_, line)| line.is_speakable())
        .filter_map(|(position, line)| {
            voices.get(&line.character).map(|voice| SpeechTask {
                key: line.audio_key(position),
                text: line.line.clone(),
                voice: voice.clone(),
            })
        })
        .collect()
}

/// Tasks "generate all" should issue: no record yet, no audio, or an error.
pub fn pending_tasks(tasks: Vec<SpeechTask>, records: &AudioRecords) -> Vec<SpeechTask> {
    tasks
        .into_iter()
        .filter(|task| {
            records
                .get(&task.key)
                .is_none_or(|record| record.needs_generation())
        })
        .collect()
}

/// Tally of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeechReport {
    /// Requests issued
    pub requested: usize,
    /// Audio stored
    pub succeeded: usize,
    /// Failures recorded on their records
    pub failed: usize,
    /// Results dropped because the record changed meanwhile
    pub stale: usize,
}

/// Issues speech requests group by group and records each outcome.
///
/// Per-line failures land in that line's record and never stop the run.
#[derive(Clone)]
pub struct SpeechDriver {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    batch_size: usize,
    batch_pause: Duration,
}

impl std::fmt::Debug for SpeechDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechDriver")
            .field("batch_size", &self.batch_size)
            .field("batch_pause", &self.batch_pause)
            .finish_non_exhaustive()
    }
}

impl SpeechDriver {
    /// Create a driver with the default pacing.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }

    /// Use `batch_size` concurrent requests per group (at least one).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Wait `batch_pause` between groups.
    pub fn with_batch_pause(mut self, batch_pause: Duration) -> Self {
        self.batch_pause = batch_pause;
        self
    }

    /// Run every task, `batch_size` at a time, pausing between groups.
    #[tracing::instrument(skip(self, tasks, ledger), fields(tasks = tasks.len(), batch_size = self.batch_size))]
    pub async fn run(&self, tasks: &[SpeechTask], ledger: &AudioLedger) -> SpeechReport {
        let mut report = SpeechReport::default();
        tracing::info!("Starting generation of {} audio files", tasks.len());

        for (index, group) in tasks.chunks(self.batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.batch_pause).await;
            }
            tracing::debug!(group = index, size = group.len(), "Issuing group");

            let completions = join_all(group.iter().map(|task| self.run_one(task, ledger))).await;
            for completion in completions {
                report.requested += 1;
                match completion {
                    Completion::Stored => report.succeeded += 1,
                    Completion::Failed(_) => report.failed += 1,
                    Completion::Stale => report.stale += 1,
                }
            }
        }

        tracing::info!(
            succeeded = report.succeeded,
            failed = report.failed,
            stale = report.stale,
            "Speech generation finished"
        );
        report
    }

    /// Synthesize a single task and record the outcome.
    #[tracing::instrument(skip(self, task, ledger), fields(key = %task.key, voice = %task.voice))]
    pub async fn run_one(&self, task: &SpeechTask, ledger: &AudioLedger) -> Completion {
        let generation = match ledger.begin(&task.key).await {
            Ok(generation) => generation,
            Err(e) => {
                tracing::error!(error = %e, "Could not mark record as generating");
                return Completion::Failed(e.user_message());
            }
        };

        let outcome = self
            .synthesizer
            .synthesize(&SpeechRequest::new(&task.text, &task.voice))
            .await;

        match ledger.complete(&task.key, generation, outcome).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(error = %e, "Could not store speech result");
                Completion::Failed(e.user_message())
            }
        }
    }
}
