//! Concurrent profile training
//!
//! One worker thread per language. Each worker owns its profile outright
//! while it trains — profiles cross threads exactly once, by move, at the
//! join barrier — so there is no shared mutable state and nothing to lock.
//! Progress flows back to the caller through a bounded event channel;
//! [`TrainingPipeline::join`] collects the finished profiles, already
//! pruned.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;
use tracing::{info, warn};

use crate::profile::LanguageProfile;
use crate::text::{normalize, tokenize};

/// Grams observed fewer than this many times are dropped after training.
pub const PRUNE_MIN_COUNT: f64 = 2.0;

/// Capacity of the progress event channel.
const EVENT_BUFFER: usize = 256;

/// Progress notification from a training worker.
#[derive(Debug, Clone)]
pub enum TrainEvent {
    /// One corpus unit was folded into a language's profile.
    Unit { lang: String },
    /// A language finished: units consumed and grams surviving the prune.
    Done {
        lang: String,
        units: usize,
        grams: usize,
    },
}

/// Finished profile for one language.
#[derive(Debug)]
pub struct TrainedLanguage {
    pub lang: String,
    pub profile: LanguageProfile,
    pub units: usize,
}

/// Combined counters for a whole run.
#[derive(Debug, Default)]
pub struct TrainingStats {
    pub languages: usize,
    pub failed: usize,
    pub units: usize,
}

/// Handle to a running set of training workers.
pub struct TrainingPipeline {
    events: Option<Receiver<TrainEvent>>,
    handles: Vec<thread::JoinHandle<TrainedLanguage>>,
}

impl TrainingPipeline {
    /// Take the event receiver - can only be taken once.
    pub fn take_events(&mut self) -> Option<Receiver<TrainEvent>> {
        self.events.take()
    }

    /// Block until every worker finishes; collect profiles and stats.
    pub fn join(self) -> (Vec<TrainedLanguage>, TrainingStats) {
        let TrainingPipeline { events, handles } = self;
        // A caller that never drained events must not backpressure the
        // workers into a deadlock; dropping the receiver turns their sends
        // into no-ops.
        drop(events);

        let mut trained = Vec::with_capacity(handles.len());
        let mut stats = TrainingStats::default();
        for handle in handles {
            match handle.join() {
                Ok(result) => {
                    stats.languages += 1;
                    stats.units += result.units;
                    trained.push(result);
                }
                Err(_) => {
                    stats.failed += 1;
                    warn!("training worker panicked");
                }
            }
        }
        (trained, stats)
    }
}

/// Spawn one training worker per `(language, unit source)` pair.
///
/// Returns immediately. Workers stream [`TrainEvent`]s while they run;
/// [`TrainingPipeline::join`] returns the finished profiles, pruned with
/// [`PRUNE_MIN_COUNT`].
pub fn spawn_training<S>(sources: Vec<(String, S)>) -> TrainingPipeline
where
    S: IntoIterator<Item = String> + Send + 'static,
    S::IntoIter: Send,
{
    let (event_tx, event_rx) = bounded::<TrainEvent>(EVENT_BUFFER);

    let mut handles = Vec::with_capacity(sources.len());
    for (lang, source) in sources {
        let tx = event_tx.clone();
        handles.push(thread::spawn(move || train_language(lang, source, tx)));
    }
    // Receiver sees a disconnect once the last worker drops its sender.
    drop(event_tx);

    TrainingPipeline {
        events: Some(event_rx),
        handles,
    }
}

fn train_language<S>(lang: String, source: S, events: Sender<TrainEvent>) -> TrainedLanguage
where
    S: IntoIterator<Item = String>,
{
    let mut profile = LanguageProfile::new();
    let mut units = 0usize;
    for unit in source {
        profile.train(&tokenize(&normalize(&unit)));
        units += 1;
        let _ = events.send(TrainEvent::Unit { lang: lang.clone() });
    }
    profile.prune(PRUNE_MIN_COUNT);
    info!("ready {} ({} units, {} grams)", lang, units, profile.len());
    let _ = events.send(TrainEvent::Done {
        lang: lang.clone(),
        units,
        grams: profile.len(),
    });
    TrainedLanguage {
        lang,
        profile,
        units,
    }
}
