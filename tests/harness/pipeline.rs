use std::sync::Arc;
use std::time::Duration;

use pairpulse::application::PollScheduler;
use pairpulse::domain::{DiscoveryCriteria, DiscoveryFilter, PairWatch};
use pairpulse::testkit::domain::EvaluatorBuilder;
use pairpulse::testkit::market::{ScriptedFeed, ScriptedFetcher};
use pairpulse::testkit::sink::{RecordingRecorder, RecordingSink};

/// A scheduler wired to scripted ports and recording sinks.
pub struct Pipeline {
    pub fetcher: Arc<ScriptedFetcher>,
    pub sink: RecordingSink,
    pub recorder: RecordingRecorder,
    pub scheduler: PollScheduler,
}

impl Pipeline {
    pub fn new(fetcher: ScriptedFetcher, watches: Vec<PairWatch>) -> Self {
        let fetcher = Arc::new(fetcher);
        let sink = RecordingSink::new();
        let recorder = RecordingRecorder::new();
        let evaluator = EvaluatorBuilder::new(Arc::clone(&fetcher) as _)
            .sink(Arc::new(sink.clone()))
            .recorder(Arc::new(recorder.clone()))
            .build();
        let scheduler = PollScheduler::new(Arc::new(evaluator), watches, Duration::from_millis(10));
        Self {
            fetcher,
            sink,
            recorder,
            scheduler,
        }
    }

    /// Enable discovery from `feed` with default criteria.
    pub fn with_discovery(mut self, feed: Arc<ScriptedFeed>, refresh: Duration) -> Self {
        self.scheduler = self.scheduler.with_discovery(
            feed,
            DiscoveryFilter::new(DiscoveryCriteria::default()),
            refresh,
        );
        self
    }
}
