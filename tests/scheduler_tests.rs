mod harness;
mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use harness::pipeline::Pipeline;
use pairpulse::application::{SchedulerState, TickReport};
use pairpulse::error::FetchError;
use pairpulse::testkit::domain::{calm_snapshot, candidate, hot_snapshot, watch};
use pairpulse::testkit::market::{ScriptedFeed, ScriptedFetcher};
use tokio::sync::watch as signal;

#[tokio::test]
async fn tick_evaluates_every_static_watch() {
    let fetcher = ScriptedFetcher::new()
        .respond("0xa", calm_snapshot("0xa"))
        .respond("0xb", calm_snapshot("0xb"));
    let mut pipeline = Pipeline::new(fetcher, vec![watch("0xa"), watch("0xb"), watch("0xc")]);

    let report = pipeline.scheduler.tick().await;

    assert_eq!(
        report,
        TickReport {
            evaluated: 3,
            no_data: 1,
            ..TickReport::default()
        }
    );
    assert_eq!(pipeline.fetcher.calls(), 3);
    assert_eq!(pipeline.scheduler.state(), SchedulerState::Idle);
}

#[tokio::test]
async fn two_hot_ticks_inside_cooldown_alert_once() {
    let fetcher = support::snapshots::calm_then_hot(ScriptedFetcher::new(), "0xpair", 12);
    let mut pipeline = Pipeline::new(fetcher, vec![watch("0xpair")]);

    for _ in 0..12 {
        assert_eq!(pipeline.scheduler.tick().await.alerts, 0);
    }
    let first = pipeline.scheduler.tick().await;
    let second = pipeline.scheduler.tick().await;

    assert_eq!(first.alerts, 1);
    assert_eq!(second.alerts, 0);
    assert_eq!(second.suppressed, 1);
    assert_eq!(pipeline.sink.count(), 1);
    assert_eq!(pipeline.recorder.count(), 1);
}

#[tokio::test]
async fn one_failing_pair_does_not_affect_the_others() {
    let fetcher = ScriptedFetcher::new()
        .fail("0xbad", FetchError::Status {
            status: 404,
            url: "https://api.example/pairs/bsc/0xbad".into(),
        })
        .panic_on("0xboom")
        .respond("0xgood", hot_snapshot("0xgood"));
    let mut pipeline = Pipeline::new(
        fetcher,
        vec![watch("0xbad"), watch("0xboom"), watch("0xgood")],
    );

    let report = pipeline.scheduler.tick().await;

    assert_eq!(report.evaluated, 3);
    assert_eq!(report.failures, 2);
    // first sample of 0xgood scores 5 on imbalance and 5m change alone
    assert_eq!(report.alerts, 1);
    assert_eq!(pipeline.sink.count(), 1);
}

#[tokio::test]
async fn discovery_extends_the_watch_set_in_feed_order() {
    let feed = Arc::new(ScriptedFeed::new().respond(vec![
        candidate("0xd1", "AAA"),
        candidate("0xd2", "USDT"),
        candidate("0xd3", "BBB"),
    ]));
    let mut pipeline = Pipeline::new(ScriptedFetcher::new(), vec![watch("0xstatic")])
        .with_discovery(Arc::clone(&feed), Duration::from_secs(300));

    let report = pipeline.scheduler.tick().await;

    let discovered: Vec<_> = pipeline
        .scheduler
        .dynamic_watches()
        .iter()
        .filter_map(|w| w.pair_address())
        .collect();
    assert_eq!(discovered, vec!["0xd1", "0xd3"]);
    assert_eq!(report.evaluated, 3);
    assert_eq!(pipeline.scheduler.watch_set()[0], watch("0xstatic"));
    assert_eq!(feed.calls(), 1);
}

#[tokio::test]
async fn discovery_runs_only_when_due() {
    let feed = Arc::new(ScriptedFeed::new().respond(vec![candidate("0xd1", "AAA")]));
    let mut pipeline = Pipeline::new(ScriptedFetcher::new(), Vec::new())
        .with_discovery(Arc::clone(&feed), Duration::from_secs(300));
    let start = Instant::now();

    assert!(pipeline.scheduler.refresh_discovery(start).await);
    assert!(!pipeline.scheduler.refresh_discovery(start + Duration::from_secs(10)).await);
    assert!(pipeline.scheduler.refresh_discovery(start + Duration::from_secs(300)).await);
    assert_eq!(feed.calls(), 2);
}

#[tokio::test]
async fn failed_discovery_keeps_previous_set() {
    let feed = Arc::new(
        ScriptedFeed::new()
            .respond(vec![candidate("0xd1", "AAA"), candidate("0xd2", "BBB")])
            .fail(FetchError::Transient("timeout".into())),
    );
    let mut pipeline = Pipeline::new(ScriptedFetcher::new(), Vec::new())
        .with_discovery(Arc::clone(&feed), Duration::from_secs(60));
    let start = Instant::now();

    assert!(pipeline.scheduler.refresh_discovery(start).await);
    assert_eq!(pipeline.scheduler.dynamic_watches().len(), 2);

    let later = start + Duration::from_secs(60);
    assert!(!pipeline.scheduler.refresh_discovery(later).await);
    assert_eq!(pipeline.scheduler.dynamic_watches().len(), 2);

    // the failed attempt still restarts the interval
    assert!(!pipeline.scheduler.refresh_discovery(later + Duration::from_secs(1)).await);
    assert_eq!(feed.calls(), 2);
}

#[tokio::test]
async fn single_shot_run_returns_after_one_tick() {
    let fetcher = ScriptedFetcher::new().respond("0xa", calm_snapshot("0xa"));
    let mut pipeline = Pipeline::new(fetcher, vec![watch("0xa")]);
    let (_tx, rx) = signal::channel(false);

    tokio::time::timeout(Duration::from_secs(5), pipeline.scheduler.run(true, rx))
        .await
        .expect("single-shot run should return");

    assert_eq!(pipeline.fetcher.calls(), 1);
    assert_eq!(pipeline.scheduler.state(), SchedulerState::Idle);
}

#[tokio::test]
async fn shutdown_signal_stops_the_loop() {
    let fetcher = ScriptedFetcher::new()
        .with_delay(Duration::from_millis(20))
        .respond("0xa", calm_snapshot("0xa"));
    let mut pipeline = Pipeline::new(fetcher, vec![watch("0xa")]);
    let (tx, rx) = signal::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = tx.send(true);
    });

    tokio::time::timeout(Duration::from_secs(5), pipeline.scheduler.run(false, rx))
        .await
        .expect("run should stop on shutdown");

    assert!(pipeline.fetcher.calls() >= 1);
    assert_eq!(pipeline.scheduler.state(), SchedulerState::Idle);
}
