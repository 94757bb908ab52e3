use pairpulse::testkit::domain::{calm_snapshot, hot_snapshot};
use pairpulse::testkit::market::ScriptedFetcher;

/// Script `n` calm snapshots for `pair`, then a hot one that repeats.
pub fn calm_then_hot(fetcher: ScriptedFetcher, pair: &str, n: usize) -> ScriptedFetcher {
    let fetcher = (0..n).fold(fetcher, |f, _| f.respond(pair, calm_snapshot(pair)));
    fetcher.respond(pair, hot_snapshot(pair))
}
