//! Progress reporting for upscale passes.
//!
//! Orchestrators report through a [`ProgressReporter`] handed to them at
//! construction. All methods default to no-ops, so an implementation only
//! overrides what it displays. Reporters must be `Send + Sync` because tiles
//! of one pass may finish on several rayon workers.

use tracing::{debug, info};

/// One tile pass: the working image goes from `from` to `to` using `n_tiles` tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassInfo {
    pub from: (u32, u32),
    pub to: (u32, u32),
    pub n_tiles: usize,
}

pub trait ProgressReporter: Send + Sync {
    fn pass_started(&self, _pass: &PassInfo) {}

    /// `done` counts finished tiles of the current pass, in completion order.
    fn tile_finished(&self, _done: usize, _total: usize) {}

    fn pass_finished(&self, _pass: &PassInfo) {}

    /// Working image resampled without the model.
    fn resampled(&self, _from: (u32, u32), _to: (u32, u32)) {}
}

/// Reporter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// Reporter that emits `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn pass_started(&self, pass: &PassInfo) {
        info!(
            "Upscaling image    [{:>5}x{:>5}] -> [{:>5}x{:>5}] using {:>3} tile(s)",
            pass.from.0, pass.from.1, pass.to.0, pass.to.1, pass.n_tiles
        );
    }

    fn tile_finished(&self, done: usize, total: usize) {
        debug!(done, total, "tile upscaled");
    }

    fn pass_finished(&self, pass: &PassInfo) {
        debug!(n_tiles = pass.n_tiles, width = pass.to.0, height = pass.to.1, "pass finished");
    }

    fn resampled(&self, from: (u32, u32), to: (u32, u32)) {
        let verb = if to.0 >= from.0 && to.1 >= from.1 { "Resampling" } else { "Downsampling" };
        info!("{} image [{:>5}x{:>5}] -> [{:>5}x{:>5}]", verb, from.0, from.1, to.0, to.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl ProgressReporter for Recorder {
        fn resampled(&self, from: (u32, u32), to: (u32, u32)) {
            self.0.lock().unwrap().push(format!("{:?}->{:?}", from, to));
        }
    }

    #[test]
    fn test_defaults_are_noops() {
        let pass = PassInfo { from: (8, 8), to: (32, 32), n_tiles: 1 };
        let recorder = Recorder::default();
        recorder.pass_started(&pass);
        recorder.tile_finished(1, 1);
        recorder.pass_finished(&pass);
        recorder.resampled((32, 32), (30, 30));
        assert_eq!(*recorder.0.lock().unwrap(), vec!["(32, 32)->(30, 30)".to_string()]);
    }
}
