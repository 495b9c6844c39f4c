// Copyright (c) 2026 rezky_nightky

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::Rng;

use crate::config::Config;
use crate::error::{Result, SnowError};
use crate::frame::{Dimensions, FrameBuilder};
use crate::terminal::{DimensionProvider, FrameSink};

#[derive(Default, Debug)]
struct StopState {
    raised: bool,
    signal: Option<i32>,
}

/// Shared flag that ends the render loop, waking it mid-delay.
#[derive(Clone, Default, Debug)]
pub struct StopSignal {
    inner: Arc<(Mutex<StopState>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StopState> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn raise(&self) {
        self.state().raised = true;
        self.inner.1.notify_all();
    }

    /// Like [`StopSignal::raise`], remembering which signal asked for it.
    pub fn raise_signal(&self, signal: i32) {
        {
            let mut state = self.state();
            state.raised = true;
            if state.signal.is_none() {
                state.signal = Some(signal);
            }
        }
        self.inner.1.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        self.state().raised
    }

    pub fn signal(&self) -> Option<i32> {
        self.state().signal
    }

    /// Sleeps up to `timeout`. Returns `true` as soon as the signal is raised.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |s| !s.raised)
            .unwrap_or_else(PoisonError::into_inner);
        guard.raised
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    Running,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Stopped,
    DurationElapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub reason: StopReason,
    pub last_size: Dimensions,
}

/// Drives ticks: build a frame for the current size, emit it, wait.
pub struct Snowfall<P, S, R> {
    frame_delay: Duration,
    duration: Option<Duration>,
    follow_resize: bool,
    provider: P,
    sink: S,
    builder: FrameBuilder<R>,
    phase: Phase,
}

impl<P, S, R> Snowfall<P, S, R>
where
    P: DimensionProvider,
    S: FrameSink,
    R: Rng,
{
    pub fn new(config: &Config, provider: P, sink: S, rng: R) -> Self {
        Self {
            frame_delay: config.frame_delay,
            duration: config.duration,
            follow_resize: config.follow_resize,
            provider,
            sink,
            builder: FrameBuilder::new(rng, config.density, config.glyph.clone()),
            phase: Phase::Init,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs until `stop` is raised or the configured duration elapses.
    ///
    /// A size query failure before the first frame is fatal. Later failures
    /// keep the last known size.
    pub fn run(&mut self, stop: &StopSignal) -> Result<RunSummary> {
        let start = Instant::now();
        let mut dims = match self.provider.dimensions() {
            Ok(d) => d,
            Err(e) => {
                self.phase = Phase::Terminated;
                return Err(e.into());
            }
        };
        let end_time = self.duration.map(|d| start + d);

        info!(
            "snowfall started: {} ratio={} flake={:?} delay={:?}",
            dims,
            self.builder.density().get(),
            self.builder.glyph(),
            self.frame_delay
        );
        self.phase = Phase::Running;

        let mut ticks: u64 = 0;
        let reason = loop {
            if stop.is_raised() {
                break StopReason::Stopped;
            }
            if end_time.is_some_and(|end| Instant::now() >= end) {
                break StopReason::DurationElapsed;
            }

            if self.follow_resize && ticks > 0 {
                match self.provider.dimensions() {
                    Ok(d) if d != dims => {
                        debug!("terminal resized {} -> {}", dims, d);
                        dims = d;
                    }
                    Ok(_) => {}
                    Err(e) => warn!("keeping {} after size query failed: {}", dims, e),
                }
            }

            let frame = self.builder.frame(dims);
            if let Err(e) = self.sink.emit(&frame) {
                self.phase = Phase::Terminated;
                return Err(SnowError::Output(e));
            }
            ticks = ticks.saturating_add(1);

            let mut wait = self.frame_delay;
            if let Some(end) = end_time {
                wait = wait.min(end.saturating_duration_since(Instant::now()));
            }
            if stop.wait_timeout(wait) {
                break StopReason::Stopped;
            }
        };

        self.phase = Phase::Terminated;
        info!(
            "snowfall stopped after {} frames ({:?}, {:.3}s)",
            ticks,
            reason,
            start.elapsed().as_secs_f64()
        );
        Ok(RunSummary {
            ticks,
            reason,
            last_size: dims,
        })
    }
}
