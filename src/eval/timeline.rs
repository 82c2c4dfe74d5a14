use crate::{
    composition::model::MIN_TOTAL_DURATION,
    sync::clock::{FRAME_TIME_KEY, STARTED_KEY, SharedClock, exchange_f64},
};

/// Whole loops removed one subtraction at a time before falling back to `%`.
const MAX_SUBTRACTED_LOOPS: f64 = 1e6;

/// Session lifecycle. `Running` never ends on its own; the host stops ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Phase {
    NotStarted,
    Running,
}

/// Result of one scheduling step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    pub phase: Phase,
    /// Seconds into the current loop, in `[0, total_duration)`.
    pub frame_time: f64,
    /// The loop (re)started on this tick, including the very first running tick.
    pub loop_restarted: bool,
}

/// Loop clock of one display process.
#[derive(Clone, Debug)]
pub struct TimelineState {
    started: bool,
    begin_requested: bool,
    frame_time: f64,
    /// Local time at which the current loop began.
    frame_start: f64,
    total_duration: f64,
    /// Previous tick's frame time; starts above any reachable value so the
    /// first running tick counts as a loop start.
    last_frame_time: f64,
}

impl TimelineState {
    pub fn new(total_duration: f64) -> Self {
        Self {
            started: false,
            begin_requested: false,
            frame_time: 0.0,
            frame_start: 0.0,
            total_duration: total_duration.max(MIN_TOTAL_DURATION),
            last_frame_time: f64::INFINITY,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.started {
            Phase::Running
        } else {
            Phase::NotStarted
        }
    }

    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// External "begin" input. Takes effect on the next tick, and only on the
    /// time authority: followers start when the authority's flag says so.
    pub fn begin(&mut self) {
        self.begin_requested = true;
    }

    /// Advances the loop clock through the shared clock. Call once per frame.
    pub fn advance(&mut self, clock: &mut dyn SharedClock) -> Tick {
        let now = clock.local_monotonic_seconds();

        let authority = clock.is_time_authority();
        let begin = std::mem::take(&mut self.begin_requested);
        if begin && !authority {
            tracing::debug!("begin input ignored on follower");
        }
        let wants_start = self.started || (begin && authority);
        let shared_started = exchange_f64(
            clock,
            STARTED_KEY,
            flag(wants_start),
            flag(self.started),
        ) != 0.0;

        if shared_started && !self.started {
            self.started = true;
            self.frame_start = now;
            self.frame_time = 0.0;
            tracing::info!(total_duration = self.total_duration, "slideshow started");
        }
        if !self.started {
            return Tick {
                phase: Phase::NotStarted,
                frame_time: self.frame_time,
                loop_restarted: false,
            };
        }

        let local = self.local_frame_time(now);
        let shared = exchange_f64(clock, FRAME_TIME_KEY, local, local);
        let frame_time = wrap_frame_time(shared, self.total_duration);
        self.frame_time = frame_time;

        let loop_restarted = frame_time < self.last_frame_time;
        self.last_frame_time = frame_time;
        if loop_restarted {
            tracing::debug!(frame_time, "loop restarted");
        }

        Tick {
            phase: Phase::Running,
            frame_time,
            loop_restarted,
        }
    }

    /// Elapsed time since the loop anchor, wrapped by repeated subtraction.
    /// The anchor moves forward with every subtracted loop.
    fn local_frame_time(&mut self, now: f64) -> f64 {
        let mut elapsed = now - self.frame_start;
        if !elapsed.is_finite() || elapsed < 0.0 {
            self.frame_start = now;
            return 0.0;
        }
        if elapsed / self.total_duration > MAX_SUBTRACTED_LOOPS {
            elapsed %= self.total_duration;
            self.frame_start = now - elapsed;
        }
        while elapsed >= self.total_duration {
            elapsed -= self.total_duration;
            self.frame_start += self.total_duration;
        }
        elapsed
    }
}

/// Wraps `t` into `[0, total)` by repeated subtraction.
///
/// Past `MAX_SUBTRACTED_LOOPS` whole loops the remainder is taken first, so
/// huge inputs finish instead of stalling where `t - total == t`.
pub fn wrap_frame_time(t: f64, total: f64) -> f64 {
    if !t.is_finite() || t < 0.0 || !total.is_finite() || total <= 0.0 {
        return 0.0;
    }
    let mut t = if t / total > MAX_SUBTRACTED_LOOPS {
        t % total
    } else {
        t
    };
    while t >= total {
        t -= total;
    }
    t
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/timeline.rs"]
mod tests;
