use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::InvalidTargetInstant;
use crate::render::{CountdownDisplay, RenderTarget};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const EXPIRED_MESSAGE: &str = "🎉 New Game Released!";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

/// Whole days plus the hour-of-day, minute-of-hour and second-of-minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    pub fn from_millis(ms: i64) -> Self {
        let ms = ms.max(0);
        Remaining {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    pub fn display(&self) -> CountdownDisplay {
        CountdownDisplay {
            days: self.days.to_string(),
            hours: format!("{:02}", self.hours),
            minutes: format!("{:02}", self.minutes),
            seconds: format!("{:02}", self.seconds),
        }
    }
}

/// Parse a countdown target. Offset-less date-times and bare dates are taken as UTC.
pub fn parse_target(raw: &str) -> Result<DateTime<Utc>, InvalidTargetInstant> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    Err(InvalidTargetInstant(raw.to_string()))
}

/// Running → Expired countdown toward a fixed instant.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    target: DateTime<Utc>,
    state: CountdownState,
}

impl CountdownEngine {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target, state: CountdownState::Running }
    }

    /// `None` when the target is missing or unparseable; the countdown is
    /// then simply not shown.
    pub fn from_target(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match parse_target(raw) {
            Ok(target) => Some(Self::new(target)),
            Err(e) => {
                debug!(error = %e, "Countdown disabled");
                None
            }
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining_millis(&self, now: DateTime<Utc>) -> i64 {
        (self.target - now).num_milliseconds().max(0)
    }

    /// Render the countdown for `now`. The first tick with less than a whole
    /// second left switches to Expired and shows the release message; later
    /// ticks do nothing.
    pub fn tick<R: RenderTarget + ?Sized>(&mut self, now: DateTime<Utc>, surface: &mut R) -> CountdownState {
        if self.state == CountdownState::Expired {
            return self.state;
        }
        let remaining = self.remaining_millis(now);
        if remaining < MS_PER_SECOND {
            self.state = CountdownState::Expired;
            surface.show_countdown_expired(EXPIRED_MESSAGE);
            info!(target_instant = %self.target, "Countdown expired");
        } else {
            let breakdown = Remaining::from_millis(remaining);
            debug!(days = breakdown.days, hours = breakdown.hours, minutes = breakdown.minutes, seconds = breakdown.seconds, "Countdown tick");
            surface.set_countdown(&breakdown.display());
        }
        self.state
    }

    /// Tick once right away and then every [`TICK_PERIOD`] on the tokio
    /// runtime until expiry or until the returned handle is stopped or dropped.
    pub fn start<R, C>(mut self, surface: Arc<Mutex<R>>, clock: C) -> CountdownHandle
    where
        R: RenderTarget + Send + 'static,
        C: Clock,
    {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let state = {
                    let mut guard = surface.lock().unwrap_or_else(PoisonError::into_inner);
                    self.tick(clock.now(), &mut *guard)
                };
                if state == CountdownState::Expired {
                    return state;
                }
            }
        });
        CountdownHandle { task: Some(task) }
    }
}

/// Owner of a running countdown timer.
#[derive(Debug)]
pub struct CountdownHandle {
    task: Option<JoinHandle<CountdownState>>,
}

impl CountdownHandle {
    /// Cancel the timer. No further ticks happen after this returns to the runtime.
    pub fn stop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }

    /// Wait for the timer to end. `Some(Expired)` when it ran out on its own,
    /// `None` when it was stopped or had already been awaited.
    pub async fn finished(&mut self) -> Option<CountdownState> {
        let task = self.task.as_mut()?;
        let result = task.await;
        self.task = None;
        match result {
            Ok(state) => Some(state),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!(error = %e, "Countdown task failed");
                None
            }
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
