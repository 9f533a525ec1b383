//! Periodic job scheduler
//!
//! Jobs are plain data. The scheduler decides which jobs are due; the
//! caller's dispatch closure performs them with whatever resources it has
//! borrowed. A job's first tick only records the time, so the first run
//! happens one full interval after the job is first observed.

use core::fmt;

use heapless::Vec;

use crate::log::{debug, warn};

/// Maximum number of jobs a scheduler holds
pub const MAX_JOBS: usize = 4;

/// Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Job table is full
    Full,
    /// Interval must be greater than zero
    ZeroInterval,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Full => f.write_str("job table is full"),
            SchedulerError::ZeroInterval => f.write_str("job interval must be greater than zero"),
        }
    }
}

/// A recurring job
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduledJob<A> {
    /// Time between runs (ms)
    pub interval_ms: u64,
    /// What to do when due
    pub action: A,
    /// When the job last ran, or was first observed (ms)
    pub last_fire_ms: Option<u64>,
}

impl<A> ScheduledJob<A> {
    /// Time the job is next due, or `None` before it has been anchored
    pub fn due_at(&self) -> Option<u64> {
        self.last_fire_ms
            .map(|last| last.saturating_add(self.interval_ms))
    }

    fn is_due(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
            None => false,
        }
    }
}

/// Interval scheduler with a fixed-capacity job table
#[derive(Debug)]
pub struct PeriodicScheduler<A, const N: usize = MAX_JOBS> {
    jobs: Vec<ScheduledJob<A>, N>,
}

impl<A, const N: usize> PeriodicScheduler<A, N> {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Register a job that runs every `interval_ms`
    pub fn schedule(&mut self, interval_ms: u64, action: A) -> Result<(), SchedulerError> {
        if interval_ms == 0 {
            return Err(SchedulerError::ZeroInterval);
        }
        self.jobs
            .push(ScheduledJob {
                interval_ms,
                action,
                last_fire_ms: None,
            })
            .map_err(|_| SchedulerError::Full)
    }

    /// Run every due job through `run`, in registration order
    ///
    /// A job seen for the first time, or seen with a clock earlier than its
    /// last fire, is anchored at `now_ms` instead of run. A due job's fire
    /// time is recorded before its action runs, so an action that takes a
    /// long time does not push the schedule back. Each job runs at most
    /// once per tick. Returns the number of jobs run; the first error from
    /// `run` stops the tick.
    pub fn tick<E, F>(&mut self, now_ms: u64, mut run: F) -> Result<usize, E>
    where
        F: FnMut(&A) -> Result<(), E>,
    {
        let mut fired = 0;
        for job in self.jobs.iter_mut() {
            match job.last_fire_ms {
                None => {
                    job.last_fire_ms = Some(now_ms);
                    continue;
                }
                Some(last) if now_ms < last => {
                    warn!("clock went back {} ms, re-anchoring job", last - now_ms);
                    job.last_fire_ms = Some(now_ms);
                    continue;
                }
                Some(_) => {}
            }
            if job.is_due(now_ms) {
                job.last_fire_ms = Some(now_ms);
                debug!("job due at {} ms", now_ms);
                run(&job.action)?;
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Earliest time any job is due
    ///
    /// Jobs not yet anchored count as due one interval after `now_ms`.
    pub fn next_due(&self, now_ms: u64) -> Option<u64> {
        self.jobs
            .iter()
            .map(|job| job.due_at().unwrap_or(now_ms.saturating_add(job.interval_ms)))
            .min()
    }

    /// Registered jobs
    pub fn jobs(&self) -> &[ScheduledJob<A>] {
        &self.jobs
    }

    /// Number of registered jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if no jobs are registered
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<A, const N: usize> Default for PeriodicScheduler<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkWindow;
    use crate::testing::{MS_PER_HOUR, MS_PER_MINUTE};
    use std::vec::Vec as StdVec;

    const INTERVAL: u64 = 45 * MS_PER_MINUTE;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        Remind,
        Other,
    }

    fn run_minutes(
        sched: &mut PeriodicScheduler<Job>,
        from_ms: u64,
        minutes: u64,
    ) -> StdVec<(u64, Job)> {
        let mut fired = StdVec::new();
        for m in 0..=minutes {
            let now = from_ms + m * MS_PER_MINUTE;
            let n = sched
                .tick(now, |job| {
                    fired.push((now, *job));
                    Ok::<(), ()>(())
                })
                .unwrap();
            assert!(n <= sched.len());
        }
        fired
    }

    #[test]
    fn test_first_tick_only_anchors() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();
        assert_eq!(sched.tick(0, |_| Ok::<(), ()>(())), Ok(0));
        assert_eq!(sched.jobs()[0].last_fire_ms, Some(0));
    }

    #[test]
    fn test_fires_once_per_interval_on_minute_ticks() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();

        let start = 10 * MS_PER_HOUR;
        let fired = run_minutes(&mut sched, start, 180);
        let times: StdVec<u64> = fired.iter().map(|(t, _)| (t - start) / MS_PER_MINUTE).collect();
        assert_eq!(times, [45, 90, 135, 180]);
    }

    #[test]
    fn test_at_most_once_per_tick_after_long_gap() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();
        sched.tick(0, |_| Ok::<(), ()>(())).unwrap();

        // Five intervals pass without a tick
        let mut count = 0;
        sched
            .tick(5 * INTERVAL, |_| {
                count += 1;
                Ok::<(), ()>(())
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(sched.jobs()[0].due_at(), Some(6 * INTERVAL));
    }

    #[test]
    fn test_registration_order() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(10 * MS_PER_MINUTE, Job::Other).unwrap();
        sched.schedule(10 * MS_PER_MINUTE, Job::Remind).unwrap();

        let fired = run_minutes(&mut sched, 0, 10);
        assert_eq!(fired, [(10 * MS_PER_MINUTE, Job::Other), (10 * MS_PER_MINUTE, Job::Remind)]);
    }

    #[test]
    fn test_gated_action_does_nothing_outside_window() {
        let window = WorkWindow::default();
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();

        // 15:00 through 19:00
        let start = 15 * MS_PER_HOUR;
        let mut ran = StdVec::new();
        for m in 0..=240 {
            let now = start + m * MS_PER_MINUTE;
            let hour = (now / MS_PER_HOUR) as u8;
            sched
                .tick(now, |_| {
                    if window.contains(hour) {
                        ran.push(m);
                    }
                    Ok::<(), ()>(())
                })
                .unwrap();
        }
        // fires at +45, +90 (16:30); +135 (17:15) and later are gated
        assert_eq!(ran, [45, 90]);
    }

    #[test]
    fn test_error_stops_tick_but_keeps_fire_time() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();
        sched.schedule(INTERVAL, Job::Other).unwrap();
        sched.tick(0, |_| Ok::<(), ()>(())).unwrap();

        let mut seen = StdVec::new();
        let result = sched.tick(INTERVAL, |job| {
            seen.push(*job);
            Err("fault")
        });
        assert_eq!(result, Err("fault"));
        assert_eq!(seen, [Job::Remind]);
        assert_eq!(sched.jobs()[0].last_fire_ms, Some(INTERVAL));
        assert_eq!(sched.jobs()[1].last_fire_ms, Some(0));
    }

    #[test]
    fn test_rejects_zero_interval_and_overflow() {
        let mut sched: PeriodicScheduler<Job, 1> = PeriodicScheduler::new();
        assert_eq!(sched.schedule(0, Job::Remind), Err(SchedulerError::ZeroInterval));
        sched.schedule(1, Job::Remind).unwrap();
        assert_eq!(sched.schedule(1, Job::Other), Err(SchedulerError::Full));
    }

    #[test]
    fn test_next_due() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        assert_eq!(sched.next_due(0), None);

        sched.schedule(INTERVAL, Job::Remind).unwrap();
        assert_eq!(sched.next_due(1_000), Some(1_000 + INTERVAL));

        sched.tick(1_000, |_| Ok::<(), ()>(())).unwrap();
        assert_eq!(sched.next_due(2_000), Some(1_000 + INTERVAL));

        sched.schedule(10 * MS_PER_MINUTE, Job::Other).unwrap();
        assert_eq!(sched.next_due(2_000), Some(2_000 + 10 * MS_PER_MINUTE));
    }

    #[test]
    fn test_clock_going_backwards_reanchors() {
        let mut sched: PeriodicScheduler<Job> = PeriodicScheduler::new();
        sched.schedule(INTERVAL, Job::Remind).unwrap();
        sched.tick(INTERVAL, |_| Ok::<(), ()>(())).unwrap();
        assert_eq!(sched.tick(0, |_| Ok::<(), ()>(())), Ok(0));
        assert_eq!(sched.jobs()[0].due_at(), Some(INTERVAL));
    }
}
