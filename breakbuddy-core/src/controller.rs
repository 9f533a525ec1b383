//! Main loop
//!
//! The controller owns every collaborator and lends them to the scheduler
//! job, the button handler and the idle pulse in turn. Each tick:
//!
//! 1. run due scheduler jobs (the breathing reminder checks the work window)
//! 2. poll the button; on a press run the animation, then sleep the debounce time
//! 3. run one idle background pulse
//!
//! Everything blocks, so a trigger that arrives during an animation is
//! simply seen (or missed) afterwards.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::animation::{AnimationError, AnimationPhase, BreathingEngine, IdlePulse};
use crate::button::DebouncedButton;
use crate::config::{DeviceConfig, ScheduleConfig};
use crate::log::{debug, info, warn};
use crate::scheduler::{PeriodicScheduler, SchedulerError};
use crate::traits::{
    AudioError, AudioOutput, Clock, ClockError, DigitalInput, InputError, RenderSurface,
    SurfaceError,
};

/// Jobs the controller schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Job {
    /// Run the breathing animation if inside the work window
    BreathingReminder,
}

/// A fault that stops the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// Render surface fault
    Surface(SurfaceError),
    /// Audio output fault
    Audio(AudioError),
    /// Button input fault
    Input(InputError),
    /// Clock fault
    Clock(ClockError),
    /// Job registration failed
    Scheduler(SchedulerError),
}

impl From<SurfaceError> for ControllerError {
    fn from(e: SurfaceError) -> Self {
        ControllerError::Surface(e)
    }
}

impl From<AudioError> for ControllerError {
    fn from(e: AudioError) -> Self {
        ControllerError::Audio(e)
    }
}

impl From<InputError> for ControllerError {
    fn from(e: InputError) -> Self {
        ControllerError::Input(e)
    }
}

impl From<ClockError> for ControllerError {
    fn from(e: ClockError) -> Self {
        ControllerError::Clock(e)
    }
}

impl From<SchedulerError> for ControllerError {
    fn from(e: SchedulerError) -> Self {
        ControllerError::Scheduler(e)
    }
}

impl From<AnimationError> for ControllerError {
    fn from(e: AnimationError) -> Self {
        match e {
            AnimationError::Surface(e) => ControllerError::Surface(e),
            AnimationError::Audio(e) => ControllerError::Audio(e),
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Surface(e) => write!(f, "surface fault: {:?}", e),
            ControllerError::Audio(e) => write!(f, "audio fault: {:?}", e),
            ControllerError::Input(e) => write!(f, "input fault: {:?}", e),
            ControllerError::Clock(e) => write!(f, "clock fault: {:?}", e),
            ControllerError::Scheduler(e) => write!(f, "scheduler: {}", e),
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Reminder jobs that came due
    pub reminders_due: u8,
    /// Animations run for due reminders
    pub scheduled_runs: u8,
    /// Whether a button press started an animation
    pub button_run: bool,
}

/// Device controller
pub struct Controller<C, S: RenderSurface, A, I, D> {
    clock: C,
    surface: S,
    audio: A,
    button: DebouncedButton<I>,
    delay: D,
    scheduler: PeriodicScheduler<Job>,
    engine: BreathingEngine<S::Layer>,
    idle: IdlePulse,
    schedule: ScheduleConfig,
    debounce_ms: u32,
    animations_run: u32,
}

impl<C, S, A, I, D> Controller<C, S, A, I, D>
where
    C: Clock,
    S: RenderSurface,
    A: AudioOutput,
    I: DigitalInput,
    D: DelayNs,
{
    /// Assemble a controller from its collaborators and settings
    pub fn new(clock: C, surface: S, audio: A, input: I, delay: D, config: &DeviceConfig) -> Self {
        Self {
            clock,
            surface,
            audio,
            button: DebouncedButton::new(input),
            delay,
            scheduler: PeriodicScheduler::new(),
            engine: BreathingEngine::new(config.breathing.clone(), config.chime, &config.idle),
            idle: IdlePulse::new(&config.idle),
            schedule: config.schedule,
            debounce_ms: config.button.debounce_ms,
            animations_run: 0,
        }
    }

    /// Show the idle screen and register the breathing reminder
    pub fn start(&mut self) -> Result<(), ControllerError> {
        self.engine.show_idle(&mut self.surface)?;
        self.scheduler
            .schedule(self.schedule.interval_ms(), Job::BreathingReminder)?;
        info!(
            "reminder every {} min, hours {}-{}",
            self.schedule.interval_minutes(),
            self.schedule.window.start_hour(),
            self.schedule.window.end_hour()
        );
        Ok(())
    }

    /// One pass of the main loop
    pub fn tick(&mut self) -> Result<TickReport, ControllerError> {
        let mut report = TickReport::default();
        let now = self.clock.now()?;

        let Self {
            surface,
            audio,
            delay,
            scheduler,
            engine,
            schedule,
            animations_run,
            ..
        } = self;
        scheduler.tick(now.epoch_ms, |job| -> Result<(), ControllerError> {
            match job {
                Job::BreathingReminder => {
                    report.reminders_due += 1;
                    if schedule.window.contains(now.local_hour) {
                        info!("breathing reminder at hour {}", now.local_hour);
                        engine.run(surface, audio, delay)?;
                        *animations_run += 1;
                        report.scheduled_runs += 1;
                    } else {
                        debug!("reminder skipped outside work hours ({})", now.local_hour);
                    }
                }
            }
            Ok(())
        })?;

        let now = self.clock.now()?;
        if self.button.poll(now.epoch_ms)? {
            info!("button pressed");
            self.engine
                .run(&mut self.surface, &mut self.audio, &mut self.delay)?;
            self.animations_run += 1;
            report.button_run = true;
            self.delay.delay_ms(self.debounce_ms);
        }

        self.idle.step(&mut self.surface, &mut self.delay)?;
        Ok(report)
    }

    /// Run the main loop until a fault stops it
    pub fn run(&mut self) -> ControllerError {
        loop {
            if let Err(e) = self.tick() {
                if self.is_animating() {
                    warn!("fault during {:?}", self.phase());
                }
                return e;
            }
        }
    }

    /// Check if a breathing run is in progress (or was cut short by a fault)
    pub fn is_animating(&self) -> bool {
        self.engine.phase().is_active()
    }

    /// Animations completed since power-on
    pub fn animations_run(&self) -> u32 {
        self.animations_run
    }

    /// Current animation phase
    pub fn phase(&self) -> AnimationPhase {
        self.engine.phase()
    }

    /// Earliest time the reminder is due (epoch ms)
    pub fn next_reminder_ms(&self, now_ms: u64) -> Option<u64> {
        self.scheduler.next_due(now_ms)
    }

    /// Put the idle layout back after a fault
    pub fn recover(&mut self) -> Result<(), ControllerError> {
        self.engine.recover(&mut self.surface)?;
        Ok(())
    }

    /// Render surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Button state
    pub fn button(&self) -> &DebouncedButton<I> {
        &self.button
    }
}
