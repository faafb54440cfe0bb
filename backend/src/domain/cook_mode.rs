//! Step-by-step cooking companion with a per-step countdown.
//!
//! The host calls [`CookSession::tick`] once per second while the session
//! is open. Nothing here sleeps or spawns; time only moves when ticked.

use super::{Recipe, Step};

const SECONDS_PER_MINUTE: u32 = 60;

/// Outcome of a single [`CookSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No countdown is running.
    Idle,
    /// The countdown advanced and is still running.
    Running {
        /// Seconds left after this tick.
        remaining: u32,
    },
    /// The countdown reached zero on this tick.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Idle,
    Running { remaining: u32 },
    Stopped { remaining: u32 },
}

/// Cook-mode walk through a recipe's steps.
///
/// ## Invariants
/// - The current step index is always within the recipe's steps.
/// - The countdown never goes below zero.
/// - Changing step discards any countdown.
/// - A closed session ignores every further command.
///
/// # Examples
/// ```
/// use recipehub::domain::{CookSession, TimerTick};
/// # use recipehub::example_data::sample_recipes;
/// # let recipes = sample_recipes().unwrap();
/// # let pasta = &recipes[0];
///
/// let mut session = CookSession::new(pasta).unwrap();
/// assert_eq!(session.step_number(), 1);
/// assert!(session.start_timer());
/// assert_eq!(session.tick(), TimerTick::Running { remaining: 479 });
/// ```
#[derive(Debug, Clone)]
pub struct CookSession<'a> {
    recipe: &'a Recipe,
    index: usize,
    timer: Timer,
    closed: bool,
}

impl<'a> CookSession<'a> {
    /// Open a session on the first step; `None` when the recipe has no steps.
    pub fn new(recipe: &'a Recipe) -> Option<Self> {
        if recipe.steps.is_empty() {
            return None;
        }
        Some(Self {
            recipe,
            index: 0,
            timer: Timer::Idle,
            closed: false,
        })
    }

    /// Recipe being cooked.
    pub fn recipe(&self) -> &'a Recipe {
        self.recipe
    }

    /// Step currently shown.
    pub fn current_step(&self) -> &'a Step {
        &self.recipe.steps[self.index]
    }

    /// One-based position of the current step.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    /// Number of steps in the recipe.
    pub fn total_steps(&self) -> usize {
        self.recipe.steps.len()
    }

    /// Share of the recipe reached, from `100 / total` up to `100`.
    pub fn progress_percent(&self) -> f64 {
        let reached = u32::try_from(self.step_number()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.total_steps()).unwrap_or(u32::MAX);
        f64::from(reached) / f64::from(total) * 100.0
    }

    /// Whether the current step is the first.
    pub fn is_first_step(&self) -> bool {
        self.index == 0
    }

    /// Whether the current step is the last.
    pub fn is_last_step(&self) -> bool {
        self.index + 1 == self.total_steps()
    }

    /// Move forward one step. Returns `false` on the last step.
    pub fn next_step(&mut self) -> bool {
        if self.closed || self.is_last_step() {
            return false;
        }
        self.move_to(self.index + 1);
        true
    }

    /// Move back one step. Returns `false` on the first step.
    pub fn previous_step(&mut self) -> bool {
        if self.closed || self.is_first_step() {
            return false;
        }
        self.move_to(self.index - 1);
        true
    }

    /// Start the current step's countdown from its full duration.
    ///
    /// Starting again after [`CookSession::stop_timer`], or while already
    /// running, restarts from the full duration. Returns `false` when the
    /// step has no timer or the session is closed.
    pub fn start_timer(&mut self) -> bool {
        if self.closed {
            return false;
        }
        match self.current_step().timer_seconds() {
            Some(remaining) => {
                self.timer = Timer::Running { remaining };
                true
            }
            None => false,
        }
    }

    /// Halt the countdown; the remaining time stays readable.
    pub fn stop_timer(&mut self) {
        if let Timer::Running { remaining } = self.timer {
            self.timer = Timer::Stopped { remaining };
        }
    }

    /// Whether a countdown is currently running.
    pub fn is_timer_running(&self) -> bool {
        matches!(self.timer, Timer::Running { .. })
    }

    /// Seconds left on a running or paused countdown.
    pub fn remaining_seconds(&self) -> Option<u32> {
        match self.timer {
            Timer::Running { remaining } | Timer::Stopped { remaining } => Some(remaining),
            Timer::Idle => None,
        }
    }

    /// Advance a running countdown by one second.
    pub fn tick(&mut self) -> TimerTick {
        if self.closed {
            return TimerTick::Idle;
        }
        let Timer::Running { remaining } = self.timer else {
            return TimerTick::Idle;
        };
        match remaining.saturating_sub(1) {
            0 => {
                self.timer = Timer::Idle;
                TimerTick::Completed
            }
            left => {
                self.timer = Timer::Running { remaining: left };
                TimerTick::Running { remaining: left }
            }
        }
    }

    /// End the session. Later commands and ticks have no effect.
    pub fn close(&mut self) {
        self.closed = true;
        self.timer = Timer::Idle;
    }

    /// Whether [`CookSession::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.timer = Timer::Idle;
    }
}

/// Render seconds as `m:ss`.
///
/// # Examples
/// ```
/// use recipehub::domain::format_countdown;
///
/// assert_eq!(format_countdown(480), "8:00");
/// assert_eq!(format_countdown(65), "1:05");
/// ```
pub fn format_countdown(seconds: u32) -> String {
    format!(
        "{}:{:02}",
        seconds / SECONDS_PER_MINUTE,
        seconds % SECONDS_PER_MINUTE
    )
}
