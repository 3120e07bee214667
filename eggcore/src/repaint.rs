//! Repaint scheduling for the egg screen
//!
//! egui only runs a frame when something asks for one. The screen needs
//! frames for three reasons:
//!
//! 1. **Input**: the user clicked. egui wakes up on its own.
//! 2. **Animation**: the egg is shaking or the toast is fading. Repaint at
//!    a steady interval while it lasts.
//! 3. **Timers**: the shake or toast timer falls due. Nothing is moving,
//!    so sleep until exactly then.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()` and
//! [`RepaintController::end_frame`] at the bottom.

use std::time::Duration;

/// Repaint interval while animating (~30 fps).
const FAST_REPAINT_INTERVAL: Duration = Duration::from_millis(33);

/// Why this frame is being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    /// First frame, always paint.
    Init,
    /// User input (pointer or key).
    Input,
    /// A listener saw the screen state change.
    StateChange,
    /// Timed continuous repaint (animation).
    Continuous,
    /// A scheduled wake-up for a timer deadline.
    Timer,
}

/// What `end_frame` asked egui for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintRequest {
    /// Sleep until the next input event.
    None,
    Now,
    After(Duration),
}

pub struct RepaintController {
    continuous: bool,
    needs_repaint: bool,
    interval: Duration,
    /// Earliest timer deadline to wake for, on the screen clock.
    wake_at: Option<Duration>,
    frame: u64,
    reason: RepaintReason,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            continuous: false,
            needs_repaint: false,
            interval: FAST_REPAINT_INTERVAL,
            wake_at: None,
            frame: 0,
            reason: RepaintReason::Init,
        }
    }

    /// Keep repainting at the frame interval while `true`.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Wake up no later than `deadline`. The earliest request wins.
    pub fn wake_at(&mut self, deadline: Duration) {
        self.wake_at = Some(self.wake_at.map_or(deadline, |d| d.min(deadline)));
    }

    pub fn reason(&self) -> RepaintReason {
        self.reason
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Classify the frame. `had_input` comes from egui's input state.
    pub fn begin(&mut self, had_input: bool, now: Duration) {
        let timer_due = self.wake_at.is_some_and(|d| d <= now);
        self.reason = if self.frame == 0 {
            RepaintReason::Init
        } else if had_input {
            RepaintReason::Input
        } else if self.needs_repaint {
            RepaintReason::StateChange
        } else if timer_due {
            RepaintReason::Timer
        } else if self.continuous {
            RepaintReason::Continuous
        } else {
            RepaintReason::Input
        };
        self.needs_repaint = false;
        self.wake_at = None;
    }

    /// Decide what to ask egui for after this frame.
    pub fn end(&mut self, now: Duration) -> RepaintRequest {
        self.frame += 1;
        let mut request = if self.needs_repaint {
            RepaintRequest::Now
        } else if self.continuous {
            RepaintRequest::After(self.interval)
        } else {
            RepaintRequest::None
        };
        if let Some(deadline) = self.wake_at {
            let wait = deadline.saturating_sub(now);
            request = match request {
                RepaintRequest::Now => RepaintRequest::Now,
                RepaintRequest::After(d) => RepaintRequest::After(d.min(wait)),
                RepaintRequest::None => RepaintRequest::After(wait),
            };
        }
        request
    }

    /// Call at the **start** of `update()`.
    pub fn begin_frame(&mut self, ctx: &egui::Context, now: Duration) {
        let had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.pointer.is_moving()
        });
        self.begin(had_input, now);
    }

    /// Call at the **end** of `update()`.
    pub fn end_frame(&mut self, ctx: &egui::Context, now: Duration) {
        match self.end(now) {
            RepaintRequest::Now => ctx.request_repaint(),
            RepaintRequest::After(wait) => ctx.request_repaint_after(wait),
            RepaintRequest::None => {}
        }
    }
}
