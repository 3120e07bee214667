//! Egg motion and toast fade
//!
//! While the egg shakes, three loops run side by side: a lopsided rotation
//! wobble, a sideways sway and a vertical pulse. [`EggAnimator`] owns them.
//! Every change of the shaking flag throws the running loops away and
//! snaps the egg back to rest before anything new starts, so a loop never
//! carries phase over from a previous cycle.
//!
//! All timing is sampled from the caller's clock; nothing here ticks on
//! its own.

use std::time::Duration;

/// Rotation wobble in degrees: out to +10, across to -10, back to 0.
pub const ROTATION_KEYFRAMES: &[Keyframe] = &[
    Keyframe { value: 10.0, millis: 120 },
    Keyframe { value: -10.0, millis: 240 },
    Keyframe { value: 0.0, millis: 120 },
];

/// Sideways sway: 0 to 10 px and back.
pub const SWAY_OFFSET: f32 = 10.0;
pub const SWAY_HALF_PERIOD_MS: u64 = 600;

/// Vertical pulse: 1.0 to 1.1 and back.
pub const PULSE_SCALE: f32 = 1.1;
pub const PULSE_HALF_PERIOD_MS: u64 = 600;

/// Duration of a toast fade in seconds.
pub const FADE_DURATION: f32 = 0.3;

/// One leg of a keyframe loop: move linearly to `value` over `millis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub value: f32,
    pub millis: u64,
}

/// The transform property a loop drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Rotation,
    OffsetX,
    ScaleY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Walk the keyframes from `start`, then start over.
    Keyframes { start: f32, frames: &'static [Keyframe] },
    /// Go from `from` to `to` in `half_period_ms`, then reverse, forever.
    PingPong { from: f32, to: f32, half_period_ms: u64 },
}

impl Motion {
    /// Value `elapsed` into the loop.
    pub fn sample(&self, elapsed: Duration) -> f32 {
        match *self {
            Motion::Keyframes { start, frames } => {
                let cycle: u64 = frames.iter().map(|f| f.millis).sum();
                if cycle == 0 {
                    return start;
                }
                let mut t = elapsed.as_millis() as u64 % cycle;
                let frac = elapsed.subsec_nanos() % 1_000_000;
                let mut prev = start;
                for frame in frames {
                    if t < frame.millis {
                        let progress = (t as f32 + frac as f32 / 1_000_000.0) / frame.millis as f32;
                        return lerp(prev, frame.value, progress.min(1.0));
                    }
                    t -= frame.millis;
                    prev = frame.value;
                }
                prev
            }
            Motion::PingPong { from, to, half_period_ms } => {
                if half_period_ms == 0 {
                    return from;
                }
                let half = half_period_ms as f32 / 1000.0;
                let phase = elapsed.as_secs_f32() % (2.0 * half);
                let t = if phase <= half { phase / half } else { 2.0 - phase / half };
                lerp(from, to, t)
            }
        }
    }
}

/// A running loop, pinned to the moment it was spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationLoop {
    pub channel: Channel,
    pub motion: Motion,
    pub started_at: Duration,
}

impl AnimationLoop {
    pub fn sample(&self, now: Duration) -> f32 {
        self.motion.sample(now.saturating_sub(self.started_at))
    }
}

/// The egg's draw transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EggTransform {
    pub rotation_deg: f32,
    pub offset_x: f32,
    pub scale_y: f32,
}

impl EggTransform {
    pub const NEUTRAL: Self = Self { rotation_deg: 0.0, offset_x: 0.0, scale_y: 1.0 };
}

impl Default for EggTransform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Whether the egg is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggMotion {
    Resting,
    Shaking,
}

/// Supervisor for the three shake loops.
#[derive(Debug)]
pub struct EggAnimator {
    motion: EggMotion,
    loops: Vec<AnimationLoop>,
    generation: u64,
}

impl Default for EggAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl EggAnimator {
    pub fn new() -> Self {
        Self {
            motion: EggMotion::Resting,
            loops: Vec::new(),
            generation: 0,
        }
    }

    pub fn motion(&self) -> EggMotion {
        self.motion
    }

    /// Bumped every time the loops are torn down and restarted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_animating(&self) -> bool {
        !self.loops.is_empty()
    }

    pub fn loops(&self) -> &[AnimationLoop] {
        &self.loops
    }

    /// Follow the screen's shaking flag. Returns true if the loops restarted.
    pub fn sync(&mut self, shaking: bool, now: Duration) -> bool {
        let target = if shaking { EggMotion::Shaking } else { EggMotion::Resting };
        if target == self.motion {
            return false;
        }
        self.restart(target, now);
        true
    }

    /// Drop every loop. Used on teardown.
    pub fn stop(&mut self) {
        self.loops.clear();
        self.motion = EggMotion::Resting;
    }

    fn restart(&mut self, motion: EggMotion, now: Duration) {
        // snap to neutral: with no loops the transform is NEUTRAL
        self.loops.clear();
        self.generation += 1;
        self.motion = motion;
        if motion == EggMotion::Shaking {
            self.loops = shake_loops(now);
        }
        log::trace!("egg animator -> {:?} (generation {})", motion, self.generation);
    }

    pub fn transform(&self, now: Duration) -> EggTransform {
        let mut transform = EggTransform::NEUTRAL;
        for anim in &self.loops {
            let value = anim.sample(now);
            match anim.channel {
                Channel::Rotation => transform.rotation_deg = value,
                Channel::OffsetX => transform.offset_x = value,
                Channel::ScaleY => transform.scale_y = value,
            }
        }
        transform
    }
}

fn shake_loops(now: Duration) -> Vec<AnimationLoop> {
    vec![
        AnimationLoop {
            channel: Channel::Rotation,
            motion: Motion::Keyframes { start: 0.0, frames: ROTATION_KEYFRAMES },
            started_at: now,
        },
        AnimationLoop {
            channel: Channel::OffsetX,
            motion: Motion::PingPong { from: 0.0, to: SWAY_OFFSET, half_period_ms: SWAY_HALF_PERIOD_MS },
            started_at: now,
        },
        AnimationLoop {
            channel: Channel::ScaleY,
            motion: Motion::PingPong { from: 1.0, to: PULSE_SCALE, half_period_ms: PULSE_HALF_PERIOD_MS },
            started_at: now,
        },
    ]
}

/// An opacity that eases toward 0 or 1.
///
/// Retargeting mid-fade starts the new fade from wherever the value is,
/// so the toast never pops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    target: f32,
    progress: f32,
}

impl Fade {
    pub fn new(value: f32) -> Self {
        Self { from: value, target: value, progress: 1.0 }
    }

    pub fn set_target(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.from = self.value();
        self.target = target;
        self.progress = 0.0;
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.progress += dt / FADE_DURATION;
        if self.progress >= 1.0 {
            self.progress = 1.0;
        }
    }

    pub fn value(&self) -> f32 {
        lerp(self.from, self.target, ease_out_quad(self.progress))
    }

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Linear interpolation between two values
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic ease-out function for smooth deceleration
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}
