//! Screen controller: the egg's shake cycle and the toast
//!
//! The controller owns [`ScreenState`] and two one-shot timers. It is fed
//! three kinds of input, all stamped with the caller's clock:
//!
//! - `mount` / `unmount` from the window lifecycle
//! - `on_egg_tapped` from the egg's click sense
//! - `advance` once per frame, which fires any timer whose deadline passed
//!
//! Listeners registered with `subscribe` are called synchronously after
//! every mutation that changes the state.

use std::time::Duration;

use crate::config::EggConfig;
use crate::delay::{DelaySource, RandomDelay};
use crate::timer::{TimerKind, TimerSlot};

/// Everything the presentation layer needs to draw a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub shaking: bool,
    /// Outcome of the last tap. Only meaningful while the toast is visible.
    pub hatched: bool,
    pub toast_visible: bool,
}

/// Handle returned by [`ScreenController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ScreenState)>;

pub struct ScreenController {
    state: ScreenState,
    mounted: bool,
    shake_timer: TimerSlot,
    toast_timer: TimerSlot,
    delays: Box<dyn DelaySource>,
    toast_duration: Duration,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ScreenController {
    pub fn new(delays: Box<dyn DelaySource>, toast_duration: Duration) -> Self {
        Self {
            state: ScreenState::default(),
            mounted: false,
            shake_timer: TimerSlot::new(TimerKind::ShakeArm),
            toast_timer: TimerSlot::new(TimerKind::ToastDismiss),
            delays,
            toast_duration,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn from_config(config: &EggConfig) -> Self {
        let delays: Box<dyn DelaySource> = match config.seed {
            Some(seed) => Box::new(RandomDelay::seeded(config.shake_delay_secs(), seed)),
            None => Box::new(RandomDelay::from_entropy(config.shake_delay_secs())),
        };
        Self::new(delays, config.toast_duration())
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Deadline of the pending shake-arm timer, if any.
    pub fn shake_deadline(&self) -> Option<Duration> {
        self.shake_timer.deadline()
    }

    /// Deadline of the pending toast-dismiss timer, if any.
    pub fn toast_deadline(&self) -> Option<Duration> {
        self.toast_timer.deadline()
    }

    /// Earliest pending deadline across both timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.shake_timer.deadline(), self.toast_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ScreenState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Start a fresh screen: everything off, shake timer armed.
    pub fn mount(&mut self, now: Duration) {
        if self.mounted {
            log::debug!("mount while already mounted, restarting");
        }
        self.mounted = true;
        self.toast_timer.cancel();
        self.set_state(ScreenState::default());
        self.arm_shake(now);
    }

    /// Tear down: no timer set before this point will ever fire.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.shake_timer.cancel();
        self.toast_timer.cancel();
        self.listeners.clear();
        log::debug!("screen unmounted");
    }

    pub fn on_egg_tapped(&mut self, now: Duration) {
        if !self.mounted {
            log::debug!("tap ignored, screen not mounted");
            return;
        }
        // Fire anything already due so the tap sees the state the user sees.
        self.advance(now);

        let was_shaking = self.state.shaking;
        log::info!("egg tapped ({})", if was_shaking { "hatched" } else { "not ready" });
        self.show_toast(was_shaking, now);
        if was_shaking {
            self.set_state(ScreenState { shaking: false, ..self.state });
            self.arm_shake(now);
        }
        // A tap on a resting egg leaves the pending shake timer running.
    }

    /// Show the toast and restart its dismiss window.
    pub fn show_toast(&mut self, hatched: bool, now: Duration) {
        if !self.mounted {
            return;
        }
        self.toast_timer.cancel();
        self.set_state(ScreenState { toast_visible: true, hatched, ..self.state });
        self.toast_timer.arm(now, self.toast_duration);
    }

    /// Fire every timer due at `now`, earliest deadline first.
    pub fn advance(&mut self, now: Duration) {
        if !self.mounted {
            return;
        }
        let mut due: Vec<(Duration, TimerKind)> = [&mut self.shake_timer, &mut self.toast_timer]
            .into_iter()
            .filter_map(|slot| {
                let kind = slot.kind();
                slot.take_due(now).map(|at| (at, kind))
            })
            .collect();
        due.sort_by_key(|(at, _)| *at);

        for (at, kind) in due {
            log::debug!("{} timer fired at {:?}", kind.name(), at);
            match kind {
                TimerKind::ShakeArm => {
                    self.set_state(ScreenState { shaking: true, ..self.state });
                }
                TimerKind::ToastDismiss => {
                    self.set_state(ScreenState { toast_visible: false, ..self.state });
                }
            }
        }
    }

    fn arm_shake(&mut self, now: Duration) {
        let delay = self.delays.next_delay();
        let deadline = self.shake_timer.arm(now, delay);
        log::debug!("egg will shake in {:?} (at {:?})", delay, deadline);
    }

    fn set_state(&mut self, next: ScreenState) {
        if next == self.state {
            return;
        }
        self.state = next;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&next);
        }
    }
}

impl Drop for ScreenController {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::DEFAULT_SHAKE_DELAY_SECS;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TOAST: Duration = Duration::from_secs(2);

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn fixed(delay_secs: u64) -> ScreenController {
        ScreenController::new(Box::new(move || Duration::from_secs(delay_secs)), TOAST)
    }

    fn state(shaking: bool, hatched: bool, toast_visible: bool) -> ScreenState {
        ScreenState { shaking, hatched, toast_visible }
    }

    #[test]
    fn test_mount_initial_state() {
        for seed in 0..20 {
            let config = EggConfig { seed: Some(seed), ..EggConfig::default() };
            let mut screen = ScreenController::from_config(&config);
            screen.mount(Duration::ZERO);
            assert_eq!(screen.state(), state(false, false, false));
            let deadline = screen.shake_deadline().unwrap();
            assert!(DEFAULT_SHAKE_DELAY_SECS.contains(&deadline.as_secs()));
            assert_eq!(screen.toast_deadline(), None);
        }
    }

    #[test]
    fn test_shakes_when_timer_expires() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.advance(secs(4.999));
        assert!(!screen.state().shaking);
        screen.advance(secs(5.0));
        assert!(screen.state().shaking);
        assert_eq!(screen.shake_deadline(), None);
        // stays shaking until tapped
        screen.advance(secs(600.0));
        assert!(screen.state().shaking);
    }

    #[test]
    fn test_tap_while_resting() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        let deadline = screen.shake_deadline();
        screen.on_egg_tapped(secs(1.0));
        assert_eq!(screen.state(), state(false, false, true));
        // shake timer untouched
        assert_eq!(screen.shake_deadline(), deadline);
        screen.advance(secs(5.0));
        assert!(screen.state().shaking);
    }

    #[test]
    fn test_tap_while_shaking() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.advance(secs(5.0));
        screen.on_egg_tapped(secs(6.0));
        assert_eq!(screen.state(), state(false, true, true));
        assert_eq!(screen.shake_deadline(), Some(secs(11.0)));
    }

    #[test]
    fn test_toast_dismisses_after_two_seconds() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.on_egg_tapped(secs(1.0));
        screen.advance(secs(2.999));
        assert!(screen.state().toast_visible);
        screen.advance(secs(3.0));
        assert!(!screen.state().toast_visible);
        assert_eq!(screen.toast_deadline(), None);
    }

    #[test]
    fn test_toast_debounce() {
        let mut screen = fixed(30);
        screen.mount(Duration::ZERO);
        screen.on_egg_tapped(secs(1.0));
        screen.on_egg_tapped(secs(1.5));
        // 2s after the first tap: still visible
        screen.advance(secs(3.0));
        assert!(screen.state().toast_visible);
        screen.advance(secs(3.499));
        assert!(screen.state().toast_visible);
        screen.advance(secs(3.5));
        assert!(!screen.state().toast_visible);
    }

    #[test]
    fn test_toast_visible_implies_timer_pending() {
        let mut screen = fixed(4);
        screen.mount(Duration::ZERO);
        let mut t = 0.0;
        while t < 20.0 {
            if (t * 10.0) as u32 % 7 == 0 {
                screen.on_egg_tapped(secs(t));
            }
            screen.advance(secs(t));
            let s = screen.state();
            assert_eq!(s.toast_visible, screen.toast_deadline().is_some(), "at {}", t);
            t += 0.25;
        }
    }

    #[test]
    fn test_end_to_end() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        assert_eq!(screen.state(), state(false, false, false));

        screen.advance(secs(5.0));
        assert_eq!(screen.state(), state(true, false, false));

        screen.on_egg_tapped(secs(5.0));
        assert_eq!(screen.state(), state(false, true, true));

        screen.advance(secs(7.0));
        assert!(!screen.state().toast_visible);
        assert!(!screen.state().shaking);

        screen.advance(secs(9.999));
        assert!(!screen.state().shaking);
        screen.advance(secs(10.0));
        assert!(screen.state().shaking);
    }

    #[test]
    fn test_late_advance_fires_in_deadline_order() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.on_egg_tapped(secs(1.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        screen.subscribe(move |s| sink.borrow_mut().push(*s));

        // one late frame covers both the toast deadline (3s) and the shake deadline (5s)
        screen.advance(secs(8.0));
        assert_eq!(
            *seen.borrow(),
            vec![state(false, false, false), state(true, false, false)]
        );
    }

    #[test]
    fn test_listeners_only_on_change() {
        let mut screen = fixed(5);
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let id = screen.subscribe(move |_| *counter.borrow_mut() += 1);

        // mount from default state changes nothing visible
        screen.mount(Duration::ZERO);
        assert_eq!(*count.borrow(), 0);

        screen.on_egg_tapped(secs(1.0));
        assert_eq!(*count.borrow(), 1);
        // same outcome again: toast already visible and not hatched
        screen.on_egg_tapped(secs(1.2));
        assert_eq!(*count.borrow(), 1);

        assert!(screen.unsubscribe(id));
        assert!(!screen.unsubscribe(id));
        screen.advance(secs(5.0));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.on_egg_tapped(secs(1.0));
        screen.unmount();
        assert!(!screen.is_mounted());
        assert_eq!(screen.next_deadline(), None);

        let before = screen.state();
        screen.advance(secs(60.0));
        screen.on_egg_tapped(secs(61.0));
        assert_eq!(screen.state(), before);
    }

    #[test]
    fn test_remount_resets() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        screen.advance(secs(5.0));
        screen.on_egg_tapped(secs(5.5));
        screen.unmount();
        screen.mount(secs(100.0));
        assert_eq!(screen.state(), state(false, false, false));
        assert_eq!(screen.shake_deadline(), Some(secs(105.0)));
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let mut screen = fixed(5);
        screen.mount(Duration::ZERO);
        assert_eq!(screen.next_deadline(), Some(secs(5.0)));
        screen.on_egg_tapped(secs(1.0));
        assert_eq!(screen.next_deadline(), Some(secs(3.0)));
    }

    #[test]
    fn test_fresh_delay_drawn_on_each_rearm() {
        let draws = Rc::new(RefCell::new(vec![4u64, 6, 5]));
        let source = draws.clone();
        let mut screen = ScreenController::new(
            Box::new(move || Duration::from_secs(source.borrow_mut().remove(0))),
            TOAST,
        );
        screen.mount(Duration::ZERO);
        assert_eq!(screen.shake_deadline(), Some(secs(4.0)));
        screen.advance(secs(4.0));
        screen.on_egg_tapped(secs(4.0));
        assert_eq!(screen.shake_deadline(), Some(secs(10.0)));
        screen.advance(secs(10.0));
        screen.on_egg_tapped(secs(12.0));
        assert_eq!(screen.shake_deadline(), Some(secs(17.0)));
        assert!(draws.borrow().is_empty());
    }
}
