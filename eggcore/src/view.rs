//! What the screen shows for a given state
//!
//! Pure mapping from [`ScreenState`] to text, colours and layout. The
//! painting itself lives in the app.

use egui::Color32;

use crate::screen::ScreenState;
use crate::theme::EggColors;

pub const TITLE_TEXT: &str = "Shaky Egg";
pub const TITLE_SIZE: f32 = 24.0;

pub const TOAST_NOT_READY: &str = "Easter egg not ready yet!";
pub const TOAST_HATCHED: &str = "You\u{2019}ve hatched it!";
pub const TOAST_TEXT_SIZE: f32 = 20.0;
pub const TOAST_PADDING: f32 = 16.0;
pub const TOAST_ROUNDING: f32 = 16.0;

/// Vertical gaps above each element, top to bottom.
pub const TITLE_TOP: f32 = 24.0;
pub const TOAST_TOP: f32 = 102.0;
pub const EGG_TOP: f32 = 110.0;

/// The toast banner for the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastView {
    pub message: &'static str,
    /// Top-to-bottom background stops
    pub gradient: &'static [Color32],
    /// Where the fade should be heading
    pub target_alpha: f32,
}

impl ToastView {
    pub fn from_state(state: &ScreenState) -> Self {
        let (message, gradient) = if state.hatched {
            (TOAST_HATCHED, EggColors::TOAST_HATCHED)
        } else {
            (TOAST_NOT_READY, EggColors::TOAST_NOT_READY)
        };
        Self {
            message,
            gradient,
            target_alpha: if state.toast_visible { 1.0 } else { 0.0 },
        }
    }
}

/// Colour at `t` (0..=1) along evenly spaced gradient stops.
pub fn sample_gradient(stops: &[Color32], t: f32) -> Color32 {
    match stops.len() {
        0 => Color32::TRANSPARENT,
        1 => stops[0],
        n => {
            let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (pos.floor() as usize).min(n - 2);
            lerp_color(stops[i], stops[i + 1], pos - i as f32)
        }
    }
}

/// Component-wise blend of two premultiplied colours, alpha included.
pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_not_ready() {
        let view = ToastView::from_state(&ScreenState { shaking: true, hatched: false, toast_visible: true });
        assert_eq!(view.message, TOAST_NOT_READY);
        assert_eq!(view.gradient.len(), 2);
        assert_eq!(view.target_alpha, 1.0);
    }

    #[test]
    fn test_toast_hatched() {
        let view = ToastView::from_state(&ScreenState { shaking: false, hatched: true, toast_visible: true });
        assert_eq!(view.message, TOAST_HATCHED);
        assert_eq!(view.gradient.len(), 4);
        assert_eq!(view.gradient[0], Color32::from_rgb(0xFF, 0xC4, 0x41));
    }

    #[test]
    fn test_hidden_toast_fades_out_with_last_content() {
        let view = ToastView::from_state(&ScreenState { shaking: false, hatched: true, toast_visible: false });
        assert_eq!(view.target_alpha, 0.0);
        // keeps showing the last outcome while it fades
        assert_eq!(view.message, TOAST_HATCHED);
    }

    #[test]
    fn test_sample_gradient_endpoints() {
        let stops = EggColors::TOAST_HATCHED;
        assert_eq!(sample_gradient(stops, 0.0), stops[0]);
        assert_eq!(sample_gradient(stops, 1.0), stops[3]);
        assert_eq!(sample_gradient(stops, -3.0), stops[0]);
        assert_eq!(sample_gradient(stops, 1.0 / 3.0), stops[1]);
    }

    #[test]
    fn test_sample_gradient_midpoint() {
        let stops = [Color32::from_rgb(0, 0, 0), Color32::from_rgb(200, 100, 50)];
        assert_eq!(sample_gradient(&stops, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_sample_gradient_degenerate() {
        assert_eq!(sample_gradient(&[], 0.5), Color32::TRANSPARENT);
        let one = [Color32::RED];
        assert_eq!(sample_gradient(&one, 0.9), Color32::RED);
    }

    #[test]
    fn test_lerp_color_alpha() {
        let solid = Color32::from_rgb(5, 6, 29);
        let mid = lerp_color(Color32::TRANSPARENT, solid, 0.5);
        assert_eq!(mid.a(), 128);
        assert_eq!(mid.b(), 15);
    }
}
