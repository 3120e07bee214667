//! eggcore — state, timing and drawing helpers for the shaky egg screen

pub mod animation;
pub mod assets;
pub mod config;
pub mod delay;
pub mod paint;
pub mod repaint;
pub mod screen;
pub mod theme;
pub mod timer;
pub mod view;

pub use animation::{EggAnimator, EggTransform, Fade};
pub use config::EggConfig;
pub use repaint::RepaintController;
pub use screen::{ScreenController, ScreenState};
pub use theme::EggTheme;
