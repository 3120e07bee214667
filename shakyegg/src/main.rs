//! Shaky Egg - tap the egg while it shakes
//!
//! A single screen: a title, a toast banner and an egg that starts
//! shaking after a few seconds.

mod app;

use app::ShakyEggApp;
use eframe::NativeOptions;
use eggcore::assets::FontAssets;
use eggcore::{EggConfig, EggTheme};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EggConfig::load_or_default();
    log::debug!("config: {:?}", config);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("shaky egg"),
        ..Default::default()
    };

    eframe::run_native(
        "shaky egg",
        options,
        Box::new(move |cc| {
            let fonts = FontAssets::load(config.font_dir.as_deref());
            EggTheme::default().apply(&cc.egui_ctx, &fonts);
            Box::new(ShakyEggApp::new(cc, &config))
        }),
    )
}
