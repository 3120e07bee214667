//! Shaky Egg theme: night-sky background, warm gold accents
//!
//! Nunito ExtraBold for the toast, Nunito Black for the title. When the
//! font files are missing both families fall back to egui's default
//! proportional font.

use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Style, Visuals};

use crate::assets::FontAssets;
use crate::view;

pub struct EggColors;

impl EggColors {
    pub const BACKGROUND: Color32 = Color32::from_rgb(0x0F, 0x12, 0x41);
    /// Vertical overlay, transparent at the top to solid at the bottom.
    pub const BACKGROUND_OVERLAY: &'static [Color32] = &[
        Color32::TRANSPARENT,
        Color32::from_rgb(0x05, 0x06, 0x1D),
    ];
    pub const TITLE: &'static [Color32] = &[
        Color32::from_rgb(0xFF, 0xD3, 0x43),
        Color32::from_rgb(0xFF, 0xD6, 0x4D),
        Color32::from_rgb(0xFF, 0xB6, 0x19),
    ];
    pub const TOAST_NOT_READY: &'static [Color32] = &[
        Color32::from_rgb(0x8D, 0x8E, 0xA1),
        Color32::from_rgb(0x8D, 0x8E, 0xA1),
    ];
    pub const TOAST_HATCHED: &'static [Color32] = &[
        Color32::from_rgb(0xFF, 0xC4, 0x41),
        Color32::from_rgb(0xED, 0xA6, 0x16),
        Color32::from_rgb(0xE0, 0x97, 0x23),
        Color32::from_rgb(0xCA, 0x75, 0x00),
    ];
    pub const TOAST_TEXT: Color32 = Color32::WHITE;
    /// Shell colour for the painted egg when the image is missing.
    pub const EGG_SHELL: Color32 = Color32::from_rgb(0xF6, 0xE7, 0xC8);
}

pub const NUNITO_EXTRA_BOLD: &str = "nunito-extra-bold";
pub const NUNITO_BLACK: &str = "nunito-black";

pub fn extra_bold(size: f32) -> FontId {
    FontId::new(size, FontFamily::Name(NUNITO_EXTRA_BOLD.into()))
}

pub fn black(size: f32) -> FontId {
    FontId::new(size, FontFamily::Name(NUNITO_BLACK.into()))
}

/// Theme configuration for the egg screen
pub struct EggTheme {
    /// Size of the Heading style, which the title is drawn in
    pub font_size_heading: f32,
}

impl Default for EggTheme {
    fn default() -> Self {
        Self {
            font_size_heading: view::TITLE_SIZE,
        }
    }
}

impl EggTheme {
    /// Font definitions with both Nunito families registered.
    ///
    /// A family whose file is missing maps to the default proportional
    /// fonts, so `extra_bold()` and `black()` are always valid.
    pub fn font_definitions(&self, fonts: &FontAssets) -> FontDefinitions {
        let mut defs = FontDefinitions::default();
        let fallback = defs
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        for (name, data) in [(NUNITO_EXTRA_BOLD, &fonts.extra_bold), (NUNITO_BLACK, &fonts.black)] {
            let mut family = Vec::with_capacity(fallback.len() + 1);
            if let Some(bytes) = data {
                defs.font_data.insert(name.to_owned(), FontData::from_owned(bytes.clone()));
                family.push(name.to_owned());
            }
            family.extend(fallback.iter().cloned());
            defs.families.insert(FontFamily::Name(name.into()), family);
        }
        defs
    }

    /// Apply the egg theme to an egui context
    pub fn apply(&self, ctx: &egui::Context, fonts: &FontAssets) {
        ctx.set_fonts(self.font_definitions(fonts));

        let mut style = Style::default();
        let mut visuals = Visuals::dark();
        visuals.panel_fill = EggColors::BACKGROUND;
        visuals.window_fill = EggColors::BACKGROUND;
        visuals.override_text_color = Some(Color32::WHITE);
        style.visuals = visuals;

        style.text_styles.insert(egui::TextStyle::Heading, black(self.font_size_heading));

        ctx.set_style(style);
    }
}
