use egui::{pos2, Align2, Context, Rect, Sense, TextStyle, TextureHandle, TextureOptions, Vec2};
use eggcore::animation::{EggAnimator, Fade};
use eggcore::assets;
use eggcore::paint::{egg_silhouette, gradient_text, textured_quad, vertical_gradient};
use eggcore::repaint::RepaintController;
use eggcore::screen::{ScreenController, ScreenState};
use eggcore::theme::{black, extra_bold, EggColors};
use eggcore::view::{self, ToastView};
use eggcore::EggConfig;
use std::time::{Duration, Instant};

/// Largest the egg is drawn, in points.
const EGG_MAX_SIZE: Vec2 = Vec2::new(200.0, 260.0);
/// Egg size when the image is missing and a silhouette is painted instead.
const EGG_FALLBACK_SIZE: Vec2 = Vec2::new(150.0, 190.0);

pub struct ShakyEggApp {
    screen: ScreenController,
    animator: EggAnimator,
    toast_fade: Fade,
    egg_texture: Option<TextureHandle>,
    egg_size: Vec2,
    /// Origin of the screen clock
    mounted_at: Instant,
    last_update: Instant,
    repaint: RepaintController,
}

impl ShakyEggApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &EggConfig) -> Self {
        let mut screen = ScreenController::from_config(config);

        let ctx = cc.egui_ctx.clone();
        screen.subscribe(move |state: &ScreenState| {
            log::debug!(
                "state: shaking={} hatched={} toast={}",
                state.shaking, state.hatched, state.toast_visible
            );
            ctx.request_repaint();
        });

        let egg_texture = match assets::load_egg_image(config.egg_image.as_deref()) {
            Ok(image) => Some(cc.egui_ctx.load_texture("easter-egg", image, TextureOptions::LINEAR)),
            Err(e) => {
                log::warn!("{}, painting the egg instead", e);
                None
            }
        };
        Self::mounted(screen, egg_texture)
    }

    /// Mount `screen` and start its clock.
    fn mounted(mut screen: ScreenController, egg_texture: Option<TextureHandle>) -> Self {
        let egg_size = egg_texture
            .as_ref()
            .map(|t| fit_within(t.size_vec2(), EGG_MAX_SIZE))
            .unwrap_or(EGG_FALLBACK_SIZE);

        let now = Instant::now();
        screen.mount(Duration::ZERO);
        log::info!("egg screen mounted");

        Self {
            screen,
            animator: EggAnimator::new(),
            toast_fade: Fade::new(0.0),
            egg_texture,
            egg_size,
            mounted_at: now,
            last_update: now,
            repaint: RepaintController::new(),
        }
    }

    /// Everything a frame does besides painting: fire due timers, apply the
    /// tap, follow the new state with the animator and the toast fade, then
    /// schedule the next repaint. Returns the toast to draw.
    fn tick(&mut self, now: Duration, dt: f32, tapped: bool) -> ToastView {
        let before = self.screen.state();

        // Timers first, so the tap acts on what is on screen
        self.screen.advance(now);
        if tapped {
            self.screen.on_egg_tapped(now);
        }

        let state = self.screen.state();
        if state != before {
            self.repaint.mark_needs_repaint();
        }
        if self.animator.sync(state.shaking, now) {
            log::debug!("egg animation restarted (generation {})", self.animator.generation());
        }
        let toast = ToastView::from_state(&state);
        self.toast_fade.set_target(toast.target_alpha);
        self.toast_fade.update(dt);

        self.repaint
            .set_continuous(self.animator.is_animating() || !self.toast_fade.is_settled());
        if let Some(deadline) = self.screen.next_deadline() {
            self.repaint.wake_at(deadline);
        }
        toast
    }

    fn paint_background(&self, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, EggColors::BACKGROUND);
        painter.add(vertical_gradient(rect, 0.0, EggColors::BACKGROUND_OVERLAY, 1.0));
    }

    /// Toast banner size. Both messages are a single line in the same font,
    /// so the height, and with it the egg's position, never changes.
    fn toast_size(painter: &egui::Painter, message: &str) -> Vec2 {
        let galley = painter.layout_no_wrap(
            message.to_owned(),
            extra_bold(view::TOAST_TEXT_SIZE),
            EggColors::TOAST_TEXT,
        );
        galley.size() + Vec2::splat(view::TOAST_PADDING * 2.0)
    }

    /// Toast centred under `top`. It keeps its space while faded out.
    fn paint_toast(&self, painter: &egui::Painter, toast: &ToastView, center_x: f32, top: f32) {
        let alpha = self.toast_fade.value().clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let text_color = EggColors::TOAST_TEXT.gamma_multiply(alpha);
        let galley = painter.layout_no_wrap(
            toast.message.to_owned(),
            extra_bold(view::TOAST_TEXT_SIZE),
            text_color,
        );
        let size = galley.size() + Vec2::splat(view::TOAST_PADDING * 2.0);
        let rect = Align2::CENTER_TOP.anchor_size(pos2(center_x, top), size);

        painter.add(vertical_gradient(rect, view::TOAST_ROUNDING, toast.gradient, alpha));
        painter.galley(rect.min + Vec2::splat(view::TOAST_PADDING), galley, text_color);
    }

    fn paint_egg(&self, painter: &egui::Painter, rect: Rect, now: Duration) {
        let transform = self.animator.transform(now);
        let mesh = match &self.egg_texture {
            Some(texture) => textured_quad(rect, texture.id(), &transform),
            None => egg_silhouette(rect, EggColors::EGG_SHELL, &transform),
        };
        painter.add(mesh);
    }
}

/// Scale `size` down, keeping its aspect ratio, until it fits in `max`.
fn fit_within(size: Vec2, max: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return max;
    }
    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
    size * scale
}

impl eframe::App for ShakyEggApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = self.mounted_at.elapsed();
        self.repaint.begin_frame(ctx, now);
        log::trace!("frame {} ({:?})", self.repaint.frame(), self.repaint.reason());

        let instant = Instant::now();
        let dt = instant.duration_since(self.last_update).as_secs_f32();
        self.last_update = instant;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(EggColors::BACKGROUND))
            .show(ctx, |ui| {
                let full_rect = ui.max_rect();
                let center_x = full_rect.center().x;

                // Layout
                let heading = ui
                    .style()
                    .text_styles
                    .get(&TextStyle::Heading)
                    .cloned()
                    .unwrap_or_else(|| black(view::TITLE_SIZE));
                let title = ui
                    .painter()
                    .layout_job(gradient_text(view::TITLE_TEXT, heading, EggColors::TITLE));
                let title_rect = Align2::CENTER_TOP
                    .anchor_size(pos2(center_x, full_rect.top() + view::TITLE_TOP), title.size());
                let toast_top = title_rect.bottom() + view::TOAST_TOP;
                let shown = ToastView::from_state(&self.screen.state());
                let toast_height = Self::toast_size(ui.painter(), shown.message).y;
                let egg_rect = Rect::from_min_size(
                    pos2(center_x - self.egg_size.x / 2.0, toast_top + toast_height + view::EGG_TOP),
                    self.egg_size,
                );

                let tapped = ui.interact(egg_rect, ui.id().with("egg"), Sense::click()).clicked();
                let toast = self.tick(now, dt, tapped);

                let painter = ui.painter();
                self.paint_background(painter, full_rect);
                painter.galley(title_rect.min, title, EggColors::TITLE[0]);
                self.paint_toast(painter, &toast, center_x, toast_top);
                self.paint_egg(painter, egg_rect, now);
            });

        self.repaint.end_frame(ctx, now);
    }
}

impl Drop for ShakyEggApp {
    fn drop(&mut self) {
        self.screen.unmount();
        self.animator.stop();
    }
}
