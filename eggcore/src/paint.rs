//! Mesh builders for gradients and the transformed egg
//!
//! egui only fills shapes with a single colour, so gradients are built as
//! meshes of horizontal strips with per-vertex colours. A row is placed on
//! every gradient stop, so each strip blends between exactly two stops.

use egui::epaint::Vertex;
use egui::text::{LayoutJob, TextFormat};
use egui::{pos2, vec2, Color32, FontId, Mesh, Pos2, Rect, TextureId, Vec2};

use crate::animation::EggTransform;
use crate::view::sample_gradient;

/// Rows added inside each rounded corner.
const CORNER_ROWS: usize = 8;

/// Vertices on the outline of the painted egg.
const EGG_SEGMENTS: usize = 48;

/// Top-to-bottom gradient filling `rect` with rounded corners.
pub fn vertical_gradient(rect: Rect, rounding: f32, stops: &[Color32], opacity: f32) -> Mesh {
    let mut mesh = Mesh::default();
    if stops.is_empty() || rect.height() <= 0.0 || rect.width() <= 0.0 {
        return mesh;
    }
    let r = rounding.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);

    let mut rows: Vec<f32> = Vec::new();
    let segments = stops.len().saturating_sub(1).max(1);
    for k in 0..=segments {
        rows.push(rect.top() + rect.height() * k as f32 / segments as f32);
    }
    if r > 0.0 {
        for i in 1..=CORNER_ROWS {
            let d = r * i as f32 / CORNER_ROWS as f32;
            rows.push(rect.top() + d);
            rows.push(rect.bottom() - d);
        }
    }
    rows.sort_by(|a, b| a.total_cmp(b));
    rows.dedup_by(|a, b| (*a - *b).abs() < 1e-3);

    for y in &rows {
        let inset = corner_inset(rect, r, *y);
        let t = (y - rect.top()) / rect.height();
        let color = sample_gradient(stops, t).gamma_multiply(opacity);
        mesh.colored_vertex(pos2(rect.left() + inset, *y), color);
        mesh.colored_vertex(pos2(rect.right() - inset, *y), color);
    }
    for row in 0..rows.len().saturating_sub(1) {
        let i = (row * 2) as u32;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    mesh
}

/// Horizontal distance from the rect edge to a rounded corner's arc at `y`.
fn corner_inset(rect: Rect, r: f32, y: f32) -> f32 {
    if r <= 0.0 {
        return 0.0;
    }
    let dy = if y < rect.top() + r {
        rect.top() + r - y
    } else if y > rect.bottom() - r {
        y - (rect.bottom() - r)
    } else {
        return 0.0;
    };
    r - (r * r - dy * dy).max(0.0).sqrt()
}

/// Map a point given relative to the egg's centre through its transform.
///
/// Vertical scale first, then rotation, then the sideways offset.
pub fn transform_point(center: Pos2, local: Vec2, transform: &EggTransform) -> Pos2 {
    let scaled = vec2(local.x, local.y * transform.scale_y);
    let (sin, cos) = transform.rotation_deg.to_radians().sin_cos();
    let rotated = vec2(scaled.x * cos - scaled.y * sin, scaled.x * sin + scaled.y * cos);
    center + rotated + vec2(transform.offset_x, 0.0)
}

/// Textured quad covering `rect`, drawn through `transform`.
pub fn textured_quad(rect: Rect, texture: TextureId, transform: &EggTransform) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    let center = rect.center();
    let half = rect.size() / 2.0;
    let corners = [
        (vec2(-half.x, -half.y), pos2(0.0, 0.0)),
        (vec2(half.x, -half.y), pos2(1.0, 0.0)),
        (vec2(half.x, half.y), pos2(1.0, 1.0)),
        (vec2(-half.x, half.y), pos2(0.0, 1.0)),
    ];
    for (local, uv) in corners {
        mesh.vertices.push(Vertex {
            pos: transform_point(center, local, transform),
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// A painted egg filling `rect`, narrower at the top, drawn through `transform`.
///
/// Stands in for the egg image when it cannot be loaded.
pub fn egg_silhouette(rect: Rect, color: Color32, transform: &EggTransform) -> Mesh {
    let mut mesh = Mesh::default();
    let center = rect.center();
    let a = rect.width() / 2.0;
    let b = rect.height() / 2.0;

    mesh.colored_vertex(transform_point(center, Vec2::ZERO, transform), color);
    for i in 0..EGG_SEGMENTS {
        let t = i as f32 / EGG_SEGMENTS as f32 * std::f32::consts::TAU;
        // screen y grows downward, so sin(t) > 0 is the wide bottom
        let width = a * (0.85 + 0.15 * t.sin());
        let local = vec2(width * t.cos(), b * t.sin());
        mesh.colored_vertex(transform_point(center, local, transform), color);
    }
    for i in 0..EGG_SEGMENTS as u32 {
        let next = (i + 1) % EGG_SEGMENTS as u32;
        mesh.add_triangle(0, i + 1, next + 1);
    }
    mesh
}

/// Text coloured left to right along `stops`, one section per character.
pub fn gradient_text(text: &str, font_id: FontId, stops: &[Color32]) -> LayoutJob {
    let mut job = LayoutJob::default();
    let count = text.chars().count();
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let t = if count > 1 { i as f32 / (count - 1) as f32 } else { 0.0 };
        job.append(
            ch.encode_utf8(&mut buf),
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color: sample_gradient(stops, t),
                ..Default::default()
            },
        );
    }
    job
}
