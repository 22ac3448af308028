use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::{debug, info};

use crate::models::{DetectionResult, RectF};

/// Reference font size labels are measured at; fitting never scales past it.
pub const MAX_FONT_SIZE: f32 = 52.0;

const STROKE_WIDTH: i32 = 4;
const BOX_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Font scale that makes a label measured at `MAX_FONT_SIZE` fit a box.
///
/// `measured_width` is the label width at the reference size. The result is
/// scaled proportionally to the box width but never above the reference max.
pub fn fit_font_scale(measured_width: f32, box_width: f32) -> f32 {
    if measured_width <= 0.0 {
        return MAX_FONT_SIZE;
    }
    (MAX_FONT_SIZE * box_width / measured_width).min(MAX_FONT_SIZE)
}

/// Burn bounding boxes and fitted labels into a copy of `image`.
///
/// The input buffer is never touched. Items are drawn in input order: a
/// hollow rectangle outline first, then the label inside the box's top edge.
/// Without a font only the outlines are drawn.
pub fn render_overlay(
    image: &RgbaImage,
    items: &[DetectionResult],
    font: Option<&FontVec>,
) -> RgbaImage {
    let mut canvas = image.clone();
    for item in items {
        draw_box(&mut canvas, &item.bounding_box);
        if let Some(font) = font {
            draw_label(&mut canvas, item, font);
        }
    }
    canvas
}

fn draw_box(canvas: &mut RgbaImage, bbox: &RectF) {
    let left = bbox.left.floor() as i32;
    let top = bbox.top.floor() as i32;
    let width = bbox.width().round() as i32;
    let height = bbox.height().round() as i32;
    if width <= 0 || height <= 0 {
        return;
    }

    // Stroke inward so the outline stays on the box.
    for inset in 0..STROKE_WIDTH {
        let w = width - 2 * inset;
        let h = height - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(left + inset, top + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    }
}

fn draw_label(canvas: &mut RgbaImage, item: &DetectionResult, font: &FontVec) {
    let bbox = &item.bounding_box;
    let (measured_w, measured_h) = text_size(PxScale::from(MAX_FONT_SIZE), font, &item.label);
    let measured_w = measured_w as f32;
    if measured_w <= 0.0 {
        return;
    }

    let scale = fit_font_scale(measured_w, bbox.width());
    if scale <= 0.0 {
        return;
    }

    // Margin uses the reference-size measurement, floored at zero when the
    // label is wider than the box.
    let margin = ((bbox.width() - measured_w) / 2.0).max(0.0);
    let x = (bbox.left + margin) as i32;
    let y = (bbox.top + measured_h as f32) as i32;

    draw_text_mut(
        canvas,
        LABEL_COLOR,
        x,
        y,
        PxScale::from(scale),
        font,
        &item.label,
    );
}

/// Try to load a label font from the usual system locations.
///
/// Returns None when no font is available; callers then render boxes only.
pub fn load_label_font() -> Option<FontVec> {
    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    for path in &font_paths {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                info!("loaded label font: {}", path);
                return Some(font);
            }
        }
    }

    debug!("no system font found, labels will be skipped");
    None
}
