//! Text and line drawing on a pixmap, built from `ttf-parser` glyph
//! outlines filled as `tiny-skia` paths.

use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

/// Converts a glyph outline (font units, y-up) into a pixmap-space path
/// anchored at a baseline position.
struct GlyphPathBuilder {
    builder: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, px: f32, py: f32) {
        self.builder
            .move_to(self.x + px * self.scale, self.y - py * self.scale);
    }

    fn line_to(&mut self, px: f32, py: f32) {
        self.builder
            .line_to(self.x + px * self.scale, self.y - py * self.scale);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, px: f32, py: f32) {
        self.builder.quad_to(
            self.x + x1 * self.scale,
            self.y - y1 * self.scale,
            self.x + px * self.scale,
            self.y - py * self.scale,
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, px: f32, py: f32) {
        self.builder.cubic_to(
            self.x + x1 * self.scale,
            self.y - y1 * self.scale,
            self.x + x2 * self.scale,
            self.y - y2 * self.scale,
            self.x + px * self.scale,
            self.y - py * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

fn glyph_path(face: &Face<'_>, glyph: GlyphId, x: f32, baseline_y: f32, scale: f32) -> Option<Path> {
    let mut converter = GlyphPathBuilder {
        builder: PathBuilder::new(),
        scale,
        x,
        y: baseline_y,
    };
    face.outline_glyph(glyph, &mut converter)?;
    converter.builder.finish()
}

/// Advance width of `text` at `px` pixels.
///
/// Uses the same per-glyph advance rule as [`draw_text`], so a centered
/// placement computed from this width is exact. Characters without a glyph
/// in the face contribute nothing.
pub fn measure_text(face: &Face<'_>, text: &str, px: f32) -> f32 {
    let scale = px / face.units_per_em() as f32;
    text.chars()
        .filter_map(|ch| face.glyph_index(ch))
        .filter_map(|glyph| face.glyph_hor_advance(glyph))
        .map(|advance| advance as f32 * scale)
        .sum()
}

/// Draws `text` with its top edge at `top_y` and its left edge at `x`.
pub fn draw_text(
    pixmap: &mut Pixmap,
    face: &Face<'_>,
    text: &str,
    x: f32,
    top_y: f32,
    px: f32,
    color: Color,
) {
    let scale = px / face.units_per_em() as f32;
    let baseline_y = top_y + face.ascender() as f32 * scale;

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;

    let mut pen_x = x;
    for ch in text.chars() {
        let Some(glyph) = face.glyph_index(ch) else {
            continue;
        };
        // Whitespace has an advance but no outline.
        if let Some(path) = glyph_path(face, glyph, pen_x, baseline_y, scale) {
            pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        }
        pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    }
}

/// Strokes a horizontal rule from `x0` to `x1` at vertical position `y`.
pub fn draw_hline(pixmap: &mut Pixmap, x0: f32, x1: f32, y: f32, width: f32, color: Color) {
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y);
    pb.line_to(x1, y);
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;

    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
