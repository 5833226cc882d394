//! Text rasterization into the RGBA frame buffer using ab_glyph.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};

/// Advance width and line height for the given pixel size, measured on 'M'
/// (the asset font is monospaced).
pub fn char_dimensions(font: &FontVec, size_px: f32) -> (usize, usize) {
    let scaled = font.as_scaled(PxScale::from(size_px));
    let advance = scaled.h_advance(font.glyph_id('M'));
    (advance as usize, scaled.height() as usize)
}

/// Draws one line of text with its top-left corner at (x, y), alpha-blending
/// glyph coverage over whatever is already in the frame.
pub fn draw_text(
    frame: &mut [u8],
    font: &FontVec,
    text: &str,
    x: usize,
    y: usize,
    color: [u8; 3],
    window_width: usize,
    size_px: f32,
) {
    if window_width == 0 {
        return;
    }
    let scaled = font.as_scaled(PxScale::from(size_px));
    let window_height = frame.len() / (window_width * 4);
    let mut caret = x as f32;
    let baseline = y as f32 + scaled.ascent();

    for ch in text.chars() {
        let mut glyph = scaled.scaled_glyph(ch);
        glyph.position = point(caret, baseline);
        caret += scaled.h_advance(glyph.id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue; // whitespace or missing glyph, advance only
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i32 + gx as i32;
            let py = bounds.min.y as i32 + gy as i32;
            if px < 0 || py < 0 {
                return;
            }
            let (px, py) = (px as usize, py as usize);
            if px >= window_width || py >= window_height {
                return;
            }
            let idx = (py * window_width + px) * 4;
            let alpha = (coverage * 255.0) as u16;
            if alpha == 0 {
                return;
            }
            let inv = 255 - alpha;
            frame[idx] = ((frame[idx] as u16 * inv + color[0] as u16 * alpha) / 255) as u8;
            frame[idx + 1] = ((frame[idx + 1] as u16 * inv + color[1] as u16 * alpha) / 255) as u8;
            frame[idx + 2] = ((frame[idx + 2] as u16 * inv + color[2] as u16 * alpha) / 255) as u8;
            frame[idx + 3] = 255;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use std::path::Path;

    #[test]
    fn char_dimensions_measure_the_asset_font() {
        let assets = Assets::load(Path::new("assets")).unwrap();
        let (w, h) = char_dimensions(&assets.font, 14.0);
        assert!(w > 0 && h >= w, "unexpected glyph metrics: {}x{}", w, h);
        // Larger sizes advance further.
        let (w2, _) = char_dimensions(&assets.font, 28.0);
        assert!(w2 > w);
    }
}
