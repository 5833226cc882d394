use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::App;
use crate::assets::{Assets, Sprite};
use crate::font;
use crate::geometry::{Coordinate, Rect};

const BG_COLOR: [u8; 4] = [32, 32, 32, 255];
const SAFE_AREA_COLOR: [u8; 4] = [48, 48, 48, 255];
const CELL_COLOR: [u8; 4] = [64, 64, 64, 255];
const GRID_LINE_COLOR: [u8; 4] = [96, 96, 96, 255];
const VEHICLE_COLOR: [u8; 4] = [0, 0, 0, 255];
const HIGHLIGHT_COLOR: [u8; 4] = [255, 255, 0, 255];
const TEXT_COLOR: [u8; 3] = [200, 200, 200];
const FPS_TEXT_SIZE: f32 = 14.0;

/// Software renderer over a pixels frame buffer. Everything is drawn by
/// writing RGBA bytes straight into the frame each redraw.
pub struct Renderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return; // minimized
        }
        self.width = width;
        self.height = height;
        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
    }

    pub fn render(&mut self, app: &App, assets: &Assets, pointer: Coordinate, fps: f64) {
        let (w, h) = (self.width, self.height);
        let frame = self.pixels.frame_mut();

        for pixel in frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BG_COLOR);
        }

        fill_rect(frame, app.safe_area, SAFE_AREA_COLOR, w, h);

        // Cells, then their content sprites on top.
        for cell in app.matrix.active_cells() {
            fill_rect(frame, inset(cell.rect, 1), CELL_COLOR, w, h);
            if let Some(content) = &cell.content {
                blit_sprite(frame, assets.sprite(content.sprite()), cell.rect, w, h);
            }
        }
        draw_grid_lines(
            frame,
            app.safe_area,
            app.matrix.active_cols() as i32,
            app.matrix.active_rows() as i32,
            w,
            h,
        );

        for (i, tool) in app.toolbar.tools().iter().enumerate() {
            blit_sprite(frame, assets.sprite(tool.icon), tool.rect, w, h);
            if app.toolbar.is_active(i) {
                draw_outline(frame, tool.rect, HIGHLIGHT_COLOR, w, h);
            }
        }

        // Outline the hovered cell while a tool is armed.
        if app.toolbar.active().is_some() {
            if let Some((row, col)) = app.matrix.cell_at(pointer) {
                if let Some(cell) = app.matrix.cell(row, col) {
                    draw_outline(frame, cell.rect, HIGHLIGHT_COLOR, w, h);
                }
            }
        }

        for vehicle in app.vehicles.vehicles() {
            fill_rect(frame, vehicle.rect, VEHICLE_COLOR, w, h);
        }

        // FPS readout in the top-right corner, clear of the toolbar column.
        let fps_text = format!("FPS: {:.0}", fps);
        let (char_w, _) = font::char_dimensions(&assets.font, FPS_TEXT_SIZE);
        let text_x = (w as usize).saturating_sub(fps_text.chars().count() * char_w + 8);
        font::draw_text(
            frame,
            &assets.font,
            &fps_text,
            text_x,
            8,
            TEXT_COLOR,
            w as usize,
            FPS_TEXT_SIZE,
        );
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

fn put_pixel(frame: &mut [u8], x: i32, y: i32, color: [u8; 4], w: u32, h: u32) {
    if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
        return;
    }
    let idx = ((y as u32 * w + x as u32) * 4) as usize;
    if idx + 3 < frame.len() {
        frame[idx..idx + 4].copy_from_slice(&color);
    }
}

fn fill_rect(frame: &mut [u8], rect: Rect, color: [u8; 4], w: u32, h: u32) {
    for dy in 0..rect.h {
        for dx in 0..rect.w {
            put_pixel(frame, rect.x + dx, rect.y + dy, color, w, h);
        }
    }
}

/// 2px outline just inside the rect edges.
fn draw_outline(frame: &mut [u8], rect: Rect, color: [u8; 4], w: u32, h: u32) {
    let thickness = 2;
    for t in 0..thickness {
        for dx in 0..rect.w {
            put_pixel(frame, rect.x + dx, rect.y + t, color, w, h);
            put_pixel(frame, rect.x + dx, rect.y + rect.h - 1 - t, color, w, h);
        }
        for dy in 0..rect.h {
            put_pixel(frame, rect.x + t, rect.y + dy, color, w, h);
            put_pixel(frame, rect.x + rect.w - 1 - t, rect.y + dy, color, w, h);
        }
    }
}

fn draw_grid_lines(frame: &mut [u8], area: Rect, cols: i32, rows: i32, w: u32, h: u32) {
    if cols == 0 || rows == 0 {
        return;
    }
    let cell = area.w / cols;
    for c in 0..=cols {
        let x = area.x + c * cell;
        for dy in 0..area.h {
            put_pixel(frame, x, area.y + dy, GRID_LINE_COLOR, w, h);
        }
    }
    for r in 0..=rows {
        let y = area.y + r * cell;
        for dx in 0..area.w {
            put_pixel(frame, area.x + dx, y, GRID_LINE_COLOR, w, h);
        }
    }
}

/// Copies a sprite to `dest`, alpha-blending and clipping to both the dest
/// rect and the frame.
fn blit_sprite(frame: &mut [u8], sprite: &Sprite, dest: Rect, w: u32, h: u32) {
    let copy_w = dest.w.min(sprite.width as i32);
    let copy_h = dest.h.min(sprite.height as i32);
    for sy in 0..copy_h {
        for sx in 0..copy_w {
            let src = ((sy as u32 * sprite.width + sx as u32) * 4) as usize;
            let alpha = sprite.rgba[src + 3] as u16;
            if alpha == 0 {
                continue;
            }
            let (px, py) = (dest.x + sx, dest.y + sy);
            if px < 0 || py < 0 || px >= w as i32 || py >= h as i32 {
                continue;
            }
            let idx = ((py as u32 * w + px as u32) * 4) as usize;
            if idx + 3 >= frame.len() {
                continue;
            }
            let inv = 255 - alpha;
            for ch in 0..3 {
                frame[idx + ch] = ((frame[idx + ch] as u16 * inv
                    + sprite.rgba[src + ch] as u16 * alpha)
                    / 255) as u8;
            }
            frame[idx + 3] = 255;
        }
    }
}

fn inset(rect: Rect, by: i32) -> Rect {
    Rect::new(
        rect.x + by,
        rect.y + by,
        (rect.w - 2 * by).max(0),
        (rect.h - 2 * by).max(0),
    )
}
