use winit::window::CursorIcon;

use crate::app::App;
use crate::geometry::{Coordinate, Rect};

/// Square cell edge in pixels.
pub const CELL_SIZE: i32 = 64;
/// Ratio of the window inset on each side to form the safe area.
pub const SAFE_ZONE: f32 = 0.1;
/// Horizontal clearance kept between the toolbar column and the grid.
const TOOLBAR_CLEARANCE: i32 = 8;

/// Computes the editable safe area for a window size: inset by `SAFE_ZONE`
/// per side, then floored to whole multiples of `CELL_SIZE` so the grid
/// always holds an integral number of cells. A partial cell's worth of
/// space is discarded rather than scaling the cells.
pub fn safe_area(window_width: u32, window_height: u32) -> Rect {
    let margin_x = (window_width as f32 * SAFE_ZONE) as i32;
    let margin_y = (window_height as f32 * SAFE_ZONE) as i32;
    let avail_w = (window_width as i32 - 2 * margin_x).max(0);
    let avail_h = (window_height as i32 - 2 * margin_y).max(0);
    Rect::new(
        margin_x,
        margin_y,
        (avail_w / CELL_SIZE) * CELL_SIZE,
        (avail_h / CELL_SIZE) * CELL_SIZE,
    )
}

/// Where the toolbar column starts: centered in the left margin, level with
/// the grid's top edge. When the margin is narrower than an icon the column
/// slides left (partly offscreen) rather than reaching into the safe area,
/// so icon clicks can never land on a cell.
fn toolbar_origin(safe: Rect, icon_width: i32) -> Coordinate {
    let centered = (safe.x - icon_width) / 2;
    let x = centered.min(safe.x - icon_width - TOOLBAR_CLEARANCE);
    Coordinate::new(x, safe.y)
}

/// Resize path: re-derive the safe area, regrow/reposition the matrix and
/// re-layout the toolbar.
pub fn handle_resize(app: &mut App, window_width: u32, window_height: u32) {
    app.safe_area = safe_area(window_width, window_height);
    app.matrix.resize(app.safe_area, CELL_SIZE);
    let icon_width = app
        .toolbar
        .tools()
        .first()
        .map_or(0, |t| t.icon_size.0);
    app.toolbar.layout(toolbar_origin(app.safe_area, icon_width));
    log::debug!(
        "window {}x{} -> safe area {:?}",
        window_width,
        window_height,
        app.safe_area
    );
}

/// Click dispatch, in priority order: grid (with an active tool), then
/// toolbar, then nothing.
pub fn handle_pointer_release(app: &mut App, p: Coordinate) {
    if app.safe_area.contains(p) {
        let Some(tool) = app.toolbar.active() else {
            return; // no tool selected, clicks on the grid do nothing
        };
        let action = tool.action;
        if let Some((row, col)) = app.matrix.cell_at(p) {
            app.matrix.set_content(row, col, action.make_content());
        }
    } else if let Some(index) = app.toolbar.hit_test(p) {
        app.toolbar.select(index);
    }
}

/// Per-tick simulation step: advance every vehicle, then drop the ones
/// that left the safe area.
pub fn tick(app: &mut App) {
    app.vehicles.advance_all();
    app.vehicles.cull(app.safe_area);
}

/// Hover feedback as a pure decision: the pointer becomes a hand over any
/// tool icon, and stays the default arrow elsewhere. The window applies
/// the result.
pub fn cursor_for(p: Coordinate, tool_rects: &[Rect]) -> CursorIcon {
    if tool_rects.iter().any(|r| r.contains(p)) {
        CursorIcon::Hand
    } else {
        CursorIcon::Default
    }
}
