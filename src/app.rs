use crate::assets::SpriteId;
use crate::controller;
use crate::geometry::Rect;
use crate::matrix::CellMatrix;
use crate::toolbar::{ToolAction, Toolbar};
use crate::vehicle::VehiclePool;

/// Edge length of a toolbar icon in pixels.
pub const TOOL_ICON_SIZE: (i32, i32) = (48, 48);

/// The single process-owned context. Created once in `main` and passed by
/// mutable reference everywhere; there are no globals.
pub struct App {
    pub matrix: CellMatrix,
    pub toolbar: Toolbar,
    pub vehicles: VehiclePool,
    pub safe_area: Rect,
}

impl App {
    pub fn new(window_width: u32, window_height: u32) -> Self {
        let mut toolbar = Toolbar::new();
        toolbar.register(SpriteId::RoadTool, TOOL_ICON_SIZE, ToolAction::PlaceRoad);
        toolbar.register(SpriteId::EraserTool, TOOL_ICON_SIZE, ToolAction::Erase);

        let mut app = Self {
            matrix: CellMatrix::new(),
            toolbar,
            vehicles: VehiclePool::new(),
            safe_area: Rect::default(),
        };
        controller::handle_resize(&mut app, window_width, window_height);

        // The one and only vehicle spawn.
        app.vehicles.seed(app.safe_area);
        app
    }
}
