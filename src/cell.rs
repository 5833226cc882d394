use crate::assets::SpriteId;
use crate::geometry::Rect;

/// A road piece occupying one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadSegment {
    sprite: SpriteId,
}

impl RoadSegment {
    pub fn new() -> Self {
        Self {
            sprite: SpriteId::Road,
        }
    }
}

impl Default for RoadSegment {
    fn default() -> Self {
        Self::new()
    }
}

/// Content placed into a cell by a tool. New placeable kinds become new
/// variants here; dropping a value is what releases it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacedObject {
    Road(RoadSegment),
}

impl PlacedObject {
    pub fn sprite(&self) -> SpriteId {
        match self {
            PlacedObject::Road(seg) => seg.sprite,
        }
    }
}

/// One fixed-size square of the grid. Cells are created when the matrix
/// grows and are never destroyed afterwards; only their screen rect moves
/// and their content changes.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub rect: Rect,
    pub content: Option<PlacedObject>,
}

impl GridCell {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            content: None,
        }
    }
}
