use crate::assets::SpriteId;
use crate::cell::{PlacedObject, RoadSegment};
use crate::geometry::{Coordinate, Rect};

/// Vertical gap between stacked tool icons, in pixels.
const TOOL_GAP: i32 = 12;

/// What clicking a grid cell does while the tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    PlaceRoad,
    Erase,
}

impl ToolAction {
    /// Builds the content a placement tool puts into a cell, or `None` for
    /// the eraser.
    pub fn make_content(&self) -> Option<PlacedObject> {
        match self {
            ToolAction::PlaceRoad => Some(PlacedObject::Road(RoadSegment::new())),
            ToolAction::Erase => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tool {
    pub icon: SpriteId,
    pub icon_size: (i32, i32),
    pub rect: Rect,
    pub action: ToolAction,
}

/// Ordered list of tools with at most one active at a time. Hit rects are
/// recomputed by `layout` and must not overlap the grid's safe area.
#[derive(Debug, Default)]
pub struct Toolbar {
    tools: Vec<Tool>,
    active: Option<usize>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, icon: SpriteId, icon_size: (i32, i32), action: ToolAction) {
        self.tools.push(Tool {
            icon,
            icon_size,
            rect: Rect::default(),
            action,
        });
    }

    /// Stacks the tool icons downward from `origin`, recording each hit
    /// rect for later hit tests.
    pub fn layout(&mut self, origin: Coordinate) {
        let mut y = origin.y;
        for tool in &mut self.tools {
            let (w, h) = tool.icon_size;
            tool.rect = Rect::new(origin.x, y, w, h);
            y += h + TOOL_GAP;
        }
    }

    /// First tool whose rect contains `p`, in registration order.
    pub fn hit_test(&self, p: Coordinate) -> Option<usize> {
        self.tools.iter().position(|t| t.rect.contains(p))
    }

    /// Selects a tool by index. Selecting the tool that is already active
    /// deselects it, returning to the no-tool state.
    pub fn select(&mut self, index: usize) {
        if index >= self.tools.len() {
            return;
        }
        if self.active == Some(index) {
            self.active = None;
            log::debug!("tool {} deselected", index);
        } else {
            self.active = Some(index);
            log::debug!("tool {} selected", index);
        }
    }

    pub fn active(&self) -> Option<&Tool> {
        self.active.and_then(|i| self.tools.get(i))
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> Toolbar {
        let mut bar = Toolbar::new();
        bar.register(SpriteId::RoadTool, (48, 48), ToolAction::PlaceRoad);
        bar.register(SpriteId::EraserTool, (48, 48), ToolAction::Erase);
        bar.layout(Coordinate::new(20, 90));
        bar
    }

    #[test]
    fn layout_stacks_with_gap() {
        let bar = bar();
        assert_eq!(bar.tools()[0].rect, Rect::new(20, 90, 48, 48));
        assert_eq!(bar.tools()[1].rect, Rect::new(20, 90 + 48 + TOOL_GAP, 48, 48));
        assert!(!bar.tools()[0].rect.intersects(&bar.tools()[1].rect));
    }

    #[test]
    fn hit_test_first_match_in_registration_order() {
        let bar = bar();
        assert_eq!(bar.hit_test(Coordinate::new(21, 91)), Some(0));
        assert_eq!(bar.hit_test(Coordinate::new(21, 151)), Some(1));
        assert_eq!(bar.hit_test(Coordinate::new(200, 91)), None);
        // The gap between icons hits nothing.
        assert_eq!(bar.hit_test(Coordinate::new(21, 140)), None);
    }

    #[test]
    fn exactly_one_tool_active() {
        let mut bar = bar();
        bar.select(0);
        assert_eq!(bar.active().unwrap().action, ToolAction::PlaceRoad);
        bar.select(1);
        assert_eq!(bar.active().unwrap().action, ToolAction::Erase);
        assert!(!bar.is_active(0));
    }

    #[test]
    fn reselecting_active_tool_deselects() {
        let mut bar = bar();
        bar.select(1);
        bar.select(1);
        assert!(bar.active().is_none());
    }

    #[test]
    fn out_of_range_select_ignored() {
        let mut bar = bar();
        bar.select(7);
        assert!(bar.active().is_none());
    }

    #[test]
    fn actions_build_expected_content() {
        assert!(matches!(
            ToolAction::PlaceRoad.make_content(),
            Some(PlacedObject::Road(_))
        ));
        assert_eq!(ToolAction::Erase.make_content(), None);
    }
}
