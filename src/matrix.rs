use crate::cell::{GridCell, PlacedObject};
use crate::geometry::{Coordinate, Rect};

/// Growable 2D grid of cells backing the editable area.
///
/// The backing storage only ever grows: shrinking the window shrinks the
/// active window (`active_rows` x `active_cols`) but keeps every cell that
/// was ever allocated, so content placed near the edge survives a
/// shrink-then-grow cycle. `active_rows <= rows.len()` and
/// `active_cols <= rows[0].len()` hold at all times.
#[derive(Debug, Default)]
pub struct CellMatrix {
    rows: Vec<Vec<GridCell>>,
    active_rows: usize,
    active_cols: usize,
    origin: Coordinate,
    cell_size: i32,
}

impl CellMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_rows(&self) -> usize {
        self.active_rows
    }

    pub fn active_cols(&self) -> usize {
        self.active_cols
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Re-derives the active window from a new safe area, growing the
    /// backing storage where needed and repositioning every allocated cell.
    /// Existing cells are extended in place, never rebuilt, so content
    /// already placed keeps its (row, col) identity.
    pub fn resize(&mut self, safe_area: Rect, cell_size: i32) {
        debug_assert!(cell_size > 0);

        self.origin = safe_area.top_left();
        self.cell_size = cell_size;
        self.active_rows = (safe_area.h / cell_size).max(0) as usize;
        self.active_cols = (safe_area.w / cell_size).max(0) as usize;

        let alloc_cols = self.rows.first().map_or(0, Vec::len);
        let target_cols = alloc_cols.max(self.active_cols);

        // Widen existing rows first; the fresh rows below are born at the
        // target width. Placeholder rects are fixed up in the reposition
        // pass.
        for row in &mut self.rows {
            while row.len() < target_cols {
                row.push(GridCell::new(Rect::default()));
            }
        }
        while self.rows.len() < self.active_rows {
            let row = (0..target_cols)
                .map(|_| GridCell::new(Rect::default()))
                .collect();
            self.rows.push(row);
        }

        for (r, row) in self.rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                cell.rect = Rect::new(
                    self.origin.x + c as i32 * cell_size,
                    self.origin.y + r as i32 * cell_size,
                    cell_size,
                    cell_size,
                );
            }
        }

        log::debug!(
            "matrix resized: {}x{} active, {}x{} allocated",
            self.active_rows,
            self.active_cols,
            self.rows.len(),
            self.rows.first().map_or(0, Vec::len),
        );
    }

    /// Maps a screen point to the (row, col) of the active cell under it,
    /// or `None` when the point misses the grid.
    pub fn cell_at(&self, p: Coordinate) -> Option<(usize, usize)> {
        if self.cell_size <= 0 {
            return None;
        }
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        if dx < 0 || dy < 0 {
            return None;
        }
        let col = (dx / self.cell_size) as usize;
        let row = (dy / self.cell_size) as usize;
        if row < self.active_rows && col < self.active_cols {
            Some((row, col))
        } else {
            None
        }
    }

    /// Cell lookup within the active window.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < self.active_rows && col < self.active_cols {
            self.rows.get(row)?.get(col)
        } else {
            None
        }
    }

    /// Replaces the content of an active cell. The previous content, if
    /// any, is dropped. Out-of-range indices are ignored.
    pub fn set_content(&mut self, row: usize, col: usize, content: Option<PlacedObject>) {
        if row >= self.active_rows || col >= self.active_cols {
            return;
        }
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            cell.content = content;
        }
    }

    /// All cells in the active window, row-major, for rendering.
    pub fn active_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows
            .iter()
            .take(self.active_rows)
            .flat_map(move |row| row.iter().take(self.active_cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{PlacedObject, RoadSegment};

    fn road() -> Option<PlacedObject> {
        Some(PlacedObject::Road(RoadSegment::new()))
    }

    #[test]
    fn sizing_matches_worked_example() {
        // 1600x900 window, 0.1 inset per side, 64px cells.
        let mut m = CellMatrix::new();
        m.resize(Rect::new(160, 90, 1280, 704), 64);
        assert_eq!(m.active_cols(), 20);
        assert_eq!(m.active_rows(), 11);
        assert_eq!(m.origin(), Coordinate::new(160, 90));
    }

    #[test]
    fn cells_positioned_from_origin() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(100, 50, 192, 128), 64);
        let cell = m.cell(1, 2).unwrap();
        assert_eq!(cell.rect, Rect::new(100 + 2 * 64, 50 + 64, 64, 64));
    }

    #[test]
    fn cell_at_inverts_layout() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(160, 90, 1280, 704), 64);
        for r in 0..m.active_rows() {
            for c in 0..m.active_cols() {
                let top_left = m.cell(r, c).unwrap().rect.top_left();
                assert_eq!(m.cell_at(top_left), Some((r, c)));
            }
        }
    }

    #[test]
    fn cell_at_misses_outside_active_window() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(160, 90, 1280, 704), 64);
        // Left/above the origin.
        assert_eq!(m.cell_at(Coordinate::new(159, 90)), None);
        assert_eq!(m.cell_at(Coordinate::new(160, 89)), None);
        // Past the last active column/row.
        assert_eq!(m.cell_at(Coordinate::new(160 + 20 * 64, 90)), None);
        assert_eq!(m.cell_at(Coordinate::new(160, 90 + 11 * 64)), None);
        // Last pixel of the last active cell.
        assert_eq!(
            m.cell_at(Coordinate::new(160 + 20 * 64 - 1, 90 + 11 * 64 - 1)),
            Some((10, 19))
        );
    }

    #[test]
    fn growth_is_monotonic_and_content_preserving() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(0, 0, 640, 640), 64); // 10x10
        m.set_content(7, 9, road());

        // Shrink: (7, 9) leaves the active window but is not discarded.
        m.resize(Rect::new(0, 0, 320, 320), 64); // 5x5
        assert_eq!(m.active_rows(), 5);
        assert!(m.cell(7, 9).is_none());

        // Grow past the original size: the content reappears in place.
        m.resize(Rect::new(0, 0, 768, 768), 64); // 12x12
        assert_eq!(m.cell(7, 9).unwrap().content, road());
        // Cells grown while shrunk start empty.
        assert_eq!(m.cell(11, 11).unwrap().content, None);
    }

    #[test]
    fn content_survives_origin_shift() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(160, 90, 640, 320), 64);
        m.set_content(2, 3, road());

        // A resize that moves the origin keeps (2, 3) addressed the same
        // and re-derives its rect from the new origin.
        m.resize(Rect::new(128, 64, 640, 320), 64);
        let cell = m.cell(2, 3).unwrap();
        assert_eq!(cell.content, road());
        assert_eq!(cell.rect.top_left(), Coordinate::new(128 + 3 * 64, 64 + 2 * 64));
    }

    #[test]
    fn replace_drops_previous_and_erase_clears() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(0, 0, 128, 128), 64);
        m.set_content(0, 0, road());
        m.set_content(0, 0, road());
        assert_eq!(m.cell(0, 0).unwrap().content, road());
        m.set_content(0, 0, None);
        assert_eq!(m.cell(0, 0).unwrap().content, None);
    }

    #[test]
    fn empty_matrix_grows_from_zero_rows() {
        let mut m = CellMatrix::new();
        assert_eq!(m.cell_at(Coordinate::new(0, 0)), None);
        m.resize(Rect::new(0, 0, 128, 64), 64);
        assert_eq!(m.active_rows(), 1);
        assert_eq!(m.active_cols(), 2);
        assert!(m.cell(0, 1).is_some());
    }

    #[test]
    fn degenerate_safe_area_deactivates_everything() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(0, 0, 640, 640), 64);
        m.set_content(0, 0, road());
        m.resize(Rect::new(0, 0, 0, 0), 64);
        assert_eq!(m.active_rows(), 0);
        assert_eq!(m.active_cols(), 0);
        assert_eq!(m.active_cells().count(), 0);
        m.resize(Rect::new(0, 0, 640, 640), 64);
        assert_eq!(m.cell(0, 0).unwrap().content, road());
    }

    #[test]
    fn active_cells_yields_row_major_window() {
        let mut m = CellMatrix::new();
        m.resize(Rect::new(0, 0, 256, 192), 64); // 3 rows, 4 cols
        m.resize(Rect::new(0, 0, 128, 128), 64); // 2 rows, 2 cols active
        assert_eq!(m.active_cells().count(), 4);
        let first = m.active_cells().next().unwrap();
        assert_eq!(first.rect.top_left(), Coordinate::new(0, 0));
    }
}
