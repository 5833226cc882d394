use crate::geometry::{Coordinate, Rect};

/// Vehicle sprite footprint in pixels.
pub const VEHICLE_WIDTH: i32 = 99;
pub const VEHICLE_HEIGHT: i32 = 33;

/// Pixels travelled per tick by a freshly seeded vehicle.
const SEED_VELOCITY: Coordinate = Coordinate { x: 3, y: 0 };

/// An autonomously moving sprite. Advances by a fixed velocity each tick
/// and lives until it leaves the safe area.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub rect: Rect,
    pub velocity: Coordinate,
}

impl Vehicle {
    pub fn new(top_left: Coordinate, velocity: Coordinate) -> Self {
        Self {
            rect: Rect::new(top_left.x, top_left.y, VEHICLE_WIDTH, VEHICLE_HEIGHT),
            velocity,
        }
    }

    pub fn advance(&mut self) {
        self.rect.x += self.velocity.x;
        self.rect.y += self.velocity.y;
    }
}

/// Owns every live vehicle. Vehicles are only created by `seed` at startup;
/// continuous spawning is deliberately absent.
#[derive(Debug, Default)]
pub struct VehiclePool {
    vehicles: Vec<Vehicle>,
}

impl VehiclePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot startup spawn at the safe area's top-left corner.
    pub fn seed(&mut self, safe_area: Rect) {
        self.vehicles
            .push(Vehicle::new(safe_area.top_left(), SEED_VELOCITY));
    }

    pub fn advance_all(&mut self) {
        for v in &mut self.vehicles {
            v.advance();
        }
    }

    /// Drops every vehicle whose rect no longer intersects `bounds`.
    pub fn cull(&mut self, bounds: Rect) {
        let before = self.vehicles.len();
        self.vehicles.retain(|v| v.rect.intersects(&bounds));
        let culled = before - self.vehicles.len();
        if culled > 0 {
            log::debug!("culled {} vehicle(s) leaving the safe area", culled);
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_linear_in_ticks() {
        let safe = Rect::new(160, 90, 1280, 704);
        let mut pool = VehiclePool::new();
        pool.seed(safe);
        for _ in 0..10 {
            pool.advance_all();
        }
        assert_eq!(pool.vehicles()[0].rect.x, 160 + 3 * 10);
        assert_eq!(pool.vehicles()[0].rect.y, 90);
    }

    #[test]
    fn culled_exactly_when_leaving_bounds() {
        let safe = Rect::new(0, 0, 300, 100);
        let mut pool = VehiclePool::new();
        pool.seed(safe);

        // Still overlapping while rect.x < 300.
        let ticks_until_exit = (300 - 0 + 3 - 1) / 3; // first tick with x >= 300
        for k in 1..=ticks_until_exit {
            pool.advance_all();
            pool.cull(safe);
            if k < ticks_until_exit {
                assert_eq!(pool.len(), 1, "still inside after tick {}", k);
            }
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn vehicle_straddling_edge_survives() {
        let safe = Rect::new(0, 0, 100, 100);
        let mut pool = VehiclePool::new();
        // One pixel still inside on the left edge.
        pool.vehicles.push(Vehicle::new(
            Coordinate::new(-VEHICLE_WIDTH + 1, 0),
            Coordinate::new(3, 0),
        ));
        pool.cull(safe);
        assert_eq!(pool.len(), 1);
    }
}
