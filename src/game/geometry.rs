use serde::{Deserialize, Serialize};

/// Default capture distance between two blobs
pub const COLLISION_DISTANCE: f32 = 35.0;

/// A position on the board, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const GREEN: Color = Color(0, 255, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::square(50)
    }
}

/// Euclidean distance between two positions
pub fn distance(a: Position, b: Position) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// True iff the positions are strictly closer than `threshold`.
/// Sizes play no part in this test.
pub fn collides(a: Position, b: Position, threshold: f32) -> bool {
    distance(a, b) < threshold
}

/// A positioned, colored, sized square on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub position: Position,
    pub color: Color,
    pub size: Size,
}

impl Blob {
    pub fn new(position: Position, color: Color) -> Self {
        Self {
            position,
            color,
            size: Size::default(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn distance_to(&self, other: &Blob) -> f32 {
        distance(self.position, other.position)
    }

    pub fn collides_with(&self, other: &Blob) -> bool {
        collides(self.position, other.position, COLLISION_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetry() {
        let points = [
            Position::new(0, 0),
            Position::new(3, 4),
            Position::new(-9, 509),
            Position::new(475, 25),
        ];

        for &p in &points {
            assert_eq!(distance(p, p), 0.0);
            for &q in &points {
                assert_eq!(distance(p, q), distance(q, p));
            }
        }

        assert_eq!(distance(Position::new(0, 0), Position::new(3, 4)), 5.0);
    }

    #[test]
    fn test_collision_boundary() {
        let origin = Position::new(0, 0);

        assert!(collides(origin, Position::new(0, 34), COLLISION_DISTANCE));
        assert!(!collides(origin, Position::new(0, 35), COLLISION_DISTANCE));
        assert!(!collides(origin, Position::new(35, 0), COLLISION_DISTANCE));
        assert!(!collides(origin, Position::new(0, 36), COLLISION_DISTANCE));
        // 21^2 + 28^2 == 35^2
        assert!(!collides(origin, Position::new(21, 28), COLLISION_DISTANCE));
        assert!(collides(origin, Position::new(21, 27), COLLISION_DISTANCE));
    }

    #[test]
    fn test_blob_collision_ignores_size() {
        let a = Blob::new(Position::new(100, 100), Color::GREEN).with_size(Size::square(200));
        let b = Blob::new(Position::new(140, 100), Color::RED).with_size(Size::square(200));

        assert_eq!(a.distance_to(&b), 40.0);
        assert!(!a.collides_with(&b));
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(10, 0), Position::new(15, 5));
        assert_eq!(pos.moved_by(0, -10), Position::new(5, -5));
    }
}
