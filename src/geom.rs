#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Strict AABB intersection of two square boxes given by center + half extent.
pub fn overlaps(a: Vec2, a_half: f32, b: Vec2, b_half: f32) -> bool {
    (a.x - b.x).abs() < a_half + b_half && (a.y - b.y).abs() < a_half + b_half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(20.0, 0.0);
        assert!(!overlaps(a, 10.0, b, 10.0));
        assert!(overlaps(a, 10.0, Vec2::new(19.9, 0.0), 10.0));
    }
}
