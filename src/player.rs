use crate::geom::Vec2;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Facing {
    Left,
    Right,
}

/// Directional key states for one tick.
#[derive(Clone, Copy, Default, Debug)]
pub struct Held {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Held {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    pub has_pickup: bool,
    /// Milliseconds of directional input accumulated before the chaser
    /// spawns; stops counting (and never resets) once it has.
    pub move_clock_ms: u64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: Facing::Right,
            has_pickup: false,
            move_clock_ms: 0,
        }
    }

    /// Maps held keys to a velocity. Exactly one direction applies per
    /// tick, priority left > right > up > down, so diagonal movement is
    /// impossible even with several keys down. Horizontal input flips the
    /// facing.
    pub fn control(&mut self, held: &Held, speed: f32) -> Vec2 {
        if held.left {
            self.facing = Facing::Left;
            Vec2::new(-speed, 0.0)
        } else if held.right {
            self.facing = Facing::Right;
            Vec2::new(speed, 0.0)
        } else if held.up {
            Vec2::new(0.0, -speed)
        } else if held.down {
            Vec2::new(0.0, speed)
        } else {
            Vec2::new(0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_wins_over_all_other_directions() {
        let mut player = Player::new(Vec2::new(0.0, 0.0));
        let all = Held {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        let v = player.control(&all, 120.0);
        assert_eq!(v, Vec2::new(-120.0, 0.0));
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn vertical_input_keeps_facing() {
        let mut player = Player::new(Vec2::new(0.0, 0.0));
        player.control(
            &Held {
                left: true,
                ..Held::default()
            },
            120.0,
        );
        let v = player.control(
            &Held {
                up: true,
                ..Held::default()
            },
            120.0,
        );
        assert_eq!(v, Vec2::new(0.0, -120.0));
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn no_input_means_no_velocity() {
        let mut player = Player::new(Vec2::new(0.0, 0.0));
        assert_eq!(player.control(&Held::default(), 120.0), Vec2::new(0.0, 0.0));
    }
}
