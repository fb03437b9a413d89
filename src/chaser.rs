use crate::config::GameConfig;
use crate::geom::Vec2;
use crate::maze::Maze;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Mode {
    Pursuing,
    /// Terminal: the chaser heads for a fixed corner and never pursues again.
    Fleeing { target: Vec2 },
}

pub struct Chaser {
    pub pos: Vec2,
    pub mode: Mode,
}

impl Chaser {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            mode: Mode::Pursuing,
        }
    }

    pub fn is_fleeing(&self) -> bool {
        matches!(self.mode, Mode::Fleeing { .. })
    }

    /// Picks the nearest of the four grid corners by Euclidean distance
    /// (first minimal corner wins on ties) and locks it in as the flee
    /// target. The target is never recomputed afterwards.
    pub fn start_fleeing(&mut self, corners: [Vec2; 4]) {
        if self.is_fleeing() {
            return;
        }
        let mut target = corners[0];
        let mut min_dist = f32::INFINITY;
        for corner in corners {
            let dist = self.pos.distance(corner);
            if dist < min_dist {
                min_dist = dist;
                target = corner;
            }
        }
        self.mode = Mode::Fleeing { target };
    }

    /// One tick of movement. Pursuit phases through walls; fleeing collides
    /// with them, so a fleeing chaser can wedge against a wall it cannot
    /// path around and stay there. A chaser that spawned after the pickup
    /// was already taken has no flee target and stands still.
    pub fn update(&mut self, maze: &Maze, cfg: &GameConfig, player: Vec2, has_pickup: bool, dt: f32) {
        match self.mode {
            Mode::Fleeing { target } => {
                if self.pos.distance(target) > cfg.arrive_radius {
                    let delta = step_toward(self.pos, target, cfg.flee_speed * dt);
                    self.pos = maze.resolve_move(self.pos, cfg.chaser_half(), delta);
                }
            }
            Mode::Pursuing => {
                if has_pickup {
                    return;
                }
                if self.pos.distance(player) > cfg.arrive_radius {
                    let delta = step_toward(self.pos, player, cfg.pursue_speed * dt);
                    self.pos.x += delta.x;
                    self.pos.y += delta.y;
                }
            }
        }
    }
}

fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let dist = from.distance(to);
    if dist == 0.0 {
        return Vec2::new(0.0, 0.0);
    }
    Vec2::new((to.x - from.x) / dist * step, (to.y - from.y) / dist * step)
}
