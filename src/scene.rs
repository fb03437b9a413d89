use rand::Rng;

use crate::chaser::Chaser;
use crate::config::GameConfig;
use crate::geom::{overlaps, Vec2};
use crate::maze::Maze;
use crate::player::{Held, Player};

/// Scene identifiers for the dispatch in `main`; the three non-maze scenes
/// are terminal.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SceneId {
    Maze,
    Win,
    Jumpscare,
    DefeatChaser,
}

pub struct MazeScene {
    pub cfg: GameConfig,
    pub maze: Maze,
    pub player: Player,
    pub chaser: Option<Chaser>,
    pub pickup: Option<Vec2>,
    pub ended: bool,
}

impl MazeScene {
    pub fn new(cfg: GameConfig, rng: &mut impl Rng) -> Self {
        let maze = Maze::generate(&cfg, rng);
        let player = Player::new(maze.player_start());
        let pickup = Some(maze.place_open_cell(rng));
        Self {
            cfg,
            maze,
            player,
            chaser: None,
            pickup,
            ended: false,
        }
    }

    /// One simulation tick: input, movement, chaser spawn and behavior,
    /// then the terminal checks. Returns the scene to switch to when a
    /// terminal condition fires. Once `ended` is set nothing moves again.
    pub fn tick(&mut self, held: &Held, dt_ms: u64, rng: &mut impl Rng) -> Option<SceneId> {
        if self.ended {
            return None;
        }
        let dt = dt_ms as f32 / 1000.0;

        let vel = self.player.control(held, self.cfg.player_speed);
        let delta = Vec2::new(vel.x * dt, vel.y * dt);
        let half = self.cfg.player_half();
        let moved = self.maze.resolve_move(self.player.pos, half, delta);
        self.player.pos = Vec2::new(
            moved.x.clamp(half, self.cfg.width - half),
            moved.y.clamp(half, self.cfg.height - half),
        );

        if held.any() && self.chaser.is_none() {
            self.player.move_clock_ms += dt_ms;
            if self.player.move_clock_ms >= self.cfg.chaser_delay_ms {
                self.chaser = Some(Chaser::new(self.maze.place_open_cell(rng)));
            }
        }

        if let Some(chaser) = &mut self.chaser {
            chaser.update(
                &self.maze,
                &self.cfg,
                self.player.pos,
                self.player.has_pickup,
                dt,
            );
        }

        self.resolve_outcome()
    }

    /// Fixed check order with early exit: pickup overlap (non-terminal),
    /// chaser contact (defeat or jumpscare depending on the pickup flag),
    /// then the exit. Reaching the exit while holding the pickup does not
    /// win; that matches the original rule.
    fn resolve_outcome(&mut self) -> Option<SceneId> {
        if let Some(pickup) = self.pickup {
            if overlaps(
                self.player.pos,
                self.cfg.player_half(),
                pickup,
                self.cfg.pickup_half(),
            ) {
                self.player.has_pickup = true;
                self.pickup = None;
                if let Some(chaser) = &mut self.chaser {
                    chaser.start_fleeing(self.maze.corners());
                }
            }
        }

        if let Some(chaser) = &self.chaser {
            if overlaps(
                self.player.pos,
                self.cfg.player_half(),
                chaser.pos,
                self.cfg.chaser_half(),
            ) {
                self.ended = true;
                return Some(if self.player.has_pickup {
                    SceneId::DefeatChaser
                } else {
                    SceneId::Jumpscare
                });
            }
        }

        if !self.player.has_pickup {
            let exit = self.maze.exit_center();
            let near = self.cfg.tile_size / 2.0;
            if (self.player.pos.x - exit.x).abs() < near
                && (self.player.pos.y - exit.y).abs() < near
            {
                self.ended = true;
                return Some(SceneId::Win);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TICK_MS: u64 = 33;

    fn open_cfg() -> GameConfig {
        GameConfig {
            wall_probability: 0.0,
            ..GameConfig::default()
        }
    }

    /// All-open maze with the pickup parked far from the start corridor.
    fn open_scene(cfg: GameConfig, seed: u64) -> MazeScene {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scene = MazeScene::new(cfg, &mut rng);
        scene.pickup = Some(scene.maze.cell_center(2, 1));
        scene
    }

    fn hold_right() -> Held {
        Held {
            right: true,
            ..Held::default()
        }
    }

    #[test]
    fn chaser_spawns_only_after_movement_threshold() {
        let mut scene = open_scene(open_cfg(), 11);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..60 {
            scene.tick(&hold_right(), TICK_MS, &mut rng);
            assert!(scene.player.move_clock_ms < 2000);
            assert!(scene.chaser.is_none());
        }
        scene.tick(&hold_right(), TICK_MS, &mut rng);
        assert!(scene.player.move_clock_ms >= 2000);
        assert!(scene.chaser.is_some());
    }

    #[test]
    fn idle_ticks_do_not_feed_the_movement_clock() {
        let mut scene = open_scene(open_cfg(), 11);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            scene.tick(&Held::default(), TICK_MS, &mut rng);
        }
        assert_eq!(scene.player.move_clock_ms, 0);
        assert!(scene.chaser.is_none());
    }

    #[test]
    fn run_to_exit_without_pickup_wins_exactly_once() {
        let cfg = GameConfig {
            chaser_delay_ms: u64::MAX,
            ..open_cfg()
        };
        let mut scene = open_scene(cfg, 11);
        let mut rng = StdRng::seed_from_u64(11);

        // Stand in a chaser far away in the top-left so the pursuit is live
        // but cannot intercept the straight run down the corridor.
        scene.chaser = Some(Chaser::new(Vec2::new(96.0, 96.0)));
        let chaser_start = scene.chaser.as_ref().unwrap().pos;

        let mut transitions = Vec::new();
        for _ in 0..400 {
            if let Some(next) = scene.tick(&hold_right(), TICK_MS, &mut rng) {
                transitions.push(next);
            }
        }
        assert_eq!(transitions, vec![SceneId::Win]);
        assert!(scene.ended);
        assert!(!scene.player.has_pickup);
        // The chaser was pursuing, not frozen.
        assert_ne!(scene.chaser.as_ref().unwrap().pos, chaser_start);
    }

    #[test]
    fn ended_scene_freezes_all_state() {
        let cfg = GameConfig {
            chaser_delay_ms: u64::MAX,
            ..open_cfg()
        };
        let mut scene = open_scene(cfg, 11);
        let mut rng = StdRng::seed_from_u64(11);
        scene.player.pos = scene.maze.exit_center();
        assert_eq!(scene.tick(&Held::default(), TICK_MS, &mut rng), Some(SceneId::Win));
        let frozen = scene.player.pos;
        for _ in 0..50 {
            assert_eq!(scene.tick(&hold_right(), TICK_MS, &mut rng), None);
        }
        assert_eq!(scene.player.pos, frozen);
    }

    #[test]
    fn chaser_contact_without_pickup_is_a_jumpscare() {
        let mut scene = open_scene(open_cfg(), 5);
        let mut rng = StdRng::seed_from_u64(5);
        scene.chaser = Some(Chaser::new(scene.player.pos));
        let next = scene.tick(&Held::default(), TICK_MS, &mut rng);
        assert_eq!(next, Some(SceneId::Jumpscare));
        assert!(scene.ended);
        assert!(!scene.player.has_pickup);
    }

    #[test]
    fn pickup_then_contact_defeats_the_chaser() {
        let mut scene = open_scene(open_cfg(), 5);
        let mut rng = StdRng::seed_from_u64(5);
        scene.pickup = Some(scene.player.pos);
        scene.chaser = Some(Chaser::new(scene.player.pos));
        let next = scene.tick(&Held::default(), TICK_MS, &mut rng);
        assert_eq!(next, Some(SceneId::DefeatChaser));
        assert!(scene.player.has_pickup);
        assert!(scene.chaser.as_ref().unwrap().is_fleeing());
    }

    #[test]
    fn collecting_the_pickup_is_not_terminal_and_never_reverts() {
        let mut scene = open_scene(open_cfg(), 5);
        let mut rng = StdRng::seed_from_u64(5);
        scene.pickup = Some(scene.player.pos);
        assert_eq!(scene.tick(&Held::default(), TICK_MS, &mut rng), None);
        assert!(scene.player.has_pickup);
        assert!(scene.pickup.is_none());
        assert!(!scene.ended);
        for _ in 0..100 {
            scene.tick(&hold_right(), TICK_MS, &mut rng);
            assert!(scene.player.has_pickup);
        }
    }

    #[test]
    fn exit_with_pickup_does_not_win() {
        let mut scene = open_scene(open_cfg(), 5);
        let mut rng = StdRng::seed_from_u64(5);
        scene.player.has_pickup = true;
        scene.player.pos = scene.maze.exit_center();
        for _ in 0..20 {
            assert_eq!(scene.tick(&Held::default(), TICK_MS, &mut rng), None);
        }
        assert!(!scene.ended);
    }
}
