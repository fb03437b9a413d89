pub const DEFAULT_TICK_MS: u64 = 33;
pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Immutable simulation parameters, fixed at scene construction.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// Viewport size in logical pixels.
    pub width: f32,
    pub height: f32,
    /// Side of one maze cell in logical pixels.
    pub tile_size: f32,
    /// Probability that an interior cell is a wall.
    pub wall_probability: f64,
    /// Speeds in logical pixels per second.
    pub player_speed: f32,
    pub pursue_speed: f32,
    pub flee_speed: f32,
    /// Distance below which a moving entity stops instead of jittering.
    pub arrive_radius: f32,
    /// Cumulative directional-input time before the chaser appears.
    pub chaser_delay_ms: u64,
    /// Entity display sizes as a fraction of a tile; these boxes are also
    /// the collision bounds.
    pub player_scale: f32,
    pub chaser_scale: f32,
    pub pickup_scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            tile_size: 64.0,
            wall_probability: 0.22,
            player_speed: 120.0,
            pursue_speed: 60.0,
            flee_speed: 20.0,
            arrive_radius: 2.0,
            chaser_delay_ms: 2000,
            player_scale: 0.6,
            chaser_scale: 1.7,
            pickup_scale: 0.7,
        }
    }
}

impl GameConfig {
    pub fn rows(&self) -> usize {
        (self.height / self.tile_size) as usize
    }

    pub fn cols(&self) -> usize {
        (self.width / self.tile_size) as usize
    }

    pub fn player_half(&self) -> f32 {
        self.tile_size * self.player_scale / 2.0
    }

    pub fn chaser_half(&self) -> f32 {
        self.tile_size * self.chaser_scale / 2.0
    }

    pub fn pickup_half(&self) -> f32 {
        self.tile_size * self.pickup_scale / 2.0
    }
}
