mod chaser;
mod config;
mod geom;
mod maze;
mod player;
mod render;
mod scene;

use anyhow::Result;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use config::{GameConfig, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS};
use player::Held;
use render::Renderer;
use scene::{MazeScene, SceneId};

/// Terminals report key repeats rather than key-up events, so a direction
/// counts as held while its last repeat is at most this old.
const INPUT_HOLD_MS: u64 = 160;

#[derive(Parser)]
#[command(name = "mazeman", about = "Terminal maze chase: reach the exit, dodge the chaser.")]
struct Args {
    /// Seed for maze generation and entity placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation tick interval in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Render frame cap.
    #[arg(long, default_value_t = DEFAULT_RENDER_FPS)]
    fps: u64,
}

/// Per-direction last-seen timestamps, index order left/right/up/down.
#[derive(Default)]
struct KeyClock {
    last_seen: [Option<Instant>; 4],
}

impl KeyClock {
    fn press(&mut self, idx: usize) {
        self.last_seen[idx] = Some(Instant::now());
    }

    fn held(&self) -> Held {
        let now = Instant::now();
        let hold = Duration::from_millis(INPUT_HOLD_MS);
        let active = |idx: usize| {
            self.last_seen[idx]
                .map(|t| now.duration_since(t) <= hold)
                .unwrap_or(false)
        };
        Held {
            left: active(0),
            right: active(1),
            up: active(2),
            down: active(3),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &args);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, args: &Args) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let cfg = GameConfig::default();
    let mut game = MazeScene::new(cfg, &mut rng);
    let mut renderer = Renderer::new(game.maze.cols, game.maze.rows);
    let mut keys = KeyClock::default();
    let tick_ms = args.tick_ms.max(1);
    let frame_time = Duration::from_micros(1_000_000 / args.fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        if drain_input(&mut keys)? {
            return Ok(());
        }

        if last_tick.elapsed() >= Duration::from_millis(tick_ms) {
            last_tick = Instant::now();
            let held = keys.held();
            if let Some(next) = game.tick(&held, tick_ms, &mut rng) {
                render::render_maze(stdout, &game, &mut renderer)?;
                return run_outcome(stdout, next);
            }
        }
        render::render_maze(stdout, &game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// Drains pending key events into the key clock; true means quit.
fn drain_input(keys: &mut KeyClock) -> Result<bool> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                    KeyCode::Char('q') => return Ok(true),
                    KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => keys.press(0),
                    KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => keys.press(1),
                    KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => keys.press(2),
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => keys.press(3),
                    _ => {}
                },
                _ => {}
            }
        }
    }
    Ok(false)
}

fn run_outcome(stdout: &mut Stdout, id: SceneId) -> Result<()> {
    render::render_outcome(stdout, id)?;
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
