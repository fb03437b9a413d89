use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use crate::maze::Maze;
use crate::player::Facing;
use crate::scene::{MazeScene, SceneId};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Open,
    Exit,
    Player(Facing),
    Chaser,
    ChaserFleeing,
    Pickup,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Cell-diff renderer: keeps the last drawn frame and repaints only cells
/// that changed, with a full repaint after resize or origin moves.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Open,
                    color: Color::Reset,
                };
                cols * rows
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

pub fn render_maze(stdout: &mut Stdout, scene: &MazeScene, renderer: &mut Renderer) -> io::Result<()> {
    let rows = scene.maze.rows;
    let cols = scene.maze.cols;
    let needed_h = (rows + 2) as u16;
    let needed_w = (cols * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "Pickup: {}  Chaser: {}  (q to quit)",
        if scene.player.has_pickup { "yes" } else { "no" },
        chaser_status(scene),
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let player_cell = entity_cell(&scene.maze, scene.player.pos.x, scene.player.pos.y);
    let chaser_cell = scene
        .chaser
        .as_ref()
        .map(|c| (entity_cell(&scene.maze, c.pos.x, c.pos.y), c.is_fleeing()));
    let pickup_cell = scene
        .pickup
        .map(|p| entity_cell(&scene.maze, p.x, p.y));

    for y in 0..rows {
        for x in 0..cols {
            let cell = cell_for(scene, player_cell, chaser_cell, pickup_cell, x, y);
            let idx = y * cols + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn chaser_status(scene: &MazeScene) -> &'static str {
    match &scene.chaser {
        None => "lurking",
        Some(c) if c.is_fleeing() => "fleeing",
        Some(_) if scene.player.has_pickup => "frozen",
        Some(_) => "hunting",
    }
}

fn entity_cell(maze: &Maze, px: f32, py: f32) -> (usize, usize) {
    let col = ((px / maze.tile_size) as isize).clamp(0, maze.cols as isize - 1) as usize;
    let row = ((py / maze.tile_size) as isize).clamp(0, maze.rows as isize - 1) as usize;
    (col, row)
}

fn cell_for(
    scene: &MazeScene,
    player_cell: (usize, usize),
    chaser_cell: Option<((usize, usize), bool)>,
    pickup_cell: Option<(usize, usize)>,
    x: usize,
    y: usize,
) -> Cell {
    if (x, y) == player_cell {
        return Cell {
            glyph: Glyph::Player(scene.player.facing),
            color: Color::Yellow,
        };
    }
    if let Some((cell, fleeing)) = chaser_cell {
        if (x, y) == cell {
            return if fleeing {
                Cell {
                    glyph: Glyph::ChaserFleeing,
                    color: Color::Blue,
                }
            } else {
                Cell {
                    glyph: Glyph::Chaser,
                    color: Color::Red,
                }
            };
        }
    }
    if pickup_cell == Some((x, y)) {
        return Cell {
            glyph: Glyph::Pickup,
            color: Color::Magenta,
        };
    }
    if scene.maze.is_wall(x, y) {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Green,
        };
    }
    if x == scene.maze.cols - 1 && y == scene.maze.start_row {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Cyan,
        };
    }
    Cell {
        glyph: Glyph::Open,
        color: Color::Reset,
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player(Facing::Right) => "@>",
        Glyph::Player(Facing::Left) => "<@",
        Glyph::Chaser | Glyph::ChaserFleeing => "👹",
        Glyph::Pickup => "⚔",
        Glyph::Wall => "🌲",
        Glyph::Exit => "»»",
        Glyph::Open => "  ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Full-screen terminal scene for the three endings.
pub fn render_outcome(stdout: &mut Stdout, id: SceneId) -> io::Result<()> {
    let (title, subtitle, color) = match id {
        SceneId::Win => ("YOU ESCAPED THE MAZE", "press q to quit", Color::Green),
        SceneId::DefeatChaser => ("YOU WIN", "the chaser ran off beaten - press q to quit", Color::White),
        SceneId::Jumpscare => ("IT CAUGHT YOU", "press q to quit", Color::Red),
        SceneId::Maze => return Ok(()),
    };

    stdout.queue(Clear(ClearType::All))?;
    let (term_w, term_h) = terminal::size()?;
    let mid_y = term_h / 2;

    if id == SceneId::Jumpscare {
        stdout.queue(SetForegroundColor(Color::DarkRed))?;
        for dy in 0..3u16 {
            let bar = "█".repeat(term_w as usize);
            stdout.queue(MoveTo(0, mid_y.saturating_sub(3 + dy)))?;
            stdout.queue(Print(&bar))?;
            stdout.queue(MoveTo(0, mid_y + 2 + dy))?;
            stdout.queue(Print(&bar))?;
        }
    }

    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(MoveTo(centered(term_w, title), mid_y))?;
    stdout.queue(Print(title))?;
    stdout.queue(SetForegroundColor(Color::Grey))?;
    stdout.queue(MoveTo(centered(term_w, subtitle), mid_y + 1))?;
    stdout.queue(Print(subtitle))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    Ok(())
}

fn centered(term_w: u16, text: &str) -> u16 {
    (term_w / 2).saturating_sub(UnicodeWidthStr::width(text) as u16 / 2)
}
