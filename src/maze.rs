use rand::Rng;

use crate::config::GameConfig;
use crate::geom::Vec2;

const PLACEMENT_RETRY_CAP: usize = 1024;
const EDGE_EPS: f32 = 0.001;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tile {
    Wall,
    Open,
}

pub struct Maze {
    pub rows: usize,
    pub cols: usize,
    pub tile_size: f32,
    pub cells: Vec<Vec<Tile>>,
    pub start_row: usize,
}

impl Maze {
    /// Random fill with guaranteed openings: the outer border is wall except
    /// the exit gap at (start_row, cols-1), and the whole start row from the
    /// entry column to the exit is forced open so the maze is always
    /// solvable along that corridor.
    pub fn generate(cfg: &GameConfig, rng: &mut impl Rng) -> Self {
        let rows = cfg.rows();
        let cols = cfg.cols();
        let start_row = rows / 2;
        let mut cells = vec![vec![Tile::Open; cols]; rows];

        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let border = x == 0 || y == 0 || x == cols - 1 || y == rows - 1;
                *cell = if border {
                    if x == cols - 1 && y == start_row {
                        Tile::Open
                    } else {
                        Tile::Wall
                    }
                } else if x == cols - 2 && y == start_row {
                    Tile::Open
                } else if rng.gen::<f64>() < cfg.wall_probability {
                    Tile::Wall
                } else {
                    Tile::Open
                };
            }
        }

        for x in 1..cols {
            cells[start_row][x] = Tile::Open;
        }

        Self {
            rows,
            cols,
            tile_size: cfg.tile_size,
            cells,
            start_row,
        }
    }

    pub fn is_wall(&self, col: usize, row: usize) -> bool {
        self.cells[row][col] == Tile::Wall
    }

    pub fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.tile_size,
            (row as f32 + 0.5) * self.tile_size,
        )
    }

    /// Grid cell of the player's fixed start position.
    pub fn start_cell(&self) -> (usize, usize) {
        (1, self.start_row)
    }

    pub fn player_start(&self) -> Vec2 {
        let (col, row) = self.start_cell();
        self.cell_center(col, row)
    }

    pub fn exit_center(&self) -> Vec2 {
        self.cell_center(self.cols - 1, self.start_row)
    }

    /// The four grid-corner cell centers, in fixed iteration order:
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.cell_center(0, 0),
            self.cell_center(self.cols - 1, 0),
            self.cell_center(0, self.rows - 1),
            self.cell_center(self.cols - 1, self.rows - 1),
        ]
    }

    /// Rejection-samples an interior open cell that is not the player start,
    /// returning its pixel center. The retry loop is capped; past the cap we
    /// scan the interior for the first valid cell, and as a last resort use
    /// the always-open pre-exit cell.
    pub fn place_open_cell(&self, rng: &mut impl Rng) -> Vec2 {
        let start = self.start_cell();
        for _ in 0..PLACEMENT_RETRY_CAP {
            let row = rng.gen_range(1..=self.rows - 2);
            let col = rng.gen_range(1..=self.cols - 2);
            if !self.is_wall(col, row) && (col, row) != start {
                return self.cell_center(col, row);
            }
        }
        for row in 1..self.rows - 1 {
            for col in 1..self.cols - 1 {
                if !self.is_wall(col, row) && (col, row) != start {
                    return self.cell_center(col, row);
                }
            }
        }
        self.cell_center(self.cols - 2, self.start_row)
    }

    /// Moves a square body (center + half extent) by `delta`, sweeping one
    /// axis at a time and clamping against wall tiles. Movement along an
    /// axis never reverses: a body already wedged into a wall stays put
    /// rather than being ejected.
    pub fn resolve_move(&self, pos: Vec2, half: f32, delta: Vec2) -> Vec2 {
        let mut out = pos;
        out.x = self.sweep(out, half, delta.x, Axis::X);
        out.y = self.sweep(out, half, delta.y, Axis::Y);
        out
    }

    fn sweep(&self, pos: Vec2, half: f32, d: f32, axis: Axis) -> f32 {
        let along = match axis {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        };
        if d == 0.0 {
            return along;
        }
        let cross = match axis {
            Axis::X => pos.y,
            Axis::Y => pos.x,
        };
        let (along_cells, cross_cells) = match axis {
            Axis::X => (self.cols, self.rows),
            Axis::Y => (self.rows, self.cols),
        };
        let mut next = along + d;
        let (c0, c1) = self.span(cross, half, cross_cells);
        let (a0, a1) = self.span(next, half, along_cells);
        for a in a0..=a1 {
            for c in c0..=c1 {
                let (col, row) = match axis {
                    Axis::X => (a, c),
                    Axis::Y => (c, a),
                };
                if !self.is_wall(col, row) {
                    continue;
                }
                let lo = a as f32 * self.tile_size;
                let hi = lo + self.tile_size;
                if next + half > lo && next - half < hi {
                    if d > 0.0 {
                        next = next.min(lo - half);
                    } else {
                        next = next.max(hi + half);
                    }
                }
            }
        }
        if d > 0.0 {
            next.clamp(along, along + d)
        } else {
            next.clamp(along + d, along)
        }
    }

    /// Range of cell indices a body extent touches along one dimension.
    fn span(&self, center: f32, half: f32, cells: usize) -> (usize, usize) {
        let lo = ((center - half) / self.tile_size).floor().max(0.0) as usize;
        let hi = ((center + half - EDGE_EPS) / self.tile_size).floor().max(0.0) as usize;
        let lo = lo.min(cells - 1);
        let hi = hi.min(cells - 1);
        (lo, hi.max(lo))
    }
}

enum Axis {
    X,
    Y,
}
