use crate::constants::COLLISION_EPSILON;
use crate::rng::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
}

// Immutable after generation; every mover resolves collision against this and
// nothing else. Any index outside the grid reads as Wall.
#[derive(Clone, Debug)]
pub struct TileGrid {
    rows: i32,
    cols: i32,
    tile_size: f32,
    cells: Vec<Tile>,
}

impl TileGrid {
    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width_px(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    pub fn height_px(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    pub fn is_blocked(&self, row: i32, col: i32) -> bool {
        if row < 0 || row >= self.rows || col < 0 || col >= self.cols {
            return true;
        }
        self.cells[(row * self.cols + col) as usize] == Tile::Wall
    }

    pub fn is_floor(&self, row: i32, col: i32) -> bool {
        !self.is_blocked(row, col)
    }

    pub fn hits_wall(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let left = (x / self.tile_size).floor() as i32;
        let right = ((x + w - COLLISION_EPSILON) / self.tile_size).floor() as i32;
        let top = (y / self.tile_size).floor() as i32;
        let bottom = ((y + h - COLLISION_EPSILON) / self.tile_size).floor() as i32;

        for row in top..=bottom {
            for col in left..=right {
                if self.is_blocked(row, col) {
                    return true;
                }
            }
        }
        false
    }

    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| if self.is_blocked(row, col) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

pub fn generate_maze(
    cell_rows: i32,
    cell_cols: i32,
    corridor_width: i32,
    wall_width: i32,
    tile_size: f32,
    rng: &mut Rng,
) -> TileGrid {
    let cell_rows = cell_rows.max(1);
    let cell_cols = cell_cols.max(1);
    let corridor = corridor_width.max(1);
    let wall = wall_width.max(1);

    let logical = carve_logical_maze(cell_rows, cell_cols, rng);
    inflate(&logical, corridor, wall, tile_size)
}

// Randomized depth-first search over the cell grid. Rooms sit at odd logical
// indices; the wall slot between two rooms is carved when the edge is taken.
// The stack drains exactly once per room, so the result is a perfect maze.
fn carve_logical_maze(cell_rows: i32, cell_cols: i32, rng: &mut Rng) -> Vec<Vec<Tile>> {
    let rows = (2 * cell_rows + 1) as usize;
    let cols = (2 * cell_cols + 1) as usize;
    let mut maze = vec![vec![Tile::Wall; cols]; rows];

    for r in 0..cell_rows {
        for c in 0..cell_cols {
            maze[(2 * r + 1) as usize][(2 * c + 1) as usize] = Tile::Floor;
        }
    }

    let mut visited = vec![vec![false; cell_cols as usize]; cell_rows as usize];
    let start_row = rng.int(0, cell_rows - 1);
    let start_col = rng.int(0, cell_cols - 1);
    visited[start_row as usize][start_col as usize] = true;
    let mut stack = vec![(start_row, start_col)];

    while let Some(&(cr, cc)) = stack.last() {
        let mut neighbors = Vec::new();
        for (nr, nc) in [(cr - 1, cc), (cr + 1, cc), (cr, cc - 1), (cr, cc + 1)] {
            if nr < 0 || nr >= cell_rows || nc < 0 || nc >= cell_cols {
                continue;
            }
            if !visited[nr as usize][nc as usize] {
                neighbors.push((nr, nc));
            }
        }

        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let (nr, nc) = neighbors[rng.pick_index(neighbors.len())];
        visited[nr as usize][nc as usize] = true;
        let wall_row = (cr + nr + 1) as usize;
        let wall_col = (cc + nc + 1) as usize;
        maze[wall_row][wall_col] = Tile::Floor;
        stack.push((nr, nc));
    }

    maze
}

// Even logical indices (wall slots) expand to `wall` tiles, odd indices (rooms
// and carved passages) to `corridor` tiles.
fn inflate(logical: &[Vec<Tile>], corridor: i32, wall: i32, tile_size: f32) -> TileGrid {
    let block = |index: usize| if index % 2 == 0 { wall } else { corridor };

    let rows: i32 = (0..logical.len()).map(block).sum();
    let cols: i32 = (0..logical[0].len()).map(block).sum();
    let mut cells = vec![Tile::Wall; (rows * cols) as usize];

    let mut row_offset = 0;
    for (r, logical_row) in logical.iter().enumerate() {
        let row_size = block(r);
        let mut col_offset = 0;
        for (c, &tile) in logical_row.iter().enumerate() {
            let col_size = block(c);
            for rr in row_offset..row_offset + row_size {
                for cc in col_offset..col_offset + col_size {
                    cells[(rr * cols + cc) as usize] = tile;
                }
            }
            col_offset += col_size;
        }
        row_offset += row_size;
    }

    TileGrid {
        rows,
        cols,
        tile_size,
        cells,
    }
}
