//! Maze grid: loading, validation and cell queries.
use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::player::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    fn from_glyph(ch: char) -> Self {
        match ch {
            ' ' | '.' | '0' => Cell::Empty,
            // anything unknown is treated as solid
            _ => Cell::Wall,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Wall => '#',
        }
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("map is {width}x{height}, need at least 3x3")]
    TooSmall { width: usize, height: usize },
    #[error("border cell ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },
    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),
}

// Rows are y, columns are x.
const REFERENCE_LAYOUT: [&str; 16] = [
    "################",
    "#..............#",
    "#.#............#",
    "#.........######",
    "#..............#",
    "#....######....#",
    "#..............#",
    "#...#..#########",
    "#...#..#.......#",
    "#...#..#.##....#",
    "#...#..#.#.....#",
    "#...#....#.....#",
    "#...#....#.....#",
    "#...#..........#",
    "#..............#",
    "################",
];

/// Immutable tile grid. Every border cell is a wall, so a ray marched from
/// inside always terminates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Map {
    /// The 16x16 maze the viewer ships with.
    pub fn reference() -> Self {
        let text = REFERENCE_LAYOUT.join("\n");
        match Self::parse(&text) {
            Ok(map) => map,
            Err(err) => unreachable!("reference layout is valid: {err}"),
        }
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<Cell>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Cell::from_glyph).collect())
            .collect();

        if rows.is_empty() {
            return Err(MapError::Empty);
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Wall);
        }

        Self::from_rows(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let map = Self::parse(&text)?;
        debug!(path = %path.display(), width = map.width, height = map.height, "loaded map file");
        Ok(map)
    }

    fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width < 3 || height < 3 {
            return Err(MapError::TooSmall { width, height });
        }

        let cells: Vec<Cell> = rows.into_iter().flatten().collect();
        let map = Self {
            width,
            height,
            cells,
        };

        for y in 0..height {
            for x in 0..width {
                let on_border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if on_border && map.cell_at(x as i64, y as i64) != Cell::Wall {
                    return Err(MapError::OpenBorder { x, y });
                }
            }
        }

        debug!(width, height, "map built");
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer grid coordinates. Anything outside the grid reads as wall.
    #[inline]
    pub fn cell_at(&self, x: i64, y: i64) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Cell::Wall;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// Floors a continuous point to its cell and tests it.
    #[inline]
    pub fn is_wall_at(&self, point: Vec2) -> bool {
        self.cell_at(point.x.floor() as i64, point.y.floor() as i64) == Cell::Wall
    }

    pub fn spawn_is_open(&self, point: Vec2) -> bool {
        !self.is_wall_at(point)
    }

    /// Row-major iterator of `(x, y, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % self.width, i / self.width, cell))
    }
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.width) {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
