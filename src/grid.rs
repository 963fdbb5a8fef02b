use ndarray::Array2;
use std::fmt::{Display, Formatter};

const CELL_WALL: char = '#';
const CELL_FLOOR: char = '.';

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Floor,
}

impl Cell {
    pub fn is_floor(self) -> bool {
        self == Cell::Floor
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => CELL_WALL,
            Cell::Floor => CELL_FLOOR,
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Wall => 0,
            Cell::Floor => 1,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> anyhow::Result<Self> {
        match value {
            0 => Ok(Cell::Wall),
            1 => Ok(Cell::Floor),
            _ => anyhow::bail!("Invalid cell value: {value}"),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Fixed-size wall/floor grid, indexed `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Creates an all-wall grid.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0, "Grid width must be greater than zero");
        debug_assert!(height > 0, "Grid height must be greater than zero");
        Self {
            cells: Array2::from_elem((width, height), Cell::Wall),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.shape()[0]
    }

    pub fn height(&self) -> usize {
        self.cells.shape()[1]
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Sets every cell back to wall.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Wall);
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.width())
            && usize::try_from(y).is_ok_and(|y| y < self.height())
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[(x as usize, y as usize)])
        } else {
            None
        }
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::is_floor)
    }

    pub fn set_floor(&mut self, x: i32, y: i32) {
        debug_assert!(
            self.in_bounds(x, y),
            "Cell ({x}, {y}) out of bounds for {}x{} grid",
            self.width(),
            self.height()
        );
        if self.in_bounds(x, y) {
            self.cells[(x as usize, y as usize)] = Cell::Floor;
        }
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_floor()).count()
    }

    /// Iterates `(x, y, cell)` in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| (x as i32, y as i32, *cell))
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{}", self.cells[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
