use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;

/// A cell on the board, 0-based from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`. May lie off the board.
    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
}

impl Board {
    /// Create a board, rejecting a zero dimension
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell is within the board bounds
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && (cell.x as usize) < self.width
            && cell.y >= 0
            && (cell.y as usize) < self.height
    }

    /// Every cell on the board in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Cell::new(x as i32, y as i32)))
    }

    /// A uniformly random cell on the board
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let x = rng.gen_range(0..self.width) as i32;
        let y = rng.gen_range(0..self.height) as i32;
        Cell::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.moved(Direction::Right), Cell::new(6, 5));
        assert_eq!(cell.moved(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.moved(Direction::Down), Cell::new(5, 6));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(-1, 5).to_string(), "(-1, 5)");
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Board::new(0, 10),
            Err(GameError::EmptyBoard {
                width: 0,
                height: 10
            })
        );
        assert!(Board::new(10, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(10, 10).unwrap();

        assert!(board.contains(Cell::new(0, 0)));
        assert!(board.contains(Cell::new(9, 9)));
        assert!(!board.contains(Cell::new(-1, 0)));
        assert!(!board.contains(Cell::new(0, -1)));
        assert!(!board.contains(Cell::new(10, 0)));
        assert!(!board.contains(Cell::new(0, 10)));
    }

    #[test]
    fn test_non_square_bounds() {
        let board = Board::new(4, 2).unwrap();
        assert!(board.contains(Cell::new(3, 1)));
        assert!(!board.contains(Cell::new(1, 3)));
    }

    #[test]
    fn test_cells_cover_board_once() {
        let board = Board::new(3, 2).unwrap();
        let cells: Vec<Cell> = board.cells().collect();

        assert_eq!(cells.len(), board.area());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(1, 0));
        assert_eq!(cells[5], Cell::new(2, 1));
        assert!(cells.iter().all(|c| board.contains(*c)));
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let board = Board::new(7, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert!(board.contains(board.random_cell(&mut rng)));
        }
    }
}
