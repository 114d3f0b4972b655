//! Plain board storage: a fixed `SIZE_X` x `SIZE_Y` grid of stone colors.
//!
//! The board has no rules of its own; see [`crate::position`] for move
//! legality and flipping.

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELL_COUNT, SIZE_X, SIZE_Y};
use crate::error::{EngineError, Result};

/// Content of a single cell. `None` is an empty cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoneColor {
    #[default]
    None,
    Black,
    White,
}

impl StoneColor {
    /// The other player. An empty cell has no opponent.
    pub const fn opponent(self) -> Self {
        match self {
            StoneColor::Black => StoneColor::White,
            StoneColor::White => StoneColor::Black,
            StoneColor::None => StoneColor::None,
        }
    }

    fn symbol(self) -> char {
        match self {
            StoneColor::Black => 'X',
            StoneColor::White => 'O',
            StoneColor::None => '.',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' => Some(StoneColor::Black),
            'O' => Some(StoneColor::White),
            '.' => Some(StoneColor::None),
            _ => None,
        }
    }
}

impl fmt::Display for StoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoneColor::Black => "Black",
            StoneColor::White => "White",
            StoneColor::None => "None",
        };
        f.write_str(name)
    }
}

/// A board snapshot. Indexed as `cells[x][y]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[StoneColor; SIZE_Y]; SIZE_X],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with every cell empty.
    pub const fn empty() -> Self {
        Self {
            cells: [[StoneColor::None; SIZE_Y]; SIZE_X],
        }
    }

    /// The standard starting position: a 2x2 block in the center with White
    /// on the main diagonal.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let (cx, cy) = (SIZE_X / 2, SIZE_Y / 2);
        board.cells[cx - 1][cy - 1] = StoneColor::White;
        board.cells[cx][cy] = StoneColor::White;
        board.cells[cx - 1][cy] = StoneColor::Black;
        board.cells[cx][cy - 1] = StoneColor::Black;
        board
    }

    /// Build a board from `(x, y, color)` triples in any order.
    ///
    /// Every cell must be listed exactly once.
    pub fn from_cells<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, StoneColor)>,
    {
        let mut board = Self::empty();
        let mut seen = [[false; SIZE_Y]; SIZE_X];
        let mut count = 0;
        for (x, y, color) in cells {
            if !Self::in_bounds(x, y) {
                return Err(EngineError::InvalidSnapshot(format!(
                    "cell [{x},{y}] is outside a {SIZE_X}x{SIZE_Y} board"
                )));
            }
            if seen[x][y] {
                return Err(EngineError::InvalidSnapshot(format!(
                    "cell [{x},{y}] is listed twice"
                )));
            }
            seen[x][y] = true;
            board.cells[x][y] = color;
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(EngineError::InvalidSnapshot(format!(
                "expected {CELL_COUNT} cells, got {count}"
            )));
        }
        Ok(board)
    }

    /// Whether `(x, y)` lies on the board.
    #[inline]
    pub const fn in_bounds(x: usize, y: usize) -> bool {
        x < SIZE_X && y < SIZE_Y
    }

    /// Color at `(x, y)`, or `None` when the coordinates are off the board.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Option<StoneColor> {
        if Self::in_bounds(x, y) {
            Some(self.cells[x][y])
        } else {
            None
        }
    }

    /// Overwrite the cell at `(x, y)` without any rule checks.
    pub fn set(&mut self, x: usize, y: usize, color: StoneColor) -> Result<()> {
        if !Self::in_bounds(x, y) {
            return Err(EngineError::OutOfBounds { x, y });
        }
        self.cells[x][y] = color;
        Ok(())
    }

    /// All cells as `(x, y, color)`, x outer and y inner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, StoneColor)> + '_ {
        (0..SIZE_X).flat_map(move |x| (0..SIZE_Y).map(move |y| (x, y, self.cells[x][y])))
    }

    /// Number of cells holding `color`.
    pub fn count(&self, color: StoneColor) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == color).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = SIZE_Y.to_string().len();
        write!(f, "{:label_width$}", "")?;
        for x in 0..SIZE_X {
            write!(f, " {}", (b'a' + x as u8) as char)?;
        }
        writeln!(f)?;
        for y in 0..SIZE_Y {
            write!(f, "{:>label_width$}", y + 1)?;
            for x in 0..SIZE_X {
                write!(f, " {}", self.cells[x][y].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse rows of `X`, `O` and `.`, one row per line.
    ///
    /// Whitespace, row numbers and a lowercase column header are ignored, so
    /// the output of `Display` parses back.
    fn from_str(s: &str) -> Result<Self> {
        let mut board = Self::empty();
        let mut y = 0;
        for line in s.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty()
                || trimmed
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_whitespace())
            {
                continue;
            }
            if y >= SIZE_Y {
                return Err(EngineError::InvalidSnapshot(format!(
                    "more than {SIZE_Y} rows"
                )));
            }
            let mut x = 0;
            for c in trimmed
                .chars()
                .filter(|c| !c.is_whitespace() && !c.is_ascii_digit())
            {
                let color = StoneColor::from_symbol(c).ok_or_else(|| {
                    EngineError::InvalidSnapshot(format!("unknown cell symbol {c:?}"))
                })?;
                if x >= SIZE_X {
                    return Err(EngineError::InvalidSnapshot(format!(
                        "row {} has more than {SIZE_X} cells",
                        y + 1
                    )));
                }
                board.cells[x][y] = color;
                x += 1;
            }
            if x != SIZE_X {
                return Err(EngineError::InvalidSnapshot(format!(
                    "row {} has {x} cells, expected {SIZE_X}",
                    y + 1
                )));
            }
            y += 1;
        }
        if y != SIZE_Y {
            return Err(EngineError::InvalidSnapshot(format!(
                "got {y} rows, expected {SIZE_Y}"
            )));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::initial();
        assert_eq!(board.count(StoneColor::Black), 2);
        assert_eq!(board.count(StoneColor::White), 2);
        assert_eq!(board.count(StoneColor::None), CELL_COUNT - 4);

        let (cx, cy) = (SIZE_X / 2, SIZE_Y / 2);
        assert_eq!(board.cell(cx - 1, cy - 1), Some(StoneColor::White));
        assert_eq!(board.cell(cx, cy), Some(StoneColor::White));
        assert_eq!(board.cell(cx - 1, cy), Some(StoneColor::Black));
        assert_eq!(board.cell(cx, cy - 1), Some(StoneColor::Black));
    }

    #[test]
    fn test_cell_out_of_bounds() {
        let board = Board::empty();
        assert_eq!(board.cell(SIZE_X, 0), None);
        assert_eq!(board.cell(0, SIZE_Y), None);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::empty();
        assert_eq!(
            board.set(SIZE_X, 1, StoneColor::Black),
            Err(EngineError::OutOfBounds { x: SIZE_X, y: 1 })
        );
    }

    #[test]
    fn test_opponent() {
        assert_eq!(StoneColor::Black.opponent(), StoneColor::White);
        assert_eq!(StoneColor::White.opponent(), StoneColor::Black);
        assert_eq!(StoneColor::None.opponent(), StoneColor::None);
    }

    #[test]
    fn test_from_cells_rejects_duplicates() {
        let mut cells: Vec<_> = Board::initial().cells().collect();
        cells[1] = cells[0];
        assert!(matches!(
            Board::from_cells(cells),
            Err(EngineError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_from_cells_rejects_missing_cells() {
        let cells: Vec<_> = Board::initial().cells().skip(1).collect();
        assert!(matches!(
            Board::from_cells(cells),
            Err(EngineError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_from_cells_rejects_out_of_bounds() {
        let mut cells: Vec<_> = Board::initial().cells().collect();
        cells[0] = (SIZE_X, 0, StoneColor::Black);
        assert!(matches!(
            Board::from_cells(cells),
            Err(EngineError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_from_cells_any_order() {
        let board = Board::initial();
        let mut cells: Vec<_> = board.cells().collect();
        cells.reverse();
        assert_eq!(Board::from_cells(cells), Ok(board));
    }

    #[test]
    fn test_display_parses_back() {
        let mut board = Board::initial();
        board.set(0, 0, StoneColor::Black).unwrap();
        board.set(SIZE_X - 1, SIZE_Y - 1, StoneColor::White).unwrap();
        let text = board.to_string();
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_rejects_wrong_dimensions() {
        let short_row = ".".repeat(SIZE_X - 1);
        assert!(short_row.parse::<Board>().is_err());

        let full_row = ".".repeat(SIZE_X);
        let too_few_rows = vec![full_row.as_str(); SIZE_Y - 1].join("\n");
        assert!(too_few_rows.parse::<Board>().is_err());

        let too_many_rows = vec![full_row.as_str(); SIZE_Y + 1].join("\n");
        assert!(too_many_rows.parse::<Board>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let mut rows = vec![".".repeat(SIZE_X); SIZE_Y];
        rows[0].replace_range(0..1, "#");
        assert!(matches!(
            rows.join("\n").parse::<Board>(),
            Err(EngineError::InvalidSnapshot(_))
        ));
    }
}
