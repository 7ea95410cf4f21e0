//! Game logic and game board.

use core::fmt::{self, Formatter};
use core::str::FromStr;

#[derive(Debug, PartialEq, Clone, Copy, Eq, thiserror::Error)]
pub enum BoardError {
    /// A row of the input has a different length than the number of rows.
    #[error("board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("board has no cells")]
    Empty,
    #[error("cell {0} is outside of the board")]
    OutOfRange(Move),
    #[error("cell {0} is already taken")]
    Occupied(Move),
    #[error("unknown cell symbol {0:?}")]
    InvalidSymbol(char),
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("the game is already over")]
    GameOver,
}

/// One of the two marks. `X` is the maximizing side of every rating.
#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Ratings are oriented so that higher is better for this mark.
    #[must_use]
    pub const fn is_maximizing(self) -> bool {
        matches!(self, Self::X)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell on the board, 0-indexed.
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All cells of a `size x size` board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Self> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Self::new(row, col)))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of the game after a move.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Outcome {
    /// Game continues.
    InProgress,
    /// Mark completed a line with that move.
    Won(Mark),
    /// The board is full without a winner.
    Draw,
}

/// A full row, column or diagonal of the board.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub(crate) enum Line {
    Row(usize),
    Column(usize),
    /// top-left to bottom-right
    Diagonal,
    /// top-right to bottom-left
    AntiDiagonal,
}

impl Line {
    pub(crate) fn cells(self, size: usize) -> impl Iterator<Item = Move> {
        (0..size).map(move |i| match self {
            Self::Row(row) => Move::new(row, i),
            Self::Column(col) => Move::new(i, col),
            Self::Diagonal => Move::new(i, i),
            Self::AntiDiagonal => Move::new(i, size - 1 - i),
        })
    }
}

/// Square game board.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Board {
    size: usize,
    /*
     * Cells in row-major order:
     * (row=0,col=0) <==> top left of the board
     */
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Creates an empty `size x size` board.
    ///
    /// # Panics
    /// If `size` is zero.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0);

        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a board from rows of cells. All rows must have as many cells as
    /// there are rows.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[Option<Mark>]>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, cells_in_row) in rows.iter().enumerate() {
            let cells_in_row = cells_in_row.as_ref();
            if cells_in_row.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: cells_in_row.len(),
                    expected: size,
                });
            }
            cells.extend_from_slice(cells_in_row);
        }

        Ok(Self { size, cells })
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn contains(&self, mv: Move) -> bool {
        mv.row < self.size && mv.col < self.size
    }

    const fn index(&self, mv: Move) -> usize {
        mv.row * self.size + mv.col
    }

    /// Returns the mark in the cell or `None` if it is empty.
    ///
    /// # Panics
    /// If the cell is outside of the board.
    #[must_use]
    pub fn get(&self, mv: Move) -> Option<Mark> {
        assert!(self.contains(mv), "cell {mv} is outside of the board");
        self.cells[self.index(mv)]
    }

    #[must_use]
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv).is_none()
    }

    /// Emits the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        Move::all(self.size).filter(|&mv| self.is_empty(mv))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Puts `mark` into an empty cell.
    pub fn place(&mut self, mv: Move, mark: Mark) -> Result<(), BoardError> {
        if !self.contains(mv) {
            return Err(BoardError::OutOfRange(mv));
        }
        if !self.is_empty(mv) {
            return Err(BoardError::Occupied(mv));
        }
        let idx = self.index(mv);
        self.cells[idx] = Some(mark);
        Ok(())
    }

    /// Speculatively puts `mark` into the empty cell `mv`, runs `f` and
    /// empties the cell again before returning `f`'s result.
    pub(crate) fn with_mark<T>(
        &mut self,
        mv: Move,
        mark: Mark,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let idx = self.index(mv);
        debug_assert!(self.cells[idx].is_none(), "speculative move into taken cell {mv}");

        self.cells[idx] = Some(mark);
        let result = f(self);
        self.cells[idx] = None;
        result
    }

    /// Lines that pass through `mv`: its row, its column and the diagonals it
    /// lies on.
    pub(crate) fn lines_through(&self, mv: Move) -> impl Iterator<Item = Line> {
        let diagonal = (mv.row == mv.col).then_some(Line::Diagonal);
        let anti_diagonal = (mv.row + mv.col == self.size - 1).then_some(Line::AntiDiagonal);
        [Some(Line::Row(mv.row)), Some(Line::Column(mv.col)), diagonal, anti_diagonal]
            .into_iter()
            .flatten()
    }

    /// Check if the move in `last` decided the game.
    ///
    /// Only the lines through `last` are inspected, as no other line can have
    /// been completed by that move.
    #[must_use]
    pub fn winner(&self, last: Move) -> Outcome {
        if let Some(mark) = self.get(last) {
            let completed = self
                .lines_through(last)
                .any(|line| line.cells(self.size).all(|mv| self.get(mv) == Some(mark)));
            if completed {
                return Outcome::Won(mark);
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses rows separated by `/` or newlines. `X` and `O` are marks,
    /// `.`, `_` and `-` are empty cells; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(['/', '\n'])
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c.to_ascii_uppercase() {
                        'X' => Ok(Some(Mark::X)),
                        'O' => Ok(Some(Mark::O)),
                        '.' | '_' | '-' => Ok(None),
                        other => Err(BoardError::InvalidSymbol(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .filter(|row| !matches!(row, Ok(cells) if cells.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = self.get(Move::new(row, col)).map_or('.', Mark::symbol);
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Game with all its state.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Game {
    board: Board,
    round: usize,
    to_move: Mark,
    outcome: Outcome,
}

impl Game {
    /// New game on an empty `size x size` board; `X` moves first.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            round: 0,
            to_move: Mark::X,
            outcome: Outcome::InProgress,
        }
    }

    /// Places the mark of the side to move and hands the turn over.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, GameError> {
        if self.outcome != Outcome::InProgress {
            return Err(GameError::GameOver);
        }

        self.board.place(mv, self.to_move)?;
        self.round += 1;
        self.to_move = self.to_move.opponent();
        self.outcome = self.board.winner(mv);
        Ok(self.outcome)
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for engines that speculate on the board.
    pub const fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub const fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub const fn to_move(&self) -> Mark {
        self.to_move
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }
}
