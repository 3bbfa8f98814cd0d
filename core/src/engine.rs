use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owns the board and applies the two-colour Life rule one generation at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifeEngine {
    board: Array2<Cell>,
    generation: u64,
    initial: Option<Array2<Cell>>,
}

impl LifeEngine {
    pub fn new(side: Coord) -> Self {
        Self {
            board: Array2::default(square(clamp_side(side))),
            generation: 0,
            initial: None,
        }
    }

    /// Builds a board from text rows: `.` empty, `1` and `2` for the players.
    ///
    /// The side is the larger of the row count and the longest row; short rows
    /// are padded with empty cells.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let side = Coord::try_from(width.max(rows.len())).unwrap_or(Coord::MAX);
        let mut engine = Self::new(side);

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let cell = Cell::from_symbol(symbol).ok_or(SimError::InvalidPattern {
                    line: y + 1,
                    column: x + 1,
                })?;
                if let (Ok(x), Ok(y)) = (Coord::try_from(x), Coord::try_from(y)) {
                    engine.set_cell((x, y), cell);
                }
            }
        }

        Ok(engine)
    }

    /// Parses a multi-line pattern, ignoring blank lines.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.board
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    pub(crate) fn from_parts(board: Array2<Cell>, generation: u64) -> Result<Self> {
        let (rows, cols) = board.dim();
        if rows != cols || rows == 0 || Coord::try_from(rows).is_err() {
            return Err(SimError::InvalidGridShape);
        }
        Ok(Self {
            board,
            generation,
            initial: None,
        })
    }

    pub fn side(&self) -> Coord {
        Coord::try_from(self.board.nrows()).unwrap_or(Coord::MAX)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn has_initial(&self) -> bool {
        self.initial.is_some()
    }

    /// Replaces the board with an empty one of the new side and forgets generation zero.
    pub fn resize(&mut self, side: Coord) {
        *self = Self::new(side);
        log::debug!("Resized board to {}x{}", self.side(), self.side());
    }

    pub fn clear(&mut self) {
        self.resize(self.side());
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let side = self.side();
        x < side && y < side
    }

    /// Reads a cell, anything off the board reads as empty.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        if self.contains(coords) {
            self.board[coords.to_nd_index()]
        } else {
            Cell::Empty
        }
    }

    pub fn set_cell(&mut self, coords: Coord2, cell: Cell) -> EditOutcome {
        if !self.contains(coords) {
            log::trace!("Ignoring edit outside the board at {:?}", coords);
            return EditOutcome::Ignored;
        }
        self.board[coords.to_nd_index()] = cell;
        EditOutcome::Written
    }

    pub fn count_neighbors(&self, coords: Coord2) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for cell in self.board.iter_neighbor_cells(coords) {
            match cell {
                Cell::Player1 => counts.player1 += 1,
                Cell::Player2 => counts.player2 += 1,
                Cell::Empty => {}
            }
        }
        counts
    }

    /// Advances one generation, every cell is computed from the previous board.
    pub fn step_generation(&mut self, tie_break: &mut impl TieBreak) -> u64 {
        let next = Array2::from_shape_fn(self.board.raw_dim(), |(y, x)| {
            let coords = (x as Coord, y as Coord);
            let neighbors = self.count_neighbors(coords);
            evolve_cell(self.board[[y, x]], neighbors, &mut *tie_break)
        });

        self.board = next;
        self.generation += 1;
        log::trace!("Stepped to generation {}", self.generation);
        self.generation
    }

    pub fn count_cells(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &cell in self.board.iter() {
            counts.record(cell);
        }
        counts
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_cells(self.board.iter().copied())
    }

    /// Remembers the current board as generation zero.
    pub fn save_initial(&mut self) {
        self.initial = Some(self.board.clone());
        log::debug!(
            "Saved initial state with {} total cells",
            self.count_cells().total()
        );
    }

    pub fn restore_initial(&mut self) -> Result<()> {
        let Some(initial) = &self.initial else {
            log::warn!("No initial state saved yet");
            return Err(SimError::NoInitialSnapshot);
        };

        self.board = initial.clone();
        self.generation = 0;
        log::debug!(
            "Reset to initial state with {} total cells",
            self.count_cells().total()
        );
        Ok(())
    }
}

impl Default for LifeEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SIDE)
    }
}

impl Index<Coord2> for LifeEngine {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.board[coords.to_nd_index()]
    }
}

fn clamp_side(side: Coord) -> Coord {
    if side == 0 {
        log::warn!("Board side must be positive, using 1");
    }
    side.max(1)
}

/// Transition rule for a single cell.
///
/// Live cells survive with two or three neighbors of any colour. Empty cells
/// with exactly three neighbors are born, owned by the majority colour among
/// those neighbors, with `tie_break` deciding an even split.
pub fn evolve_cell(
    current: Cell,
    neighbors: NeighborCounts,
    tie_break: &mut impl TieBreak,
) -> Cell {
    use core::cmp::Ordering::*;

    match (current.is_alive(), neighbors.total()) {
        (true, 2 | 3) => current,
        (true, _) => Cell::Empty,
        (false, 3) => match neighbors.player1.cmp(&neighbors.player2) {
            Greater => Cell::Player1,
            Less => Cell::Player2,
            Equal => tie_break.pick().into(),
        },
        (false, _) => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn engine(rows: &[&str]) -> LifeEngine {
        LifeEngine::from_rows(rows).unwrap()
    }

    /// Counts draws so tests can tell whether the tie branch ran.
    #[derive(Default)]
    struct CountingTieBreak(usize);

    impl TieBreak for CountingTieBreak {
        fn pick(&mut self) -> Player {
            self.0 += 1;
            Player::One
        }
    }

    #[test]
    fn blinker_flips_orientation() {
        let mut engine = engine(&[
            ".....", //
            "..1..",
            "..1..",
            "..1..",
            ".....",
        ]);

        engine.step_generation(&mut FixedTieBreak(Player::One));

        assert_eq!(
            engine.to_rows(),
            vec![".....", ".....", ".111.", ".....", "....."]
        );
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn birth_takes_majority_owner() {
        let mut majority_one = engine(&[
            "1.1", //
            "...",
            ".2.",
        ]);
        let mut majority_two = engine(&[
            "2.2", //
            "...",
            ".1.",
        ]);

        majority_one.step_generation(&mut FixedTieBreak(Player::Two));
        majority_two.step_generation(&mut FixedTieBreak(Player::One));

        assert_eq!(majority_one.cell_at((1, 1)), Cell::Player1);
        assert_eq!(majority_two.cell_at((1, 1)), Cell::Player2);
    }

    #[test]
    fn survival_counts_both_colours() {
        // (1, 1) keeps its colour on two neighbors of the other colour.
        let mut engine = engine(&[
            "1....", //
            ".2...",
            "..1..",
            ".....",
            ".....",
        ]);

        engine.step_generation(&mut FixedTieBreak(Player::One));

        assert_eq!(engine.cell_at((1, 1)), Cell::Player2);
        assert_eq!(engine.cell_at((0, 0)), Cell::Empty);
        assert_eq!(engine.cell_at((2, 2)), Cell::Empty);
    }

    #[test]
    fn crowded_and_isolated_cells_die() {
        let mut engine = engine(&[
            "1.1", //
            ".2.",
            "1.1",
        ]);

        engine.step_generation(&mut FixedTieBreak(Player::One));

        // Center had four neighbors, corners had one each.
        assert_eq!(engine.cell_at((1, 1)), Cell::Empty);
        assert_eq!(engine.cell_at((0, 0)), Cell::Empty);
        assert_eq!(engine.count_cells().player2, 0);
    }

    #[test]
    fn evolve_cell_thresholds() {
        let mut tie = FixedTieBreak(Player::One);
        let n = |player1, player2| NeighborCounts { player1, player2 };

        for total in 0..=8u8 {
            let survived = evolve_cell(Cell::Player2, n(total, 0), &mut tie);
            assert_eq!(survived.is_alive(), total == 2 || total == 3, "total {}", total);

            let born = evolve_cell(Cell::Empty, n(0, total), &mut tie);
            assert_eq!(born.is_alive(), total == 3, "total {}", total);
        }
    }

    #[test]
    fn even_split_is_never_born() {
        // Births need exactly three neighbors, which two equal counts cannot sum to.
        for half in 0..=4u8 {
            let neighbors = NeighborCounts {
                player1: half,
                player2: half,
            };
            assert_eq!(
                evolve_cell(Cell::Empty, neighbors, &mut FixedTieBreak(Player::Two)),
                Cell::Empty
            );
        }
    }

    #[test]
    fn step_never_draws_from_tie_break() {
        let mut engine = engine(&[
            "12.21.1.", //
            ".1221...",
            "2..1.2.1",
            ".21..12.",
            "1.2.2..1",
            "..11.2..",
            ".2..1.2.",
            "1..2.1.2",
        ]);
        let mut tie = CountingTieBreak::default();

        for _ in 0..32 {
            engine.step_generation(&mut tie);
        }

        assert_eq!(tie.0, 0);
    }

    #[test]
    fn stepping_is_deterministic() {
        let mut a = engine(&[
            ".1..2.", //
            "..1.2.",
            "111.2.",
            "......",
            "..22..",
            "..2...",
        ]);
        let mut b = a.clone();

        for _ in 0..10 {
            a.step_generation(&mut SeededTieBreak::new(1));
            b.step_generation(&mut SeededTieBreak::new(2));
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn corner_neighbors_stay_in_bounds() {
        let engine = engine(&[
            "1111", //
            "1111",
            "1111",
            "1111",
        ]);

        let corner = engine.count_neighbors((0, 0));
        let far_corner = engine.count_neighbors((3, 3));

        assert_eq!(corner.total(), 3);
        assert_eq!(far_corner.total(), 3);
        assert_eq!(engine.count_neighbors((1, 1)).total(), 8);
    }

    #[test]
    fn out_of_bounds_access_fails_soft() {
        let mut engine = LifeEngine::new(4);

        assert_eq!(engine.set_cell((4, 0), Cell::Player1), EditOutcome::Ignored);
        assert_eq!(engine.set_cell((0, 9), Cell::Player1), EditOutcome::Ignored);
        assert_eq!(engine.cell_at((4, 4)), Cell::Empty);
        assert_eq!(engine.count_cells(), CellCounts::default());
        assert!(engine.set_cell((3, 3), Cell::Player2).has_update());
        assert_eq!(engine[(3, 3)], Cell::Player2);
    }

    #[test]
    fn resize_and_clear_reset_generation() {
        let mut engine = engine(&[
            "11", //
            "11",
        ]);
        engine.save_initial();
        engine.step_generation(&mut FixedTieBreak(Player::One));

        engine.resize(6);

        assert_eq!(engine.side(), 6);
        assert_eq!(engine.generation(), 0);
        assert!(!engine.has_initial());
        assert_eq!(engine.count_cells().total(), 0);

        engine.set_cell((2, 2), Cell::Player1);
        engine.step_generation(&mut FixedTieBreak(Player::One));
        engine.clear();
        assert_eq!(engine.side(), 6);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn zero_side_is_clamped() {
        assert_eq!(LifeEngine::new(0).side(), 1);
    }

    #[test]
    fn restore_without_save_fails() {
        let mut engine = LifeEngine::new(3);

        assert_eq!(engine.restore_initial(), Err(SimError::NoInitialSnapshot));
    }

    #[test]
    fn restore_returns_to_saved_board() {
        let mut engine = engine(&[
            "...", //
            "222",
            "...",
        ]);
        let start = engine.snapshot();
        engine.save_initial();

        engine.step_generation(&mut FixedTieBreak(Player::One));
        engine.set_cell((0, 0), Cell::Player1);
        assert_ne!(engine.snapshot(), start);

        engine.restore_initial().unwrap();

        assert_eq!(engine.snapshot(), start);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn saved_initial_is_not_aliased() {
        let mut engine = LifeEngine::new(3);
        engine.save_initial();
        engine.set_cell((1, 1), Cell::Player1);

        engine.restore_initial().unwrap();

        assert_eq!(engine.cell_at((1, 1)), Cell::Empty);
    }

    #[test]
    fn snapshots_compare_by_content() {
        let a = engine(&["1.", ".2"]);
        let b = engine(&["1.", ".2"]);
        let c = engine(&["2.", ".1"]);

        assert_eq!(a.snapshot(), b.snapshot());
        assert_ne!(a.snapshot(), c.snapshot());
        assert_eq!(a.snapshot().as_bytes(), &[1, 0, 0, 2]);
    }

    #[test]
    fn pattern_errors_point_at_bad_symbol() {
        let err = LifeEngine::from_rows(&["..", ".x"]).unwrap_err();

        assert_eq!(err, SimError::InvalidPattern { line: 2, column: 2 });
    }

    #[test]
    fn parse_pads_short_rows() {
        let engine = LifeEngine::parse("\n  1\n 2..\n").unwrap();

        assert_eq!(engine.side(), 3);
        assert_eq!(engine.to_rows(), vec!["1..", "2..", "..."]);
    }
}
