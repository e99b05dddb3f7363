use alloc::collections::VecDeque;
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing (first reveal)
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> NotStarted (new game)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Reveals and flags are still accepted
    pub const fn accepts_moves(self) -> bool {
        matches!(self, Self::NotStarted | Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Snapshot of the counters a front-end displays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub mine_count: CellCount,
    pub flag_count: CellCount,
    pub elapsed_secs: u32,
}

impl GameState {
    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub const fn mines_left(&self) -> i32 {
        self.mine_count as i32 - self.flag_count as i32
    }
}

/// Rules of one game from the first click to the end: owns the grid, the counters
/// and the timer, and consults a `MinePlacer` and a `TickSource` it was built with.
#[derive(Clone, Debug)]
pub struct BoardEngine<P = RejectionPlacer, T = ManualTicks> {
    difficulty: Difficulty,
    board: Array2<Cell>,
    status: GameStatus,
    flag_count: CellCount,
    revealed_count: CellCount,
    mines_placed: CellCount,
    exploded_at: Option<Coord2>,
    timer: Timer,
    placer: P,
    ticks: T,
}

impl BoardEngine {
    /// Engine with reproducible mine placement and hand-driven ticks.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, RejectionPlacer::seeded(seed), ManualTicks::new())
    }
}

impl<P: MinePlacer, T: TickSource> BoardEngine<P, T> {
    pub fn new(difficulty: Difficulty, placer: P, ticks: T) -> Self {
        let mut engine = Self {
            difficulty,
            board: Array2::default(difficulty.size().to_nd_index()),
            status: GameStatus::default(),
            flag_count: 0,
            revealed_count: 0,
            mines_placed: 0,
            exploded_at: None,
            timer: Timer::default(),
            placer,
            ticks,
        };
        engine.new_game(difficulty);
        engine
    }

    /// Throws the current game away and sets up an empty grid for `difficulty`.
    ///
    /// Mines are not placed until the first reveal.
    pub fn new_game(&mut self, difficulty: Difficulty) {
        self.ticks.stop();
        self.timer.reset();

        self.difficulty = difficulty;
        self.board = Array2::default(difficulty.size().to_nd_index());
        self.status = GameStatus::NotStarted;
        self.flag_count = 0;
        self.revealed_count = 0;
        self.mines_placed = 0;
        self.exploded_at = None;

        log::debug!(
            "New game {}x{} with {} mines",
            difficulty.rows(),
            difficulty.cols(),
            difficulty.mines()
        );
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn state(&self) -> GameState {
        GameState {
            status: self.status,
            mine_count: self.difficulty.mines(),
            flag_count: self.flag_count,
            elapsed_secs: self.timer.elapsed_secs(),
        }
    }

    pub fn mines_left(&self) -> i32 {
        self.state().mines_left()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Safe cells opened so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Mines actually on the board, 0 until the first reveal.
    pub fn mines_placed(&self) -> CellCount {
        self.mines_placed
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    /// The mine whose reveal lost the game.
    pub fn exploded_at(&self) -> Option<Coord2> {
        self.exploded_at
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.difficulty.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    /// Opens a cell, flood-filling outward from blanks.
    ///
    /// Revealing an open or flagged cell, or any cell once the game is over, is a no-op.
    /// The first reveal of a game places the mines around it and starts the timer.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.difficulty.validate_coords(coords)?;

        if !self.status.accepts_moves() || !self.board[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::Unchanged);
        }

        if self.status.is_ready() {
            self.place_mines(coords);
            self.status = GameStatus::Playing;
            self.timer.start();
            self.ticks.start();
            log::debug!("Game started at {:?}", coords);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        cell.is_revealed = true;
        let Cell {
            is_mine,
            adjacent_mines,
            ..
        } = *cell;

        if is_mine {
            self.exploded_at = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::Lost);
        }

        self.revealed_count += 1;

        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            self.end_game(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed(adjacent_mines))
        }
    }

    /// Flips the flag on a hidden cell; open cells and finished games are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.difficulty.validate_coords(coords)?;

        if !self.status.accepts_moves() {
            return Ok(FlagOutcome::Unchanged);
        }

        let cell = &mut self.board[coords.to_nd_index()];
        if cell.is_revealed {
            return Ok(FlagOutcome::Unchanged);
        }

        cell.is_flagged = !cell.is_flagged;
        Ok(if cell.is_flagged {
            self.flag_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flag_count -= 1;
            FlagOutcome::Unflagged
        })
    }

    /// Every safe cell has been opened. Flags play no part.
    pub fn check_win(&self) -> bool {
        !self.status.is_ready()
            && self.revealed_count + self.mines_placed == self.difficulty.total_cells()
    }

    /// Advances the clock one second while playing.
    pub fn tick(&mut self) -> bool {
        matches!(self.status, GameStatus::Playing) && self.timer.tick()
    }

    /// Drains the tick source into the clock, returns the seconds that counted.
    pub fn poll_ticks(&mut self) -> u32 {
        let ticks = self.ticks.take_ticks();
        (0..ticks).filter(|_| self.tick()).count() as u32
    }

    fn place_mines(&mut self, exclude: Coord2) {
        let mut mask: Array2<bool> = Array2::default(self.board.dim());
        self.placer.place(&mut mask, self.difficulty.mines(), exclude);

        let counts = adjacency_counts(&mask);
        Zip::from(&mut self.board)
            .and(&mask)
            .and(&counts)
            .for_each(|cell, &is_mine, &adjacent_mines| {
                cell.is_mine = is_mine;
                cell.adjacent_mines = adjacent_mines;
            });

        let placed = mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if placed != self.difficulty.mines() {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                placed,
                self.difficulty.mines()
            );
        }
        self.mines_placed = placed;
    }

    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self.hidden_neighbors(origin).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(coords) = to_visit.pop_front() {
            // may have been queued twice, or flagged before the fill
            let cell = &mut self.board[coords.to_nd_index()];
            if !cell.is_hidden() {
                continue;
            }

            cell.is_revealed = true;
            let adjacent_mines = cell.adjacent_mines;
            self.revealed_count += 1;
            log::trace!(
                "Flood opened cell at {:?}, mine count: {}",
                coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(self.hidden_neighbors(coords));
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> {
        self.board
            .iter_neighbors(coords)
            .filter(move |&pos| self.board[pos.to_nd_index()].is_hidden())
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        // seconds that fired before the final move still count
        self.poll_ticks();

        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        self.timer.stop();
        self.ticks.stop();

        if !won {
            for cell in self.board.iter_mut().filter(|cell| cell.is_mine) {
                cell.is_revealed = true;
            }
        }

        log::debug!(
            "Game {:?} after {}s, {} cells opened",
            self.status,
            self.timer.elapsed_secs(),
            self.revealed_count
        );
    }
}
