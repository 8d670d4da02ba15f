use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Unpopulated -> Populated (first reveal places the mines)
/// - Unpopulated -> Won (first reveal already clears the board)
/// - Populated -> Won
/// - Populated -> Lost
///
/// Only [`Game::reset`] leaves `Won` or `Lost`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Unpopulated,
    Populated,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_populated(self) -> bool {
        !matches!(self, Self::Unpopulated)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What the player has done to a cell, independent of its content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub revealed: bool,
    pub flagged: bool,
}

/// Visual side of the board, driven by the game.
///
/// All methods default to doing nothing, `()` is the headless implementation.
pub trait Presentation {
    /// The cell was uncovered. `mark_special` flags the mine that ended the game.
    fn reveal(&mut self, _coords: Coord2, _mark_special: bool) {}
    fn set_mine(&mut self, _coords: Coord2) {}
    /// Called for every non-mine cell once mines are placed, `0` for empty cells.
    fn set_number(&mut self, _coords: Coord2, _number: u8) {}
    fn toggle_flag(&mut self, _coords: Coord2, _flagged: bool) {}
    fn reset(&mut self, _coords: Coord2) {}
    fn set_flags_left(&mut self, _flags_left: isize) {}
}

impl Presentation for () {}

/// Receiver of the game's end signals.
pub trait GameEvents {
    fn game_won(&mut self) {}
    fn game_lost(&mut self) {}
}

impl GameEvents for () {}

/// Configures a [`Game`] before it is built.
pub struct GameBuilder {
    level: LevelParams,
    grid_config: GridConfig,
    generator: Option<Box<dyn MineGenerator>>,
}

impl GameBuilder {
    fn new(level: LevelParams) -> Self {
        Self {
            level,
            grid_config: level.grid_config(),
            generator: None,
        }
    }

    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.grid_config = self.grid_config.with_cell_size(cell_size);
        self
    }

    pub fn cell_spacing(mut self, cell_spacing: f32) -> Self {
        self.grid_config = self.grid_config.with_cell_spacing(cell_spacing);
        self
    }

    pub fn origin(mut self, origin: Point3) -> Self {
        self.grid_config = self.grid_config.with_origin(origin);
        self
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.grid_config = self.grid_config.with_layout(layout);
        self
    }

    /// Reproducible random mine placement.
    pub fn seed(self, seed: u64) -> Self {
        self.generator(RandomMineGenerator::from_seed(seed))
    }

    pub fn generator(mut self, generator: impl MineGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn build(self) -> Game {
        self.build_with((), ())
    }

    pub fn build_with<P: Presentation, E: GameEvents>(
        self,
        presentation: P,
        events: E,
    ) -> Game<P, E> {
        let generator = self
            .generator
            .unwrap_or_else(|| Box::new(RandomMineGenerator::from_entropy()));
        let board = Board::new(self.grid_config);
        let cells = Array2::default(board.cells().raw_dim());
        let mut game = Game {
            level: self.level,
            board,
            cells,
            generator,
            presentation,
            events,
            state: GameState::Unpopulated,
            mine_count: self.level.mines,
            revealed_count: 0,
            flags_left: self.level.mines as isize,
        };
        game.reset_presentation();
        game
    }
}

/// A Minesweeper round, from the first reveal to a win or loss.
///
/// Mines are placed on the first reveal, never inside the clicked cell or its neighbors. The
/// board content is fixed from then on, only reveal and flag state change.
pub struct Game<P = (), E = ()> {
    level: LevelParams,
    board: Board,
    cells: Array2<CellState>,
    generator: Box<dyn MineGenerator>,
    presentation: P,
    events: E,
    state: GameState,
    mine_count: CellCount,
    revealed_count: CellCount,
    flags_left: isize,
}

impl Game {
    /// Headless game with fresh random mine placement.
    ///
    /// `level` should come from [`LevelParams::new`], too many mines never finish placement.
    pub fn new(level: LevelParams) -> Self {
        Self::builder(level).build()
    }

    pub fn builder(level: LevelParams) -> GameBuilder {
        GameBuilder::new(level)
    }
}

impl<P: Presentation, E: GameEvents> Game<P, E> {
    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn level(&self) -> LevelParams {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.board.geometry()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn is_valid_position(&self, coords: Coord2) -> bool {
        self.board.is_valid(coords)
    }

    /// Mines on the board, as placed once populated.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Display counter: mines minus placed flags, may go negative.
    pub fn flags_left(&self) -> isize {
        self.flags_left
    }

    pub fn content(&self, coords: Coord2) -> CellContent {
        self.board.get(coords)
    }

    pub fn cell_state(&self, coords: Coord2) -> Option<CellState> {
        self.is_valid_position(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.cell_state(coords).is_some_and(|cell| cell.revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.cell_state(coords).is_some_and(|cell| cell.flagged)
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.board.total_cells() - self.revealed_count
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Observes board content changes. Subscriptions end with [`Game::reset`], which replaces
    /// the board.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Coord2) + 'static) -> SubscriptionId {
        self.board.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.board.unsubscribe(id)
    }

    /// Reveals a hidden cell, or chords an already revealed one.
    ///
    /// The first reveal places the mines. Flagged cells are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.cells[coords.to_nd_index()];
        if cell.revealed {
            return self.chord(coords);
        }
        if cell.flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.state.is_populated() {
            self.populate(coords);
        }

        let outcome = self.open(coords);
        Ok(self.settle(outcome))
    }

    /// Reveals the unflagged neighbors of a revealed number cell.
    ///
    /// Valid only when exactly as many neighbors are both flagged and mined as the number says,
    /// any other count loses the game.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let CellContent::Number(number) = self.board.get(coords) else {
            return Ok(RevealOutcome::NoChange);
        };
        if !self.cells[coords.to_nd_index()].revealed {
            return Ok(RevealOutcome::NoChange);
        }

        let correctly_marked = self
            .board
            .neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].flagged && self.board.contains_mine(pos))
            .count();
        if correctly_marked != usize::from(number) {
            log::debug!(
                "chord at {:?} with {} of {} mines marked",
                coords,
                correctly_marked,
                number
            );
            return Ok(self.settle(RevealOutcome::BadChord));
        }

        let to_open: Vec<_> = self
            .board
            .neighbors(coords)
            .filter(|&pos| !self.cells[pos.to_nd_index()].flagged)
            .collect();
        let outcome = to_open
            .into_iter()
            .map(|pos| self.open(pos))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor);
        Ok(self.settle(outcome))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        let flagged = cell.flagged;
        self.flags_left += if flagged { -1 } else { 1 };
        self.presentation.toggle_flag(coords, flagged);
        self.presentation.set_flags_left(self.flags_left);
        Ok(MarkOutcome::Changed)
    }

    /// Reveals every hidden cell, returning how many were uncovered.
    pub fn reveal_all(&mut self) -> CellCount {
        let mut revealed = 0;
        for pos in self.board.coords() {
            if self.reveal_cell(pos, false) {
                revealed += 1;
            }
        }
        revealed
    }

    /// Discards the board and all player state, back to before the first reveal.
    pub fn reset(&mut self) {
        log::debug!("resetting {}x{} board", self.level.width, self.level.height);
        self.board = Board::new(*self.board.config());
        self.cells.fill(CellState::default());
        self.state = GameState::Unpopulated;
        self.mine_count = self.level.mines;
        self.revealed_count = 0;
        self.flags_left = self.level.mines as isize;
        self.reset_presentation();
    }

    fn reset_presentation(&mut self) {
        for pos in self.board.coords() {
            self.presentation.reset(pos);
        }
        self.presentation.set_flags_left(self.flags_left);
    }

    fn populate(&mut self, start: Coord2) {
        let safe_zone = SafeZone::around(&self.board, start);
        let placed = self
            .generator
            .place_mines(&mut self.board, &safe_zone, self.level.mines);
        if placed != self.level.mines {
            log::warn!(
                "Mine count mismatch, placed: {}, requested: {}",
                placed,
                self.level.mines
            );
        }

        self.board.assign_numbers();
        self.mine_count = self.board.mine_count();

        for pos in self.board.coords() {
            match self.board.get(pos) {
                CellContent::Mine => self.presentation.set_mine(pos),
                content => self.presentation.set_number(pos, content.number()),
            }
        }

        self.state = GameState::Populated;
        log::debug!(
            "populated board with {} mines, first reveal at {:?}",
            self.mine_count,
            start
        );
    }

    /// Opens a hidden cell according to its content.
    fn open(&mut self, coords: Coord2) -> RevealOutcome {
        if self.cells[coords.to_nd_index()].revealed {
            return RevealOutcome::NoChange;
        }

        match self.board.get(coords) {
            CellContent::Mine => {
                self.reveal_cell(coords, true);
                RevealOutcome::HitMine
            }
            CellContent::Empty => {
                if self.flood_fill(coords) {
                    RevealOutcome::Revealed
                } else {
                    RevealOutcome::NoChange
                }
            }
            CellContent::Number(_) => {
                if self.reveal_cell(coords, false) {
                    RevealOutcome::Revealed
                } else {
                    RevealOutcome::NoChange
                }
            }
        }
    }

    /// Reveals the 8-connected region of empty cells around `start` and its bordering cells.
    fn flood_fill(&mut self, start: Coord2) -> bool {
        let mut to_visit = VecDeque::from([start]);
        let mut seen_empty = BTreeSet::from([start]);
        let mut to_reveal = vec![start];
        let mut collected = BTreeSet::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.board.neighbors(visit_coords) {
                if collected.insert(pos) {
                    to_reveal.push(pos);
                }
                if self.board.get(pos).is_empty() && seen_empty.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }
        log::trace!(
            "flood-fill from {:?} covers {} cells, {} empty",
            start,
            to_reveal.len(),
            seen_empty.len()
        );

        let mut revealed_any = false;
        for pos in to_reveal {
            revealed_any |= self.reveal_cell(pos, false);
        }
        revealed_any
    }

    /// Marks one cell revealed, clearing any flag on it. No-op for revealed cells.
    fn reveal_cell(&mut self, coords: Coord2, mark_special: bool) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return false;
        }
        cell.revealed = true;
        let was_flagged = core::mem::take(&mut cell.flagged);
        self.revealed_count += 1;

        if was_flagged {
            self.flags_left += 1;
            self.presentation.toggle_flag(coords, false);
            self.presentation.set_flags_left(self.flags_left);
        }
        self.presentation.reveal(coords, mark_special);
        true
    }

    /// Applies win/loss detection after a reveal action.
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        if self.state.is_finished() {
            return outcome;
        }
        if outcome.is_loss() {
            self.finish(false);
            return outcome;
        }
        if self.unrevealed_count() == self.mine_count {
            self.finish(true);
            return RevealOutcome::Won;
        }
        outcome
    }

    fn finish(&mut self, won: bool) {
        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("game {}", if won { "won" } else { "lost" });
        self.reveal_all();
        if won {
            self.events.game_won();
        } else {
            self.events.game_lost();
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_valid_position(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Reveal(Coord2, bool),
        Mine(Coord2),
        Number(Coord2, u8),
        Flag(Coord2, bool),
        Reset(Coord2),
        FlagsLeft(isize),
        Won,
        Lost,
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.0.borrow().clone()
        }

        fn push(&self, call: Call) {
            self.0.borrow_mut().push(call);
        }
    }

    impl Presentation for Recorder {
        fn reveal(&mut self, coords: Coord2, mark_special: bool) {
            self.push(Call::Reveal(coords, mark_special));
        }

        fn set_mine(&mut self, coords: Coord2) {
            self.push(Call::Mine(coords));
        }

        fn set_number(&mut self, coords: Coord2, number: u8) {
            self.push(Call::Number(coords, number));
        }

        fn toggle_flag(&mut self, coords: Coord2, flagged: bool) {
            self.push(Call::Flag(coords, flagged));
        }

        fn reset(&mut self, coords: Coord2) {
            self.push(Call::Reset(coords));
        }

        fn set_flags_left(&mut self, flags_left: isize) {
            self.push(Call::FlagsLeft(flags_left));
        }
    }

    impl GameEvents for Recorder {
        fn game_won(&mut self) {
            self.push(Call::Won);
        }

        fn game_lost(&mut self) {
            self.push(Call::Lost);
        }
    }

    fn fixed_game(size: Coord2, mines: &[Coord2]) -> Game {
        let level = LevelParams::new_unchecked(size.0, size.1, mines.len() as CellCount);
        Game::builder(level)
            .generator(FixedMineGenerator::new(mines))
            .build()
    }

    fn recorded_game(size: Coord2, mines: &[Coord2]) -> (Game<Recorder, Recorder>, Recorder) {
        let level = LevelParams::new_unchecked(size.0, size.1, mines.len() as CellCount);
        let recorder = Recorder::default();
        let game = Game::builder(level)
            .generator(FixedMineGenerator::new(mines))
            .build_with(recorder.clone(), recorder.clone());
        (game, recorder)
    }

    /// 5x3 board, mines at (3,0) and (3,2). Revealing (0,1) opens columns 0 to 2.
    fn chord_board() -> Game {
        let mut game = fixed_game((5, 3), &[(3, 0), (3, 2)]);
        assert_eq!(game.reveal((0, 1)), Ok(RevealOutcome::Revealed));
        game
    }

    #[test]
    fn single_cell_without_mines_wins_on_first_reveal() {
        let mut game = Game::builder(LevelParams::new(1, 1, 0).unwrap())
            .seed(0)
            .build();

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn flood_fill_clears_board_around_single_mine() {
        let (mut game, recorder) = recorded_game((3, 3), &[(2, 2)]);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.content((1, 1)), CellContent::Number(1));
        assert_eq!(game.content((1, 2)), CellContent::Number(1));
        assert_eq!(game.content((2, 1)), CellContent::Number(1));
        assert_eq!(game.content((0, 0)), CellContent::Empty);

        let calls = recorder.calls();
        let won_at = calls.iter().position(|call| *call == Call::Won).unwrap();
        let revealed_before_win: Vec<_> = calls[..won_at]
            .iter()
            .filter_map(|call| match call {
                Call::Reveal(coords, _) => Some(*coords),
                _ => None,
            })
            .collect();
        assert_eq!(revealed_before_win.len(), 9);
        assert_eq!(revealed_before_win.last(), Some(&(2, 2)));
        assert!(revealed_before_win[..8].iter().all(|&pos| pos != (2, 2)));
    }

    #[test]
    fn revealing_a_mine_loses_and_exposes_everything() {
        let (mut game, recorder) = recorded_game((5, 1), &[(3, 0)]);

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.unrevealed_count(), 2);
        assert_eq!(game.reveal((3, 0)), Ok(RevealOutcome::HitMine));

        assert_eq!(game.state(), GameState::Lost);
        assert!(recorder.calls().contains(&Call::Reveal((3, 0), true)));
        assert!(recorder.calls().contains(&Call::Lost));
        assert_eq!(game.unrevealed_count(), 0);
        assert_eq!(game.reveal_all(), 0);
        assert_eq!(game.reveal((4, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((4, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn flood_fill_reveals_region_and_border_only() {
        let game = chord_board();

        for pos in game.board().coords() {
            assert_eq!(game.is_revealed(pos), pos.0 <= 2, "{pos:?}");
        }
        assert_eq!(game.content((2, 1)), CellContent::Number(2));
        assert_eq!(game.state(), GameState::Populated);
    }

    #[test]
    fn chord_with_correct_flags_reveals_neighbors() {
        let mut game = chord_board();
        game.toggle_flag((3, 0)).unwrap();
        game.toggle_flag((3, 2)).unwrap();

        assert_eq!(game.chord((2, 1)), Ok(RevealOutcome::Revealed));
        assert!(game.is_revealed((3, 1)));
        assert!(!game.is_revealed((3, 0)));
        assert_eq!(game.state(), GameState::Populated);

        assert_eq!(game.reveal((3, 1)), Ok(RevealOutcome::Won));
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn chord_counts_only_flags_on_mines() {
        let mut game = chord_board();
        game.toggle_flag((3, 0)).unwrap();
        game.toggle_flag((3, 1)).unwrap();

        assert_eq!(game.reveal((2, 1)), Ok(RevealOutcome::BadChord));
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn chord_on_non_number_cells_does_nothing() {
        let mut game = chord_board();

        assert_eq!(game.chord((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.chord((4, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.state(), GameState::Populated);
    }

    #[test]
    fn chord_floods_empty_neighbors_and_skips_wrong_flags() {
        // columns 5 and 6 are empty, (8,1) keeps the game going
        let mut game = fixed_game((9, 3), &[(3, 0), (3, 2), (8, 1)]);
        game.reveal((0, 1)).unwrap();
        assert_eq!(game.reveal((4, 1)), Ok(RevealOutcome::Revealed));
        assert_eq!(game.content((4, 1)), CellContent::Number(2));
        assert!(!game.is_revealed((5, 1)));

        game.toggle_flag((3, 0)).unwrap();
        game.toggle_flag((3, 2)).unwrap();
        game.toggle_flag((3, 1)).unwrap();
        assert_eq!(game.chord((4, 1)), Ok(RevealOutcome::Revealed));

        for col in 4..=7 {
            for row in 0..3 {
                assert!(game.is_revealed((col, row)), "{:?}", (col, row));
            }
        }
        for row in 0..3 {
            assert!(!game.is_revealed((8, row)));
        }
        assert!(!game.is_revealed((3, 1)));
        assert!(game.is_flagged((3, 1)));
        assert_eq!(game.flags_left(), 0);
        assert_eq!(game.state(), GameState::Populated);
    }

    #[test]
    fn negative_dimensions_build_an_empty_game() {
        let mut game = Game::builder(LevelParams::new_unchecked(-1, 3, 0)).build();

        assert_eq!(game.unrevealed_count(), 0);
        assert_eq!(game.cell_state((0, 0)), None);
        assert_eq!(game.reveal((0, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flags_are_counted_and_block_reveal() {
        let (mut game, recorder) = recorded_game((5, 3), &[(3, 0), (3, 2)]);
        assert_eq!(game.flags_left(), 2);

        assert_eq!(game.toggle_flag((4, 1)), Ok(MarkOutcome::Changed));
        assert_eq!(game.toggle_flag((4, 2)), Ok(MarkOutcome::Changed));
        assert_eq!(game.toggle_flag((4, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(game.flags_left(), -1);
        assert_eq!(game.toggle_flag((4, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(game.flags_left(), 0);
        assert!(recorder.calls().contains(&Call::FlagsLeft(-1)));

        assert_eq!(game.reveal((4, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(game.state(), GameState::Unpopulated);

        game.reveal((0, 1)).unwrap();
        assert_eq!(game.toggle_flag((0, 1)), Ok(MarkOutcome::NoChange));
        assert_eq!(game.toggle_flag((9, 9)), Err(GameError::InvalidCoords));
        assert_eq!(game.reveal((-1, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flood_fill_clears_wrong_flags() {
        let mut game = fixed_game((5, 3), &[(3, 0), (3, 2)]);
        game.toggle_flag((1, 1)).unwrap();
        assert_eq!(game.flags_left(), 1);

        game.reveal((0, 0)).unwrap();

        assert!(game.is_revealed((1, 1)));
        assert!(!game.is_flagged((1, 1)));
        assert_eq!(game.flags_left(), 2);
    }

    #[test]
    fn win_exactly_when_only_mines_remain() {
        for seed in 0..10 {
            let level = LevelParams::new(8, 8, 10).unwrap();
            let mut game = Game::builder(level).seed(seed).build();
            game.reveal((4, 4)).unwrap();

            for pos in game.board().coords().collect::<Vec<_>>() {
                if game.is_finished() {
                    break;
                }
                if game.content(pos).is_mine() || game.is_revealed(pos) {
                    continue;
                }
                let hidden_before = game.unrevealed_count();
                let outcome = game.reveal(pos).unwrap();
                if outcome == RevealOutcome::Won {
                    assert_eq!(game.state(), GameState::Won);
                    assert!(hidden_before > game.mine_count());
                } else {
                    assert_eq!(game.state(), GameState::Populated);
                    assert!(game.unrevealed_count() > game.mine_count());
                }
            }

            assert_eq!(game.state(), GameState::Won, "seed {seed}");
        }
    }

    #[test]
    fn first_reveal_is_always_safe() {
        for seed in 0..50 {
            let level = LevelParams::new(9, 9, 72).unwrap();
            let mut game = Game::builder(level).seed(seed).build();

            let outcome = game.reveal((0, 8)).unwrap();

            assert!(!outcome.is_loss());
            assert_eq!(game.mine_count(), 72);
            assert_eq!(game.board().mine_count(), 72);
            for pos in SafeZone::around(game.board(), (0, 8)).iter() {
                assert!(!game.content(pos).is_mine());
            }
        }
    }

    #[test]
    fn population_reports_mines_and_numbers() {
        let (mut game, recorder) = recorded_game((3, 3), &[(2, 2)]);
        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        game.subscribe(move |_| *counter.borrow_mut() += 1);

        game.reveal((0, 0)).unwrap();

        let calls = recorder.calls();
        assert!(calls.contains(&Call::Mine((2, 2))));
        assert!(calls.contains(&Call::Number((0, 0), 0)));
        assert!(calls.contains(&Call::Number((2, 1), 1)));
        // one mine plus three numbered cells
        assert_eq!(*notified.borrow(), 4);
    }

    #[test]
    fn reset_rebuilds_an_unpopulated_board() {
        let (mut game, recorder) = recorded_game((5, 1), &[(3, 0)]);
        game.toggle_flag((4, 0)).unwrap();
        game.reveal((0, 0)).unwrap();
        game.reveal((3, 0)).unwrap();
        assert_eq!(game.state(), GameState::Lost);

        game.reset();

        assert_eq!(game.state(), GameState::Unpopulated);
        assert_eq!(game.flags_left(), 1);
        assert_eq!(game.unrevealed_count(), 5);
        assert!(game.board().cells().iter().all(|cell| cell.is_empty()));
        assert!(!game.is_flagged((4, 0)));
        assert_eq!(
            recorder.calls().iter().filter(|call| matches!(call, Call::Reset(_))).count(),
            10
        );

        assert_eq!(game.reveal((0, 0)), Ok(RevealOutcome::Revealed));
        assert!(game.content((3, 0)).is_mine());
    }

    #[test]
    fn revealed_cells_stay_revealed() {
        let mut game = chord_board();
        let revealed: Vec<_> = game.board().coords().filter(|&pos| game.is_revealed(pos)).collect();

        game.toggle_flag((3, 1)).unwrap();
        for &pos in &revealed {
            game.toggle_flag(pos).unwrap();
            assert!(game.is_revealed(pos));
            assert!(!game.is_flagged(pos));
        }
    }

    #[test]
    fn geometry_is_available_for_placement() {
        let game = Game::builder(LevelParams::default())
            .cell_size(2.0)
            .layout(Layout::Horizontal)
            .origin(Point3::new(1.0, 0.0, 1.0))
            .seed(3)
            .build();

        assert_eq!(game.geometry().grid_center(0.0), Point3::new(11.0, 0.0, 11.0));
        assert_eq!(
            game.geometry().to_world((1, 1), Anchor::Center, 0.5),
            Point3::new(4.0, 0.5, 4.0)
        );
    }
}
