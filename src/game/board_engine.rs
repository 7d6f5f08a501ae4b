use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{error, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

use super::collaborators::{AudioPlayer, BoardAnimator};
use super::level_progression::LevelProgression;
use super::match_finder::{MatchFinder, MIN_RUN_LENGTH};
use super::persistence::KeyValueStore;
use super::settings::Settings;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    BoardCommand, BoardEvent, BoardPhase, GridState, ScoreState, SelectionBuffer, SessionOutcome,
    Tile, TileTypeCatalog, TimerState,
};

/// Configuration faults that would break the termination guarantees of the
/// settle and cascade loops; rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Fewer tile types than the minimum run length: a shuffled board could
    /// never reach a no-match state.
    CatalogTooSmall { found: usize, required: usize },
    EmptyBoard { width: usize, height: usize },
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::CatalogTooSmall { found, required } => write!(
                f,
                "tile type catalog has {} types, need at least {}",
                found, required
            ),
            SetupError::EmptyBoard { width, height } => {
                write!(f, "board dimensions {}x{} are empty", width, height)
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// The board state machine: selection handling, the swap-and-revert
/// transaction, the cascade loop, the settle pass, and win/lose
/// transitions. The engine is the only mutator of live grid state.
///
/// Commands arrive over the command channel (or the equivalent public
/// methods); notifications leave over the event emitter. The whole swap
/// resolution runs synchronously under the phase guard, so no two
/// animation wait points ever overlap for one board.
pub struct BoardEngine {
    grid: GridState,
    catalog: TileTypeCatalog,
    selection: SelectionBuffer,
    phase: BoardPhase,
    score: ScoreState,
    timer: TimerState,
    levels: LevelProgression,
    outcome: Option<SessionOutcome>,
    settings: Settings,
    rng: StdRng,
    match_finder: Box<dyn MatchFinder>,
    animator: Box<dyn BoardAnimator>,
    audio: Box<dyn AudioPlayer>,
    event_emitter: EventEmitter<BoardEvent>,
    command_subscription: Option<Unsubscriber<BoardCommand>>,
    session_id: Uuid,
}

impl Destroyable for BoardEngine {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl BoardEngine {
    pub fn new(
        command_observer: EventObserver<BoardCommand>,
        event_emitter: EventEmitter<BoardEvent>,
        settings: Settings,
        catalog: TileTypeCatalog,
        match_finder: Box<dyn MatchFinder>,
        animator: Box<dyn BoardAnimator>,
        audio: Box<dyn AudioPlayer>,
        store: Box<dyn KeyValueStore>,
        seed: Option<u64>,
    ) -> Result<Rc<RefCell<Self>>, SetupError> {
        if catalog.len() < MIN_RUN_LENGTH {
            return Err(SetupError::CatalogTooSmall {
                found: catalog.len(),
                required: MIN_RUN_LENGTH,
            });
        }
        if settings.board_width == 0 || settings.board_height == 0 {
            return Err(SetupError::EmptyBoard {
                width: settings.board_width,
                height: settings.board_height,
            });
        }

        let seed = seed.unwrap_or(rand::rng().next_u64());
        trace!(target: "board_engine", "Seeding board rng with {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = GridState::new(settings.board_width, settings.board_height, &catalog, &mut rng);
        let levels = LevelProgression::load(store, settings.max_level);

        let engine = Self {
            grid,
            catalog,
            selection: SelectionBuffer::new(),
            phase: BoardPhase::Idle,
            score: ScoreState::default(),
            timer: TimerState::default(),
            levels,
            outcome: None,
            settings,
            rng,
            match_finder,
            animator,
            audio,
            event_emitter,
            command_subscription: None,
            session_id: Uuid::new_v4(),
        };
        let refcell = Rc::new(RefCell::new(engine));
        BoardEngine::wire_subscription(refcell.clone(), command_observer);
        Ok(refcell)
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<BoardCommand>,
    ) {
        let handler = Rc::clone(&engine);
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        engine.borrow_mut().command_subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: BoardCommand) {
        trace!(target: "board_engine", "Handling command: {:?}", command);
        match command {
            BoardCommand::Select { x, y } => self.select(x, y),
            BoardCommand::StartGame => self.start_game(),
            BoardCommand::ResetBoard => self.reset_board(),
            BoardCommand::SelectLevel(level) => self.select_level(level),
            BoardCommand::AdvanceToNextLevel => self.advance_to_next_level(),
            BoardCommand::StartTimer => self.start_timer(),
            BoardCommand::StopTimer => self.stop_timer(),
            BoardCommand::Tick(elapsed) => self.tick(elapsed),
        }
    }

    // --- session control surface ---

    /// Starts a fresh session on the current level: new grid, zeroed score,
    /// full clock.
    pub fn start_game(&mut self) {
        self.session_id = Uuid::new_v4();
        self.outcome = None;
        self.selection.clear();
        self.score.reset();
        self.grid.randomize(&self.catalog, &mut self.rng);
        if self.settings.ensure_no_starting_matches {
            self.settle_board();
        }
        self.timer.stop();
        self.timer.start(self.settings.max_game_duration);

        self.event_emitter.emit(&BoardEvent::SessionStarted {
            level: self.levels.current_level(),
            session_id: self.session_id,
        });
        self.event_emitter.emit(&BoardEvent::ScoreChanged {
            score: 0,
            progress: 0,
        });
        self.event_emitter.emit(&BoardEvent::TimerChanged {
            remaining: self.timer.remaining(),
        });
    }

    /// Rerandomizes the grid mid-session. Score and clock are untouched.
    pub fn reset_board(&mut self) {
        if !self.phase.is_idle() {
            trace!(target: "board_engine", "Action in progress, reset ignored");
            return;
        }
        self.selection.clear();
        self.grid.randomize(&self.catalog, &mut self.rng);
        if self.settings.ensure_no_starting_matches {
            self.settle_board();
        }
    }

    pub fn select_level(&mut self, level: u32) {
        self.levels.set_current(level);
        self.start_game();
    }

    /// Bumps both level counters when below the cap, then starts a new
    /// session either way.
    pub fn advance_to_next_level(&mut self) {
        if self.levels.advance() {
            self.emit_levels_changed();
        }
        self.start_game();
    }

    pub fn start_timer(&mut self) {
        self.timer.start(self.settings.max_game_duration);
        self.event_emitter.emit(&BoardEvent::TimerChanged {
            remaining: self.timer.remaining(),
        });
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    /// Owner-driven time advance. Lose is only ever evaluated here, at a
    /// tick boundary, never inside a swap resolution.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.outcome.is_some() {
            return;
        }
        if self.timer.tick(elapsed) {
            self.handle_lose();
        } else if self.timer.is_running() {
            self.event_emitter.emit(&BoardEvent::TimerChanged {
                remaining: self.timer.remaining(),
            });
        }
    }

    /// Player tapped a tile. Ignored outright while a swap, cascade, or
    /// shuffle is in progress, after the session has ended, or for
    /// out-of-bounds coordinates.
    pub fn select(&mut self, x: usize, y: usize) {
        if !self.phase.is_idle() {
            trace!(target: "board_engine", "Action in progress, selection ignored");
            return;
        }
        if self.outcome.is_some() {
            trace!(target: "board_engine", "Session over, selection ignored");
            return;
        }
        if x >= self.grid.width() || y >= self.grid.height() {
            trace!(target: "board_engine", "Selection ({}, {}) out of bounds, ignored", x, y);
            return;
        }

        self.selection.offer((x, y));
        if let Some((a, b)) = self.selection.take_pair() {
            self.resolve_swap(a, b);
        }
    }

    // --- swap resolution ---

    /// One full swap transaction: tentative swap, cascade, revert when
    /// nothing matched, settle, back to idle.
    fn resolve_swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.set_phase(BoardPhase::Swapping);
        self.grid.swap_types(a, b);
        self.play_swap(a, b);

        let matched = self.run_cascade();
        if !matched {
            trace!(target: "board_engine", "Swap {:?}<->{:?} produced no match, reverting", a, b);
            self.set_phase(BoardPhase::Swapping);
            self.grid.swap_types(a, b);
            self.play_swap(a, b);
        }

        self.settle_board();
    }

    fn play_swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let tile_a = *self.grid.tile(a.0, a.1);
        let tile_b = *self.grid.tile(b.0, b.1);
        self.animator.play_swap(&tile_a, &tile_b);
    }

    /// The cascade loop: resolve the finder's best match, refill, re-query,
    /// until no match remains. Strictly sequential; each distinct match is
    /// scored exactly once.
    fn run_cascade(&mut self) -> bool {
        self.set_phase(BoardPhase::Matching);
        let mut matched_any = false;

        while let Some(run) = self.match_finder.find_best_match(&self.grid.snapshot()) {
            matched_any = true;
            trace!(target: "board_engine", "Resolving match of {} tiles of {:?}", run.len(), run.type_id);

            let matched_tiles: Vec<Tile> = run
                .tiles
                .iter()
                .map(|&(x, y)| *self.grid.tile(x, y))
                .collect();

            self.audio.play_match_sound();
            let goal_reached = self.score.record_match();
            self.event_emitter.emit(&BoardEvent::ScoreChanged {
                score: self.score.current_score(),
                progress: self.score.progress(),
            });

            self.animator.play_deflate(&matched_tiles);

            for &(x, y) in &run.tiles {
                let type_id = self.catalog.random_id(&mut self.rng);
                self.grid.set(x, y, type_id);
            }
            let refilled: Vec<Tile> = run
                .tiles
                .iter()
                .map(|&(x, y)| *self.grid.tile(x, y))
                .collect();
            self.animator.play_inflate(&refilled);

            match self.catalog.get(run.type_id) {
                Some(tile_type) => self.event_emitter.emit(&BoardEvent::MatchResolved {
                    tile_type: tile_type.clone(),
                    tile_count: run.len(),
                }),
                None => {
                    error!(target: "board_engine", "Finder reported unknown tile type {:?}", run.type_id)
                }
            }

            // evaluated at iteration end so the grid is fully populated
            // when the outcome transition is observed
            if goal_reached {
                self.handle_win();
            }
        }

        matched_any
    }

    /// Reshuffles the whole board until the finder reports no match. Run at
    /// session start (when configured) and after every swap resolution.
    /// Guarantees the absence of a free match, not the presence of a legal
    /// move.
    pub fn settle_board(&mut self) {
        self.set_phase(BoardPhase::Shuffling);
        let mut reshuffles = 0u32;
        while self
            .match_finder
            .find_best_match(&self.grid.snapshot())
            .is_some()
        {
            self.grid.randomize(&self.catalog, &mut self.rng);
            reshuffles += 1;
        }
        if reshuffles > 0 {
            trace!(target: "board_engine", "Board settled after {} reshuffles", reshuffles);
            self.event_emitter
                .emit(&BoardEvent::BoardSettled { reshuffles });
        }
        self.set_phase(BoardPhase::Idle);
    }

    // --- outcome transitions ---

    fn handle_win(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.timer.stop();
        let remaining = self.timer.remaining();
        self.outcome = Some(SessionOutcome::Won { remaining });
        trace!(target: "board_engine", "Session won with {:?} on the clock", remaining);
        self.event_emitter.emit(&BoardEvent::GameWon {
            score: self.score.current_score(),
            remaining,
        });
        if self.levels.advance() {
            self.emit_levels_changed();
        }
    }

    fn handle_lose(&mut self) {
        self.timer.stop();
        let progress = self.score.progress();
        self.outcome = Some(SessionOutcome::Lost { progress });
        trace!(target: "board_engine", "Session lost at progress {}", progress);
        self.event_emitter.emit(&BoardEvent::GameLost {
            score: self.score.current_score(),
            progress,
        });
    }

    fn emit_levels_changed(&mut self) {
        self.event_emitter.emit(&BoardEvent::LevelsChanged {
            current_level: self.levels.current_level(),
            unlocked_levels: self.levels.unlocked_levels(),
        });
    }

    fn set_phase(&mut self, next: BoardPhase) {
        if !self.phase.can_transition_to(next) {
            error!(target: "board_engine", "Illegal phase transition {} -> {}", self.phase, next);
            debug_assert!(false, "illegal phase transition");
        }
        self.phase = next;
    }

    // --- observers ---

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn levels(&self) -> &LevelProgression {
        &self.levels
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}
