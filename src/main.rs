use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;

use matchgrid::events::Channel;
use matchgrid::game::collaborators::{BoardAnimator, NullAudio};
use matchgrid::game::persistence::JsonFileStore;
use matchgrid::game::settings::{data_dir, Settings};
use matchgrid::game::stats_manager::StatsManager;
use matchgrid::game::{BoardEngine, RunScanner};
use matchgrid::model::{BoardCommand, BoardEvent, Tile, TileType, TileTypeCatalog};

/// Stand-in renderer: completes every animation instantly, logging what a
/// real frontend would tween over `tween` seconds.
struct TraceAnimator {
    tween: Duration,
}

impl BoardAnimator for TraceAnimator {
    fn play_swap(&mut self, a: &Tile, b: &Tile) {
        log::debug!(target: "animator", "swap {} <-> {} over {:?}", a, b, self.tween);
    }

    fn play_deflate(&mut self, tiles: &[Tile]) {
        log::debug!(target: "animator", "deflate {} tiles over {:?}", tiles.len(), self.tween);
    }

    fn play_inflate(&mut self, tiles: &[Tile]) {
        log::debug!(target: "animator", "inflate {} tiles over {:?}", tiles.len(), self.tween);
    }
}

fn demo_catalog() -> TileTypeCatalog {
    TileTypeCatalog::new(vec![
        TileType::new(0, "apple"),
        TileType::new(1, "pear"),
        TileType::new(2, "grape"),
        TileType::new(3, "lemon"),
        TileType::new(4, "cherry"),
        TileType::new(5, "plum"),
    ])
}

/// Headless demo: plays random adjacent swaps against the clock, one
/// one-second tick per attempt, until the session ends.
fn main() {
    env_logger::init();

    let settings = Settings::load();
    let (command_emitter, command_observer) = Channel::new();
    let (event_emitter, event_observer) = Channel::new();

    let finished = Rc::new(Cell::new(false));
    let finished_flag = Rc::clone(&finished);
    let _printer = event_observer.subscribe(move |event: &BoardEvent| match event {
        BoardEvent::SessionStarted { level, .. } => {
            println!("level {} started", level);
        }
        BoardEvent::MatchResolved {
            tile_type,
            tile_count,
        } => {
            println!("matched {} x{}", tile_type.asset, tile_count);
        }
        BoardEvent::GameWon { score, remaining } => {
            println!(
                "won with {} points and {}s to spare",
                score,
                remaining.as_secs()
            );
            finished_flag.set(true);
        }
        BoardEvent::GameLost { score, progress } => {
            println!("time up at {} points ({}% of goal)", score, progress);
            finished_flag.set(true);
        }
        BoardEvent::LevelsChanged {
            current_level,
            unlocked_levels,
        } => {
            println!(
                "advanced to level {}, {} levels unlocked",
                current_level, unlocked_levels
            );
        }
        _ => (),
    });

    let _stats = StatsManager::new(data_dir().join("stats.json"), event_observer.clone());

    let store = JsonFileStore::open(data_dir().join("levels.json"));
    let _engine = BoardEngine::new(
        command_observer,
        event_emitter,
        settings.clone(),
        demo_catalog(),
        Box::new(RunScanner),
        Box::new(TraceAnimator {
            tween: settings.tile_tween_duration,
        }),
        Box::new(NullAudio),
        Box::new(store),
        Settings::seed_from_env(),
    )
    .expect("demo board configuration is valid");

    command_emitter.emit(&BoardCommand::StartGame);

    let mut rng = rand::rng();
    while !finished.get() {
        let x = rng.random_range(0..settings.board_width);
        let y = rng.random_range(0..settings.board_height);
        let (nx, ny) = if rng.random_bool(0.5) {
            ((x + 1).min(settings.board_width - 1), y)
        } else {
            (x, (y + 1).min(settings.board_height - 1))
        };
        command_emitter.emit(&BoardCommand::Select { x, y });
        command_emitter.emit(&BoardCommand::Select { x: nx, y: ny });
        command_emitter.emit(&BoardCommand::Tick(Duration::from_secs(1)));
    }
}
