use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{error, trace};
use uuid::Uuid;

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{BoardEvent, SessionRecord, PROGRESS_GOAL};

/// Listens on the board event surface and keeps a persisted history of
/// finished sessions. Load failures fall back to an empty history; save
/// failures are logged and never fatal.
pub struct StatsManager {
    path: PathBuf,
    records: Vec<SessionRecord>,
    live_session: Option<(u32, Uuid)>,
    subscription: Option<Unsubscriber<BoardEvent>>,
}

impl Destroyable for StatsManager {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl StatsManager {
    pub fn new(path: PathBuf, observer: EventObserver<BoardEvent>) -> Rc<RefCell<Self>> {
        let records = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        let manager = Rc::new(RefCell::new(Self {
            path,
            records,
            live_session: None,
            subscription: None,
        }));

        let handler = Rc::clone(&manager);
        let subscription = observer.subscribe(move |event| {
            handler.borrow_mut().handle_event(event);
        });
        manager.borrow_mut().subscription = Some(subscription);
        manager
    }

    fn handle_event(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::SessionStarted { level, session_id } => {
                self.live_session = Some((*level, *session_id));
            }
            BoardEvent::GameWon { score, remaining } => {
                self.record_outcome(true, *score, PROGRESS_GOAL, *remaining);
            }
            BoardEvent::GameLost { score, progress } => {
                self.record_outcome(false, *score, *progress, Duration::ZERO);
            }
            _ => (),
        }
    }

    fn record_outcome(&mut self, won: bool, score: u32, progress: u32, remaining: Duration) {
        let (level, session_id) = match self.live_session.take() {
            Some(live) => live,
            None => {
                error!(target: "stats", "Session outcome without a live session, dropping record");
                return;
            }
        };
        let record = SessionRecord {
            level,
            won,
            score,
            progress,
            remaining,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_secs() as i64,
            session_id,
        };
        trace!(target: "stats", "Recording session: {:?}", record);
        self.records.push(record);
        self.save();
    }

    fn save(&self) {
        let write = || -> std::io::Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let contents = serde_json::to_string_pretty(&self.records)?;
            fs::write(&self.path, contents)
        };
        if let Err(e) = write() {
            error!(target: "stats", "Failed to save stats: {}", e);
        }
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn wins(&self) -> usize {
        self.records.iter().filter(|record| record.won).count()
    }

    pub fn losses(&self) -> usize {
        self.records.iter().filter(|record| !record.won).count()
    }

    pub fn best_score(&self, level: u32) -> Option<u32> {
        self.records
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.score)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::model::TileType;

    fn temp_stats_path() -> PathBuf {
        std::env::temp_dir()
            .join("matchgrid-tests")
            .join(format!("stats-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_records_win_with_session_context() {
        let path = temp_stats_path();
        let (emitter, observer) = Channel::<BoardEvent>::new();
        let manager = StatsManager::new(path.clone(), observer);

        let session_id = Uuid::new_v4();
        emitter.emit(&BoardEvent::SessionStarted {
            level: 3,
            session_id,
        });
        emitter.emit(&BoardEvent::GameWon {
            score: 1250,
            remaining: Duration::from_secs(14),
        });

        let manager = manager.borrow();
        assert_eq!(manager.wins(), 1);
        assert_eq!(manager.losses(), 0);
        let record = &manager.records()[0];
        assert_eq!(record.level, 3);
        assert_eq!(record.score, 1250);
        assert_eq!(record.session_id, session_id);
        assert_eq!(record.progress, PROGRESS_GOAL);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_history_survives_reload() {
        let path = temp_stats_path();
        {
            let (emitter, observer) = Channel::<BoardEvent>::new();
            let _manager = StatsManager::new(path.clone(), observer);
            emitter.emit(&BoardEvent::SessionStarted {
                level: 1,
                session_id: Uuid::new_v4(),
            });
            emitter.emit(&BoardEvent::GameLost {
                score: 300,
                progress: 24,
            });
        }

        let (_emitter, observer) = Channel::<BoardEvent>::new();
        let manager = StatsManager::new(path.clone(), observer);
        let manager = manager.borrow();
        assert_eq!(manager.losses(), 1);
        assert_eq!(manager.records()[0].progress, 24);
        assert_eq!(manager.records()[0].remaining, Duration::ZERO);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_best_score_per_level() {
        let path = temp_stats_path();
        let (emitter, observer) = Channel::<BoardEvent>::new();
        let manager = StatsManager::new(path.clone(), observer);

        for score in [400, 900, 650] {
            emitter.emit(&BoardEvent::SessionStarted {
                level: 2,
                session_id: Uuid::new_v4(),
            });
            emitter.emit(&BoardEvent::GameLost {
                score,
                progress: 40,
            });
        }

        assert_eq!(manager.borrow().best_score(2), Some(900));
        assert_eq!(manager.borrow().best_score(7), None);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let path = temp_stats_path();
        let (emitter, observer) = Channel::<BoardEvent>::new();
        let manager = StatsManager::new(path.clone(), observer);

        emitter.emit(&BoardEvent::MatchResolved {
            tile_type: TileType::new(0, "tile-0"),
            tile_count: 3,
        });
        emitter.emit(&BoardEvent::ScoreChanged {
            score: 50,
            progress: 4,
        });
        // outcome without a session start is dropped, not recorded
        emitter.emit(&BoardEvent::GameLost {
            score: 50,
            progress: 4,
        });

        assert!(manager.borrow().records().is_empty());

        let _ = std::fs::remove_file(path);
    }
}
