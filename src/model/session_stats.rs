use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finished session, as recorded by the stats manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub level: u32,
    pub won: bool,
    pub score: u32,
    pub progress: u32,
    /// Clock value when the session ended (zero on a loss).
    pub remaining: Duration,
    pub timestamp: i64,
    pub session_id: Uuid,
}
